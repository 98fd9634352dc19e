pub mod allergy;
pub mod api;
pub mod config;
pub mod i18n;
pub mod pages;
pub mod router;
pub mod rsvp;
pub mod sheets;
