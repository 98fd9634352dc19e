//! Submit an RSVP from the command line through the same form logic the page uses.
//!
//! Usage:
//!   cargo run --bin rsvp -- --name "Kim Minji" --phone 1012345678 --guests 2
//!   cargo run --bin rsvp -- --locale ja --name "田中" --email tanaka@example.jp --attend no
//!
//! Flags:
//!   --locale <ko|ja>        Form locale (defaults to ko)
//!   --name <name>           Guest name (required)
//!   --attend <yes|no>       Attendance (defaults to yes)
//!   --guests <0-10>         Accompanying guests (defaults to 0)
//!   --country-code <code>   Phone country code (defaults per locale)
//!   --phone <digits>        Phone number (required for ko)
//!   --email <address>       Email address (required for ja)
//!   --message <text>        Message to the couple
//!
//! Optional environment variables:
//! - RSVP_ENDPOINT (defaults to http://localhost:8080/api/rsvp)

use anyhow::{bail, Context, Result};
use tracing::info;
use wedding_invitation::i18n::Locale;
use wedding_invitation::rsvp::{Attendance, HttpRsvpClient, RsvpForm, SubmitError};

fn print_usage() {
    println!("Usage: rsvp --name <name> [--locale ko|ja] [--attend yes|no] [--guests N]");
    println!("            [--country-code +82] [--phone DIGITS] [--email ADDRESS] [--message TEXT]");
}

/// Pull the value following `flag`, if the flag is present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|arg| arg == flag) {
        Some(index) => match args.get(index + 1) {
            Some(value) => Ok(Some(value.as_str())),
            None => bail!("{} needs a value", flag),
        },
        None => Ok(None),
    }
}

fn build_form(args: &[String]) -> Result<RsvpForm> {
    let locale = match flag_value(args, "--locale")? {
        Some(code) => Locale::from_code(code)?,
        None => Locale::fallback(),
    };
    let mut form = RsvpForm::new(locale);

    if let Some(name) = flag_value(args, "--name")? {
        form.set_name(name);
    }
    match flag_value(args, "--attend")? {
        Some("yes") | None => form.set_attendance(Some(Attendance::Yes)),
        Some("no") => form.set_attendance(Some(Attendance::No)),
        Some(other) => bail!("--attend must be yes or no, got '{}'", other),
    }
    if let Some(guests) = flag_value(args, "--guests")? {
        let guests = guests
            .parse()
            .with_context(|| format!("--guests must be a number, got '{}'", guests))?;
        form.set_guests(guests);
    }
    if let Some(code) = flag_value(args, "--country-code")? {
        form.set_country_code(code);
    }
    if let Some(phone) = flag_value(args, "--phone")? {
        form.set_phone(phone);
    }
    if let Some(email) = flag_value(args, "--email")? {
        form.set_email(email);
    }
    if let Some(message) = flag_value(args, "--message")? {
        form.set_message(message);
    }

    Ok(form)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wedding_invitation=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let mut form = build_form(&args)?;
    let endpoint = std::env::var("RSVP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:8080/api/rsvp".to_string());
    let client = HttpRsvpClient::new(endpoint);

    info!("Submitting {} RSVP to {}", form.locale(), client.endpoint());
    println!("[{}]", form.submit_label());

    match form.submit(&client).await {
        Ok(()) => {}
        Err(SubmitError::Validation(_)) => {
            for (field, _) in form.errors().iter() {
                if let Some(message) = form.field_message(*field) {
                    eprintln!("{:?}: {}", field, message);
                }
            }
            std::process::exit(1);
        }
        Err(e) => {
            if let Some(message) = form.status_message() {
                eprintln!("{}", message);
            }
            return Err(e.into());
        }
    }

    if let Some(message) = form.status_message() {
        println!("{}", message);
    }
    Ok(())
}
