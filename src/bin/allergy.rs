//! Allergy check sheet for the trip: keep a list of allergens and print the
//! Korean sentence to show restaurant staff.
//!
//! Usage:
//!   cargo run --bin allergy -- list            # Catalog with current selection
//!   cargo run --bin allergy -- toggle 卵 えび   # Select or deselect items
//!   cargo run --bin allergy -- phrase          # Korean and Japanese sentences
//!   cargo run --bin allergy -- clear           # Forget the selection
//!
//! Optional environment variables:
//! - ALLERGY_STORE (defaults to data/selected_allergies.json)

use anyhow::Result;
use tracing::{info, warn};
use wedding_invitation::allergy::{korean_name, AllergySelection, SelectionStore, CATALOG};

fn print_usage() {
    println!("Usage: allergy <command>");
    println!();
    println!("Commands:");
    println!("  list               Show the catalog and what is selected");
    println!("  toggle <item>...   Select or deselect items by Japanese name");
    println!("  phrase             Print the sentences for restaurant staff");
    println!("  clear              Deselect everything");
}

fn list_command(selection: &AllergySelection) {
    for category in CATALOG {
        let count = selection.selected_in(category);
        if count > 0 {
            println!("\n{} ({})", category.category, count);
        } else {
            println!("\n{}", category.category);
        }
        for item in category.items {
            let mark = if selection.contains(item.ja) { "[x]" } else { "[ ]" };
            println!("  {} {} ({})", mark, item.ja, item.ko);
        }
    }
}

fn phrase_command(selection: &AllergySelection) {
    if selection.is_empty() {
        println!("Nothing selected. Use `allergy toggle <item>` first.");
        return;
    }
    println!("\n========== 한국어 ==========");
    println!("{}", selection.korean_phrase());
    println!("\n========== 日本語 ==========");
    println!("{}", selection.japanese_phrase());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wedding_invitation=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let path = std::env::var("ALLERGY_STORE")
        .unwrap_or_else(|_| "data/selected_allergies.json".to_string());
    let store = SelectionStore::new(path);
    let mut selection = store.load()?;

    match args[1].as_str() {
        "list" => list_command(&selection),
        "toggle" => {
            for item in &args[2..] {
                if korean_name(item).is_none() {
                    warn!("{} is not in the catalog", item);
                }
                let selected = selection.toggle(item);
                println!("{} {}", if selected { "+" } else { "-" }, item);
            }
            store.save(&selection)?;
            info!("Saved {} items to {}", selection.items().len(), store.path().display());
        }
        "phrase" => phrase_command(&selection),
        "clear" => {
            selection.clear();
            store.save(&selection)?;
            println!("Selection cleared");
        }
        "--help" | "-h" | "help" => print_usage(),
        command => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
