//! Scripted lending demo: populate a catalog, borrow, hit an error case and
//! return an item, printing the catalog along the way.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use lending_catalog::{
    Catalog, Clock, Config, ConfigError, Fine, FixedClock, Item, ItemId, LoanPolicy,
    NotificationService, Report, SystemClock, TransitionLogger,
};

/// Command-line arguments for the lending demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose output with detailed operation logs
    #[arg(short, long)]
    verbose: bool,

    /// TOML file with the loan policy
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pin the calendar to this date (YYYY-MM-DD) instead of the system date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Days that pass between the loans and the return
    #[arg(long, default_value_t = 0)]
    days_elapsed: u32,

    /// Print the final catalog as JSON instead of a listing
    #[arg(long)]
    json: bool,

    /// Print the transition history and catalog statistics at the end
    #[arg(long)]
    history: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let policy = match load_policy(args.config.as_deref()) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red().bold());
            return ExitCode::FAILURE;
        }
    };

    let clock = FixedClock::new(args.today.unwrap_or_else(|| SystemClock.today()));
    let mut catalog = Catalog::new(policy, clock.clone());
    catalog.register_observer(Box::new(TransitionLogger));
    catalog.register_observer(Box::new(NotificationService));

    section("Populating the Library");
    for item in demo_items() {
        let title = item.title().to_owned();
        catalog.add_item(item);
        println!("Added '{title}' to the library.");
    }
    rule();
    print!("{}", Report::catalog_listing(&catalog));

    section("Simulating Borrowing");
    borrow(&mut catalog, 105, 14);
    borrow(&mut catalog, 204, 30);
    rule();
    print!("{}", Report::catalog_listing(&catalog));

    section("Testing an Error Case");
    borrow(&mut catalog, 105, 5);
    rule();

    if args.days_elapsed > 0 {
        clock.advance(args.days_elapsed);
        println!("\n{} days later, it is {}.", args.days_elapsed, catalog.today());
    }

    section("Simulating a Return");
    return_item(&mut catalog, 105);
    rule();

    if args.json {
        match Report::snapshot_json(&catalog) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red().bold());
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", Report::catalog_listing(&catalog));
    }

    if args.history {
        println!("\n{}", Report::history_table(catalog.get_history()));
        print!("\n{}", Report::stats(&catalog));
    }

    ExitCode::SUCCESS
}

/// Loan policy from the config file, or the defaults without one
fn load_policy(path: Option<&Path>) -> Result<LoanPolicy, ConfigError> {
    path.map_or_else(|| Ok(LoanPolicy::default()), |path| Config::load(path).map(|config| config.loans))
}

/// The four items the demo starts with
fn demo_items() -> Vec<Item> {
    vec![
        Item::book(101, "Spider-Man: Into the Spider-Verse", "Marvel Comics", 145),
        Item::book(105, "Death Note Vol. 1", "Tsugumi Ohba & Takeshi Obata", 195),
        Item::audiobook(204, "Attack on Titan Vol. 1 (Manga Audio Edition)", "Hajime Isayama", 240),
        Item::e_magazine(301, "National Geographic", "Nat Geo Society", 245),
    ]
}

/// Borrow an item and print the outcome
fn borrow(catalog: &mut Catalog, id: ItemId, days: u32) {
    match catalog.borrow(id, days) {
        Ok(due_date) => {
            let title = catalog.get_item(id).map_or("", Item::title);
            println!("'{title}' has been borrowed. It is due on {}.", due_date.format("%Y-%m-%d"));
        }
        Err(e) => println!("{}", format!("Error: {e}.").red()),
    }
}

/// Return an item and print the outcome, including any fine
fn return_item(catalog: &mut Catalog, id: ItemId) {
    match catalog.return_item(id) {
        Ok(fine) => {
            let title = catalog.get_item(id).map_or("", Item::title);
            if let Some(Fine { amount, .. }) = fine {
                let notice = format!("A fine of \u{20b9}{amount:.2} is due for the late return of '{title}'.");
                println!("{}", notice.yellow());
            }
            println!("'{title}' has been successfully returned.");
        }
        Err(e) => println!("{}", format!("Error: {e}.").red()),
    }
}

/// Print a section heading
fn section(title: &str) {
    println!("\n{}", format!("--- {title} ---").green().bold());
}

/// Print a separator line
fn rule() {
    println!("{}", "-".repeat(30));
}
