//! Loading the loan policy from disk and lending under it
#![allow(clippy::expect_used)]

use std::fs;

use chrono::NaiveDate;
use lending_catalog::{Catalog, Config, ConfigError, Fine, FixedClock, Item, LoanPolicy};
use tempfile::TempDir;

/// Write `content` to `lending.toml` inside a fresh temp dir
fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("lending.toml");
    fs::write(&path, content).expect("write config");
    (dir, path)
}

#[test]
fn loaded_policy_drives_fines() {
    let (_dir, path) = write_config("[loans]\nfine_per_day = 2.0\nmax_history = 10\n");
    let config = Config::load(&path).expect("valid config");
    assert_eq!(config.loans, LoanPolicy { fine_per_day: 2.0, max_history: 10 });

    let start = NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date");
    let clock = FixedClock::new(start);
    let mut catalog = Catalog::new(config.loans, clock.clone());
    catalog.add_item(Item::book(105, "Death Note Vol. 1", "Tsugumi Ohba & Takeshi Obata", 195));

    assert_eq!(catalog.borrow(105, 14), Ok(NaiveDate::from_ymd_opt(2025, 1, 24).expect("date")));
    clock.advance(20);
    assert_eq!(catalog.return_item(105), Ok(Some(Fine { days_overdue: 6, amount: 12.0 })));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("absent.toml");

    let err = Config::load(&path).expect_err("file does not exist");
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let (_dir, path) = write_config("[loans\nfine_per_day = 2.0\n");

    let err = Config::load(&path).expect_err("invalid toml");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn empty_file_gives_default_policy() {
    let (_dir, path) = write_config("");
    let config = Config::load(&path).expect("empty config is valid");
    assert_eq!(config.loans, LoanPolicy::default());
    assert_eq!(config.loans.fine_per_day.to_string(), "10");
}
