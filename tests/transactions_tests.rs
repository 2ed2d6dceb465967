// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use grana::models::TxKind;
use grana::store::{self, TxFilter};
use grana::utils::month_range;
use grana::{cli, commands::transactions, engine};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE categories(
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            icon TEXT NOT NULL DEFAULT 'circle',
            type TEXT NOT NULL,
            color TEXT NOT NULL DEFAULT '#64748b'
        );
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            type TEXT NOT NULL,
            category_id INTEGER,
            status TEXT NOT NULL DEFAULT 'paid'
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO categories(id,name,type) VALUES (1,'Food','expense')",
        [],
    )
    .unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(date,description,amount,type,category_id) VALUES (?1,'Lunch','10','expense',1)",
            params![format!("2025-01-0{}", i)],
        )
        .unwrap();
    }
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["grana", "tx", "list"];
    argv.extend_from_slice(args);
    cli::build_cli().get_matches_from(argv)
}

fn query(conn: &Connection, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let matches = list_matches(args);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m).unwrap();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = query(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_filters_by_month_and_type() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,description,amount,type) VALUES ('2025-02-10','Refund','30','income')",
        [],
    )
    .unwrap();
    let rows = query(&conn, &["--month", "2025-01"]);
    assert_eq!(rows.len(), 3);
    let rows = query(&conn, &["--month", "2025-02", "--type", "income"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Refund");
}

#[test]
fn search_is_case_insensitive_regex() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,description,amount,type) VALUES ('2025-01-09','Market groceries','55','expense')",
        [],
    )
    .unwrap();
    let rows = query(&conn, &["--search", "GROCER"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Market groceries");
}

#[test]
fn legacy_signed_amounts_normalize_to_magnitudes() {
    let conn = setup();
    // legacy web rows stored expenses negative
    conn.execute(
        "INSERT INTO transactions(date,description,amount,type,category_id) VALUES ('2025-01-04','Old row','-45.00','expense',1)",
        [],
    )
    .unwrap();
    let fetched = store::fetch_transactions(&conn, &TxFilter::default()).unwrap();
    let legacy = fetched.iter().find(|t| t.description == "Old row").unwrap();
    assert_eq!(legacy.amount, "45.00".parse::<Decimal>().unwrap());
    assert_eq!(legacy.kind, TxKind::Expense);
}

#[test]
fn delete_then_refetch_matches_excluding_the_row() {
    let conn = setup();
    let range = month_range("2025-01").unwrap();
    let reference = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    let before = store::fetch_transactions(&conn, &TxFilter::month(range)).unwrap();
    let doomed = before[0].id;
    let excluded: Vec<_> = before.iter().filter(|t| t.id != doomed).cloned().collect();
    let expected = engine::monthly_totals(reference, &excluded, &[]);

    assert!(store::delete_transaction(&conn, doomed).unwrap());
    let after = store::fetch_transactions(&conn, &TxFilter::month(range)).unwrap();
    let recomputed = engine::monthly_totals(reference, &after, &[]);

    assert_eq!(recomputed, expected);
}
