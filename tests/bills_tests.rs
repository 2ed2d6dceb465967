// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use grana::{cli, commands::bills, store};
use rusqlite::Connection;

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
        CREATE TABLE recurring_bills(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            due_day INTEGER NOT NULL,
            category_id INTEGER
        );
        "#,
    )
    .unwrap();
    conn
}

fn dispatch(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["grana", "bill"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("bill", m)) = matches.subcommand() {
        bills::handle(conn, m)
    } else {
        panic!("bill command not parsed");
    }
}

#[test]
fn bills_come_back_in_due_day_order() {
    let conn = setup();
    dispatch(
        &conn,
        &["add", "--description", "Rent", "--amount", "1200", "--due-day", "5"],
    )
    .unwrap();
    dispatch(
        &conn,
        &["add", "--description", "Internet", "--amount", "99.90", "--due-day", "2"],
    )
    .unwrap();

    let bills = store::fetch_bills(&conn).unwrap();
    let days: Vec<u32> = bills.iter().map(|b| b.due_day).collect();
    assert_eq!(days, vec![2, 5]);
    assert_eq!(bills[0].description, "Internet");
}

#[test]
fn due_day_outside_the_calendar_is_rejected() {
    let conn = setup();
    let res = dispatch(
        &conn,
        &["add", "--description", "Ghost", "--amount", "10", "--due-day", "32"],
    );
    assert!(res.is_err());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM recurring_bills", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn rm_deletes_by_id() {
    let conn = setup();
    dispatch(
        &conn,
        &["add", "--description", "Gym", "--amount", "80", "--due-day", "10"],
    )
    .unwrap();
    dispatch(&conn, &["rm", "1"]).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM recurring_bills", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
