// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;

use grana::engine::{self, EngineError};
use grana::{cli, commands::goals};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE goals(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            icon TEXT NOT NULL DEFAULT 'target',
            color TEXT NOT NULL DEFAULT '#10b981',
            target_amount TEXT NOT NULL,
            current_amount TEXT NOT NULL DEFAULT '0'
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO goals(name, target_amount) VALUES('Trip', '5000')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn percentage_clamps_at_one_hundred() {
    assert_eq!(engine::goal_percentage(dec("1000"), dec("2500")), 100);
    assert_eq!(engine::goal_percentage(dec("1000"), dec("1000")), 100);
}

#[test]
fn percentage_is_zero_without_positive_target() {
    assert_eq!(engine::goal_percentage(Decimal::ZERO, dec("300")), 0);
    assert_eq!(engine::goal_percentage(dec("-10"), dec("300")), 0);
}

#[test]
fn percentage_rounds_to_whole_number() {
    assert_eq!(engine::goal_percentage(dec("300"), dec("100")), 33); // 33.33
    assert_eq!(engine::goal_percentage(dec("3"), dec("2")), 67); // 66.67
    assert_eq!(engine::goal_percentage(dec("200"), dec("1")), 1); // 0.5 rounds up
}

#[test]
fn deposit_amounts_are_validated_at_the_boundary() {
    assert!(matches!(
        engine::positive_amount("abc"),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine::positive_amount("-50"),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine::positive_amount("0"),
        Err(EngineError::InvalidAmount(_))
    ));
    // comma decimals are accepted
    assert_eq!(engine::positive_amount("25,50").unwrap(), dec("25.50"));
}

#[test]
fn deposits_accumulate() {
    let conn = setup();

    for _ in 0..2 {
        let cli = cli::build_cli();
        let matches = cli.get_matches_from([
            "grana", "goal", "deposit", "--goal", "Trip", "--amount", "150",
        ]);
        if let Some(("goal", goal_m)) = matches.subcommand() {
            goals::handle(&conn, goal_m).unwrap();
        } else {
            panic!("goal command not parsed");
        }
    }

    let current: String = conn
        .query_row("SELECT current_amount FROM goals WHERE name='Trip'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(current, "300");
}

#[test]
fn deposit_to_unknown_goal_fails() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "grana", "goal", "deposit", "--goal", "Nope", "--amount", "10",
    ]);
    if let Some(("goal", goal_m)) = matches.subcommand() {
        assert!(goals::handle(&conn, goal_m).is_err());
    } else {
        panic!("goal command not parsed");
    }
}
