// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Dangling category references. Aggregation tolerates these
    //    (spend counts as uncategorized), but the user should know.
    for table in ["transactions", "recurring_bills"] {
        let sql = format!(
            "SELECT id, category_id FROM {} WHERE category_id IS NOT NULL
             AND category_id NOT IN (SELECT id FROM categories)",
            table
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let cat: i64 = r.get(1)?;
            rows.push(vec![
                "dangling_category".into(),
                format!("{} row {} -> category {}", table, id, cat),
            ]);
        }
    }

    // 2) Amounts that no longer parse as decimals
    for table in ["transactions", "recurring_bills", "goals", "budgets"] {
        let col = match table {
            "goals" => "target_amount",
            "budgets" => "limit_amount",
            _ => "amount",
        };
        let sql = format!("SELECT id, {} FROM {}", col, table);
        let mut stmt = conn.prepare(&sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let raw: String = r.get(1)?;
            if raw.parse::<Decimal>().is_err() {
                rows.push(vec![
                    "bad_amount".into(),
                    format!("{} row {}: '{}'", table, id, raw),
                ]);
            }
        }
    }

    // 3) Due days outside the calendar (legacy imports)
    let mut stmt =
        conn.prepare("SELECT id, due_day FROM recurring_bills WHERE due_day < 1 OR due_day > 31")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let day: i64 = r.get(1)?;
        rows.push(vec![
            "bad_due_day".into(),
            format!("recurring_bills row {}: day {}", id, day),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
