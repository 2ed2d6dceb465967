// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;

use crate::engine;
use crate::store;
use crate::utils::{fmt_money, id_for_category, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap();
    let amount = engine::positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let due_day = engine::day_of_month(*sub.get_one::<u32>("due-day").unwrap())?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(conn, c))
        .transpose()?;
    store::insert_bill(conn, description, amount, due_day, category_id)?;
    println!(
        "Scheduled '{}' for {} on day {}",
        description,
        fmt_money(&amount),
        due_day
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let bills = store::fetch_bills(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &bills)? {
        let today = chrono::Utc::now().date_naive().day();
        let mut data = Vec::new();
        for b in &bills {
            let when = if today > b.due_day {
                format!("day {} (late?)", b.due_day)
            } else {
                format!("day {}", b.due_day)
            };
            data.push(vec![
                b.id.to_string(),
                b.description.clone(),
                fmt_money(&b.amount),
                when,
            ]);
        }
        println!("{}", pretty_table(&["ID", "Bill", "Amount", "Due"], data));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if store::delete_bill(conn, id)? {
        println!("Removed bill {}", id);
    } else {
        println!("Bill {} not found", id);
    }
    Ok(())
}
