// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::store;
use crate::utils::{fmt_money, id_for_goal, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("deposit", sub)) => deposit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let target = engine::positive_amount(sub.get_one::<String>("target").unwrap())?;
    let icon = sub.get_one::<String>("icon").unwrap();
    let color = sub.get_one::<String>("color").unwrap();
    store::insert_goal(conn, name, icon, color, target)?;
    println!("Created goal '{}' targeting {}", name, fmt_money(&target));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = store::fetch_goals(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &goals)? {
        let mut data = Vec::new();
        for g in &goals {
            let pct = engine::goal_percentage(g.target_amount, g.current_amount);
            let remaining = (g.target_amount - g.current_amount).max(Decimal::ZERO);
            data.push(vec![
                g.name.clone(),
                fmt_money(&g.target_amount),
                fmt_money(&g.current_amount),
                fmt_money(&remaining),
                format!("{}%", pct),
            ]);
        }
        println!(
            "{}",
            pretty_table(&["Goal", "Target", "Saved", "Remaining", "Progress"], data)
        );
    }
    Ok(())
}

fn deposit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("goal").unwrap();
    // Reject zero/negative/garbage here; deposits only ever add.
    let amount = engine::positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let goal_id = id_for_goal(conn, name)?;
    let new_total = store::deposit_to_goal(conn, goal_id, amount)?;
    println!(
        "Deposited {} into '{}' (saved: {})",
        fmt_money(&amount),
        name,
        fmt_money(&new_total)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let goal_id = id_for_goal(conn, name)?;
    store::delete_goal(conn, goal_id)?;
    println!("Removed goal '{}'", name);
    Ok(())
}
