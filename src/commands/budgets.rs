// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::engine;
use crate::store;
use crate::utils::{
    fmt_money, id_for_category, maybe_print_json, month_key, month_range, parse_month,
    pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("report", sub)) => report(conn, sub)?,
        Some(("suggest", sub)) => suggest(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap();
    let limit = engine::positive_amount(sub.get_one::<String>("limit").unwrap())?;
    let cat_id = id_for_category(conn, cat)?;
    store::upsert_budget(conn, cat_id, limit)?;
    println!("Budget set for {} = {}", cat, fmt_money(&limit));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let names = category_names(conn)?;
    let budgets = store::fetch_budgets(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let mut data = Vec::new();
        for b in &budgets {
            data.push(vec![
                names
                    .get(&b.category_id)
                    .cloned()
                    .unwrap_or_else(|| "(missing category)".into()),
                fmt_money(&b.limit_amount),
            ]);
        }
        println!("{}", pretty_table(&["Category", "Limit"], data));
    }
    Ok(())
}

#[derive(Serialize)]
struct ReportRow {
    category: String,
    limit_amount: String,
    spent: String,
    percentage: String,
    status: String,
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => month_key(chrono::Utc::now().date_naive()),
    };
    let snapshot = store::load_month_snapshot(conn, month_range(&month)?)?;
    let statuses =
        engine::budget_statuses(&snapshot.budgets, &snapshot.transactions, &snapshot.bills);
    let names: HashMap<i64, String> = snapshot
        .categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    let rows: Vec<ReportRow> = statuses
        .iter()
        .map(|s| ReportRow {
            category: names
                .get(&s.category_id)
                .cloned()
                .unwrap_or_else(|| "(missing category)".into()),
            limit_amount: fmt_money(&s.limit_amount),
            spent: fmt_money(&s.spent),
            percentage: format!("{:.1}", s.percentage),
            status: s.tier.as_str().to_string(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| vec![r.category, r.limit_amount, r.spent, r.percentage, r.status])
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "%", "Status"], data)
        );
    }
    Ok(())
}

fn suggest(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let apply = sub.get_flag("apply");
    let profile = store::fetch_profile(conn)?;
    let categories = store::fetch_categories(conn, None)?;
    let existing = store::fetch_budgets(conn)?;

    let suggestions = engine::suggest_budgets(profile.monthly_income, &categories, &existing);
    if suggestions.is_empty() {
        if !existing.is_empty() {
            println!("Budgets already configured; keeping your limits untouched.");
        } else {
            println!("Set a positive monthly income first: grana profile set --income <amount>");
        }
        return Ok(());
    }

    let names: HashMap<i64, String> = categories.iter().map(|c| (c.id, c.name.clone())).collect();
    let mut data = Vec::new();
    for s in &suggestions {
        data.push(vec![
            names.get(&s.category_id).cloned().unwrap_or_default(),
            format!("{:.0}%", s.share * Decimal::ONE_HUNDRED),
            fmt_money(&s.limit_amount),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Category", "Share of income", "Suggested limit"], data)
    );

    if apply {
        for s in &suggestions {
            store::upsert_budget(conn, s.category_id, s.limit_amount)?;
        }
        println!("Applied {} suggested limits", suggestions.len());
    } else {
        println!("Run with --apply to save these limits");
    }
    Ok(())
}

fn category_names(conn: &Connection) -> Result<HashMap<i64, String>> {
    Ok(store::fetch_categories(conn, None)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}
