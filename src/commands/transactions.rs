// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::engine;
use crate::models::{TxKind, TxStatus};
use crate::store::{self, TxFilter};
use crate::utils::{
    fmt_money, id_for_category, maybe_print_json, month_range, parse_date, parse_month,
    pretty_table,
};
use anyhow::{Context, Result};
use regex::Regex;
use rusqlite::Connection;
use serde::Serialize;

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
    let amount = engine::positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let kind = TxKind::parse(sub.get_one::<String>("type").unwrap()).unwrap();
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(conn, c))
        .transpose()?;
    let status = if sub.get_flag("pending") {
        TxStatus::Pending
    } else {
        TxStatus::Paid
    };

    store::insert_transaction(conn, date, description, amount, kind, category_id, status)?;
    println!(
        "Recorded {} {} '{}' on {}",
        kind.as_str(),
        fmt_money(&amount),
        description,
        date
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Type", "Category", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if store::delete_transaction(conn, id)? {
        println!("Removed transaction {}", id);
    } else {
        println!("Transaction {} not found", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub status: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut filter = TxFilter::default();
    if let Some(month) = sub.get_one::<String>("month") {
        filter.range = Some(month_range(&parse_month(month)?)?);
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        filter.kind = TxKind::parse(kind);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        filter.category_id = Some(id_for_category(conn, cat)?);
    }
    filter.limit = sub.get_one::<usize>("limit").copied();

    let search = sub
        .get_one::<String>("search")
        .map(|p| Regex::new(&format!("(?i){}", p)).with_context(|| format!("Invalid pattern '{}'", p)))
        .transpose()?;

    let category_names: HashMap<i64, String> = store::fetch_categories(conn, None)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let data = store::fetch_transactions(conn, &filter)?
        .into_iter()
        .filter(|t| {
            search
                .as_ref()
                .map(|re| re.is_match(&t.description))
                .unwrap_or(true)
        })
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description,
            amount: fmt_money(&t.amount),
            kind: t.kind.as_str().to_string(),
            category: t
                .category_id
                .and_then(|id| category_names.get(&id).cloned())
                .unwrap_or_default(),
            status: t.status.as_str().to_string(),
        })
        .collect();
    Ok(data)
}
