// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::Datelike;

use crate::engine::{self, BalanceHealth};
use crate::store;
use crate::utils::{fmt_money, month_key, month_range, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Utc::now().date_naive();
    let month = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => month_key(today),
    };
    let range = month_range(&month)?;
    let snapshot = store::load_month_snapshot(conn, range)?;
    let names: HashMap<i64, String> = snapshot
        .categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    let totals = engine::monthly_totals(range.0, &snapshot.transactions, &snapshot.bills);
    let projection = engine::projected_balance(
        snapshot.profile.monthly_income,
        range.0,
        &snapshot.transactions,
        &snapshot.bills,
    );

    match snapshot.profile.full_name.as_deref() {
        Some(name) => println!("Overview for {} ({})", month, name),
        None => println!("Overview for {}", month),
    }
    println!();
    println!(
        "  Total inflow:      {}  (salary {} + extras {})",
        fmt_money(&(snapshot.profile.monthly_income + projection.incomes_made)),
        fmt_money(&snapshot.profile.monthly_income),
        fmt_money(&projection.incomes_made)
    );
    println!(
        "  Total outflow:     {}  (variable {} + fixed {})",
        fmt_money(&(projection.expenses_made + projection.total_recurring)),
        fmt_money(&projection.expenses_made),
        fmt_money(&projection.total_recurring)
    );
    println!("  Pending items:     {}", fmt_money(&totals.pending));
    let note = match projection.health {
        BalanceHealth::Healthy => "in the green",
        BalanceHealth::Danger => "projected negative balance",
    };
    println!(
        "  Projected balance: {}  [{}]",
        fmt_money(&projection.balance),
        note
    );

    let statuses =
        engine::budget_statuses(&snapshot.budgets, &snapshot.transactions, &snapshot.bills);
    println!();
    if statuses.is_empty() {
        println!("No budget limits set. Try: grana budget suggest");
    } else {
        let mut data = Vec::new();
        for s in &statuses {
            data.push(vec![
                names
                    .get(&s.category_id)
                    .cloned()
                    .unwrap_or_else(|| "(missing category)".into()),
                fmt_money(&s.spent),
                fmt_money(&s.limit_amount),
                format!("{:.1}", s.percentage),
                s.tier.as_str().to_string(),
            ]);
        }
        println!(
            "{}",
            pretty_table(&["Budget", "Spent", "Limit", "%", "Status"], data)
        );
    }

    if !snapshot.bills.is_empty() {
        let today_day = today.day();
        let mut data = Vec::new();
        for b in &snapshot.bills {
            let marker = if today_day > b.due_day { " (late?)" } else { "" };
            data.push(vec![
                format!("day {}{}", b.due_day, marker),
                b.description.clone(),
                fmt_money(&b.amount),
            ]);
        }
        println!("{}", pretty_table(&["Due", "Bill", "Amount"], data));
    }

    let top = engine::spending_by_category(
        &snapshot.categories,
        &snapshot.transactions,
        &snapshot.bills,
    );
    if !top.is_empty() {
        let data = top
            .iter()
            .take(4)
            .map(|c| vec![c.name.clone(), fmt_money(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Top spending", "Amount"], data));
    }

    if !snapshot.transactions.is_empty() {
        let data = snapshot
            .transactions
            .iter()
            .take(5)
            .map(|t| {
                let sign = match t.kind {
                    crate::models::TxKind::Income => "+",
                    crate::models::TxKind::Expense => "-",
                };
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    format!("{} {}", sign, fmt_money(&t.amount)),
                    t.category_id
                        .and_then(|id| names.get(&id).cloned())
                        .unwrap_or_else(|| "General".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Recent activity", "Amount", "Category"], data)
        );
    } else {
        println!("No activity this month yet.");
    }
    Ok(())
}
