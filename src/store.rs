// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row access for every collection: fetch with filters, insert, update
//! by id, delete by id. Fetches return fully-materialized snapshots for
//! the engine to aggregate; nothing is cached, callers re-fetch after a
//! mutation. This is also the sign-normalization boundary: legacy rows
//! that stored expenses negative come back as magnitudes here.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{
    Budget, Category, Goal, Integration, Profile, RecurringBill, Transaction, TxKind, TxStatus,
};

fn parse_amount(raw: &str, table: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' in {}", raw, table))
}

fn parse_kind(raw: &str) -> Result<TxKind> {
    TxKind::parse(raw).ok_or_else(|| anyhow!("Unknown type '{}'", raw))
}

fn parse_status(raw: &str) -> Result<TxStatus> {
    TxStatus::parse(raw).ok_or_else(|| anyhow!("Unknown status '{}'", raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' in transactions", raw))
}

#[derive(Debug, Default, Clone)]
pub struct TxFilter {
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub kind: Option<TxKind>,
    pub category_id: Option<i64>,
    pub limit: Option<usize>,
}

impl TxFilter {
    pub fn month(range: (NaiveDate, NaiveDate)) -> Self {
        TxFilter {
            range: Some(range),
            ..Default::default()
        }
    }
}

pub fn fetch_transactions(conn: &Connection, filter: &TxFilter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, date, description, amount, type, category_id, status FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some((start, end)) = filter.range {
        sql.push_str(" AND date>=? AND date<=?");
        params_vec.push(start.to_string());
        params_vec.push(end.to_string());
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND type=?");
        params_vec.push(kind.as_str().to_string());
    }
    if let Some(cat) = filter.category_id {
        sql.push_str(" AND category_id=?");
        params_vec.push(cat.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date_s: String = r.get(1)?;
        let amount_s: String = r.get(3)?;
        let kind_s: String = r.get(4)?;
        let status_s: String = r.get(6)?;
        data.push(Transaction {
            id: r.get(0)?,
            date: parse_date(&date_s)?,
            description: r.get(2)?,
            // magnitude on read; the type column carries the sign
            amount: parse_amount(&amount_s, "transactions")?.abs(),
            kind: parse_kind(&kind_s)?,
            category_id: r.get(5)?,
            status: parse_status(&status_s)?,
        });
    }
    Ok(data)
}

pub fn insert_transaction(
    conn: &Connection,
    date: NaiveDate,
    description: &str,
    amount: Decimal,
    kind: TxKind,
    category_id: Option<i64>,
    status: TxStatus,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(date, description, amount, type, category_id, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            date.to_string(),
            description,
            amount.to_string(),
            kind.as_str(),
            category_id,
            status.as_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn fetch_categories(conn: &Connection, kind: Option<TxKind>) -> Result<Vec<Category>> {
    let mut sql = String::from("SELECT id, name, icon, type, color FROM categories");
    if kind.is_some() {
        sql.push_str(" WHERE type=?1");
    }
    sql.push_str(" ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if let Some(k) = kind {
        stmt.query(params![k.as_str()])?
    } else {
        stmt.query([])?
    };
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind_s: String = r.get(3)?;
        data.push(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            icon: r.get(2)?,
            kind: parse_kind(&kind_s)?,
            color: r.get(4)?,
        });
    }
    Ok(data)
}

pub fn insert_category(
    conn: &Connection,
    name: &str,
    icon: &str,
    kind: TxKind,
    color: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO categories(name, icon, type, color) VALUES (?1,?2,?3,?4)",
        params![name, icon, kind.as_str(), color],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_category(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn fetch_bills(conn: &Connection) -> Result<Vec<RecurringBill>> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, due_day, category_id FROM recurring_bills
         ORDER BY due_day, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(2)?;
        data.push(RecurringBill {
            id: r.get(0)?,
            description: r.get(1)?,
            amount: parse_amount(&amount_s, "recurring_bills")?.abs(),
            due_day: r.get(3)?,
            category_id: r.get(4)?,
        });
    }
    Ok(data)
}

pub fn insert_bill(
    conn: &Connection,
    description: &str,
    amount: Decimal,
    due_day: u32,
    category_id: Option<i64>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO recurring_bills(description, amount, due_day, category_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![description, amount.to_string(), due_day, category_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_bill(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM recurring_bills WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn fetch_budgets(conn: &Connection) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare("SELECT id, category_id, limit_amount FROM budgets")?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let limit_s: String = r.get(2)?;
        data.push(Budget {
            id: r.get(0)?,
            category_id: r.get(1)?,
            limit_amount: parse_amount(&limit_s, "budgets")?.abs(),
        });
    }
    Ok(data)
}

pub fn upsert_budget(conn: &Connection, category_id: i64, limit_amount: Decimal) -> Result<()> {
    conn.execute(
        "INSERT INTO budgets(category_id, limit_amount) VALUES (?1,?2)
         ON CONFLICT(category_id) DO UPDATE SET limit_amount=excluded.limit_amount",
        params![category_id, limit_amount.to_string()],
    )?;
    Ok(())
}

pub fn fetch_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, icon, color, target_amount, current_amount FROM goals
         ORDER BY id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let target_s: String = r.get(4)?;
        let current_s: String = r.get(5)?;
        data.push(Goal {
            id: r.get(0)?,
            name: r.get(1)?,
            icon: r.get(2)?,
            color: r.get(3)?,
            target_amount: parse_amount(&target_s, "goals")?,
            current_amount: parse_amount(&current_s, "goals")?,
        });
    }
    Ok(data)
}

pub fn insert_goal(
    conn: &Connection,
    name: &str,
    icon: &str,
    color: &str,
    target_amount: Decimal,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO goals(name, icon, color, target_amount) VALUES (?1,?2,?3,?4)",
        params![name, icon, color, target_amount.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Additive deposit: reads the stored amount, adds, writes back. The
/// caller validates the deposit amount before getting here.
pub fn deposit_to_goal(conn: &Connection, goal_id: i64, amount: Decimal) -> Result<Decimal> {
    let current_s: String = conn
        .query_row(
            "SELECT current_amount FROM goals WHERE id=?1",
            params![goal_id],
            |r| r.get(0),
        )
        .with_context(|| format!("Goal {} not found", goal_id))?;
    let new_total = parse_amount(&current_s, "goals")? + amount;
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE id=?2",
        params![new_total.to_string(), goal_id],
    )?;
    Ok(new_total)
}

pub fn delete_goal(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM goals WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn fetch_profile(conn: &Connection) -> Result<Profile> {
    let row: Option<(Option<String>, String, u32)> = conn
        .query_row(
            "SELECT full_name, monthly_income, salary_date FROM profiles WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;
    match row {
        Some((full_name, income_s, salary_date)) => Ok(Profile {
            full_name,
            monthly_income: parse_amount(&income_s, "profiles")?,
            salary_date,
        }),
        None => Ok(Profile {
            full_name: None,
            monthly_income: Decimal::ZERO,
            salary_date: 5,
        }),
    }
}

pub fn update_profile(conn: &Connection, profile: &Profile) -> Result<()> {
    conn.execute(
        "INSERT INTO profiles(id, full_name, monthly_income, salary_date)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
             full_name=excluded.full_name,
             monthly_income=excluded.monthly_income,
             salary_date=excluded.salary_date,
             updated_at=datetime('now')",
        params![
            profile.full_name,
            profile.monthly_income.to_string(),
            profile.salary_date
        ],
    )?;
    Ok(())
}

pub fn fetch_integration(conn: &Connection) -> Result<Option<Integration>> {
    let row = conn
        .query_row(
            "SELECT connection_token, chat_id FROM user_integrations WHERE id=1",
            [],
            |r| {
                Ok(Integration {
                    connection_token: r.get(0)?,
                    chat_id: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn upsert_connection_token(conn: &Connection, token: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO user_integrations(id, connection_token) VALUES (1, ?1)
         ON CONFLICT(id) DO UPDATE SET connection_token=excluded.connection_token",
        params![token],
    )?;
    Ok(())
}

pub fn delete_integration(conn: &Connection) -> Result<bool> {
    let n = conn.execute("DELETE FROM user_integrations WHERE id=1", [])?;
    Ok(n > 0)
}

/// Everything the monthly views need, fetched in one pass. Mirrors the
/// rule that aggregates are recomputed from a fresh snapshot after any
/// mutation rather than patched incrementally.
pub struct MonthSnapshot {
    pub profile: Profile,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub bills: Vec<RecurringBill>,
    pub budgets: Vec<Budget>,
}

pub fn load_month_snapshot(
    conn: &Connection,
    range: (NaiveDate, NaiveDate),
) -> Result<MonthSnapshot> {
    Ok(MonthSnapshot {
        profile: fetch_profile(conn)?,
        categories: fetch_categories(conn, None)?,
        transactions: fetch_transactions(conn, &TxFilter::month(range))?,
        bills: fetch_bills(conn)?,
        budgets: fetch_budgets(conn)?,
    })
}
