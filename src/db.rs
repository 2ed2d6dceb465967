// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Grana", "grana"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("grana.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    seed_default_categories(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    -- Single-user install: exactly one row, id = 1.
    CREATE TABLE IF NOT EXISTS profiles(
        id INTEGER PRIMARY KEY CHECK(id = 1),
        full_name TEXT,
        monthly_income TEXT NOT NULL DEFAULT '0',
        salary_date INTEGER NOT NULL DEFAULT 5 CHECK(salary_date BETWEEN 1 AND 31),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        icon TEXT NOT NULL DEFAULT 'circle',
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        color TEXT NOT NULL DEFAULT '#64748b'
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category_id INTEGER,
        status TEXT NOT NULL DEFAULT 'paid' CHECK(status IN ('paid','pending')),
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS recurring_bills(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        due_day INTEGER NOT NULL CHECK(due_day BETWEEN 1 AND 31),
        category_id INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );

    -- One current limit per category; saving replaces it.
    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_id INTEGER NOT NULL UNIQUE,
        limit_amount TEXT NOT NULL,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        icon TEXT NOT NULL DEFAULT 'target',
        color TEXT NOT NULL DEFAULT '#10b981',
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS user_integrations(
        id INTEGER PRIMARY KEY CHECK(id = 1),
        connection_token TEXT,
        chat_id TEXT
    );
    "#,
    )?;
    Ok(())
}

/// First-run seed so budgets and the suggestion heuristic have something
/// to attach to. Skipped once the user has any category of their own.
fn seed_default_categories(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(());
    }
    let defaults: &[(&str, &str, &str, &str)] = &[
        ("Food", "utensils", "expense", "#f97316"),
        ("Housing", "home", "expense", "#0ea5e9"),
        ("Transport", "car", "expense", "#8b5cf6"),
        ("Health", "heart-pulse", "expense", "#ef4444"),
        ("Leisure", "gamepad", "expense", "#ec4899"),
        ("Subscriptions", "repeat", "expense", "#14b8a6"),
        ("Education", "book", "expense", "#eab308"),
        ("Other", "circle", "expense", "#64748b"),
        ("Salary", "wallet", "income", "#10b981"),
        ("Freelance", "briefcase", "income", "#22c55e"),
        ("Investments", "trending-up", "income", "#84cc16"),
    ];
    for (name, icon, kind, color) in defaults {
        conn.execute(
            "INSERT INTO categories(name, icon, type, color) VALUES (?1,?2,?3,?4)",
            rusqlite::params![name, icon, kind, color],
        )?;
    }
    Ok(())
}
