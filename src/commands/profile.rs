// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::store;
use crate::utils::fmt_money;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", _)) => show(conn)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut profile = store::fetch_profile(conn)?;
    if let Some(income) = sub.get_one::<String>("income") {
        profile.monthly_income = engine::positive_amount(income)?;
    }
    if let Some(day) = sub.get_one::<u32>("salary-day") {
        profile.salary_date = engine::day_of_month(*day)?;
    }
    if let Some(name) = sub.get_one::<String>("name") {
        profile.full_name = Some(name.clone());
    }
    store::update_profile(conn, &profile)?;
    println!(
        "Profile saved: income {}, salary day {}",
        fmt_money(&profile.monthly_income),
        profile.salary_date
    );
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let profile = store::fetch_profile(conn)?;
    println!("Name:        {}", profile.full_name.as_deref().unwrap_or("-"));
    println!("Income:      {}", fmt_money(&profile.monthly_income));
    println!("Salary day:  {}", profile.salary_date);
    Ok(())
}
