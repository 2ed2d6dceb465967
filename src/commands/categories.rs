// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::store;
use crate::utils::{id_for_category, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = TxKind::parse(sub.get_one::<String>("type").unwrap()).unwrap();
            let icon = sub.get_one::<String>("icon").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            store::insert_category(conn, name, icon, kind, color)?;
            println!("Added {} category '{}'", kind.as_str(), name);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .and_then(|s| TxKind::parse(s));
            let mut data = Vec::new();
            for c in store::fetch_categories(conn, kind)? {
                data.push(vec![c.name, c.kind.as_str().to_string(), c.icon, c.color]);
            }
            println!("{}", pretty_table(&["Category", "Type", "Icon", "Color"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_category(conn, name)?;
            store::delete_category(conn, id)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
