// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::Result;
use rand::Rng;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("token", _)) => token(conn)?,
        Some(("status", _)) => status(conn)?,
        Some(("disconnect", _)) => disconnect(conn)?,
        _ => {}
    }
    Ok(())
}

fn token(conn: &Connection) -> Result<()> {
    // Short pairing code the bot asks for on first contact.
    let code: u32 = rand::thread_rng().gen_range(1000..10000);
    let token = format!("CONNECT-{}", code);
    store::upsert_connection_token(conn, &token)?;
    println!("Connection token: {}", token);
    println!("Send this token to the assistant bot to link your account.");
    Ok(())
}

fn status(conn: &Connection) -> Result<()> {
    match store::fetch_integration(conn)? {
        Some(integration) => {
            if integration.chat_id.is_some() {
                println!("Connected");
            } else if let Some(token) = integration.connection_token {
                println!("Not connected; pending token {}", token);
            } else {
                println!("Not connected");
            }
        }
        None => println!("Not connected"),
    }
    Ok(())
}

fn disconnect(conn: &Connection) -> Result<()> {
    if store::delete_integration(conn)? {
        println!("Assistant disconnected");
    } else {
        println!("No integration to disconnect");
    }
    Ok(())
}
