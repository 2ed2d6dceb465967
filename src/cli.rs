// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("grana")
        .about("Personal budgeting, savings goals, and recurring-bill tracking")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("profile")
                .about("Monthly income, salary day, and display name")
                .subcommand(
                    Command::new("set")
                        .about("Update profile fields (only the ones given)")
                        .arg(Arg::new("income").long("income").help("Monthly net income"))
                        .arg(
                            Arg::new("salary-day")
                                .long("salary-day")
                                .value_parser(value_parser!(u32))
                                .help("Day of month the salary lands (1-31)"),
                        )
                        .arg(Arg::new("name").long("name").help("Display name")),
                )
                .subcommand(Command::new("show").about("Show the profile")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage income/expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("icon").long("icon").default_value("circle"))
                        .arg(Arg::new("color").long("color").default_value("#64748b")),
                )
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .value_parser(["income", "expense"]),
                    ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("pending")
                                .long("pending")
                                .action(ArgAction::SetTrue)
                                .help("Record as pending instead of paid"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Regex match on the description"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("bill")
                .about("Fixed monthly bills")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Spending limits per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(
                    Command::new("report")
                        .about("Utilization for a month, highest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(
                    Command::new("suggest")
                        .about("One-shot allocation suggestion from income")
                        .arg(
                            Arg::new("apply")
                                .long("apply")
                                .action(ArgAction::SetTrue)
                                .help("Write the suggested limits"),
                        ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("target"))
                        .arg(Arg::new("color").long("color").default_value("#10b981")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("deposit")
                        .arg(Arg::new("goal").long("goal").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly overview: totals, projection, budgets, bills")
                .arg(Arg::new("month").long("month").help("YYYY-MM")),
        )
        .subcommand(
            Command::new("integration")
                .about("Chat-bot connection")
                .subcommand(Command::new("token").about("Generate a new connection token"))
                .subcommand(Command::new("status"))
                .subcommand(Command::new("disconnect")),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .value_parser(["csv", "json"])
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored rows for integrity problems"))
}
