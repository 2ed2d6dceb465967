// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction tag for transactions and categories. Amounts are unsigned
/// magnitudes everywhere; this tag carries the sign. Legacy rows that
/// stored expenses negative are normalized on read by the store layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TxKind::Income),
            "expense" => Some(TxKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Paid,
    Pending,
}

impl TxStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TxStatus::Paid => "paid",
            TxStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(TxStatus::Paid),
            "pending" => Some(TxStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal, // magnitude; direction lives in `kind`
    pub kind: TxKind,
    pub category_id: Option<i64>,
    pub status: TxStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub kind: TxKind,
    pub color: String,
}

/// A standing monthly obligation, always an expense. Carries a due day
/// rather than a date; it is never date-filtered by the aggregations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringBill {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub due_day: u32, // 1..=31
    pub category_id: Option<i64>,
}

/// One current spending limit per category. No month/year versioning;
/// saving replaces the limit for that category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub limit_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: Option<String>,
    pub monthly_income: Decimal,
    pub salary_date: u32, // 1..=31
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub connection_token: Option<String>,
    pub chat_id: Option<String>,
}
