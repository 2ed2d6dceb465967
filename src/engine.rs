// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregations over fetched row snapshots. Everything here is
//! deterministic: no connection handles, no hidden state, same inputs
//! always produce the same figures.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

use crate::models::{Budget, Category, RecurringBill, Transaction, TxKind, TxStatus};

/// Input-boundary failures. Aggregations themselves never fail; bad
/// numbers are rejected before rows are written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid amount '{0}': expected a positive number")]
    InvalidAmount(String),
    #[error("invalid day {0}: expected a day between 1 and 31")]
    InvalidDay(u32),
}

/// Parse a user-supplied money amount, requiring it to be positive.
/// Accepts a comma decimal separator.
pub fn positive_amount(raw: &str) -> Result<Decimal, EngineError> {
    let normalized = raw.trim().replace(',', ".");
    let amount = normalized
        .parse::<Decimal>()
        .map_err(|_| EngineError::InvalidAmount(raw.trim().to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(raw.trim().to_string()));
    }
    Ok(amount)
}

pub fn day_of_month(day: u32) -> Result<u32, EngineError> {
    if (1..=31).contains(&day) {
        Ok(day)
    } else {
        Err(EngineError::InvalidDay(day))
    }
}

/// Closed month window: a date is inside iff its (year, month) pair
/// matches the reference. The SQL range filters in the store use the
/// same `[first day, last day]` convention.
pub fn in_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub pending: Decimal,
    pub recurring: Decimal,
}

/// Totals for the reference month. Income and expenses count paid
/// transactions only; pending sums both kinds. Recurring bills are a
/// standing obligation and are never date-filtered.
pub fn monthly_totals(
    reference: NaiveDate,
    transactions: &[Transaction],
    bills: &[RecurringBill],
) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for t in transactions.iter().filter(|t| in_month(t.date, reference)) {
        match (t.kind, t.status) {
            (TxKind::Income, TxStatus::Paid) => totals.income += t.amount,
            (TxKind::Expense, TxStatus::Paid) => totals.expenses += t.amount,
            (_, TxStatus::Pending) => totals.pending += t.amount,
        }
    }
    totals.recurring = bills.iter().map(|b| b.amount).sum();
    totals
}

/// Spend attributed to one category: expense transactions plus recurring
/// bills, both by magnitude. Operates on whatever window the caller
/// fetched; transactions with a dangling category id simply match no
/// category and fall out of every per-category figure.
pub fn category_spend(
    category_id: i64,
    transactions: &[Transaction],
    bills: &[RecurringBill],
) -> Decimal {
    let variable: Decimal = transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && t.category_id == Some(category_id))
        .map(|t| t.amount)
        .sum();
    let fixed: Decimal = bills
        .iter()
        .filter(|b| b.category_id == Some(category_id))
        .map(|b| b.amount)
        .sum();
    variable + fixed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetTier {
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetTier::Ok => "ok",
            BudgetTier::Warning => "warning",
            BudgetTier::Exceeded => "exceeded",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub budget_id: i64,
    pub category_id: i64,
    pub limit_amount: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub tier: BudgetTier,
}

fn tier_for(percentage: Decimal) -> BudgetTier {
    if percentage > Decimal::ONE_HUNDRED {
        BudgetTier::Exceeded
    } else if percentage > Decimal::new(80, 0) {
        BudgetTier::Warning
    } else {
        BudgetTier::Ok
    }
}

/// Utilization of every budget, highest percentage first. A zero limit
/// yields 0% rather than a division error, which also keeps it out of
/// the warning tiers.
pub fn budget_statuses(
    budgets: &[Budget],
    transactions: &[Transaction],
    bills: &[RecurringBill],
) -> Vec<BudgetStatus> {
    let mut statuses: Vec<BudgetStatus> = budgets
        .iter()
        .map(|b| {
            let spent = category_spend(b.category_id, transactions, bills);
            let percentage = if b.limit_amount > Decimal::ZERO {
                spent / b.limit_amount * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            BudgetStatus {
                budget_id: b.id,
                category_id: b.category_id,
                limit_amount: b.limit_amount,
                spent,
                percentage,
                tier: tier_for(percentage),
            }
        })
        .collect();
    statuses.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    statuses
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySpend {
    pub category_id: i64,
    pub name: String,
    pub color: String,
    pub total: Decimal,
}

/// Per-category spend for the snapshot, nonzero only, largest first.
pub fn spending_by_category(
    categories: &[Category],
    transactions: &[Transaction],
    bills: &[RecurringBill],
) -> Vec<CategorySpend> {
    let mut rows: Vec<CategorySpend> = categories
        .iter()
        .map(|c| CategorySpend {
            category_id: c.id,
            name: c.name.clone(),
            color: c.color.clone(),
            total: category_spend(c.id, transactions, bills),
        })
        .filter(|c| c.total > Decimal::ZERO)
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceHealth {
    Healthy,
    Danger,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectedBalance {
    pub incomes_made: Decimal,
    pub expenses_made: Decimal,
    pub total_recurring: Decimal,
    pub balance: Decimal,
    pub health: BalanceHealth,
}

/// End-of-month projection: salary plus extra income, minus variable
/// spending, minus the fixed monthly obligations.
///
/// Pending policy: pending expenses count (already committed); pending
/// income does not (unrealized until paid).
pub fn projected_balance(
    monthly_income: Decimal,
    reference: NaiveDate,
    transactions: &[Transaction],
    bills: &[RecurringBill],
) -> ProjectedBalance {
    let mut incomes_made = Decimal::ZERO;
    let mut expenses_made = Decimal::ZERO;
    for t in transactions.iter().filter(|t| in_month(t.date, reference)) {
        match t.kind {
            TxKind::Income if t.status == TxStatus::Paid => incomes_made += t.amount,
            TxKind::Income => {}
            TxKind::Expense => expenses_made += t.amount,
        }
    }
    let total_recurring: Decimal = bills.iter().map(|b| b.amount).sum();
    let balance = monthly_income + incomes_made - expenses_made - total_recurring;
    let health = if balance >= Decimal::ZERO {
        BalanceHealth::Healthy
    } else {
        BalanceHealth::Danger
    };
    ProjectedBalance {
        incomes_made,
        expenses_made,
        total_recurring,
        balance,
        health,
    }
}

// Keyword sets for the one-shot budget suggestion. Matching is a
// case-insensitive substring test against the category name.
pub const ESSENTIAL_KEYWORDS: &[&str] = &["food", "grocer", "housing", "rent", "transport"];
pub const DISCRETIONARY_KEYWORDS: &[&str] = &["leisure", "health"];

fn suggested_share(category_name: &str) -> Decimal {
    let name = category_name.to_lowercase();
    if ESSENTIAL_KEYWORDS.iter().any(|k| name.contains(k)) {
        Decimal::new(15, 2)
    } else if DISCRETIONARY_KEYWORDS.iter().any(|k| name.contains(k)) {
        Decimal::new(10, 2)
    } else {
        Decimal::new(5, 2)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestedBudget {
    pub category_id: i64,
    pub share: Decimal, // fraction of income, e.g. 0.15
    pub limit_amount: Decimal,
}

/// One-shot allocation suggestion: a fixed fraction of income per
/// expense category. Suggests nothing when income is not positive or
/// when any budget already exists; a user's manual limits are never
/// overwritten.
pub fn suggest_budgets(
    monthly_income: Decimal,
    categories: &[Category],
    existing: &[Budget],
) -> Vec<SuggestedBudget> {
    if monthly_income <= Decimal::ZERO || !existing.is_empty() {
        return Vec::new();
    }
    categories
        .iter()
        .filter(|c| c.kind == TxKind::Expense)
        .map(|c| {
            let share = suggested_share(&c.name);
            SuggestedBudget {
                category_id: c.id,
                share,
                limit_amount: monthly_income * share,
            }
        })
        .collect()
}

/// Savings progress as a whole percentage, clamped to 100. A goal with
/// no positive target reads as 0.
pub fn goal_percentage(target_amount: Decimal, current_amount: Decimal) -> u32 {
    if target_amount <= Decimal::ZERO {
        return 0;
    }
    let pct = (current_amount / target_amount * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED);
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
