// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use grana::engine::{self, BalanceHealth};
use grana::models::{RecurringBill, Transaction, TxKind, TxStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(
    id: i64,
    date: NaiveDate,
    amount: &str,
    kind: TxKind,
    category_id: Option<i64>,
    status: TxStatus,
) -> Transaction {
    Transaction {
        id,
        date,
        description: format!("tx {}", id),
        amount: dec(amount),
        kind,
        category_id,
        status,
    }
}

fn bill(id: i64, amount: &str, due_day: u32, category_id: Option<i64>) -> RecurringBill {
    RecurringBill {
        id,
        description: format!("bill {}", id),
        amount: dec(amount),
        due_day,
        category_id,
    }
}

#[test]
fn empty_inputs_yield_zero_totals() {
    let totals = engine::monthly_totals(date(2025, 8, 1), &[], &[]);
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expenses, Decimal::ZERO);
    assert_eq!(totals.pending, Decimal::ZERO);
    assert_eq!(totals.recurring, Decimal::ZERO);
}

#[test]
fn paid_totals_partition_by_type_without_overlap() {
    let reference = date(2025, 8, 15);
    let txs = vec![
        tx(1, date(2025, 8, 1), "2500", TxKind::Income, None, TxStatus::Paid),
        tx(2, date(2025, 8, 2), "350", TxKind::Income, None, TxStatus::Paid),
        tx(3, date(2025, 8, 3), "120.50", TxKind::Expense, None, TxStatus::Paid),
        tx(4, date(2025, 8, 4), "79.50", TxKind::Expense, None, TxStatus::Paid),
        tx(5, date(2025, 8, 5), "60", TxKind::Expense, None, TxStatus::Pending),
        tx(6, date(2025, 8, 6), "40", TxKind::Income, None, TxStatus::Pending),
    ];
    let totals = engine::monthly_totals(reference, &txs, &[]);
    assert_eq!(totals.income, dec("2850"));
    assert_eq!(totals.expenses, dec("200"));
    // income + expenses covers exactly the paid set
    let paid_sum: Decimal = txs
        .iter()
        .filter(|t| t.status == TxStatus::Paid)
        .map(|t| t.amount)
        .sum();
    assert_eq!(totals.income + totals.expenses, paid_sum);
    // pending sums both kinds
    assert_eq!(totals.pending, dec("100"));
}

#[test]
fn month_window_is_inclusive_on_both_ends() {
    let reference = date(2025, 8, 10);
    let txs = vec![
        tx(1, date(2025, 8, 1), "10", TxKind::Expense, None, TxStatus::Paid),
        tx(2, date(2025, 8, 31), "20", TxKind::Expense, None, TxStatus::Paid),
        tx(3, date(2025, 7, 31), "40", TxKind::Expense, None, TxStatus::Paid),
        tx(4, date(2025, 9, 1), "80", TxKind::Expense, None, TxStatus::Paid),
    ];
    let totals = engine::monthly_totals(reference, &txs, &[]);
    assert_eq!(totals.expenses, dec("30"));
}

#[test]
fn recurring_bills_are_never_date_filtered() {
    let totals = engine::monthly_totals(
        date(2025, 8, 1),
        &[],
        &[bill(1, "99.90", 5, None), bill(2, "45.10", 20, None)],
    );
    assert_eq!(totals.recurring, dec("145.00"));
}

#[test]
fn dangling_category_still_counts_in_monthly_totals() {
    let reference = date(2025, 8, 1);
    let txs = vec![tx(
        1,
        date(2025, 8, 3),
        "75",
        TxKind::Expense,
        Some(999), // category no longer exists
        TxStatus::Paid,
    )];
    let totals = engine::monthly_totals(reference, &txs, &[]);
    assert_eq!(totals.expenses, dec("75"));
    // but it attributes to no live category
    assert_eq!(engine::category_spend(1, &txs, &[]), Decimal::ZERO);
    assert_eq!(engine::category_spend(999, &txs, &[]), dec("75"));
}

#[test]
fn category_spend_is_monotonic_and_deterministic() {
    let mut txs = vec![tx(
        1,
        date(2025, 8, 3),
        "50",
        TxKind::Expense,
        Some(7),
        TxStatus::Paid,
    )];
    let bills = vec![bill(1, "30", 10, Some(7))];
    let before = engine::category_spend(7, &txs, &bills);
    assert_eq!(before, dec("80"));
    // same snapshot, same answer
    assert_eq!(engine::category_spend(7, &txs, &bills), before);
    txs.push(tx(2, date(2025, 8, 4), "20", TxKind::Expense, Some(7), TxStatus::Paid));
    assert!(engine::category_spend(7, &txs, &bills) >= before);
    assert_eq!(engine::category_spend(7, &txs, &bills), dec("100"));
}

#[test]
fn projection_matches_reference_scenario() {
    // 8500 salary, 2850 extra income, 1869.90 variable spend, no bills
    let reference = date(2025, 8, 1);
    let mut txs = vec![
        tx(1, date(2025, 8, 1), "2500", TxKind::Income, None, TxStatus::Paid),
        tx(2, date(2025, 8, 5), "350", TxKind::Income, None, TxStatus::Paid),
    ];
    for (i, amount) in ["450.00", "389.90", "320.00", "280.00", "250.00", "180.00"]
        .iter()
        .enumerate()
    {
        txs.push(tx(
            10 + i as i64,
            date(2025, 8, 10),
            amount,
            TxKind::Expense,
            None,
            TxStatus::Paid,
        ));
    }
    let p = engine::projected_balance(dec("8500"), reference, &txs, &[]);
    assert_eq!(p.incomes_made, dec("2850"));
    assert_eq!(p.expenses_made, dec("1869.90"));
    assert_eq!(p.total_recurring, Decimal::ZERO);
    assert_eq!(p.balance, dec("9480.10"));
    assert_eq!(p.health, BalanceHealth::Healthy);
}

#[test]
fn pending_expense_counts_toward_projection() {
    let reference = date(2025, 8, 1);
    let txs = vec![tx(
        1,
        date(2025, 8, 20),
        "600",
        TxKind::Expense,
        None,
        TxStatus::Pending,
    )];
    let p = engine::projected_balance(dec("500"), reference, &txs, &[]);
    assert_eq!(p.expenses_made, dec("600"));
    assert_eq!(p.balance, dec("-100"));
    assert_eq!(p.health, BalanceHealth::Danger);
}

#[test]
fn pending_income_is_excluded_from_projection() {
    let reference = date(2025, 8, 1);
    let txs = vec![
        tx(1, date(2025, 8, 2), "900", TxKind::Income, None, TxStatus::Pending),
        tx(2, date(2025, 8, 3), "100", TxKind::Income, None, TxStatus::Paid),
    ];
    let p = engine::projected_balance(dec("0"), reference, &txs, &[]);
    assert_eq!(p.incomes_made, dec("100"));
    assert_eq!(p.balance, dec("100"));
}

#[test]
fn projection_subtracts_recurring_obligations() {
    let reference = date(2025, 8, 1);
    let bills = vec![bill(1, "1200", 5, None), bill(2, "89.90", 12, None)];
    let p = engine::projected_balance(dec("3000"), reference, &[], &bills);
    assert_eq!(p.total_recurring, dec("1289.90"));
    assert_eq!(p.balance, dec("1710.10"));
}

#[test]
fn per_category_sums_cover_all_attributed_spend() {
    // sum over categories == transactions + bills with live category ids
    let txs = vec![
        tx(1, date(2025, 8, 1), "100", TxKind::Expense, Some(1), TxStatus::Paid),
        tx(2, date(2025, 8, 2), "50", TxKind::Expense, Some(2), TxStatus::Paid),
        tx(3, date(2025, 8, 3), "25", TxKind::Expense, Some(1), TxStatus::Paid),
    ];
    let bills = vec![bill(1, "80", 5, Some(2)), bill(2, "20", 9, Some(1))];
    let total: Decimal = [1, 2]
        .iter()
        .map(|id| engine::category_spend(*id, &txs, &bills))
        .sum();
    let expected: Decimal = txs.iter().map(|t| t.amount).sum::<Decimal>()
        + bills.iter().map(|b| b.amount).sum::<Decimal>();
    assert_eq!(total, expected);
}
