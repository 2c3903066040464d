use std::collections::HashMap;

use serde::Serialize;

use crate::ledger::Transaction;

use super::totals::Totals;

/// Expense total for one raw category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Category total with its share of all category spending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Income and expenses for one `YYYY-MM` bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotals {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

/// Expense magnitudes grouped by category, largest first.
///
/// Grouping is case-sensitive; equal totals keep first-encountered order.
pub fn by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&slot) => groups[slot].amount += txn.magnitude(),
            None => {
                index.insert(txn.category.as_str(), groups.len());
                groups.push(CategoryTotal {
                    category: txn.category.clone(),
                    amount: txn.magnitude(),
                });
            }
        }
    }
    // stable sort keeps encounter order on ties
    groups.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    groups
}

/// Attaches a percentage-of-total to each category. A zero total yields 0%.
pub fn category_shares(totals: &[CategoryTotal]) -> Vec<CategoryShare> {
    let grand_total: f64 = totals.iter().map(|entry| entry.amount).sum();
    totals
        .iter()
        .map(|entry| CategoryShare {
            category: entry.category.clone(),
            amount: entry.amount,
            percentage: percentage_of(entry.amount, grand_total),
        })
        .collect()
}

/// Income and expenses per calendar month, in the order each month is first seen.
///
/// Transactions are appended with the current date, so this is oldest first for
/// a ledger built through the normal operations.
pub fn by_month(transactions: &[Transaction]) -> Vec<MonthTotals> {
    let mut buckets: Vec<(String, Totals)> = Vec::new();
    for txn in transactions {
        let key = txn.month_key();
        match buckets.iter_mut().find(|(month, _)| *month == key) {
            Some((_, totals)) => totals.add(txn),
            None => {
                let mut totals = Totals::default();
                totals.add(txn);
                buckets.push((key, totals));
            }
        }
    }
    buckets
        .into_iter()
        .map(|(month, totals)| MonthTotals {
            month,
            income: totals.income,
            expenses: totals.expenses,
        })
        .collect()
}

pub(crate) fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
