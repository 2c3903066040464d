use colored::Colorize;

use crate::analytics::Utilization;
use crate::config::Config;
use crate::services::{BudgetStatus, TransactionView};

const BAR_WIDTH: usize = 20;

/// Whole-unit amount with thousands separators, prefixed by the currency code.
pub fn format_amount(amount: f64, config: &Config) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}{} {grouped}", config.currency)
}

/// Text progress bar clamped at 100%.
pub fn progress_bar(utilization: &Utilization) -> String {
    let filled = ((utilization.bar_width() / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn budget_line(status: &BudgetStatus, config: &Config) -> String {
    let budget = &status.budget;
    let usage = format!("{:.1}% used", status.utilization.percentage);
    let usage = if status.utilization.is_over_budget {
        format!("{usage} (over budget!)").red().to_string()
    } else {
        usage.green().to_string()
    };
    format!(
        "{}  {:<16} {} / {}  {}  {}  {} left",
        budget.id,
        budget.name,
        format_amount(budget.spent, config),
        format_amount(budget.monthly_limit, config),
        progress_bar(&status.utilization),
        usage,
        format_amount(budget.remaining(), config)
    )
}

pub fn transaction_line(view: &TransactionView, config: &Config) -> String {
    let txn = &view.transaction;
    let signed = if txn.is_income() {
        format!("+{}", format_amount(txn.magnitude(), config)).green()
    } else {
        format!("-{}", format_amount(txn.magnitude(), config)).red()
    };
    format!(
        "{}  {}  {:<14} {:<16} {:<5} {:>14}  {}",
        txn.id,
        txn.date,
        txn.category,
        view.budget_name.as_deref().unwrap_or("no budget"),
        txn.payment_method,
        signed,
        txn.notes.as_deref().unwrap_or("No notes")
    )
}
