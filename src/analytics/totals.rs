use serde::Serialize;

use crate::ledger::{Transaction, TransactionKind};

/// Aggregate income, expense, and net figures for a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl Totals {
    pub(crate) fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expenses += transaction.magnitude(),
        }
        self.net = self.income - self.expenses;
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for transaction in transactions {
        totals.add(transaction);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{FixedClock, Ledger, NewTransaction};

    #[test]
    fn empty_input_yields_zeroes() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn net_is_income_minus_expenses() {
        let clock = FixedClock::ymd(2025, 11, 1).unwrap();
        let ledger = Ledger::new()
            .create_transaction(NewTransaction::income(1000.0, "Salary"), &clock)
            .unwrap()
            .ledger
            .create_transaction(NewTransaction::expense(1500.0, "Rent"), &clock)
            .unwrap()
            .ledger;
        let result = totals(ledger.transactions());
        assert_eq!(result.income, 1000.0);
        assert_eq!(result.expenses, 1500.0);
        assert_eq!(result.net, -500.0);
    }
}
