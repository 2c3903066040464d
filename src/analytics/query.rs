use crate::ledger::Transaction;

/// Category selector used by transaction listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn from_option(category: Option<&str>) -> Self {
        match category {
            Some(name) if name != "all" => CategoryFilter::Named(name.to_string()),
            _ => CategoryFilter::All,
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => transaction.category == *name,
        }
    }
}

/// Distinct category labels in first-seen order, income included.
pub fn categories(transactions: &[Transaction]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for txn in transactions {
        if !seen.iter().any(|name| *name == txn.category) {
            seen.push(txn.category.clone());
        }
    }
    seen
}

pub fn filter_by_category<'a>(
    transactions: &'a [Transaction],
    filter: &CategoryFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|txn| filter.matches(txn)).collect()
}

/// Newest-first by insertion order, at most `limit` entries.
pub fn recent<'a, I>(transactions: I, limit: usize) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
    I::IntoIter: DoubleEndedIterator,
{
    transactions.into_iter().rev().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{FixedClock, Ledger, NewTransaction};

    fn sample() -> Ledger {
        let clock = FixedClock::ymd(2025, 11, 1).unwrap();
        [
            NewTransaction::expense(10.0, "Food"),
            NewTransaction::income(100.0, "Salary"),
            NewTransaction::expense(20.0, "Food"),
            NewTransaction::expense(5.0, "Transport"),
        ]
        .into_iter()
        .fold(Ledger::new(), |ledger, draft| {
            ledger.create_transaction(draft, &clock).unwrap().ledger
        })
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let ledger = sample();
        assert_eq!(
            categories(ledger.transactions()),
            vec!["Food", "Salary", "Transport"]
        );
    }

    #[test]
    fn filter_matches_exact_label() {
        let ledger = sample();
        let food = filter_by_category(ledger.transactions(), &CategoryFilter::Named("Food".into()));
        assert_eq!(food.len(), 2);
        let all = filter_by_category(ledger.transactions(), &CategoryFilter::from_option(Some("all")));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn recent_returns_newest_first() {
        let ledger = sample();
        let latest = recent(ledger.transactions(), 2);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].category, "Transport");
        assert_eq!(latest[1].magnitude(), 20.0);
    }
}
