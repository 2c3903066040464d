use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    analytics::CategoryFilter,
    ledger::{
        BudgetChanges, Ledger, NewBudget, NewTransaction, PaymentMethod, SystemClock,
        TransactionKind,
    },
    services::{BudgetService, SummaryService, TransactionService},
    utils::{demo::sample_ledger, persistence},
};

use super::{closest, formatters, output, suggest, CliContext, CliError};

const USAGE: &str = "\
usage: budget_tracker_cli [--file PATH] [--json] <command>

commands:
  init [--demo] [--force]
  budget add NAME LIMIT [COLOR]
  budget update ID [--name NAME] [--limit LIMIT] [--color COLOR]
  budget delete ID
  budget list
  txn add expense|income AMOUNT CATEGORY [--budget ID] [--notes TEXT] [--method cash|card|bank]
  txn delete ID
  txn list [--category CATEGORY]
  dashboard [--category CATEGORY]
  analytics
  check
  config show";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init { demo: bool, force: bool },
    BudgetAdd(NewBudget),
    BudgetUpdate { id: Uuid, changes: BudgetChanges },
    BudgetDelete(Uuid),
    BudgetList,
    TxnAdd(NewTransaction),
    TxnDelete(Uuid),
    TxnList(CategoryFilter),
    Dashboard(CategoryFilter),
    Analytics,
    Check,
    ConfigShow,
    Help,
}

/// Positional arguments plus the `--key value` options and bare `--flag`s a command accepts.
struct Parsed {
    positional: Vec<String>,
    options: HashMap<String, String>,
}

impl Parsed {
    fn new(args: &[String], flags: &[&str], keys: &[&str]) -> Result<Self, CliError> {
        let mut positional = Vec::new();
        let mut options = HashMap::new();
        let mut iter = args.iter().peekable();
        while let Some(arg) = iter.next() {
            let Some(key) = arg.strip_prefix("--") else {
                positional.push(arg.clone());
                continue;
            };
            if flags.contains(&key) {
                options.insert(key.to_string(), String::new());
            } else if keys.contains(&key) {
                let value = iter
                    .next_if(|value| !value.starts_with("--"))
                    .ok_or_else(|| CliError::Usage(format!("option `--{key}` requires a value")))?;
                options.insert(key.to_string(), value.clone());
            } else {
                return Err(unknown_option(key, flags, keys));
            }
        }
        Ok(Self {
            positional,
            options,
        })
    }

    fn arg(&self, index: usize, name: &str) -> Result<&str, CliError> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("missing {name}\n\n{USAGE}")))
    }

    fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    fn flag(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let Some((head, tail)) = args.split_first() else {
            return Ok(Command::Help);
        };
        match head.as_str() {
            "help" | "--help" | "-h" => Ok(Command::Help),
            "init" => {
                let parsed = Parsed::new(tail, &["demo", "force"], &[])?;
                Ok(Command::Init {
                    demo: parsed.flag("demo"),
                    force: parsed.flag("force"),
                })
            }
            "budget" => Self::parse_budget(tail),
            "txn" => Self::parse_transaction(tail),
            "dashboard" => {
                let parsed = Parsed::new(tail, &[], &["category"])?;
                Ok(Command::Dashboard(CategoryFilter::from_option(
                    parsed.option("category"),
                )))
            }
            "analytics" => {
                Parsed::new(tail, &[], &[])?;
                Ok(Command::Analytics)
            }
            "check" => {
                Parsed::new(tail, &[], &[])?;
                Ok(Command::Check)
            }
            "config" => match tail.first().map(String::as_str) {
                Some("show") | None => Ok(Command::ConfigShow),
                Some(other) => Err(CliError::Usage(format!("unknown config action `{other}`"))),
            },
            other => Err(CliError::UnknownCommand {
                input: other.to_string(),
                suggestion: suggest(other),
            }),
        }
    }

    fn parse_budget(args: &[String]) -> Result<Self, CliError> {
        let action = args.first().map(String::as_str).unwrap_or_default();
        let keys: &[&str] = if action == "update" {
            &["name", "limit", "color"]
        } else {
            &[]
        };
        let parsed = Parsed::new(args, &[], keys)?;
        match parsed.arg(0, "budget action")? {
            "add" => {
                let mut draft = NewBudget::new(
                    parsed.arg(1, "budget name")?,
                    parse_number(parsed.arg(2, "monthly limit")?)?,
                );
                if let Ok(color) = parsed.arg(3, "color") {
                    draft = draft.with_color(color);
                }
                Ok(Command::BudgetAdd(draft))
            }
            "update" => {
                let id = parse_id(parsed.arg(1, "budget id")?)?;
                let changes = BudgetChanges {
                    name: parsed.option("name").map(str::to_string),
                    monthly_limit: parsed.option("limit").map(parse_number).transpose()?,
                    color: parsed.option("color").map(str::to_string),
                };
                Ok(Command::BudgetUpdate { id, changes })
            }
            "delete" => Ok(Command::BudgetDelete(parse_id(parsed.arg(1, "budget id")?)?)),
            "list" => Ok(Command::BudgetList),
            other => Err(CliError::Usage(format!("unknown budget action `{other}`"))),
        }
    }

    fn parse_transaction(args: &[String]) -> Result<Self, CliError> {
        let keys: &[&str] = match args.first().map(String::as_str) {
            Some("add") => &["budget", "notes", "method"],
            Some("list") => &["category"],
            _ => &[],
        };
        let parsed = Parsed::new(args, &[], keys)?;
        match parsed.arg(0, "transaction action")? {
            "add" => {
                let kind = parsed.arg(1, "transaction type")?.parse::<TransactionKind>()?;
                let amount = parse_number(parsed.arg(2, "amount")?)?;
                let mut draft = NewTransaction::new(kind, amount, parsed.arg(3, "category")?);
                if let Some(budget) = parsed.option("budget") {
                    draft = draft.for_budget(parse_id(budget)?);
                }
                if let Some(notes) = parsed.option("notes") {
                    draft = draft.with_notes(notes);
                }
                if let Some(method) = parsed.option("method") {
                    draft = draft.paid_by(method.parse::<PaymentMethod>()?);
                }
                Ok(Command::TxnAdd(draft))
            }
            "delete" => Ok(Command::TxnDelete(parse_id(parsed.arg(1, "transaction id")?)?)),
            "list" => Ok(Command::TxnList(CategoryFilter::from_option(
                parsed.option("category"),
            ))),
            other => Err(CliError::Usage(format!(
                "unknown transaction action `{other}`"
            ))),
        }
    }
}

fn unknown_option(key: &str, flags: &[&str], keys: &[&str]) -> CliError {
    let known: Vec<&str> = flags.iter().chain(keys).copied().collect();
    let hint = match closest(key, &known) {
        Some(name) => format!("; did you mean `--{name}`?"),
        None if known.is_empty() => "; this command takes no options".to_string(),
        None => format!(
            "; expected one of {}",
            known
                .iter()
                .map(|name| format!("--{name}"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    CliError::Usage(format!("unknown option `--{key}`{hint}"))
}

fn parse_number(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CliError::Usage(format!("`{raw}` is not a number")))
}

fn parse_id(raw: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CliError::Usage(format!("`{raw}` is not a valid id")))
}

pub fn execute(command: Command, context: &CliContext) -> Result<(), CliError> {
    let config = context.config.load()?;
    let clock = SystemClock;
    match command {
        Command::Help => {
            output::info(USAGE);
            Ok(())
        }
        Command::Init { demo, force } => {
            if context.ledger_path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "`{}` already exists; pass --force to overwrite",
                    context.ledger_path.display()
                )));
            }
            let ledger = if demo { sample_ledger()? } else { Ledger::new() };
            persistence::save_snapshot(&ledger, &context.ledger_path)?;
            output::success(format!(
                "Ledger initialised at {}",
                context.ledger_path.display()
            ));
            Ok(())
        }
        Command::BudgetAdd(draft) => {
            let (ledger, budget) =
                BudgetService::create(&load(context)?, draft, &clock)?.into_parts();
            save(context, &ledger)?;
            report(context, &budget, || format!("Budget created: {}", budget.id))
        }
        Command::BudgetUpdate { id, changes } => {
            let (ledger, budget) = BudgetService::update(&load(context)?, id, changes)?.into_parts();
            save(context, &ledger)?;
            report(context, &budget, || format!("Budget updated: {}", budget.name))
        }
        Command::BudgetDelete(id) => {
            let (ledger, budget) = BudgetService::remove(&load(context)?, id)?.into_parts();
            save(context, &ledger)?;
            report(context, &budget, || format!("Budget deleted: {}", budget.name))
        }
        Command::BudgetList => {
            let statuses = BudgetService::list(&load(context)?);
            if context.json {
                return print_json(&statuses);
            }
            output::section("Budgets");
            if statuses.is_empty() {
                output::info("No budgets yet");
            }
            for status in &statuses {
                output::info(formatters::budget_line(status, &config));
            }
            Ok(())
        }
        Command::TxnAdd(draft) => {
            let (ledger, txn) =
                TransactionService::create(&load(context)?, draft, &clock)?.into_parts();
            save(context, &ledger)?;
            report(context, &txn, || format!("Transaction recorded: {}", txn.id))
        }
        Command::TxnDelete(id) => {
            let (ledger, txn) = TransactionService::remove(&load(context)?, id)?.into_parts();
            save(context, &ledger)?;
            report(context, &txn, || format!("Transaction deleted: {}", txn.id))
        }
        Command::TxnList(filter) => {
            let views = TransactionService::list(&load(context)?, &filter);
            if context.json {
                return print_json(&views);
            }
            output::section("Transactions");
            if views.is_empty() {
                output::info("No transactions yet");
            }
            for view in &views {
                output::info(formatters::transaction_line(view, &config));
            }
            Ok(())
        }
        Command::Dashboard(filter) => {
            let dashboard = SummaryService::dashboard(&load(context)?, &config, &filter);
            if context.json {
                return print_json(&dashboard);
            }
            output::section("Overview");
            output::info(format!(
                "Income:   {}",
                formatters::format_amount(dashboard.totals.income, &config)
            ));
            output::info(format!(
                "Expenses: {}",
                formatters::format_amount(dashboard.totals.expenses, &config)
            ));
            output::info(format!(
                "Net:      {}",
                formatters::format_amount(dashboard.totals.net, &config)
            ));
            output::section("Budgets");
            for status in &dashboard.budgets {
                output::info(formatters::budget_line(status, &config));
            }
            output::section("Recent transactions");
            for view in &dashboard.recent {
                output::info(formatters::transaction_line(view, &config));
            }
            Ok(())
        }
        Command::Analytics => {
            let report = SummaryService::analytics(&load(context)?, &config);
            if context.json {
                return print_json(&report);
            }
            output::section("Monthly overview");
            for month in &report.monthly {
                output::info(format!(
                    "{}  income {}  expenses {}",
                    month.month,
                    formatters::format_amount(month.income, &config),
                    formatters::format_amount(month.expenses, &config)
                ));
            }
            output::section("Spending by category");
            for share in &report.categories {
                output::info(format!(
                    "{:<16} {} ({:.1}%)",
                    share.category,
                    formatters::format_amount(share.amount, &config),
                    share.percentage
                ));
            }
            output::section("Budget performance");
            for status in &report.budgets {
                output::info(formatters::budget_line(status, &config));
            }
            Ok(())
        }
        Command::Check => {
            let ledger = load(context)?;
            let drift = ledger.verify_spent();
            if context.json {
                print_json(&drift)?;
            } else if drift.is_empty() {
                output::success("Budget spend matches linked transactions");
            } else {
                for entry in &drift {
                    output::warning(format!(
                        "{} records {} but expenses sum to {}",
                        entry.budget_name, entry.recorded, entry.expected
                    ));
                }
            }
            if drift.is_empty() {
                Ok(())
            } else {
                Err(CliError::CheckFailed(drift.len()))
            }
        }
        Command::ConfigShow => print_json(&config),
    }
}

fn load(context: &CliContext) -> Result<Ledger, CliError> {
    let report = persistence::load_or_default(&context.ledger_path)?;
    if !context.json {
        for warning in &report.warnings {
            output::warning(warning);
        }
    }
    Ok(report.ledger)
}

fn save(context: &CliContext, ledger: &Ledger) -> Result<(), CliError> {
    persistence::save_snapshot(ledger, &context.ledger_path)?;
    Ok(())
}

fn report<T, F>(context: &CliContext, record: &T, message: F) -> Result<(), CliError>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if context.json {
        print_json(record)
    } else {
        output::success(message());
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(crate::errors::StorageError::from)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn parses_budget_add_with_color() {
        let command = Command::parse(&args("budget add Groceries 30000 #10b981")).unwrap();
        assert_eq!(
            command,
            Command::BudgetAdd(NewBudget::new("Groceries", 30000.0).with_color("#10b981"))
        );
    }

    #[test]
    fn parses_expense_with_options() {
        let id = Uuid::new_v4();
        let command = Command::parse(&args(&format!(
            "txn add expense 2500 Food --budget {id} --method card"
        )))
        .unwrap();
        let Command::TxnAdd(draft) = command else {
            panic!("expected txn add, got {command:?}");
        };
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.amount, 2500.0);
        assert_eq!(draft.budget_id, Some(id));
        assert_eq!(draft.payment_method, Some(PaymentMethod::Card));
    }

    #[test]
    fn parses_partial_budget_update() {
        let id = Uuid::new_v4();
        let command = Command::parse(&args(&format!("budget update {id} --limit 45000"))).unwrap();
        assert_eq!(
            command,
            Command::BudgetUpdate {
                id,
                changes: BudgetChanges {
                    monthly_limit: Some(45000.0),
                    ..BudgetChanges::default()
                }
            }
        );
    }

    #[test]
    fn init_flags_are_bare() {
        assert_eq!(
            Command::parse(&args("init --demo")).unwrap(),
            Command::Init {
                demo: true,
                force: false
            }
        );
    }

    #[test]
    fn rejects_bad_numbers_and_ids() {
        assert!(matches!(
            Command::parse(&args("budget add Rent lots")),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            Command::parse(&args("txn delete not-an-id")),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn unknown_transaction_type_is_validation_error() {
        let err = Command::parse(&args("txn add refund 10 Food")).unwrap_err();
        assert!(matches!(err, CliError::Ledger(_)));
    }

    #[test]
    fn empty_arguments_show_help() {
        assert_eq!(Command::parse(&[]).unwrap(), Command::Help);
    }

    #[test]
    fn misspelled_option_is_rejected_with_hint() {
        let id = Uuid::new_v4();
        let err = Command::parse(&args(&format!("budget update {id} --limt 5"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown option `--limt`; did you mean `--limit`?"
        );
    }

    #[test]
    fn option_from_another_command_is_rejected() {
        let err = Command::parse(&args("txn list --budget abc")).unwrap_err();
        assert!(matches!(err, CliError::Usage(ref msg) if msg.contains("unknown option `--budget`")));
        let err = Command::parse(&args("check --verbose")).unwrap_err();
        assert!(err.to_string().contains("takes no options"));
    }

    #[test]
    fn option_without_value_is_rejected() {
        let err = Command::parse(&args("txn add expense 10 Food --notes")).unwrap_err();
        assert_eq!(err.to_string(), "option `--notes` requires a value");
        let err = Command::parse(&args("txn add expense 10 Food --notes --method card")).unwrap_err();
        assert!(err.to_string().contains("--notes"));
    }
}
