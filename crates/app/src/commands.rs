//! One-shot subcommands for scripting. Each one runs a single engine
//! operation and returns.

use std::io::Write;

use engine::Engine;

use crate::{error::Result, report, settings::Command};

pub fn run(engine: &mut Engine, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List { sort: None, .. } => report::print_store(out, engine.store())?,
        Command::List {
            sort: Some(field),
            desc,
        } => report::print_rows(out, &engine::sort_by(engine.rows(), field, desc))?,
        Command::Add(args) => {
            let date = args
                .date
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let index = engine.add_transaction(&args.category, &date, args.amount)?;
            writeln!(
                out,
                "Added to {} at position {}: Amount: {}, Date: {date}",
                args.category,
                index + 1,
                args.amount
            )?;
        }
        Command::Update(args) => {
            let current = engine
                .store()
                .transactions(&args.category)
                .and_then(|list| list.get(args.position))
                .map(|tx| tx.date.clone());
            // An unknown position falls through to the engine, which reports it.
            let date = args.date.or(current).unwrap_or_default();
            let previous =
                engine.update_transaction(&args.category, args.position, &date, args.amount)?;
            writeln!(
                out,
                "Updated {} #{}: {} -> {}",
                args.category,
                args.position + 1,
                previous.amount,
                args.amount
            )?;
        }
        Command::Delete(args) => {
            let removed = engine.delete_transaction(&args.category, args.position)?;
            writeln!(
                out,
                "Deleted {} #{}: Amount: {}, Date: {}",
                args.category,
                args.position + 1,
                removed.amount,
                removed.date
            )?;
        }
        Command::Summary => report::print_summary(out, &engine.summarize()?)?,
        Command::Search { term } => {
            let rows = engine::search_rows(engine.store(), &term);
            report::print_matches(out, &term, &rows)?;
        }
        Command::Table => {
            let edited = ledger_tui::run(engine.store().clone())?;
            if &edited != engine.store() {
                engine.replace_store(edited)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::settings::Args;

    fn command(argv: &[&str]) -> Command {
        let mut full = vec!["ledger"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap().command.unwrap()
    }

    fn exec(engine: &mut Engine, argv: &[&str]) -> Result<String> {
        let mut out = Vec::new();
        run(engine, command(argv), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_update_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        let mut engine = Engine::builder().path(&path).build().unwrap();

        let out = exec(&mut engine, &["add", "food", "10", "--date", "2024-01-01"]).unwrap();
        assert_eq!(out, "Added to food at position 1: Amount: 10.0, Date: 2024-01-01\n");

        let out = exec(&mut engine, &["update", "food", "1", "-3.5"]).unwrap();
        assert_eq!(out, "Updated food #1: 10.0 -> -3.5\n");
        let tx = &engine.store().transactions("food").unwrap()[0];
        assert_eq!(tx.date, "2024-01-01");
        assert_eq!(tx.amount.value(), -3.5);

        let out = exec(&mut engine, &["delete", "food", "1"]).unwrap();
        assert_eq!(out, "Deleted food #1: Amount: -3.5, Date: 2024-01-01\n");

        let reloaded = engine::persistence::load(&path).unwrap();
        assert_eq!(reloaded.transactions("food").map(<[_]>::len), Some(0));
    }

    #[test]
    fn bad_position_is_an_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::builder()
            .path(dir.path().join("transactions.json"))
            .build()
            .unwrap();

        let err = exec(&mut engine, &["delete", "food", "1"]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Engine(engine::EngineError::CategoryNotFound(_))
        ));

        exec(&mut engine, &["add", "food", "1", "--date", "2024-01-01"]).unwrap();
        let err = exec(&mut engine, &["update", "food", "3", "2"]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Engine(engine::EngineError::IndexOutOfRange { len: 1, .. })
        ));
    }

    #[test]
    fn summary_overflow_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::builder()
            .path(dir.path().join("transactions.json"))
            .build()
            .unwrap();
        engine
            .add_transaction("a", "2024-01-01", engine::Amount::new(1e308).unwrap())
            .unwrap();
        engine
            .add_transaction("b", "2024-01-01", engine::Amount::new(1e308).unwrap())
            .unwrap();

        let err = exec(&mut engine, &["summary"]).unwrap_err();
        let crate::error::AppError::Engine(err) = err else {
            panic!("expected an engine error");
        };
        assert!(err.is_recoverable());
        assert_eq!(
            report::user_message(&err),
            "total of all categories is too large to display"
        );
    }

    #[test]
    fn read_only_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::builder()
            .path(dir.path().join("transactions.json"))
            .build()
            .unwrap();
        exec(&mut engine, &["add", "rent", "500", "--date", "2024-01-01"]).unwrap();

        assert_eq!(
            exec(&mut engine, &["list"]).unwrap(),
            "\nrent:\n  1. Amount: 500.0, Date: 2024-01-01\n"
        );
        assert!(
            exec(&mut engine, &["summary"])
                .unwrap()
                .contains("Total: 500.0")
        );
        exec(&mut engine, &["add", "food", "12.5", "--date", "2024-01-02"]).unwrap();
        assert_eq!(
            exec(&mut engine, &["list", "--sort", "amount"]).unwrap(),
            "food 1. Amount: 12.5, Date: 2024-01-02\nrent 1. Amount: 500.0, Date: 2024-01-01\n"
        );
        assert_eq!(
            exec(&mut engine, &["list", "--sort", "date", "--desc"]).unwrap(),
            "food 1. Amount: 12.5, Date: 2024-01-02\nrent 1. Amount: 500.0, Date: 2024-01-01\n"
        );
        assert_eq!(
            exec(&mut engine, &["search", "nothing"]).unwrap(),
            "No transactions match \"nothing\".\n"
        );
    }
}
