#![warn(clippy::uninlined_format_args)]

mod config;
mod document;
mod error;

use config::{AppConfig, View, init_logging};
use document::{Ledger, LedgerDocument};
use error::{CliError, CliResult};
use splitwell_domain::{
    compute_balances, compute_settlements_no_simplify, compute_settlements_simplified,
    compute_simplification_steps,
};
use splitwell_presentation::{BalancePresenter, SettlementPresenter, TracePresenter};
use std::{env, fs, process};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let config = AppConfig::from_env()?;
    init_logging();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        return Err(CliError::Usage);
    };
    let view = match args.next() {
        Some(raw) => raw.parse()?,
        None => config.default_view,
    };

    let source = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let document: LedgerDocument =
        serde_json::from_str(&source).map_err(|source| CliError::Decode {
            path: path.clone(),
            source,
        })?;
    let ledger = document.into_ledger()?;

    tracing::info!(path = %path, view = ?view, "Rendering ledger");

    print!("{}", render(&ledger, view)?);
    Ok(())
}

fn render(ledger: &Ledger, view: View) -> CliResult<String> {
    let Ledger { members, expenses } = ledger;
    let output = match view {
        View::Balances => {
            BalancePresenter::render(&compute_balances(expenses, members)?, members)
        }
        View::Itemized => {
            SettlementPresenter::render(&compute_settlements_no_simplify(expenses, members)?)
        }
        View::Simplified => {
            SettlementPresenter::render(&compute_settlements_simplified(expenses, members)?)
        }
        View::Trace => TracePresenter::render(&compute_simplification_steps(expenses, members)?),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use splitwell_domain::LedgerErrorKind;

    const DINNER: &str = r#"{
        "members": [
            {"id": "m1", "name": "Alice", "groupId": "g1"},
            {"id": "m2", "name": "Bob", "groupId": "g1"},
            {"id": "m3", "name": "Carol", "groupId": "g1"}
        ],
        "expenses": [
            {"id": "dinner", "payerMemberId": "m1", "currencyCode": "EUR", "amount": 9,
             "exchangeRate": 1, "split": {"equal": ["m1", "m2", "m3"]}}
        ]
    }"#;

    #[fixture]
    fn dinner() -> Ledger {
        serde_json::from_str::<LedgerDocument>(DINNER)
            .expect("document should parse")
            .into_ledger()
            .expect("ledger should decode")
    }

    #[rstest]
    #[case::balances(View::Balances, &["Alice", "+6.00", "Bob", "-3.00"])]
    #[case::simplified(View::Simplified, &["Bob    Alice", "Carol  Alice", "3.00"])]
    #[case::itemized(View::Itemized, &["Bob    Alice", "Carol  Alice"])]
    #[case::trace(View::Trace, &["Raw debts (already minimal)"])]
    fn renders_each_view(dinner: Ledger, #[case] view: View, #[case] expected: &[&str]) {
        let output = render(&dinner, view).expect("render should succeed");

        for fragment in expected {
            assert!(output.contains(fragment), "missing {fragment:?} in:\n{output}");
        }
    }

    #[rstest]
    fn unknown_payer_is_reported(mut dinner: Ledger) {
        dinner.members.remove(0);

        let err = render(&dinner, View::Balances).expect_err("render should fail");

        assert!(matches!(
            err,
            CliError::Ledger(ref ledger_err) if ledger_err.kind() == LedgerErrorKind::ReferenceNotFound
        ));
    }
}
