mod bootstrap;
mod report;

use std::{borrow::Cow, env, fs, process};

use bootstrap::AppConfig;
use finsplit_application::{Command, LedgerScript, ProcessingOutcome, SettlementWorkflow};
use finsplit_i18n as i18n;
use finsplit_infrastructure::{FinSplitLedgerParser, GreedySettlementPlanner};
use finsplit_presentation::{PaymentOptions, SettlementPresenter};

const USAGE: &str = "Usage: finsplit <file.finsplit> [--json]";

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    bootstrap::init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (path, json) = parse_args(&args)?;

    let source =
        fs::read_to_string(path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let config = AppConfig::from_env();
    let parser = FinSplitLedgerParser;
    let planner = GreedySettlementPlanner;
    let workflow = SettlementWorkflow::new(&parser, &planner);

    let script = match workflow.parse_ledger(&source) {
        ProcessingOutcome::Success(script) => script,
        ProcessingOutcome::MissingMembersDeclaration => {
            return Err(i18n::MISSING_MEMBERS_DECLARATION.into());
        }
        ProcessingOutcome::UnknownMember { name, line } => {
            return Err(i18n::unknown_member(name, line).into());
        }
        ProcessingOutcome::DuplicateMember { name, line } => {
            return Err(i18n::duplicate_member(name, line).into());
        }
        ProcessingOutcome::InvalidAmount { text, line } => {
            return Err(i18n::invalid_amount(text, line).into());
        }
        ProcessingOutcome::InvalidSplit { line, detail } => {
            return Err(i18n::invalid_split(line, detail).into());
        }
        ProcessingOutcome::SyntaxError { line, detail } => {
            return Err(i18n::syntax_error(line, detail).to_string().into());
        }
    };

    if json {
        return print_json_report(&workflow, &script, &config);
    }

    print_script_output(&workflow, &script, &config);
    Ok(())
}

fn parse_args(args: &[String]) -> CliResult<(&str, bool)> {
    let mut path = None;
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'. {USAGE}").into());
            }
            _ => {
                if path.replace(arg.as_str()).is_some() {
                    return Err(USAGE.into());
                }
            }
        }
    }

    match path {
        Some(path) => Ok((path, json)),
        None => Err(USAGE.into()),
    }
}

fn print_json_report(
    workflow: &SettlementWorkflow<'_>,
    script: &LedgerScript,
    config: &AppConfig,
) -> CliResult<()> {
    let plan = workflow.build_settlement_plan(&script.ledger);
    let report = report::build_report(
        &plan,
        script.ledger.roster(),
        config.pool_id,
        config.payment_note.as_deref(),
    );
    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("Failed to encode the report: {err}"))?;
    println!("{rendered}");
    Ok(())
}

fn print_script_output(
    workflow: &SettlementWorkflow<'_>,
    script: &LedgerScript,
    config: &AppConfig,
) {
    let mut printed = false;

    for command in &script.commands {
        match command.command {
            Command::Balances => {
                print_balances(workflow, script);
                printed = true;
            }
            Command::Settle => {
                print_settlement(workflow, script, config);
                printed = true;
            }
        }
    }

    if !printed {
        print_settlement(workflow, script, config);
    }
}

fn print_balances(workflow: &SettlementWorkflow<'_>, script: &LedgerScript) {
    let plan = workflow.build_settlement_plan(&script.ledger);
    println!("{}", SettlementPresenter::build_pool_header(&plan.pool));
    println!(
        "{}",
        SettlementPresenter::build_balance_table(&plan.balances, script.ledger.roster())
    );
}

fn print_settlement(workflow: &SettlementWorkflow<'_>, script: &LedgerScript, config: &AppConfig) {
    let plan = workflow.build_settlement_plan(&script.ledger);
    let options = PaymentOptions {
        pool_id: config.pool_id,
        note: config.payment_note.as_deref(),
    };
    let view =
        SettlementPresenter::render_with_payments(&plan, script.ledger.roster(), Some(&options));

    println!("{}", view.header);
    println!("{}", view.balance_table);
    match view.transfer_table {
        Some(table) => println!("{table}"),
        None => println!("{}", i18n::ALL_SETTLED),
    }
    if let Some(warning) = view.warning {
        eprintln!("Warning: {warning}");
    }
}
