use std::str::FromStr;

use finsplit_application::{Command, LedgerParseError, LedgerParser, LedgerScript, ScriptCommand};
use finsplit_domain::{
    Expense, ExpenseSplit, LedgerError, MemberId, Money, PoolLedger, Roster, SplitError,
    SplitPolicy,
};
use finsplit_parser::{
    parse_ledger, Command as ParserCommand, MemberDecl, SplitSpec, Statement,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};

const DEFAULT_POOL_NAME: &str = "Shared expenses";

/// Parses ledger text into a pool plus its trailing commands.
///
/// The grammar layer only recognizes statements; this adapter resolves
/// member names against the roster, converts amount spellings to paise,
/// and expands split clauses into concrete per-member shares.
#[derive(Default)]
pub struct FinSplitLedgerParser;

impl LedgerParser for FinSplitLedgerParser {
    fn parse(&self, source: &str) -> Result<LedgerScript, LedgerParseError> {
        let document = parse_ledger(source).map_err(|err| LedgerParseError::Syntax {
            line: err.line,
            detail: err.detail,
        })?;
        tracing::debug!(
            statements = document.statements.len(),
            "parsed ledger document"
        );

        let mut pool_name: Option<String> = None;
        let mut roster: Option<Roster> = None;
        for stmt in &document.statements {
            match &stmt.statement {
                Statement::Pool(name) => {
                    if pool_name.is_some() {
                        return Err(LedgerParseError::Syntax {
                            line: stmt.line,
                            detail: "POOL is declared more than once".to_string(),
                        });
                    }
                    pool_name = Some((*name).to_string());
                }
                Statement::Members(decls) => {
                    if roster.is_some() {
                        return Err(LedgerParseError::Syntax {
                            line: stmt.line,
                            detail: "MEMBERS is declared more than once".to_string(),
                        });
                    }
                    roster = Some(build_roster(decls, stmt.line)?);
                }
                _ => {}
            }
        }
        let roster = roster.ok_or(LedgerParseError::MissingMembersDeclaration)?;

        let name = pool_name.unwrap_or_else(|| DEFAULT_POOL_NAME.to_string());
        let mut ledger = PoolLedger::new(name, roster);
        let mut commands = Vec::new();

        for stmt in &document.statements {
            match &stmt.statement {
                Statement::Pool(_) | Statement::Members(_) => {}
                Statement::Expense(expense) => {
                    let line = stmt.line;
                    let amount = parse_amount(expense.amount, line)?;
                    let paid_by = resolve_member(ledger.roster(), expense.paid_by, line)?;
                    let splits = build_splits(ledger.roster(), amount, &expense.split, line)?;
                    ledger
                        .record_expense(Expense {
                            title: expense.title.to_string(),
                            amount,
                            paid_by,
                            splits,
                        })
                        .map_err(|err| match err {
                            LedgerError::UnknownMember(id) => LedgerParseError::UnknownMember {
                                name: id.to_string(),
                                line,
                            },
                            LedgerError::NonPositiveAmount(value) => {
                                LedgerParseError::InvalidAmount {
                                    text: value.to_string(),
                                    line,
                                }
                            }
                        })?;
                }
                Statement::Command(command) => {
                    let command = match command {
                        ParserCommand::Balances => Command::Balances,
                        ParserCommand::Settle => Command::Settle,
                    };
                    commands.push(ScriptCommand {
                        line: stmt.line,
                        command,
                    });
                }
            }
        }

        Ok(LedgerScript { ledger, commands })
    }
}

fn build_roster(decls: &[MemberDecl<'_>], line: usize) -> Result<Roster, LedgerParseError> {
    let mut roster = Roster::new();
    for decl in decls {
        if roster.id_of(decl.name).is_some() {
            return Err(LedgerParseError::DuplicateMember {
                name: decl.name.to_string(),
                line,
            });
        }
        roster.add(decl.name, decl.upi_id.map(str::to_string));
    }
    Ok(roster)
}

fn resolve_member(roster: &Roster, name: &str, line: usize) -> Result<MemberId, LedgerParseError> {
    roster
        .id_of(name)
        .ok_or_else(|| LedgerParseError::UnknownMember {
            name: name.to_string(),
            line,
        })
}

fn parse_share(text: &str, line: usize) -> Result<Money, LedgerParseError> {
    let invalid = || LedgerParseError::InvalidAmount {
        text: text.to_string(),
        line,
    };
    let value = Decimal::from_str(text).map_err(|_| invalid())?;
    Money::from_decimal(value).map_err(|_| invalid())
}

fn parse_amount(text: &str, line: usize) -> Result<Money, LedgerParseError> {
    let amount = parse_share(text, line)?;
    if !amount.is_positive() {
        return Err(LedgerParseError::InvalidAmount {
            text: text.to_string(),
            line,
        });
    }
    Ok(amount)
}

/// Percent spellings become basis points; anything finer than 0.01% has
/// no representation and is rejected.
fn parse_basis_points(text: &str, line: usize) -> Result<u32, LedgerParseError> {
    let invalid = |detail: String| LedgerParseError::InvalidSplit { line, detail };
    let value = Decimal::from_str(text)
        .map_err(|_| invalid(format!("bad percentage: {text}")))?;
    let scaled = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| invalid(format!("percentage out of range: {text}")))?;
    if !scaled.fract().is_zero() {
        return Err(invalid(format!("percentage finer than 0.01%: {text}")));
    }
    scaled
        .to_u32()
        .ok_or_else(|| invalid(format!("percentage out of range: {text}")))
}

fn build_splits(
    roster: &Roster,
    amount: Money,
    split: &SplitSpec<'_>,
    line: usize,
) -> Result<Vec<ExpenseSplit>, LedgerParseError> {
    let policy = SplitPolicy;
    match split {
        SplitSpec::Equal => {
            let members: Vec<MemberId> = roster.ids().collect();
            policy
                .equal(amount, &members)
                .map_err(|err| split_error(err, line))
        }
        SplitSpec::Percent(entries) => {
            let mut allocations = Vec::with_capacity(entries.len());
            for entry in entries {
                let member = resolve_member(roster, entry.member, line)?;
                let bp = parse_basis_points(entry.value, line)?;
                allocations.push((member, bp));
            }
            policy
                .percentage(amount, &allocations)
                .map_err(|err| split_error(err, line))
        }
        SplitSpec::Manual(entries) => {
            let mut shares = Vec::with_capacity(entries.len());
            for entry in entries {
                let member = resolve_member(roster, entry.member, line)?;
                let share = parse_share(entry.value, line)?;
                shares.push((member, share));
            }
            policy
                .manual(amount, &shares)
                .map_err(|err| split_error(err, line))
        }
    }
}

fn split_error(err: SplitError, line: usize) -> LedgerParseError {
    LedgerParseError::InvalidSplit {
        line,
        detail: err.to_string(),
    }
}
