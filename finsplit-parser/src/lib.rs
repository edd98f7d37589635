#![warn(clippy::uninlined_format_args)]

mod i18n;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, multispace1},
    combinator::{opt, recognize, verify},
    multi::{many0, separated_list1},
    sequence::{preceded, terminated},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDecl<'a> {
    pub name: &'a str,
    pub upi_id: Option<&'a str>,
}

/// One `name=value` entry of a PERCENT or MANUAL clause. The value keeps
/// its source spelling; conversion happens downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation<'a> {
    pub member: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitSpec<'a> {
    Equal,
    Percent(Vec<Allocation<'a>>),
    Manual(Vec<Allocation<'a>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseLine<'a> {
    pub title: &'a str,
    pub amount: &'a str,
    pub paid_by: &'a str,
    pub split: SplitSpec<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Balances,
    Settle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    Pool(&'a str),
    Members(Vec<MemberDecl<'a>>),
    Expense(ExpenseLine<'a>),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementWithLine<'a> {
    pub line: usize,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDocument<'a> {
    pub statements: Vec<StatementWithLine<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Syntax error at line {line}: {detail}")]
pub struct ParseError {
    pub line: usize,
    pub detail: String,
}

fn sp(input: &str) -> IResult<&str, &str> {
    fn line_comment(input: &str) -> IResult<&str, &str> {
        recognize((char('#'), take_till(|c| c == '\n'))).parse(input)
    }

    recognize(many0(alt((multispace1, line_comment)))).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-').parse(input)
}

fn upi_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '.' || c == '-' || c == '@')
        .parse(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_digit() || c == '.').parse(input)
}

fn amount(input: &str) -> IResult<&str, &str> {
    preceded(opt(char('₹')), number).parse(input)
}

fn percent_value(input: &str) -> IResult<&str, &str> {
    terminated(number, opt(char('%'))).parse(input)
}

fn member_decl(input: &str) -> IResult<&str, MemberDecl<'_>> {
    (
        identifier,
        opt((sp, char(':'), sp, upi_token).map(|(_, _, _, upi_id)| upi_id)),
    )
        .map(|(name, upi_id)| MemberDecl { name, upi_id })
        .parse(input)
}

// MEMBERS := alice:alice@ybl, bob
fn members(input: &str) -> IResult<&str, Statement<'_>> {
    (
        tag_no_case("MEMBERS"),
        sp,
        tag(":="),
        sp,
        separated_list1((sp, char(','), sp), member_decl),
    )
        .map(|(_, _, _, _, decls)| Statement::Members(decls))
        .parse(input)
}

// POOL := Goa Trip
fn pool(input: &str) -> IResult<&str, Statement<'_>> {
    (
        tag_no_case("POOL"),
        sp,
        tag(":="),
        sp,
        take_while1(|c: char| c != '\n' && c != '#'),
    )
        .map(|(_, _, _, _, name): (_, _, _, _, &str)| Statement::Pool(name.trim_end()))
        .parse(input)
}

fn percent_allocation(input: &str) -> IResult<&str, Allocation<'_>> {
    (identifier, sp, char('='), sp, percent_value)
        .map(|(member, _, _, _, value)| Allocation { member, value })
        .parse(input)
}

fn manual_allocation(input: &str) -> IResult<&str, Allocation<'_>> {
    (identifier, sp, char('='), sp, amount)
        .map(|(member, _, _, _, value)| Allocation { member, value })
        .parse(input)
}

fn split_spec(input: &str) -> IResult<&str, SplitSpec<'_>> {
    alt((
        tag_no_case("EQUAL").map(|_| SplitSpec::Equal),
        (
            tag_no_case("PERCENT"),
            sp,
            separated_list1((sp, char(','), sp), percent_allocation),
        )
            .map(|(_, _, entries)| SplitSpec::Percent(entries)),
        (
            tag_no_case("MANUAL"),
            sp,
            separated_list1((sp, char(','), sp), manual_allocation),
        )
            .map(|(_, _, entries)| SplitSpec::Manual(entries)),
    ))
    .parse(input)
}

// {title} : {amount} PAID {member} [SPLIT ...]
fn expense(input: &str) -> IResult<&str, ExpenseLine<'_>> {
    (
        verify(take_until(" : "), |title: &str| !title.trim().is_empty()),
        tag(" : "),
        sp,
        amount,
        sp,
        tag_no_case("PAID"),
        sp,
        identifier,
        opt((sp, tag_no_case("SPLIT"), sp, split_spec).map(|(_, _, _, split)| split)),
    )
        .map(
            |(title, _, _, amount, _, _, _, paid_by, split)| ExpenseLine {
                title: title.trim(),
                amount,
                paid_by,
                split: split.unwrap_or(SplitSpec::Equal),
            },
        )
        .parse(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        tag_no_case("BALANCES").map(|_| Command::Balances),
        tag_no_case("SETTLE").map(|_| Command::Settle),
    ))
    .parse(input)
}

fn statement(input: &str) -> IResult<&str, Statement<'_>> {
    alt((
        members,
        pool,
        expense.map(Statement::Expense),
        command.map(Statement::Command),
    ))
    .parse(input)
}

fn statement_with_sp(input: &str) -> IResult<&str, Statement<'_>> {
    (sp, statement, sp).map(|(_, stmt, _)| stmt).parse(input)
}

/// Parses a ledger document line by line.
///
/// Blank lines and `#` comments are skipped; every other line must hold
/// exactly one statement. Line numbers are 1-based and survive into both
/// the statements and any error.
pub fn parse_ledger(input: &str) -> Result<LedgerDocument<'_>, ParseError> {
    let mut statements = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let (rest, _) = sp(line).map_err(|e| ParseError {
            line: idx + 1,
            detail: i18n::syntax_error_detail(e),
        })?;
        if rest.trim().is_empty() {
            continue;
        }
        match statement_with_sp(rest) {
            Ok((rest, stmt)) => {
                if !rest.trim().is_empty() {
                    return Err(ParseError {
                        line: idx + 1,
                        detail: i18n::unparsed_input_detail(rest.trim()),
                    });
                }
                statements.push(StatementWithLine {
                    line: idx + 1,
                    statement: stmt,
                });
            }
            Err(e) => {
                return Err(ParseError {
                    line: idx + 1,
                    detail: i18n::syntax_error_detail(e),
                });
            }
        }
    }

    Ok(LedgerDocument { statements })
}
