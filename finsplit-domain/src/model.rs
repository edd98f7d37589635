use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use indexmap::IndexMap;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use thiserror::Error;

/// Identifier of a pool member. Assigned by the roster in join order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monetary amount counted in paise (1/100 rupee).
///
/// All settlement arithmetic happens on this integer representation;
/// decimal text only appears at the parse and display boundaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

pub const PAISE_PER_RUPEE: i64 = 100;

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_paise(value: i64) -> Self {
        Self(value)
    }

    pub const fn from_rupees(value: i64) -> Self {
        Self(value * PAISE_PER_RUPEE)
    }

    pub fn paise(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn signum(self) -> i64 {
        self.0.signum()
    }

    /// Converts a decimal rupee amount. At most two fractional digits are
    /// accepted; anything finer has no paise representation.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyConversionError> {
        let scaled = value
            .checked_mul(Decimal::from(PAISE_PER_RUPEE))
            .ok_or(MoneyConversionError::OutOfRange)?;
        if !scaled.fract().is_zero() {
            return Err(MoneyConversionError::NonIntegralPaise);
        }
        scaled
            .to_i64()
            .map(Self)
            .ok_or(MoneyConversionError::OutOfRange)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Splits into `parts` shares that differ by at most one paisa and sum
    /// back to the original amount. Larger shares come first.
    pub fn split_even(self, parts: usize) -> Option<Vec<Self>> {
        if parts == 0 {
            return None;
        }
        let count = parts as i64;
        let base = self.0.div_euclid(count);
        let remainder = self.0.rem_euclid(count) as usize;

        let mut shares = Vec::with_capacity(parts);
        for idx in 0..parts {
            let mut share = base;
            if idx < remainder {
                share += 1;
            }
            shares.push(Self(share));
        }
        Some(shares)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:02}",
            abs / PAISE_PER_RUPEE as u64,
            abs % PAISE_PER_RUPEE as u64
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoneyConversionError {
    #[error("amount has more than two decimal places")]
    NonIntegralPaise,
    #[error("amount does not fit in 64-bit paise")]
    OutOfRange,
}

/// Net balance per member, in roster insertion order.
///
/// Iteration order is a documented contract: the settlement calculator
/// processes creditors and debtors in exactly this order.
pub type MemberBalances = IndexMap<MemberId, Money>;

/// A directed settlement instruction. `amount` is strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Directory entry for one pool member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberProfile {
    pub display_name: String,
    pub upi_id: Option<String>,
}

/// Insertion-ordered member directory. Ids are ordinals starting at 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    members: IndexMap<MemberId, MemberProfile>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, display_name: impl Into<String>, upi_id: Option<String>) -> MemberId {
        let id = MemberId(self.members.len() as u64 + 1);
        self.members.insert(
            id,
            MemberProfile {
                display_name: display_name.into(),
                upi_id,
            },
        );
        id
    }

    pub fn get(&self, id: MemberId) -> Option<&MemberProfile> {
        self.members.get(&id)
    }

    pub fn display_name(&self, id: MemberId) -> Option<&str> {
        self.get(id).map(|profile| profile.display_name.as_str())
    }

    pub fn upi_id(&self, id: MemberId) -> Option<&str> {
        self.get(id).and_then(|profile| profile.upi_id.as_deref())
    }

    pub fn id_of(&self, display_name: &str) -> Option<MemberId> {
        self.members
            .iter()
            .find(|(_, profile)| profile.display_name == display_name)
            .map(|(id, _)| *id)
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &MemberProfile)> + '_ {
        self.members.iter().map(|(id, profile)| (*id, profile))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One member's portion of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpenseSplit {
    pub member: MemberId,
    pub amount: Money,
}

/// A shared expense, already split across members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub title: String,
    pub amount: Money,
    pub paid_by: MemberId,
    pub splits: Vec<ExpenseSplit>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("member {0} is not in the pool roster")]
    UnknownMember(MemberId),
    #[error("expense amount must be positive (got {0})")]
    NonPositiveAmount(Money),
}

/// Balance sheet row: what a member paid, what they owe, and the net.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceRow {
    pub member: MemberId,
    pub paid: Money,
    pub owes: Money,
    pub net: Money,
}

/// Pool metadata used by summaries and directory search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSummary {
    pub name: String,
    pub description: String,
    pub total_expenses: Money,
    pub member_count: usize,
    pub outstanding_members: usize,
}

/// A pool's roster plus its recorded expenses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolLedger {
    name: String,
    description: String,
    roster: Roster,
    expenses: Vec<Expense>,
}

impl PoolLedger {
    pub fn new(name: impl Into<String>, roster: Roster) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            roster,
            expenses: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Records an expense after checking that the payer and every split
    /// member exist in the roster.
    pub fn record_expense(&mut self, expense: Expense) -> Result<(), LedgerError> {
        if !expense.amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount(expense.amount));
        }
        if !self.roster.contains(expense.paid_by) {
            return Err(LedgerError::UnknownMember(expense.paid_by));
        }
        for split in &expense.splits {
            if !self.roster.contains(split.member) {
                return Err(LedgerError::UnknownMember(split.member));
            }
        }
        self.expenses.push(expense);
        Ok(())
    }

    pub fn total_expenses(&self) -> Money {
        let mut total = Money::ZERO;
        for expense in &self.expenses {
            total += expense.amount;
        }
        total
    }

    pub fn member_count(&self) -> usize {
        self.roster.len()
    }

    /// Net balance per member in roster order: positive means the member
    /// is owed money, negative means they owe.
    pub fn balances(&self) -> MemberBalances {
        let mut balances: MemberBalances = self
            .roster
            .ids()
            .map(|member| (member, Money::ZERO))
            .collect();

        for expense in &self.expenses {
            if let Some(balance) = balances.get_mut(&expense.paid_by) {
                *balance += expense.amount;
            }
            for split in &expense.splits {
                if let Some(balance) = balances.get_mut(&split.member) {
                    *balance -= split.amount;
                }
            }
        }

        balances
    }

    pub fn balance_sheet(&self) -> Vec<BalanceRow> {
        let mut rows: IndexMap<MemberId, BalanceRow> = self
            .roster
            .ids()
            .map(|member| {
                (
                    member,
                    BalanceRow {
                        member,
                        paid: Money::ZERO,
                        owes: Money::ZERO,
                        net: Money::ZERO,
                    },
                )
            })
            .collect();

        for expense in &self.expenses {
            if let Some(row) = rows.get_mut(&expense.paid_by) {
                row.paid += expense.amount;
            }
            for split in &expense.splits {
                if let Some(row) = rows.get_mut(&split.member) {
                    row.owes += split.amount;
                }
            }
        }

        rows.into_values()
            .map(|mut row| {
                row.net = row.paid - row.owes;
                row
            })
            .collect()
    }

    pub fn summary(&self) -> PoolSummary {
        let outstanding_members = self
            .balances()
            .values()
            .filter(|balance| !balance.is_zero())
            .count();

        PoolSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            total_expenses: self.total_expenses(),
            member_count: self.member_count(),
            outstanding_members,
        }
    }
}
