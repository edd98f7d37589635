use fxhash::FxHashSet;
use thiserror::Error;

use crate::model::{ExpenseSplit, MemberId, Money};

/// One full share expressed in basis points (100.00%).
pub const FULL_SHARE_BP: u32 = 10_000;

/// Manual splits may drift from the expense total by one paisa; anything
/// larger is a data entry error.
pub const MANUAL_TOLERANCE: Money = Money::from_paise(1);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("expense amount must be positive (got {0})")]
    NonPositiveAmount(Money),
    #[error("a split needs at least one member")]
    NoMembers,
    #[error("member {0} appears more than once in the split")]
    DuplicateMember(MemberId),
    #[error("percentages must sum to 100.00% (got {} bp)", .got_bp)]
    PercentagesNotFull { got_bp: u64 },
    #[error("manual shares sum to {total}, expense amount is {expected}")]
    ManualMismatch { total: Money, expected: Money },
}

/// Turns an expense amount plus a split method into per-member shares.
///
/// Every method conserves the amount to the paisa. Equal and percentage
/// splits resolve sub-paisa remainders by handing one extra paisa to the
/// earliest members in the given order, so the output is deterministic.
pub struct SplitPolicy;

impl SplitPolicy {
    /// Even split across `members`, larger shares first.
    pub fn equal(&self, amount: Money, members: &[MemberId]) -> Result<Vec<ExpenseSplit>, SplitError> {
        if !amount.is_positive() {
            return Err(SplitError::NonPositiveAmount(amount));
        }
        reject_duplicates(members.iter().copied())?;

        let shares = amount.split_even(members.len()).ok_or(SplitError::NoMembers)?;
        Ok(members
            .iter()
            .zip(shares)
            .map(|(&member, amount)| ExpenseSplit { member, amount })
            .collect())
    }

    /// Percentage split. Each entry carries the member's share in basis
    /// points; the entries must sum to exactly [`FULL_SHARE_BP`].
    pub fn percentage(
        &self,
        amount: Money,
        allocations: &[(MemberId, u32)],
    ) -> Result<Vec<ExpenseSplit>, SplitError> {
        if !amount.is_positive() {
            return Err(SplitError::NonPositiveAmount(amount));
        }
        if allocations.is_empty() {
            return Err(SplitError::NoMembers);
        }
        reject_duplicates(allocations.iter().map(|&(member, _)| member))?;

        let got_bp: u64 = allocations.iter().map(|&(_, bp)| u64::from(bp)).sum();
        if got_bp != u64::from(FULL_SHARE_BP) {
            tracing::debug!(got_bp, "rejecting percentage split that does not cover the amount");
            return Err(SplitError::PercentagesNotFull { got_bp });
        }

        let total = amount.paise();
        // Each floored quotient is bounded by `total`, so the narrowing is lossless.
        let mut shares: Vec<i64> = allocations
            .iter()
            .map(|&(_, bp)| (i128::from(total) * i128::from(bp) / i128::from(FULL_SHARE_BP)) as i64)
            .collect();

        let assigned: i64 = shares.iter().sum();
        let mut leftover = total - assigned;
        for share in &mut shares {
            if leftover == 0 {
                break;
            }
            *share += 1;
            leftover -= 1;
        }

        Ok(allocations
            .iter()
            .zip(shares)
            .map(|(&(member, _), paise)| ExpenseSplit {
                member,
                amount: Money::from_paise(paise),
            })
            .collect())
    }

    /// Manual split: shares are taken as given once their sum lands within
    /// [`MANUAL_TOLERANCE`] of the expense amount.
    pub fn manual(
        &self,
        amount: Money,
        shares: &[(MemberId, Money)],
    ) -> Result<Vec<ExpenseSplit>, SplitError> {
        if !amount.is_positive() {
            return Err(SplitError::NonPositiveAmount(amount));
        }
        if shares.is_empty() {
            return Err(SplitError::NoMembers);
        }
        reject_duplicates(shares.iter().map(|&(member, _)| member))?;

        let total = shares
            .iter()
            .fold(Money::ZERO, |acc, &(_, share)| acc + share);
        if (total - amount).abs() > MANUAL_TOLERANCE {
            tracing::debug!(%total, %amount, "rejecting manual split that misses the amount");
            return Err(SplitError::ManualMismatch {
                total,
                expected: amount,
            });
        }

        Ok(shares
            .iter()
            .map(|&(member, amount)| ExpenseSplit { member, amount })
            .collect())
    }
}

fn reject_duplicates(members: impl Iterator<Item = MemberId>) -> Result<(), SplitError> {
    let mut seen = FxHashSet::default();
    for member in members {
        if !seen.insert(member) {
            return Err(SplitError::DuplicateMember(member));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn policy() -> SplitPolicy {
        SplitPolicy
    }

    fn paise_of(splits: &[ExpenseSplit]) -> Vec<(MemberId, i64)> {
        splits
            .iter()
            .map(|split| (split.member, split.amount.paise()))
            .collect()
    }

    #[rstest]
    #[case::exact(30_000, vec![1, 2, 3], vec![10_000, 10_000, 10_000])]
    #[case::front_loaded_remainder(10_000, vec![1, 2, 3], vec![3_334, 3_333, 3_333])]
    #[case::single_member(4_500, vec![7], vec![4_500])]
    fn equal_split_conserves_amount(
        policy: SplitPolicy,
        #[case] amount_paise: i64,
        #[case] members: Vec<u64>,
        #[case] expected: Vec<i64>,
    ) {
        let members: Vec<MemberId> = members.into_iter().map(MemberId).collect();
        let splits = policy
            .equal(Money::from_paise(amount_paise), &members)
            .expect("valid split");

        let amounts: Vec<i64> = splits.iter().map(|split| split.amount.paise()).collect();
        assert_eq!(amounts, expected);
        assert_eq!(amounts.iter().sum::<i64>(), amount_paise);
    }

    #[rstest]
    fn equal_split_rejects_empty_roster(policy: SplitPolicy) {
        let err = policy
            .equal(Money::from_rupees(10), &[])
            .expect_err("no members");
        assert_eq!(err, SplitError::NoMembers);
    }

    #[rstest]
    fn equal_split_rejects_duplicates(policy: SplitPolicy) {
        let err = policy
            .equal(
                Money::from_rupees(10),
                &[MemberId(1), MemberId(2), MemberId(1)],
            )
            .expect_err("duplicate member");
        assert_eq!(err, SplitError::DuplicateMember(MemberId(1)));
    }

    #[rstest]
    #[case::zero(Money::ZERO)]
    #[case::negative(Money::from_paise(-500))]
    fn equal_split_rejects_non_positive_amounts(policy: SplitPolicy, #[case] amount: Money) {
        let err = policy
            .equal(amount, &[MemberId(1)])
            .expect_err("bad amount");
        assert_eq!(err, SplitError::NonPositiveAmount(amount));
    }

    #[rstest]
    #[case::even_halves(
        10_000,
        vec![(1, 5_000), (2, 5_000)],
        vec![(MemberId(1), 5_000), (MemberId(2), 5_000)]
    )]
    #[case::sixty_forty(
        25_000,
        vec![(1, 6_000), (2, 4_000)],
        vec![(MemberId(1), 15_000), (MemberId(2), 10_000)]
    )]
    #[case::thirds_lose_a_paisa_to_the_front(
        100,
        vec![(1, 3_334), (2, 3_333), (3, 3_333)],
        vec![(MemberId(1), 34), (MemberId(2), 33), (MemberId(3), 33)]
    )]
    #[case::fractional_percent(
        20_000,
        vec![(1, 125), (2, 9_875)],
        vec![(MemberId(1), 250), (MemberId(2), 19_750)]
    )]
    fn percentage_split_distributes_by_basis_points(
        policy: SplitPolicy,
        #[case] amount_paise: i64,
        #[case] allocations: Vec<(u64, u32)>,
        #[case] expected: Vec<(MemberId, i64)>,
    ) {
        let allocations: Vec<(MemberId, u32)> = allocations
            .into_iter()
            .map(|(id, bp)| (MemberId(id), bp))
            .collect();
        let splits = policy
            .percentage(Money::from_paise(amount_paise), &allocations)
            .expect("valid split");

        assert_eq!(paise_of(&splits), expected);
        assert_eq!(
            splits.iter().map(|s| s.amount.paise()).sum::<i64>(),
            amount_paise
        );
    }

    #[rstest]
    #[case::undershoot(vec![(1, 4_000), (2, 4_000)], 8_000)]
    #[case::overshoot(vec![(1, 6_000), (2, 6_000)], 12_000)]
    fn percentage_split_requires_full_coverage(
        policy: SplitPolicy,
        #[case] allocations: Vec<(u64, u32)>,
        #[case] got_bp: u64,
    ) {
        let allocations: Vec<(MemberId, u32)> = allocations
            .into_iter()
            .map(|(id, bp)| (MemberId(id), bp))
            .collect();
        let err = policy
            .percentage(Money::from_rupees(100), &allocations)
            .expect_err("incomplete percentages");
        assert_eq!(err, SplitError::PercentagesNotFull { got_bp });
    }

    #[rstest]
    fn manual_split_accepts_exact_shares(policy: SplitPolicy) {
        let splits = policy
            .manual(
                Money::from_paise(9_000),
                &[
                    (MemberId(1), Money::from_paise(6_000)),
                    (MemberId(2), Money::from_paise(3_000)),
                ],
            )
            .expect("exact shares");
        assert_eq!(
            paise_of(&splits),
            vec![(MemberId(1), 6_000), (MemberId(2), 3_000)]
        );
    }

    #[rstest]
    #[case::one_paisa_under(8_999)]
    #[case::one_paisa_over(9_001)]
    fn manual_split_tolerates_one_paisa(policy: SplitPolicy, #[case] share: i64) {
        let splits = policy
            .manual(
                Money::from_paise(9_000),
                &[(MemberId(1), Money::from_paise(share))],
            )
            .expect("within tolerance");
        assert_eq!(paise_of(&splits), vec![(MemberId(1), share)]);
    }

    #[rstest]
    fn manual_split_rejects_larger_drift(policy: SplitPolicy) {
        let err = policy
            .manual(
                Money::from_paise(9_000),
                &[
                    (MemberId(1), Money::from_paise(5_000)),
                    (MemberId(2), Money::from_paise(3_998)),
                ],
            )
            .expect_err("two paise off");
        assert_eq!(
            err,
            SplitError::ManualMismatch {
                total: Money::from_paise(8_998),
                expected: Money::from_paise(9_000),
            }
        );
    }
}
