use crate::model::{MemberBalances, MemberId, Money, Transfer};

/// Settlement planning service
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Reduce net balances to a list of direct transfers
    ///
    /// Members with positive balance become creditors, members with
    /// negative balance become debtors (tracked by absolute value), both
    /// kept in the iteration order of `balances`. Zero balances are
    /// skipped. Two cursors walk the lists front to front; every step
    /// settles `min(credit, debt)`, emits one transfer from the current
    /// debtor to the current creditor, and advances whichever side
    /// reached exactly zero.
    ///
    /// The result is deterministic for a given balance order. When the
    /// balances do not sum to zero one side runs out first and the
    /// remainder stays unsettled; a warning is logged but no error is
    /// raised.
    ///
    /// # Arguments
    /// * `balances` - Net balance table (MemberId -> Money), insertion ordered
    ///
    /// # Returns
    /// Transfers in the order they were produced
    pub fn calculate(&self, balances: &MemberBalances) -> Vec<Transfer> {
        let mut creditors: Vec<(MemberId, Money)> = Vec::new();
        let mut debtors: Vec<(MemberId, Money)> = Vec::new();

        for (&member, &balance) in balances {
            if balance.is_positive() {
                creditors.push((member, balance));
            } else if balance.is_negative() {
                debtors.push((member, balance.abs()));
            }
        }

        let mut transfers = Vec::new();
        let mut credit_idx = 0;
        let mut debt_idx = 0;

        while credit_idx < creditors.len() && debt_idx < debtors.len() {
            let amount = creditors[credit_idx].1.min(debtors[debt_idx].1);

            if amount.is_positive() {
                transfers.push(Transfer {
                    from: debtors[debt_idx].0,
                    to: creditors[credit_idx].0,
                    amount,
                });
            }

            creditors[credit_idx].1 -= amount;
            debtors[debt_idx].1 -= amount;

            if creditors[credit_idx].1.is_zero() {
                credit_idx += 1;
            }
            if debtors[debt_idx].1.is_zero() {
                debt_idx += 1;
            }
        }

        let mut unmatched = Money::ZERO;
        for (_, remaining) in &creditors[credit_idx..] {
            unmatched += *remaining;
        }
        for (_, remaining) in &debtors[debt_idx..] {
            unmatched += *remaining;
        }
        if !unmatched.is_zero() {
            tracing::warn!(
                %unmatched,
                "net balances do not sum to zero; settlement plan is partial"
            );
        }

        transfers
    }
}
