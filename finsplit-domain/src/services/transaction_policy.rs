use std::time::SystemTime;

use thiserror::Error;

use crate::model::{MemberId, Money, Transfer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Upi,
    Cash,
    BankTransfer,
    Other,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransactionError {
    #[error("only the receiving member may confirm settlement")]
    NotCreditor,
    #[error("transaction is no longer pending")]
    NotPending,
    #[error("transaction was already settled")]
    AlreadySettled,
}

/// A settlement instruction being carried out.
///
/// `status` tracks the payment itself; `is_settled` is the creditor's
/// confirmation that the money arrived. Confirming settles the payment
/// too, but a completed payment can still await confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementTransaction {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: TransactionStatus,
    pub upi_transaction_id: Option<String>,
    pub note: Option<String>,
    pub is_settled: bool,
    pub completed_at: Option<SystemTime>,
    pub settled_at: Option<SystemTime>,
}

impl SettlementTransaction {
    pub fn pending(transfer: Transfer) -> Self {
        Self {
            from: transfer.from,
            to: transfer.to,
            amount: transfer.amount,
            method: PaymentMethod::default(),
            status: TransactionStatus::Pending,
            upi_transaction_id: None,
            note: None,
            is_settled: false,
            completed_at: None,
            settled_at: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn can_be_settled_by(&self, member: MemberId) -> bool {
        member == self.to && self.status == TransactionStatus::Pending && !self.is_settled
    }

    /// Records that the payment went through, keeping the reference the
    /// payment rail returned.
    pub fn mark_completed(
        &mut self,
        upi_transaction_id: Option<String>,
    ) -> Result<(), TransactionError> {
        if self.status != TransactionStatus::Pending {
            return Err(TransactionError::NotPending);
        }
        self.status = TransactionStatus::Completed;
        self.upi_transaction_id = upi_transaction_id;
        self.completed_at = Some(SystemTime::now());
        Ok(())
    }

    /// Creditor confirmation. Only the receiving member may confirm, and
    /// only while the transaction is pending and unconfirmed.
    pub fn mark_settled(&mut self, by: MemberId) -> Result<(), TransactionError> {
        if by != self.to {
            return Err(TransactionError::NotCreditor);
        }
        if self.is_settled {
            return Err(TransactionError::AlreadySettled);
        }
        if self.status != TransactionStatus::Pending {
            return Err(TransactionError::NotPending);
        }
        let now = SystemTime::now();
        self.is_settled = true;
        self.status = TransactionStatus::Completed;
        self.completed_at = Some(now);
        self.settled_at = Some(now);
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), TransactionError> {
        if self.status != TransactionStatus::Pending {
            return Err(TransactionError::NotPending);
        }
        self.status = TransactionStatus::Cancelled;
        Ok(())
    }
}

/// Per-member rollup over a transaction list. Cancelled transactions
/// count toward the totals but toward neither status bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentStatistics {
    pub total_sent: usize,
    pub total_received: usize,
    pub amount_sent: Money,
    pub amount_received: Money,
    pub pending_sent: usize,
    pub pending_received: usize,
    pub completed_sent: usize,
    pub completed_received: usize,
}

impl PaymentStatistics {
    pub fn for_member(transactions: &[SettlementTransaction], member: MemberId) -> Self {
        let mut stats = Self::default();
        for transaction in transactions {
            if transaction.from == member {
                stats.total_sent += 1;
                stats.amount_sent += transaction.amount;
                match transaction.status {
                    TransactionStatus::Pending => stats.pending_sent += 1,
                    TransactionStatus::Completed => stats.completed_sent += 1,
                    TransactionStatus::Cancelled => {}
                }
            }
            if transaction.to == member {
                stats.total_received += 1;
                stats.amount_received += transaction.amount;
                match transaction.status {
                    TransactionStatus::Pending => stats.pending_received += 1,
                    TransactionStatus::Completed => stats.completed_received += 1,
                    TransactionStatus::Cancelled => {}
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn transaction() -> SettlementTransaction {
        SettlementTransaction::pending(Transfer {
            from: MemberId(2),
            to: MemberId(1),
            amount: Money::from_rupees(150),
        })
    }

    #[rstest]
    fn creditor_confirmation_settles_and_completes(mut transaction: SettlementTransaction) {
        assert!(transaction.can_be_settled_by(MemberId(1)));

        transaction.mark_settled(MemberId(1)).expect("creditor confirms");

        assert!(transaction.is_settled);
        assert_eq!(transaction.status, TransactionStatus::Completed);
        assert!(transaction.completed_at.is_some());
        assert_eq!(transaction.settled_at, transaction.completed_at);
    }

    #[rstest]
    #[case::the_debtor(MemberId(2))]
    #[case::a_stranger(MemberId(9))]
    fn only_the_creditor_may_confirm(
        mut transaction: SettlementTransaction,
        #[case] caller: MemberId,
    ) {
        assert!(!transaction.can_be_settled_by(caller));
        let err = transaction.mark_settled(caller).expect_err("wrong member");
        assert_eq!(err, TransactionError::NotCreditor);
        assert_eq!(transaction.status, TransactionStatus::Pending);
    }

    #[rstest]
    fn double_confirmation_is_rejected(mut transaction: SettlementTransaction) {
        transaction.mark_settled(MemberId(1)).expect("first confirmation");
        let err = transaction
            .mark_settled(MemberId(1))
            .expect_err("second confirmation");
        assert_eq!(err, TransactionError::AlreadySettled);
    }

    #[rstest]
    fn completion_keeps_the_rail_reference(mut transaction: SettlementTransaction) {
        transaction
            .mark_completed(Some("UPI123456".to_string()))
            .expect("pending transaction");

        assert_eq!(transaction.status, TransactionStatus::Completed);
        assert_eq!(transaction.upi_transaction_id.as_deref(), Some("UPI123456"));
        assert!(!transaction.is_settled);
    }

    #[rstest]
    fn cancelled_transactions_stay_cancelled(mut transaction: SettlementTransaction) {
        transaction.cancel().expect("pending transaction");
        assert_eq!(transaction.status, TransactionStatus::Cancelled);

        assert_eq!(transaction.cancel(), Err(TransactionError::NotPending));
        assert_eq!(
            transaction.mark_completed(None),
            Err(TransactionError::NotPending)
        );
        assert_eq!(
            transaction.mark_settled(MemberId(1)),
            Err(TransactionError::NotPending)
        );
    }

    #[test]
    fn statistics_bucket_by_direction_and_status() {
        let mut sent = SettlementTransaction::pending(Transfer {
            from: MemberId(1),
            to: MemberId(2),
            amount: Money::from_rupees(100),
        });
        sent.mark_completed(None).expect("pending");

        let received = SettlementTransaction::pending(Transfer {
            from: MemberId(3),
            to: MemberId(1),
            amount: Money::from_rupees(40),
        });

        let mut cancelled = SettlementTransaction::pending(Transfer {
            from: MemberId(1),
            to: MemberId(3),
            amount: Money::from_rupees(5),
        });
        cancelled.cancel().expect("pending");

        let stats =
            PaymentStatistics::for_member(&[sent, received, cancelled], MemberId(1));

        assert_eq!(stats.total_sent, 2);
        assert_eq!(stats.amount_sent, Money::from_rupees(105));
        assert_eq!(stats.completed_sent, 1);
        assert_eq!(stats.pending_sent, 0);
        assert_eq!(stats.total_received, 1);
        assert_eq!(stats.amount_received, Money::from_rupees(40));
        assert_eq!(stats.pending_received, 1);
    }
}
