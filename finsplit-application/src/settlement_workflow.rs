use crate::{
    error::LedgerParseError,
    model::{LedgerScript, SettlementPlan},
    ports::{LedgerParser, SettlementPlanner},
};
use finsplit_domain::{Money, PoolLedger, SettlementTransaction};

#[derive(Clone, Copy)]
pub struct SettlementWorkflow<'a> {
    parser: &'a dyn LedgerParser,
    planner: &'a dyn SettlementPlanner,
}

pub enum ProcessingOutcome {
    Success(LedgerScript),
    MissingMembersDeclaration,
    UnknownMember { name: String, line: usize },
    DuplicateMember { name: String, line: usize },
    InvalidAmount { text: String, line: usize },
    InvalidSplit { line: usize, detail: String },
    SyntaxError { line: usize, detail: String },
}

impl<'a> SettlementWorkflow<'a> {
    pub fn new(parser: &'a dyn LedgerParser, planner: &'a dyn SettlementPlanner) -> Self {
        Self { parser, planner }
    }

    pub fn parse_ledger(&self, source: &str) -> ProcessingOutcome {
        match self.parser.parse(source) {
            Ok(script) => ProcessingOutcome::Success(script),
            Err(err) => Self::map_parse_error(err),
        }
    }

    /// Balances, transfers, and the pending transactions to carry them
    /// out, all derived from the ledger in roster order.
    pub fn build_settlement_plan(&self, ledger: &PoolLedger) -> SettlementPlan {
        let balances = ledger.balances();
        let transfers = self.planner.plan(&balances);
        let transactions: Vec<SettlementTransaction> = transfers
            .iter()
            .copied()
            .map(SettlementTransaction::pending)
            .collect();

        let mut unmatched = Money::ZERO;
        for balance in balances.values() {
            unmatched += *balance;
        }
        if !unmatched.is_zero() {
            tracing::warn!(
                pool = ledger.name(),
                %unmatched,
                "balances do not sum to zero; the plan leaves a residual"
            );
        }

        SettlementPlan {
            pool: ledger.summary(),
            balances: ledger.balance_sheet(),
            transfers,
            transactions,
            unmatched,
        }
    }

    fn map_parse_error(err: LedgerParseError) -> ProcessingOutcome {
        match err {
            LedgerParseError::MissingMembersDeclaration => {
                ProcessingOutcome::MissingMembersDeclaration
            }
            LedgerParseError::UnknownMember { name, line } => {
                ProcessingOutcome::UnknownMember { name, line }
            }
            LedgerParseError::DuplicateMember { name, line } => {
                ProcessingOutcome::DuplicateMember { name, line }
            }
            LedgerParseError::InvalidAmount { text, line } => {
                ProcessingOutcome::InvalidAmount { text, line }
            }
            LedgerParseError::InvalidSplit { line, detail } => {
                ProcessingOutcome::InvalidSplit { line, detail }
            }
            LedgerParseError::Syntax { line, detail } => {
                ProcessingOutcome::SyntaxError { line, detail }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Command, ScriptCommand};
    use finsplit_domain::{
        Expense, ExpenseSplit, MemberBalances, MemberId, Roster, SettlementCalculator,
        TransactionStatus, Transfer,
    };
    use rstest::{fixture, rstest};

    struct StubParser;

    impl LedgerParser for StubParser {
        fn parse(&self, _source: &str) -> Result<LedgerScript, LedgerParseError> {
            let mut roster = Roster::new();
            let alice = roster.add("alice", Some("alice@ybl".to_string()));
            let bob = roster.add("bob", None);
            let mut ledger = PoolLedger::new("stub pool", roster);
            ledger
                .record_expense(Expense {
                    title: "Dinner".to_string(),
                    amount: Money::from_rupees(100),
                    paid_by: alice,
                    splits: vec![
                        ExpenseSplit {
                            member: alice,
                            amount: Money::from_rupees(50),
                        },
                        ExpenseSplit {
                            member: bob,
                            amount: Money::from_rupees(50),
                        },
                    ],
                })
                .expect("stub expense is valid");

            Ok(LedgerScript {
                ledger,
                commands: vec![ScriptCommand {
                    line: 4,
                    command: Command::Settle,
                }],
            })
        }
    }

    struct FailingParser(LedgerParseError);

    impl LedgerParser for FailingParser {
        fn parse(&self, _source: &str) -> Result<LedgerScript, LedgerParseError> {
            Err(self.0.clone())
        }
    }

    struct GreedyPlanner;

    impl SettlementPlanner for GreedyPlanner {
        fn plan(&self, balances: &MemberBalances) -> Vec<Transfer> {
            SettlementCalculator.calculate(balances)
        }
    }

    struct NoopPlanner;

    impl SettlementPlanner for NoopPlanner {
        fn plan(&self, _balances: &MemberBalances) -> Vec<Transfer> {
            Vec::new()
        }
    }

    #[fixture]
    fn workflow() -> SettlementWorkflow<'static> {
        SettlementWorkflow::new(&StubParser, &GreedyPlanner)
    }

    #[rstest]
    fn parse_ledger_passes_the_script_through(workflow: SettlementWorkflow<'_>) {
        let ProcessingOutcome::Success(script) = workflow.parse_ledger("unused") else {
            panic!("unexpected parse outcome");
        };

        assert_eq!(script.ledger.name(), "stub pool");
        assert_eq!(script.commands.len(), 1);
        assert_eq!(script.commands[0].command, Command::Settle);
    }

    #[rstest]
    fn plan_covers_balances_transfers_and_transactions(workflow: SettlementWorkflow<'_>) {
        let ProcessingOutcome::Success(script) = workflow.parse_ledger("unused") else {
            panic!("unexpected parse outcome");
        };

        let plan = workflow.build_settlement_plan(&script.ledger);

        assert_eq!(plan.pool.name, "stub pool");
        assert_eq!(plan.balances[0].net, Money::from_rupees(50));
        assert_eq!(
            plan.transfers,
            vec![Transfer {
                from: MemberId(2),
                to: MemberId(1),
                amount: Money::from_rupees(50),
            }]
        );
        assert_eq!(plan.transactions.len(), 1);
        assert_eq!(plan.transactions[0].status, TransactionStatus::Pending);
        assert_eq!(plan.transactions[0].from, MemberId(2));
        assert!(plan.unmatched.is_zero());
    }

    #[rstest]
    fn plan_reports_residual_from_drifting_splits(workflow: SettlementWorkflow<'_>) {
        let mut roster = Roster::new();
        let alice = roster.add("alice", None);
        let bob = roster.add("bob", None);
        let mut ledger = PoolLedger::new("drift pool", roster);
        // Manual splits may land one paisa short of the paid amount.
        ledger
            .record_expense(Expense {
                title: "Auto fare".to_string(),
                amount: Money::from_paise(101),
                paid_by: alice,
                splits: vec![ExpenseSplit {
                    member: bob,
                    amount: Money::from_paise(100),
                }],
            })
            .expect("valid expense");

        let plan = workflow.build_settlement_plan(&ledger);

        assert_eq!(plan.unmatched, Money::from_paise(1));
        assert_eq!(
            plan.transfers,
            vec![Transfer {
                from: bob,
                to: alice,
                amount: Money::from_paise(100),
            }]
        );
    }

    #[rstest]
    fn plan_with_no_transfers_has_no_transactions(workflow: SettlementWorkflow<'_>) {
        let ProcessingOutcome::Success(script) = workflow.parse_ledger("unused") else {
            panic!("unexpected parse outcome");
        };
        let workflow = SettlementWorkflow::new(&StubParser, &NoopPlanner);

        let plan = workflow.build_settlement_plan(&script.ledger);

        assert!(plan.transfers.is_empty());
        assert!(plan.transactions.is_empty());
    }

    #[rstest]
    #[case::missing_members(
        LedgerParseError::MissingMembersDeclaration,
        |outcome: &ProcessingOutcome| matches!(outcome, ProcessingOutcome::MissingMembersDeclaration)
    )]
    #[case::unknown_member(
        LedgerParseError::UnknownMember { name: "carol".to_string(), line: 3 },
        |outcome: &ProcessingOutcome| matches!(
            outcome,
            ProcessingOutcome::UnknownMember { name, line: 3 } if name == "carol"
        )
    )]
    #[case::invalid_amount(
        LedgerParseError::InvalidAmount { text: "12.345".to_string(), line: 2 },
        |outcome: &ProcessingOutcome| matches!(
            outcome,
            ProcessingOutcome::InvalidAmount { text, line: 2 } if text == "12.345"
        )
    )]
    #[case::syntax(
        LedgerParseError::Syntax { line: 5, detail: "expected PAID".to_string() },
        |outcome: &ProcessingOutcome| matches!(
            outcome,
            ProcessingOutcome::SyntaxError { line: 5, detail } if detail == "expected PAID"
        )
    )]
    fn parse_errors_map_to_matching_outcomes(
        #[case] error: LedgerParseError,
        #[case] check: fn(&ProcessingOutcome) -> bool,
    ) {
        let parser = FailingParser(error);
        let workflow = SettlementWorkflow::new(&parser, &NoopPlanner);

        let outcome = workflow.parse_ledger("anything");
        assert!(check(&outcome));
    }
}
