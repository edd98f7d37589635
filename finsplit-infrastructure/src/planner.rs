use finsplit_application::SettlementPlanner;
use finsplit_domain::{MemberBalances, SettlementCalculator, Transfer};

/// Port adapter around the greedy settlement calculator.
#[derive(Default)]
pub struct GreedySettlementPlanner;

impl SettlementPlanner for GreedySettlementPlanner {
    fn plan(&self, balances: &MemberBalances) -> Vec<Transfer> {
        SettlementCalculator.calculate(balances)
    }
}
