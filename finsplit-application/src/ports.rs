use crate::{error::LedgerParseError, model::LedgerScript};
use finsplit_domain::{MemberBalances, MemberId, Roster, Transfer};
use std::collections::HashMap;

pub trait LedgerParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<LedgerScript, LedgerParseError>;
}

pub trait SettlementPlanner: Send + Sync {
    fn plan(&self, balances: &MemberBalances) -> Vec<Transfer>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, member_id: MemberId) -> Option<&str>;

    fn upi_id(&self, _member_id: MemberId) -> Option<&str> {
        None
    }
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.get(&member_id).map(String::as_str)
    }
}

impl MemberDirectory for Roster {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        Roster::display_name(self, member_id)
    }

    fn upi_id(&self, member_id: MemberId) -> Option<&str> {
        Roster::upi_id(self, member_id)
    }
}
