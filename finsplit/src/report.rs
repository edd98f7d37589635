use finsplit_application::SettlementPlan;
use finsplit_domain::{MemberId, Roster};
use serde::Serialize;

/// Machine-readable settlement summary. Amounts are decimal rupee
/// strings so consumers never have to guess the minor unit.
#[derive(Serialize)]
pub struct SettlementReport {
    pub pool: PoolReport,
    pub balances: Vec<BalanceReport>,
    pub transfers: Vec<TransferReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched: Option<String>,
}

#[derive(Serialize)]
pub struct PoolReport {
    pub name: String,
    pub total_expenses: String,
    pub member_count: usize,
    pub outstanding_members: usize,
}

#[derive(Serialize)]
pub struct BalanceReport {
    pub member: String,
    pub paid: String,
    pub owes: String,
    pub net: String,
}

#[derive(Serialize)]
pub struct TransferReport {
    pub from: String,
    pub to: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
}

pub fn build_report(
    plan: &SettlementPlan,
    roster: &Roster,
    pool_id: u64,
    note: Option<&str>,
) -> SettlementReport {
    let member_name = |member: MemberId| -> String {
        match roster.display_name(member) {
            Some(name) => name.to_string(),
            None => member.to_string(),
        }
    };

    let balances = plan
        .balances
        .iter()
        .map(|row| BalanceReport {
            member: member_name(row.member),
            paid: row.paid.to_string(),
            owes: row.owes.to_string(),
            net: row.net.to_string(),
        })
        .collect();

    let transfers = plan
        .transfers
        .iter()
        .map(|transfer| {
            let payment_link = finsplit_upi::payment_request(
                pool_id,
                &plan.pool.name,
                transfer,
                &member_name(transfer.to),
                roster.upi_id(transfer.to),
                note,
            )
            .ok()
            .map(|request| request.payment_link);

            TransferReport {
                from: member_name(transfer.from),
                to: member_name(transfer.to),
                amount: transfer.amount.to_string(),
                payment_link,
            }
        })
        .collect();

    SettlementReport {
        pool: PoolReport {
            name: plan.pool.name.clone(),
            total_expenses: plan.pool.total_expenses.to_string(),
            member_count: plan.pool.member_count,
            outstanding_members: plan.pool.outstanding_members,
        },
        balances,
        transfers,
        unmatched: (!plan.unmatched.is_zero()).then(|| plan.unmatched.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsplit_domain::{BalanceRow, Money, PoolSummary, Transfer};
    use rstest::rstest;

    fn sample_plan() -> SettlementPlan {
        SettlementPlan {
            pool: PoolSummary {
                name: "Flat 4B".to_string(),
                description: String::new(),
                total_expenses: Money::from_rupees(300),
                member_count: 2,
                outstanding_members: 2,
            },
            balances: vec![
                BalanceRow {
                    member: MemberId(1),
                    paid: Money::from_rupees(300),
                    owes: Money::from_rupees(150),
                    net: Money::from_rupees(150),
                },
                BalanceRow {
                    member: MemberId(2),
                    paid: Money::ZERO,
                    owes: Money::from_rupees(150),
                    net: Money::from_rupees(-150),
                },
            ],
            transfers: vec![Transfer {
                from: MemberId(2),
                to: MemberId(1),
                amount: Money::from_rupees(150),
            }],
            transactions: Vec::new(),
            unmatched: Money::ZERO,
        }
    }

    fn sample_roster() -> Roster {
        let mut roster = Roster::new();
        roster.add("Asha", Some("asha@okicici".to_string()));
        roster.add("Vikram", None);
        roster
    }

    #[rstest]
    fn report_serializes_names_amounts_and_links() {
        let report = build_report(&sample_plan(), &sample_roster(), 4, None);

        let value = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(
            value,
            serde_json::json!({
                "pool": {
                    "name": "Flat 4B",
                    "total_expenses": "300.00",
                    "member_count": 2,
                    "outstanding_members": 2,
                },
                "balances": [
                    { "member": "Asha", "paid": "300.00", "owes": "150.00", "net": "150.00" },
                    { "member": "Vikram", "paid": "0.00", "owes": "150.00", "net": "-150.00" },
                ],
                "transfers": [
                    {
                        "from": "Vikram",
                        "to": "Asha",
                        "amount": "150.00",
                        "payment_link": "upi://pay?pa=asha@okicici&am=150.00\
                            &tn=FinSplit payment for Flat 4B&tr=FS421&cu=INR",
                    },
                ],
            })
        );
    }

    #[rstest]
    fn transfers_to_members_without_upi_have_no_link() {
        let mut plan = sample_plan();
        plan.transfers = vec![Transfer {
            from: MemberId(1),
            to: MemberId(2),
            amount: Money::from_rupees(150),
        }];

        let report = build_report(&plan, &sample_roster(), 4, None);

        assert_eq!(report.transfers[0].payment_link, None);
    }

    #[rstest]
    fn residual_balances_appear_in_the_report() {
        let mut plan = sample_plan();
        plan.unmatched = Money::from_paise(-50);

        let report = build_report(&plan, &sample_roster(), 4, None);

        assert_eq!(report.unmatched.as_deref(), Some("-0.50"));
    }
}
