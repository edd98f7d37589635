use crate::currency::{format_inr, format_inr_signed};
use crate::text_table::{Alignment, TextTableBuilder};
use finsplit_application::{MemberDirectory, SettlementPlan};
use finsplit_domain::{BalanceRow, MemberId, PoolSummary, Transfer};
use finsplit_i18n as i18n;
use std::borrow::Cow;

const NO_LINK: &str = "-";

pub struct SettlementPresenter;

pub struct SettlementView {
    pub header: String,
    pub balance_table: String,
    pub transfer_table: Option<String>,
    pub warning: Option<String>,
}

/// Knobs for the payment-link column.
pub struct PaymentOptions<'a> {
    pub pool_id: u64,
    pub note: Option<&'a str>,
}

impl SettlementPresenter {
    pub fn render(plan: &SettlementPlan) -> SettlementView {
        let empty_directory = EmptyMemberDirectory;
        Self::render_with_members(plan, &empty_directory)
    }

    pub fn render_with_members(
        plan: &SettlementPlan,
        member_directory: &dyn MemberDirectory,
    ) -> SettlementView {
        Self::render_with_payments(plan, member_directory, None)
    }

    pub fn render_with_payments(
        plan: &SettlementPlan,
        member_directory: &dyn MemberDirectory,
        payments: Option<&PaymentOptions<'_>>,
    ) -> SettlementView {
        let header = Self::build_pool_header(&plan.pool);
        let balance_table = Self::build_balance_table(&plan.balances, member_directory);

        let transfer_table = if plan.transfers.is_empty() {
            None
        } else {
            Some(Self::build_transfer_table(
                &plan.transfers,
                member_directory,
                &plan.pool.name,
                payments,
            ))
        };

        let warning = (!plan.unmatched.is_zero())
            .then(|| i18n::unmatched_balance_warning(format_inr_signed(plan.unmatched)));

        SettlementView {
            header,
            balance_table,
            transfer_table,
            warning,
        }
    }

    pub fn build_pool_header(pool: &PoolSummary) -> String {
        format!(
            "{}: {} ({}: {})",
            i18n::POOL,
            pool.name,
            i18n::TOTAL_EXPENSES,
            format_inr(pool.total_expenses)
        )
    }

    pub fn build_balance_table(
        rows: &[BalanceRow],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::OWES),
                Cow::Borrowed(i18n::NET),
            ]);

        for row in rows {
            builder = builder.row([
                format_member_label(row.member, member_directory),
                Cow::Owned(format_inr(row.paid)),
                Cow::Owned(format_inr(row.owes)),
                Cow::Owned(format_inr_signed(row.net)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
        pool_name: &str,
        payments: Option<&PaymentOptions<'_>>,
    ) -> String {
        match payments {
            Some(options) => Self::build_payment_transfer_table(
                transfers,
                member_directory,
                pool_name,
                options,
            ),
            None => Self::build_plain_transfer_table(transfers, member_directory),
        }
    }

    fn build_plain_transfer_table(
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ]);

        for transfer in transfers {
            builder = builder.row([
                format_member_label(transfer.from, member_directory),
                format_member_label(transfer.to, member_directory),
                Cow::Owned(format_inr(transfer.amount)),
            ]);
        }

        builder.build()
    }

    fn build_payment_transfer_table(
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
        pool_name: &str,
        options: &PaymentOptions<'_>,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
                Cow::Borrowed(i18n::PAYMENT_LINK),
            ]);

        for transfer in transfers {
            let link = payment_link_cell(transfer, member_directory, pool_name, options);
            builder = builder.row([
                format_member_label(transfer.from, member_directory),
                format_member_label(transfer.to, member_directory),
                Cow::Owned(format_inr(transfer.amount)),
                link,
            ]);
        }

        builder.build()
    }
}

struct EmptyMemberDirectory;

impl MemberDirectory for EmptyMemberDirectory {
    fn display_name(&self, _member_id: MemberId) -> Option<&str> {
        None
    }
}

fn format_member_label<'a>(
    member_id: MemberId,
    member_directory: &'a dyn MemberDirectory,
) -> Cow<'a, str> {
    match member_directory.display_name(member_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("member:{member_id}")),
    }
}

fn payment_link_cell(
    transfer: &Transfer,
    member_directory: &dyn MemberDirectory,
    pool_name: &str,
    options: &PaymentOptions<'_>,
) -> Cow<'static, str> {
    let recipient_name = match member_directory.display_name(transfer.to) {
        Some(name) => name.to_string(),
        None => transfer.to.to_string(),
    };

    let request = finsplit_upi::payment_request(
        options.pool_id,
        pool_name,
        transfer,
        &recipient_name,
        member_directory.upi_id(transfer.to),
        options.note,
    );

    match request {
        Ok(request) => Cow::Owned(request.payment_link),
        Err(_) => Cow::Borrowed(NO_LINK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsplit_domain::{Money, Roster};
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    fn sample_plan() -> SettlementPlan {
        SettlementPlan {
            pool: PoolSummary {
                name: "Goa Trip".to_string(),
                description: String::new(),
                total_expenses: Money::from_rupees(540),
                member_count: 2,
                outstanding_members: 2,
            },
            balances: vec![
                BalanceRow {
                    member: MemberId(1),
                    paid: Money::from_rupees(540),
                    owes: Money::from_rupees(270),
                    net: Money::from_rupees(270),
                },
                BalanceRow {
                    member: MemberId(2),
                    paid: Money::ZERO,
                    owes: Money::from_rupees(270),
                    net: Money::from_rupees(-270),
                },
            ],
            transfers: vec![Transfer {
                from: MemberId(2),
                to: MemberId(1),
                amount: Money::from_rupees(270),
            }],
            transactions: Vec::new(),
            unmatched: Money::ZERO,
        }
    }

    #[fixture]
    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.add("Asha", Some("asha@okicici".to_string()));
        roster.add("Vikram", None);
        roster
    }

    #[rstest]
    fn render_uses_display_name_when_available(roster: Roster) {
        let view = SettlementPresenter::render_with_members(&sample_plan(), &roster);

        assert!(view.header.contains("Goa Trip"));
        assert!(view.header.contains("₹540.00"));
        assert!(view.balance_table.contains("Asha"));
        assert!(view.balance_table.contains("₹+270.00"));
        assert!(view.balance_table.contains("₹-270.00"));
        assert!(
            view.transfer_table
                .as_ref()
                .expect("transfer table")
                .contains("Vikram")
        );
        assert!(view.warning.is_none());
    }

    #[rstest]
    fn render_falls_back_to_member_ids_when_missing() {
        let directory: HashMap<MemberId, String> = HashMap::new();

        let view = SettlementPresenter::render_with_members(&sample_plan(), &directory);

        assert!(view.balance_table.contains("member:1"));
        assert!(
            view.transfer_table
                .as_ref()
                .expect("transfer table")
                .contains("member:2")
        );
    }

    #[rstest]
    fn settled_plans_render_no_transfer_table() {
        let mut plan = sample_plan();
        plan.transfers.clear();

        let view = SettlementPresenter::render(&plan);

        assert!(view.transfer_table.is_none());
    }

    #[rstest]
    fn unmatched_residue_becomes_a_warning() {
        let mut plan = sample_plan();
        plan.unmatched = Money::from_paise(150);

        let view = SettlementPresenter::render(&plan);

        let warning = view.warning.expect("warning");
        assert!(warning.contains("₹+1.50"));
    }

    #[rstest]
    fn payment_links_target_the_creditor_upi(roster: Roster) {
        let options = PaymentOptions {
            pool_id: 7,
            note: None,
        };

        let view =
            SettlementPresenter::render_with_payments(&sample_plan(), &roster, Some(&options));

        let table = view.transfer_table.expect("transfer table");
        assert!(table.contains("upi://pay?pa=asha@okicici&am=270.00"));
        assert!(table.contains("tr=FS721"));
    }

    #[rstest]
    fn missing_upi_renders_a_placeholder(roster: Roster) {
        let mut plan = sample_plan();
        // Reverse the debt so the creditor is the member without a UPI id.
        plan.transfers = vec![Transfer {
            from: MemberId(1),
            to: MemberId(2),
            amount: Money::from_rupees(270),
        }];
        let options = PaymentOptions {
            pool_id: 7,
            note: None,
        };

        let view = SettlementPresenter::render_with_payments(&plan, &roster, Some(&options));

        let table = view.transfer_table.expect("transfer table");
        assert!(table.contains("| - "));
        assert!(!table.contains("upi://pay"));
    }
}
