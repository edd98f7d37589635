use finsplit_domain::Money;

/// Formats an amount in rupees: `₹450.00`, `₹-12.34`.
pub fn format_inr(amount: Money) -> String {
    format!("₹{amount}")
}

/// Like [`format_inr`], but non-negative amounts carry an explicit plus sign.
pub fn format_inr_signed(amount: Money) -> String {
    if amount.is_negative() {
        format_inr(amount)
    } else {
        format!("₹+{amount}")
    }
}
