#[cfg(all(feature = "en", feature = "hi"))]
compile_error!("Cannot enable both 'en' and 'hi' features at the same time");

#[cfg(feature = "hi")]
pub mod strings {
    pub const MEMBER: &str = "सदस्य";
    pub const PAID: &str = "चुकाया";
    pub const OWES: &str = "बकाया";
    pub const NET: &str = "शेष";
    pub const FROM: &str = "से";
    pub const TO: &str = "को";
    pub const AMOUNT: &str = "राशि";
    pub const PAYMENT_LINK: &str = "भुगतान लिंक";
    pub const POOL: &str = "पूल";
    pub const TOTAL_EXPENSES: &str = "कुल खर्च";
    pub const ALL_SETTLED: &str = "सबका हिसाब बराबर है";
    pub const MISSING_MEMBERS_DECLARATION: &str =
        "लेजर में `MEMBERS := ...` घोषणा नहीं मिली।";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const PAID: &str = "Paid";
    pub const OWES: &str = "Owes";
    pub const NET: &str = "Net";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const PAYMENT_LINK: &str = "Payment Link";
    pub const POOL: &str = "Pool";
    pub const TOTAL_EXPENSES: &str = "Total expenses";
    pub const ALL_SETTLED: &str = "Everyone is settled up";
    pub const MISSING_MEMBERS_DECLARATION: &str =
        "Could not find a `MEMBERS := ...` declaration in the ledger.";
}

#[cfg(not(any(feature = "en", feature = "hi")))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const PAID: &str = "Paid";
    pub const OWES: &str = "Owes";
    pub const NET: &str = "Net";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const PAYMENT_LINK: &str = "Payment Link";
    pub const POOL: &str = "Pool";
    pub const TOTAL_EXPENSES: &str = "Total expenses";
    pub const ALL_SETTLED: &str = "Everyone is settled up";
    pub const MISSING_MEMBERS_DECLARATION: &str =
        "Could not find a `MEMBERS := ...` declaration in the ledger.";
}

pub use strings::*;

#[cfg(feature = "hi")]
pub fn unmatched_balance_warning(amount: impl std::fmt::Display) -> String {
    format!("शेष {amount} का मिलान नहीं हो सका; सूची अधूरी है")
}

#[cfg(feature = "hi")]
pub fn unknown_member(name: impl std::fmt::Display, line: usize) -> String {
    format!("पंक्ति {line} में अज्ञात सदस्य '{name}'")
}

#[cfg(feature = "hi")]
pub fn duplicate_member(name: impl std::fmt::Display, line: usize) -> String {
    format!("पंक्ति {line} में सदस्य '{name}' दोहराया गया है")
}

#[cfg(feature = "hi")]
pub fn invalid_amount(text: impl std::fmt::Display, line: usize) -> String {
    format!("पंक्ति {line} में अमान्य राशि '{text}'")
}

#[cfg(feature = "hi")]
pub fn invalid_split(line: usize, detail: impl std::fmt::Display) -> String {
    format!("पंक्ति {line} में अमान्य बंटवारा: {detail}")
}

#[cfg(feature = "en")]
pub fn unmatched_balance_warning(amount: impl std::fmt::Display) -> String {
    format!("Balances leave {amount} unmatched; the plan below is partial")
}

#[cfg(feature = "en")]
pub fn unknown_member(name: impl std::fmt::Display, line: usize) -> String {
    format!("Unknown member '{name}' at line {line}")
}

#[cfg(feature = "en")]
pub fn duplicate_member(name: impl std::fmt::Display, line: usize) -> String {
    format!("Duplicate member '{name}' at line {line}")
}

#[cfg(feature = "en")]
pub fn invalid_amount(text: impl std::fmt::Display, line: usize) -> String {
    format!("Invalid amount '{text}' at line {line}")
}

#[cfg(feature = "en")]
pub fn invalid_split(line: usize, detail: impl std::fmt::Display) -> String {
    format!("Invalid split at line {line}: {detail}")
}

#[cfg(not(any(feature = "en", feature = "hi")))]
pub fn unmatched_balance_warning(amount: impl std::fmt::Display) -> String {
    format!("Balances leave {amount} unmatched; the plan below is partial")
}

#[cfg(not(any(feature = "en", feature = "hi")))]
pub fn unknown_member(name: impl std::fmt::Display, line: usize) -> String {
    format!("Unknown member '{name}' at line {line}")
}

#[cfg(not(any(feature = "en", feature = "hi")))]
pub fn duplicate_member(name: impl std::fmt::Display, line: usize) -> String {
    format!("Duplicate member '{name}' at line {line}")
}

#[cfg(not(any(feature = "en", feature = "hi")))]
pub fn invalid_amount(text: impl std::fmt::Display, line: usize) -> String {
    format!("Invalid amount '{text}' at line {line}")
}

#[cfg(not(any(feature = "en", feature = "hi")))]
pub fn invalid_split(line: usize, detail: impl std::fmt::Display) -> String {
    format!("Invalid split at line {line}: {detail}")
}

pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

#[cfg(feature = "hi")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "पंक्ति {} में वाक्य रचना त्रुटि: {}",
            self.line, self.detail
        )
    }
}

#[cfg(feature = "en")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}

#[cfg(not(any(feature = "en", feature = "hi")))]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}
