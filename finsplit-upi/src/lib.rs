#![warn(clippy::uninlined_format_args)]

pub mod model;

pub use model::{PaymentRequest, ProviderInfo, UpiId, UpiValidationError};

use finsplit_domain::{Money, Transfer};
use thiserror::Error;

const BANK_HANDLES: &[&str] = &[
    "sbi", "icici", "hdfc", "axis", "kotak", "okhdfcbank", "okaxis", "oksbi", "okicici",
];
const WALLET_HANDLES: &[&str] = &["paytm", "phonepe", "mobikwik", "freecharge", "amazonpay"];
const TELECOM_HANDLES: &[&str] = &["airtel", "jio"];

/// Marketing name for a UPI handle. Unknown handles fall back to a
/// title-cased rendition of the handle itself.
pub fn provider_display_name(handle: &str) -> String {
    match handle {
        "paytm" => "Paytm".to_string(),
        "phonepe" => "PhonePe".to_string(),
        "gpay" => "Google Pay".to_string(),
        "amazonpay" => "Amazon Pay".to_string(),
        "mobikwik" => "MobiKwik".to_string(),
        "freecharge" => "FreeCharge".to_string(),
        "airtel" => "Airtel Money".to_string(),
        "jio" => "JioMoney".to_string(),
        "sbi" => "SBI Pay".to_string(),
        "icici" => "iMobile Pay".to_string(),
        "hdfc" => "HDFC Bank".to_string(),
        "axis" => "Axis Bank".to_string(),
        "kotak" => "Kotak Bank".to_string(),
        "ybl" => "PhonePe".to_string(),
        "okhdfcbank" => "HDFC Bank".to_string(),
        "okaxis" => "Axis Bank".to_string(),
        "oksbi" => "SBI Pay".to_string(),
        "okicici" => "ICICI Bank".to_string(),
        other => title_case(other),
    }
}

pub fn provider_info(id: &UpiId) -> ProviderInfo {
    let handle = id.handle();
    ProviderInfo {
        code: handle.to_string(),
        name: provider_display_name(handle),
        is_bank: BANK_HANDLES.contains(&handle),
        is_wallet: WALLET_HANDLES.contains(&handle),
        is_telecom: TELECOM_HANDLES.contains(&handle),
        supports_qr: true,
        supports_link: true,
    }
}

/// `upi://` deep link understood by every UPI payment app.
///
/// Parameters go in rail order: payee address, amount, then the optional
/// note and reference, then the currency tag.
pub fn payment_link(
    recipient: &UpiId,
    amount: Money,
    note: Option<&str>,
    transaction_ref: Option<&str>,
) -> String {
    let mut link = format!("upi://pay?pa={}&am={}", recipient.as_str(), amount);
    if let Some(note) = note {
        link.push_str("&tn=");
        link.push_str(note);
    }
    if let Some(reference) = transaction_ref {
        link.push_str("&tr=");
        link.push_str(reference);
    }
    link.push_str("&cu=INR");
    link
}

/// Payload for a payment QR code; the deep link doubles as the encoded
/// data.
pub fn qr_data(recipient: &UpiId, amount: Money, note: Option<&str>) -> String {
    payment_link(recipient, amount, note, None)
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRequestError {
    #[error("recipient has no UPI ID configured")]
    MissingRecipientUpi,
    #[error("recipient UPI ID is invalid: {0}")]
    InvalidRecipientUpi(UpiValidationError),
}

/// Builds the payment request for one settlement instruction.
///
/// The note defaults to a pool-branded message when no description is
/// given, and the transaction reference encodes pool plus both parties
/// so the payment can be traced back.
pub fn payment_request(
    pool_id: u64,
    pool_name: &str,
    transfer: &Transfer,
    recipient_name: &str,
    recipient_upi: Option<&str>,
    description: Option<&str>,
) -> Result<PaymentRequest, PaymentRequestError> {
    let raw = recipient_upi.ok_or(PaymentRequestError::MissingRecipientUpi)?;
    let recipient = UpiId::parse(raw).map_err(|error| {
        tracing::debug!(%error, upi_id = raw, "recipient UPI ID failed validation");
        PaymentRequestError::InvalidRecipientUpi(error)
    })?;

    let note = match description {
        Some(text) => text.to_string(),
        None => format!("FinSplit payment for {pool_name}"),
    };
    let transaction_ref = format!("FS{pool_id}{}{}", transfer.from, transfer.to);
    let payment_link = payment_link(
        &recipient,
        transfer.amount,
        Some(&note),
        Some(&transaction_ref),
    );

    Ok(PaymentRequest {
        payment_link,
        recipient_upi: recipient,
        amount: transfer.amount,
        note,
        transaction_ref,
        recipient_name: recipient_name.to_string(),
    })
}

fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alphabetic = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}
