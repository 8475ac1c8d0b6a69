use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
    consts,
    types::{TransactionReference, TransactionStatus},
    utils,
};

const STATE_NAME: &str = "/paymentDetails/stateName";
const PAID_AMOUNT: &str = "/paymentDetails/paidAmount";
// field name as sent by the provider
const CURRENCY_AMOUNT: &str = "/paymentDetails/currenyAmount";
const PAID_CURRENCY: &str = "/paymentDetails/paidCurrency";
const STORNO_AMOUNT: &str = "/stornoDetails/stornoAmount";
const TRANSACTION_ID: &str = "/transaction/transactionId";
const PAYMENT_URL: &str = "/transaction/paymentURL";
const REQUEST_RESULT: &str = "/request/result";
const REQUEST_ERROR_MESSAGE: &str = "/request/errorMessage";

/// Read-only view over a `transaction/info` response body.
///
/// Every accessor tolerates missing or mistyped fields and falls back to `None`, `0` or `false`.
/// The state predicates intentionally overlap: an `AUTHORIZE` transaction is both paid and
/// authorized, and a `VERIFY` transaction is both pending and in verification.
#[derive(Debug, Clone, PartialEq)]
pub struct PaynlTransactionView {
    raw: Value,
    request_reference: Option<String>,
}

impl PaynlTransactionView {
    /// Wraps a raw response, keeping the reference of the request that produced it.
    pub fn wrap<R>(raw: Value, request: &R) -> Self
    where
        R: TransactionReference + ?Sized,
    {
        Self {
            raw,
            request_reference: request.transaction_reference().map(str::to_owned),
        }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Raw `paymentDetails.stateName`.
    pub fn status(&self) -> Option<&str> {
        str_at(&self.raw, STATE_NAME)
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status(), Some("PAID" | "AUTHORIZE"))
    }

    pub fn is_authorized(&self) -> bool {
        self.status() == Some("AUTHORIZE")
    }

    pub fn is_pending(&self) -> bool {
        self.status().is_some_and(|state| {
            let state = state.to_ascii_uppercase();
            state.contains("PENDING") || state == "VERIFY"
        })
    }

    pub fn is_open(&self) -> bool {
        self.is_pending()
    }

    pub fn is_verify(&self) -> bool {
        self.status()
            .is_some_and(|state| state.eq_ignore_ascii_case("VERIFY"))
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == Some("CANCEL")
    }

    pub fn is_expired(&self) -> bool {
        self.status() == Some("EXPIRED")
    }

    /// Paid amount in major units, `0` when absent.
    pub fn amount(&self) -> Decimal {
        major_amount_at(&self.raw, PAID_AMOUNT)
    }

    /// Amount in the transaction currency in major units, `0` when absent.
    pub fn currency_amount(&self) -> Decimal {
        major_amount_at(&self.raw, CURRENCY_AMOUNT)
    }

    /// Refunded amount in major units, `0` when absent or empty.
    pub fn storno_amount(&self) -> Decimal {
        major_amount_at(&self.raw, STORNO_AMOUNT)
    }

    pub fn currency(&self) -> Option<&str> {
        str_at(&self.raw, PAID_CURRENCY)
    }

    /// `transaction.transactionId`, else the reference of the originating request.
    pub fn transaction_reference(&self) -> Option<&str> {
        str_at(&self.raw, TRANSACTION_ID)
            .filter(|reference| !reference.is_empty())
            .or(self.request_reference.as_deref())
    }

    pub fn is_request_accepted(&self) -> bool {
        is_request_accepted(&self.raw)
    }

    pub fn message(&self) -> Option<&str> {
        request_message(&self.raw)
    }

    pub fn transaction_status(&self) -> TransactionStatus {
        TransactionStatus::from(self)
    }
}

impl From<&PaynlTransactionView> for TransactionStatus {
    fn from(view: &PaynlTransactionView) -> Self {
        if view.is_authorized() {
            Self::Authorized
        } else if view.is_paid() {
            Self::Paid
        } else if view.is_pending() {
            Self::Pending
        } else if view.is_cancelled() {
            Self::Cancelled
        } else if view.is_expired() {
            Self::Expired
        } else {
            Self::Unknown
        }
    }
}

/// Response of `transaction/start`.
///
/// A started transaction is never complete: the customer has to be sent to the payment URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PaynlPurchaseResponse {
    raw: Value,
}

impl PaynlPurchaseResponse {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is_successful(&self) -> bool {
        false
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect_url().is_some()
    }

    pub fn redirect_url(&self) -> Option<&str> {
        str_at(&self.raw, PAYMENT_URL).filter(|url| !url.is_empty())
    }

    pub fn redirect_method(&self) -> &'static str {
        "GET"
    }

    pub fn transaction_reference(&self) -> Option<&str> {
        str_at(&self.raw, TRANSACTION_ID).filter(|reference| !reference.is_empty())
    }

    pub fn is_request_accepted(&self) -> bool {
        is_request_accepted(&self.raw)
    }

    pub fn message(&self) -> Option<&str> {
        request_message(&self.raw)
    }
}

fn str_at<'a>(raw: &'a Value, pointer: &str) -> Option<&'a str> {
    raw.pointer(pointer).and_then(Value::as_str)
}

fn major_amount_at(raw: &Value, pointer: &str) -> Decimal {
    raw.pointer(pointer)
        .and_then(utils::decimal_from_value)
        .map(|minor| minor / Decimal::ONE_HUNDRED)
        .unwrap_or_default()
}

fn is_request_accepted(raw: &Value) -> bool {
    match raw.pointer(REQUEST_RESULT) {
        Some(Value::String(result)) => result == consts::REQUEST_RESULT_ACCEPTED,
        Some(Value::Number(result)) => result.as_u64() == Some(1),
        Some(Value::Bool(result)) => *result,
        _ => false,
    }
}

fn request_message(raw: &Value) -> Option<&str> {
    str_at(raw, REQUEST_ERROR_MESSAGE).filter(|message| !message.is_empty())
}
