//! Caller facing order model consumed by the connector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// This Unit struct represents MinorUnit in which the provider expects amounts
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// gets amount as i64 value
    pub fn get_amount_as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchase as described by the caller.
///
/// `service_id`, `amount`, `client_ip` and `return_url` are mandatory; they are optional here so
/// that a missing value is reported as a validation error instead of being unrepresentable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRequest {
    pub service_id: Option<String>,
    /// Amount in major currency units, e.g. `10.00`.
    pub amount: Option<Decimal>,
    pub client_ip: Option<String>,
    pub return_url: Option<String>,
    pub description: Option<String>,
    pub notify_url: Option<String>,
    /// ISO-4217 code, `EUR` when unset.
    pub currency: Option<String>,
    pub order_number: Option<String>,
    pub transaction_reference: Option<String>,
    pub payment_method: Option<u32>,
    pub issuer: Option<u32>,
    pub language: Option<String>,
    pub test_mode: bool,
    pub invoice_date: Option<String>,
    pub delivery_date: Option<String>,
    pub expire_date: Option<String>,
    pub customer_reference: Option<String>,
    /// Between -10 and 10.
    pub customer_trust: Option<i8>,
    /// Arbitrary JSON; only a mapping is forwarded, filtered to the provider allow-list.
    pub stats_data: Option<serde_json::Value>,
    pub customer: Option<CustomerDetails>,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<time::Date>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub billing_address: Option<Address>,
    /// Falls back to the billing address when absent.
    pub shipping_address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
pub enum Gender {
    #[serde(rename = "M")]
    #[strum(serialize = "M")]
    Male,
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Female,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Article,
    Shipping,
    Handling,
    Discount,
    Payment,
    Rounding,
    Giftcard,
    Emoney,
}

/// A single order line.
///
/// A plain line only carries a name/description, a price and a quantity. The optional fields
/// are the extra capabilities of a detailed line and are only transmitted when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItem {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Price in major currency units; may be negative for discounts.
    pub price: Decimal,
    pub quantity: u32,
    pub product_id: Option<String>,
    pub product_type: Option<ProductType>,
    pub vat_percentage: Option<Decimal>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            name: Some(name.into()),
            price,
            quantity,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    #[must_use]
    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    #[must_use]
    pub fn with_vat_percentage(mut self, vat_percentage: Decimal) -> Self {
        self.vat_percentage = Some(vat_percentage);
        self
    }
}

/// Lookup of a previously started transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchTransactionRequest {
    pub transaction_reference: Option<String>,
}

impl FetchTransactionRequest {
    pub fn new(transaction_reference: impl Into<String>) -> Self {
        Self {
            transaction_reference: Some(transaction_reference.into()),
        }
    }
}

/// Requests that can recover the provider transaction they refer to.
pub trait TransactionReference {
    fn transaction_reference(&self) -> Option<&str>;
}

impl TransactionReference for OrderRequest {
    fn transaction_reference(&self) -> Option<&str> {
        self.transaction_reference.as_deref()
    }
}

impl TransactionReference for FetchTransactionRequest {
    fn transaction_reference(&self) -> Option<&str> {
        self.transaction_reference.as_deref()
    }
}

/// Normalized state of a provider transaction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Authorized,
    Paid,
    Pending,
    Cancelled,
    Expired,
    #[default]
    Unknown,
}
