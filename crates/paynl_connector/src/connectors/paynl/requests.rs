use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Gender, MinorUnit, ProductType};

// Request body for POST transaction/start
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlPaymentsRequest {
    pub service_id: String,
    pub amount: MinorUnit,
    pub ip_address: String,
    pub finish_url: String,
    pub transaction: PaynlTransaction,
    // 1 or 0, the provider does not accept booleans here
    pub test_mode: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_option_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_option_sub_id: Option<u32>,
    pub enduser: PaynlEndUser,
    pub sale_data: PaynlSaleData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_data: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlTransaction {
    // explicit null when empty
    pub description: Option<String>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_exchange_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
}

/// `enduser` block. Serializes to `{}` when neither customer details nor customer
/// reference/trust are known.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlEndUser {
    #[serde(flatten)]
    pub details: Option<PaynlEndUserDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_trust: Option<i8>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlEndUserDetails {
    // the provider derives initials from the full given name per payment method
    pub initials: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    // d-m-Y
    pub dob: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub language: Option<String>,
    pub address: PaynlAddress,
    pub invoice_address: PaynlInvoiceAddress,
}

/// Street parts extracted from an address line. Missing parts serialize as `null`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlStreet {
    pub street_name: Option<String>,
    pub street_number: Option<String>,
    pub street_number_extension: Option<String>,
}

impl PaynlStreet {
    pub fn is_empty(&self) -> bool {
        self.street_name.is_none()
            && self.street_number.is_none()
            && self.street_number_extension.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlAddress {
    #[serde(flatten)]
    pub street: PaynlStreet,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub region_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlInvoiceAddress {
    pub initials: Option<String>,
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub street: PaynlStreet,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub region_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlSaleData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_data: Option<Vec<PaynlOrderLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlOrderLine {
    pub description: Option<String>,
    pub price: MinorUnit,
    pub quantity: u32,
    pub vat_code: u8,
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub vat_percentage: Option<Decimal>,
}

// Request body for POST transaction/info
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaynlTransactionInfoRequest {
    pub transaction_id: String,
}
