use error_stack::{report, ResultExt};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::requests::{
    PaynlAddress, PaynlEndUser, PaynlEndUserDetails, PaynlInvoiceAddress, PaynlOrderLine,
    PaynlPaymentsRequest, PaynlSaleData, PaynlStreet, PaynlTransaction,
    PaynlTransactionInfoRequest,
};
use crate::{
    consts,
    errors::{ConnectorError, CustomResult, ValidationError},
    logger,
    types::{Address, CustomerDetails, FetchTransactionRequest, Gender, LineItem, OrderRequest},
    utils::{self, missing_field_err, OptionStringExt},
};

/// Builds `transaction/start` payloads out of orders.
///
/// Owns the compiled address pattern so that building stays a pure function of the order.
#[derive(Debug, Clone)]
pub struct PaynlRequestBuilder {
    address_regex: Regex,
}

impl PaynlRequestBuilder {
    pub fn new() -> CustomResult<Self, ConnectorError> {
        let address_regex = Regex::new(consts::ADDRESS_PATTERN)
            .change_context(ConnectorError::InitializationFailed)
            .attach_printable("invalid address pattern")?;
        Ok(Self { address_regex })
    }

    pub fn build(
        &self,
        order: &OrderRequest,
    ) -> CustomResult<PaynlPaymentsRequest, ValidationError> {
        let service_id = order
            .service_id
            .get_non_empty()
            .ok_or_else(missing_field_err("service_id"))?;
        let amount = order.amount.ok_or_else(missing_field_err("amount"))?;
        let client_ip = order
            .client_ip
            .get_non_empty()
            .ok_or_else(missing_field_err("client_ip"))?;
        let return_url = order
            .return_url
            .get_non_empty()
            .ok_or_else(missing_field_err("return_url"))?;
        validate_url("return_url", return_url)?;

        if amount < Decimal::ZERO {
            return Err(report!(ValidationError::InvalidValue {
                message: format!("amount must not be negative, got {amount}"),
            }));
        }

        if let Some(trust) = order.customer_trust {
            if !consts::CUSTOMER_TRUST_RANGE.contains(&trust) {
                return Err(report!(ValidationError::InvalidValue {
                    message: format!("customer_trust must be between -10 and 10, got {trust}"),
                }));
            }
        }

        Ok(PaynlPaymentsRequest {
            service_id: service_id.to_owned(),
            amount: utils::to_minor_unit(amount)?,
            ip_address: client_ip.to_owned(),
            finish_url: return_url.to_owned(),
            transaction: PaynlTransaction::try_from(order)?,
            test_mode: u8::from(order.test_mode),
            payment_option_id: order.payment_method,
            payment_option_sub_id: order
                .payment_method
                .filter(|option| *option == consts::BANK_TRANSFER_PAYMENT_OPTION_ID)
                .and(order.issuer),
            enduser: self.build_end_user(order),
            sale_data: PaynlSaleData::try_from(order)?,
            stats_data: filter_stats_data(order.stats_data.as_ref()),
        })
    }

    /// Splits a single address line into street name, number and number extension.
    ///
    /// Never fails: a line that does not match yields an empty street.
    pub fn parse_address_line(&self, address: &str) -> PaynlStreet {
        let Some(captures) = self.address_regex.captures(address.trim()) else {
            return PaynlStreet::default();
        };
        let part = |index: usize| {
            captures
                .get(index)
                .map(|capture| capture.as_str().trim())
                .filter(|capture| !capture.is_empty())
                .map(str::to_owned)
        };

        PaynlStreet {
            street_name: part(1),
            street_number: part(2),
            street_number_extension: part(3),
        }
    }

    fn parse_street(&self, address: &Address) -> PaynlStreet {
        let line = format!(
            "{} {}",
            address.line1.as_deref().unwrap_or_default(),
            address.line2.as_deref().unwrap_or_default()
        );
        self.parse_address_line(&line)
    }

    fn build_end_user(&self, order: &OrderRequest) -> PaynlEndUser {
        PaynlEndUser {
            details: order
                .customer
                .as_ref()
                .map(|customer| self.build_end_user_details(order, customer)),
            customer_reference: order.customer_reference.get_non_empty().map(str::to_owned),
            customer_trust: order.customer_trust,
        }
    }

    fn build_end_user_details(
        &self,
        order: &OrderRequest,
        customer: &CustomerDetails,
    ) -> PaynlEndUserDetails {
        let no_address = Address::default();
        let billing = customer.billing_address.as_ref().unwrap_or(&no_address);
        let shipping = customer
            .shipping_address
            .as_ref()
            .filter(|shipping| shipping.line1.get_non_empty().is_some())
            .unwrap_or(billing);

        PaynlEndUserDetails {
            initials: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            gender: customer.gender.filter(|gender| *gender != Gender::Unknown),
            dob: customer.birthday.map(format_date_of_birth),
            phone_number: customer.phone.clone(),
            email_address: customer.email.clone(),
            language: order
                .language
                .get_non_empty()
                .map(str::to_owned)
                .or_else(|| language_from_country(customer, billing, shipping)),
            address: PaynlAddress {
                street: self.parse_street(shipping),
                zip_code: shipping.postcode.clone(),
                city: shipping.city.clone(),
                country_code: shipping.country.clone(),
                region_code: shipping.state.clone(),
            },
            invoice_address: PaynlInvoiceAddress {
                initials: billing
                    .first_name
                    .clone()
                    .or_else(|| customer.first_name.clone()),
                last_name: billing
                    .last_name
                    .clone()
                    .or_else(|| customer.last_name.clone()),
                street: self.parse_street(billing),
                zip_code: billing.postcode.clone(),
                city: billing.city.clone(),
                country_code: billing.country.clone(),
                region_code: billing.state.clone(),
            },
        }
    }
}

impl TryFrom<&OrderRequest> for PaynlTransaction {
    type Error = error_stack::Report<ValidationError>;
    fn try_from(order: &OrderRequest) -> Result<Self, Self::Error> {
        let currency = order
            .currency
            .get_non_empty()
            .unwrap_or(consts::DEFAULT_CURRENCY);
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(report!(ValidationError::InvalidValue {
                message: format!("currency must be an ISO-4217 code, got {currency}"),
            }));
        }

        let order_exchange_url = order.notify_url.get_non_empty();
        if let Some(notify_url) = order_exchange_url {
            validate_url("notify_url", notify_url)?;
        }

        Ok(Self {
            description: order.description.get_non_empty().map(str::to_owned),
            currency: currency.to_owned(),
            order_exchange_url: order_exchange_url.map(str::to_owned),
            order_number: order.order_number.get_non_empty().map(str::to_owned),
            expire_date: order.expire_date.get_non_empty().map(str::to_owned),
        })
    }
}

impl TryFrom<&OrderRequest> for PaynlSaleData {
    type Error = error_stack::Report<ValidationError>;
    fn try_from(order: &OrderRequest) -> Result<Self, Self::Error> {
        let order_data = if order.items.is_empty() {
            None
        } else {
            Some(
                order
                    .items
                    .iter()
                    .map(PaynlOrderLine::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        Ok(Self {
            order_data,
            invoice_date: order.invoice_date.get_non_empty().map(str::to_owned),
            delivery_date: order.delivery_date.get_non_empty().map(str::to_owned),
        })
    }
}

impl TryFrom<&LineItem> for PaynlOrderLine {
    type Error = error_stack::Report<ValidationError>;
    fn try_from(item: &LineItem) -> Result<Self, Self::Error> {
        if item.quantity == 0 {
            return Err(report!(ValidationError::InvalidValue {
                message: "line item quantity must be greater than zero".to_string(),
            }));
        }

        let name = item.name.get_non_empty();
        let product_id = match item.product_id.get_non_empty() {
            Some(product_id) => product_id.to_owned(),
            None => utils::truncate_chars(
                name.unwrap_or_default(),
                consts::PRODUCT_ID_MAX_LENGTH,
            ),
        };

        Ok(Self {
            description: name
                .or_else(|| item.description.get_non_empty())
                .map(str::to_owned),
            price: utils::to_minor_unit(item.price)?,
            quantity: item.quantity,
            vat_code: consts::DEFAULT_VAT_CODE,
            product_id,
            product_type: item.product_type,
            vat_percentage: item.vat_percentage,
        })
    }
}

impl TryFrom<&FetchTransactionRequest> for PaynlTransactionInfoRequest {
    type Error = error_stack::Report<ValidationError>;
    fn try_from(request: &FetchTransactionRequest) -> Result<Self, Self::Error> {
        let transaction_id = request
            .transaction_reference
            .get_non_empty()
            .ok_or_else(missing_field_err("transaction_reference"))?;
        Ok(Self {
            transaction_id: transaction_id.to_owned(),
        })
    }
}

fn validate_url(field_name: &'static str, value: &str) -> CustomResult<(), ValidationError> {
    url::Url::parse(value)
        .map(|_| ())
        .change_context(ValidationError::InvalidValue {
            message: format!("{field_name} is not a valid absolute URL"),
        })
}

fn format_date_of_birth(date: time::Date) -> String {
    format!(
        "{:02}-{:02}-{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

fn language_from_country(
    customer: &CustomerDetails,
    billing: &Address,
    shipping: &Address,
) -> Option<String> {
    [&customer.country, &billing.country, &shipping.country]
        .into_iter()
        .find_map(|country| country.get_non_empty())
        .map(|country| utils::truncate_chars(country, 2))
}

/// Keeps the allow-listed keys of a `statsData` mapping and tags it with the origin marker.
/// Anything other than a non-empty mapping is ignored.
fn filter_stats_data(stats_data: Option<&Value>) -> Option<Map<String, Value>> {
    let entries = match stats_data? {
        Value::Object(entries) => entries,
        Value::Null => return None,
        _ => {
            logger::warn!(
                connector = consts::CONNECTOR_ID,
                "ignoring statsData which is not a mapping"
            );
            return None;
        }
    };
    if entries.is_empty() {
        return None;
    }

    let (kept, dropped): (Vec<_>, Vec<_>) = entries
        .iter()
        .partition(|(key, _)| consts::STATS_DATA_ALLOWED_KEYS.contains(&key.as_str()));
    if !dropped.is_empty() {
        let dropped_keys: Vec<&str> = dropped.iter().map(|(key, _)| key.as_str()).collect();
        logger::warn!(
            connector = consts::CONNECTOR_ID,
            ?dropped_keys,
            "dropping statsData keys outside the allow-list"
        );
    }

    let mut filtered: Map<String, Value> = kept
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    filtered.insert(
        consts::STATS_DATA_ORIGIN_KEY.to_string(),
        Value::from(consts::STATS_DATA_ORIGIN),
    );
    Some(filtered)
}
