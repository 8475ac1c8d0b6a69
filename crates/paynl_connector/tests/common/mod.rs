#![allow(dead_code, clippy::unwrap_used)]

use std::cell::RefCell;

use paynl_connector::{
    errors::{ConnectorError, CustomResult},
    types::{Address, CustomerDetails, Gender, OrderRequest},
    ConnectorTransport, Method,
};
use rust_decimal_macros::dec;
use serde_json::Value;
use time::macros::date;

/// A call observed by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub payload: Value,
}

/// Transport answering every call with the same body and remembering what was sent.
#[derive(Debug)]
pub struct RecordingTransport {
    response: Value,
    calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn responding_with(response: Value) -> Self {
        Self {
            response,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn single_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

impl ConnectorTransport for RecordingTransport {
    fn send(
        &self,
        method: Method,
        path: &str,
        payload: &Value,
    ) -> CustomResult<Value, ConnectorError> {
        self.calls.borrow_mut().push(RecordedCall {
            method,
            path: path.to_string(),
            payload: payload.clone(),
        });
        Ok(self.response.clone())
    }
}

pub fn billing_address() -> Address {
    Address {
        first_name: Some("Example".to_string()),
        last_name: Some("Customer".to_string()),
        line1: Some("Kalverstraat 12".to_string()),
        line2: Some("bis".to_string()),
        city: Some("Amsterdam".to_string()),
        postcode: Some("1012 NX".to_string()),
        state: Some("NH".to_string()),
        country: Some("NL".to_string()),
    }
}

pub fn customer() -> CustomerDetails {
    CustomerDetails {
        first_name: Some("Example".to_string()),
        last_name: Some("Customer".to_string()),
        gender: Some(Gender::Male),
        birthday: Some(date!(1990 - 12 - 01)),
        phone: Some("+31201234567".to_string()),
        email: Some("customer@example.com".to_string()),
        country: Some("NL".to_string()),
        billing_address: Some(billing_address()),
        shipping_address: None,
    }
}

pub fn order() -> OrderRequest {
    OrderRequest {
        service_id: Some("SL-1234-5678".to_string()),
        amount: Some(dec!(12.34)),
        client_ip: Some("10.0.0.1".to_string()),
        return_url: Some("https://shop.example/return".to_string()),
        notify_url: Some("https://shop.example/exchange".to_string()),
        description: Some("Order 42".to_string()),
        order_number: Some("42".to_string()),
        ..Default::default()
    }
}
