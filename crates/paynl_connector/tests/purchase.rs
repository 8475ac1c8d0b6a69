#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

mod common;

use common::RecordingTransport;
use paynl_connector::{
    consts,
    errors::{ConnectorError, ValidationError},
    types::{Address, LineItem, ProductType},
    Method, Paynl,
};
use rust_decimal_macros::dec;
use serde_json::json;

fn started() -> serde_json::Value {
    json!({
        "request": { "result": "1", "errorId": "", "errorMessage": "" },
        "transaction": {
            "transactionId": "1234567890X1a2b3",
            "paymentURL": "https://pay.example/payment/1234567890X1a2b3",
            "paymentReference": "9000 0000 1234 5678",
        },
    })
}

#[test]
fn purchase_sends_the_full_payload() {
    let transport = RecordingTransport::responding_with(started());
    let mut order = common::order();
    order.test_mode = true;
    order.payment_method = Some(10);
    order.issuer = Some(1);
    order.customer = Some(common::customer());
    order.customer_reference = Some("CUST-7".to_string());
    order.stats_data = Some(json!({ "info": "campaign", "tool": "checkout", "secret": "s" }));
    order.items = vec![
        LineItem::new("Shirt", dec!(10.00), 1)
            .with_product_id("SHIRT-1")
            .with_product_type(ProductType::Article)
            .with_vat_percentage(dec!(21)),
        LineItem::new("Shipping", dec!(2.34), 1).with_product_type(ProductType::Shipping),
    ];

    let response = Paynl::new().unwrap().purchase(&transport, &order).unwrap();

    let call = transport.single_call();
    assert_eq!(call.method, Method::Post);
    assert_eq!(call.path, consts::TRANSACTION_START_PATH);
    assert_eq!(
        call.payload,
        json!({
            "serviceId": "SL-1234-5678",
            "amount": 1234,
            "ipAddress": "10.0.0.1",
            "finishUrl": "https://shop.example/return",
            "transaction": {
                "description": "Order 42",
                "currency": "EUR",
                "orderExchangeUrl": "https://shop.example/exchange",
                "orderNumber": "42",
            },
            "testMode": 1,
            "paymentOptionId": 10,
            "paymentOptionSubId": 1,
            "enduser": {
                "initials": "Example",
                "lastName": "Customer",
                "gender": "M",
                "dob": "01-12-1990",
                "phoneNumber": "+31201234567",
                "emailAddress": "customer@example.com",
                "language": "NL",
                "address": {
                    "streetName": "Kalverstraat",
                    "streetNumber": "12",
                    "streetNumberExtension": "bis",
                    "zipCode": "1012 NX",
                    "city": "Amsterdam",
                    "countryCode": "NL",
                    "regionCode": "NH",
                },
                "invoiceAddress": {
                    "initials": "Example",
                    "lastName": "Customer",
                    "streetName": "Kalverstraat",
                    "streetNumber": "12",
                    "streetNumberExtension": "bis",
                    "zipCode": "1012 NX",
                    "city": "Amsterdam",
                    "countryCode": "NL",
                    "regionCode": "NH",
                },
                "customerReference": "CUST-7",
            },
            "saleData": {
                "orderData": [
                    {
                        "description": "Shirt",
                        "price": 1000,
                        "quantity": 1,
                        "vatCode": 0,
                        "productId": "SHIRT-1",
                        "productType": "ARTICLE",
                        "vatPercentage": 21.0,
                    },
                    {
                        "description": "Shipping",
                        "price": 234,
                        "quantity": 1,
                        "vatCode": 0,
                        "productId": "Shipping",
                        "productType": "SHIPPING",
                    },
                ],
            },
            "statsData": {
                "info": "campaign",
                "tool": "checkout",
                "object": consts::STATS_DATA_ORIGIN,
            },
        })
    );

    assert!(response.is_request_accepted());
    assert!(response.is_redirect());
    assert!(!response.is_successful());
    assert_eq!(response.redirect_method(), "GET");
    assert_eq!(
        response.redirect_url(),
        Some("https://pay.example/payment/1234567890X1a2b3")
    );
    assert_eq!(response.transaction_reference(), Some("1234567890X1a2b3"));
}

#[test]
fn minimal_order_only_sends_mandatory_blocks() {
    let transport = RecordingTransport::responding_with(started());
    let mut order = common::order();
    order.description = None;
    order.notify_url = None;
    order.order_number = None;

    Paynl::new().unwrap().purchase(&transport, &order).unwrap();

    assert_eq!(
        transport.single_call().payload,
        json!({
            "serviceId": "SL-1234-5678",
            "amount": 1234,
            "ipAddress": "10.0.0.1",
            "finishUrl": "https://shop.example/return",
            "transaction": { "description": null, "currency": "EUR" },
            "testMode": 0,
            "enduser": {},
            "saleData": {},
        })
    );
}

#[test]
fn shipping_address_replaces_billing_in_address_block() {
    let transport = RecordingTransport::responding_with(started());
    let mut customer = common::customer();
    customer.shipping_address = Some(Address {
        line1: Some("Rue de la Loi 16".to_string()),
        city: Some("Brussel".to_string()),
        postcode: Some("1000".to_string()),
        country: Some("BE".to_string()),
        ..Default::default()
    });
    let mut order = common::order();
    order.customer = Some(customer);

    Paynl::new().unwrap().purchase(&transport, &order).unwrap();

    let payload = transport.single_call().payload;
    assert_eq!(
        payload["enduser"]["address"],
        json!({
            "streetName": "Rue de la Loi",
            "streetNumber": "16",
            "streetNumberExtension": null,
            "zipCode": "1000",
            "city": "Brussel",
            "countryCode": "BE",
            "regionCode": null,
        })
    );
    assert_eq!(payload["enduser"]["invoiceAddress"]["city"], "Amsterdam");
    assert_eq!(payload["enduser"]["language"], "NL");
}

#[test]
fn rejected_purchase_is_not_a_redirect() {
    let transport = RecordingTransport::responding_with(json!({
        "request": { "result": "0", "errorId": "PAY-1", "errorMessage": "Amount too low" },
    }));

    let response = Paynl::new()
        .unwrap()
        .purchase(&transport, &common::order())
        .unwrap();

    assert!(!response.is_request_accepted());
    assert!(!response.is_redirect());
    assert_eq!(response.message(), Some("Amount too low"));
}

#[test]
fn validation_failures_are_reported_without_sending() {
    let transport = RecordingTransport::responding_with(started());
    let mut order = common::order();
    order.return_url = Some(String::new());

    let error = Paynl::new()
        .unwrap()
        .purchase(&transport, &order)
        .unwrap_err();

    assert!(transport.calls().is_empty());
    assert_eq!(error.current_context(), &ConnectorError::RequestValidationFailed);
    assert_eq!(
        error.downcast_ref::<ValidationError>(),
        Some(&ValidationError::MissingRequiredField {
            field_name: "return_url"
        })
    );
}
