#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::RecordingTransport;
use paynl_connector::{
    consts,
    types::{FetchTransactionRequest, TransactionStatus},
    Method, Paynl,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

#[test]
fn paid_transaction_info() {
    let transport = RecordingTransport::responding_with(json!({
        "request": { "result": "1", "errorId": "", "errorMessage": "" },
        "paymentDetails": {
            "state": "100",
            "stateName": "PAID",
            "paidAmount": "1234",
            "paidCurrency": "EUR",
            "currenyAmount": "1234",
        },
        "stornoDetails": { "stornoAmount": "", "stornoCurrency": "" },
    }));
    let request = FetchTransactionRequest::new("1234567890X1a2b3");

    let view = Paynl::new()
        .unwrap()
        .fetch_transaction(&transport, &request)
        .unwrap();

    let call = transport.single_call();
    assert_eq!(call.method, Method::Post);
    assert_eq!(call.path, consts::TRANSACTION_INFO_PATH);
    assert_eq!(call.payload, json!({ "transactionId": "1234567890X1a2b3" }));

    assert!(view.is_request_accepted());
    assert!(view.is_paid());
    assert!(!view.is_pending());
    assert_eq!(view.transaction_status(), TransactionStatus::Paid);
    assert_eq!(view.amount(), dec!(12.34));
    assert_eq!(view.currency_amount(), dec!(12.34));
    assert_eq!(view.storno_amount(), Decimal::ZERO);
    assert_eq!(view.currency(), Some("EUR"));
    assert_eq!(view.transaction_reference(), Some("1234567890X1a2b3"));
}

#[test]
fn refunded_transaction_reports_storno_amount() {
    let transport = RecordingTransport::responding_with(json!({
        "paymentDetails": { "stateName": "REFUND", "paidAmount": 1234 },
        "stornoDetails": { "stornoAmount": 500 },
    }));

    let view = Paynl::new()
        .unwrap()
        .fetch_transaction(&transport, &FetchTransactionRequest::new("REF"))
        .unwrap();

    assert_eq!(view.storno_amount(), dec!(5));
    assert_eq!(view.transaction_status(), TransactionStatus::Unknown);
}

#[test]
fn empty_response_is_tolerated() {
    let transport = RecordingTransport::responding_with(json!({}));

    let view = Paynl::new()
        .unwrap()
        .fetch_transaction(&transport, &FetchTransactionRequest::new("REF"))
        .unwrap();

    assert!(!view.is_paid());
    assert!(!view.is_pending());
    assert!(!view.is_cancelled());
    assert!(!view.is_request_accepted());
    assert_eq!(view.status(), None);
    assert_eq!(view.amount(), Decimal::ZERO);
    assert_eq!(view.transaction_reference(), Some("REF"));
}

#[test]
fn statuses_follow_state_names() {
    let cases = [
        ("AUTHORIZE", TransactionStatus::Authorized),
        ("PENDING", TransactionStatus::Pending),
        ("VERIFY", TransactionStatus::Pending),
        ("CANCEL", TransactionStatus::Cancelled),
        ("EXPIRED", TransactionStatus::Expired),
    ];

    for (state, expected) in cases {
        let transport = RecordingTransport::responding_with(json!({
            "paymentDetails": { "stateName": state },
        }));
        let view = Paynl::new()
            .unwrap()
            .fetch_transaction(&transport, &FetchTransactionRequest::new("REF"))
            .unwrap();
        assert_eq!(view.transaction_status(), expected, "{state}");
    }
}
