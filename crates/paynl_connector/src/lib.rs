#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//!
//! Connector for the PAY. payment service provider: maps orders into the provider's
//! `transaction/start` schema and classifies `transaction/info` responses.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod configs;
pub mod connectors;
pub mod consts;
pub mod errors;
pub mod logger;
pub mod transport;
pub mod types;
pub mod utils;

pub use connectors::paynl::{
    self,
    requests::PaynlPaymentsRequest,
    responses::{PaynlPurchaseResponse, PaynlTransactionView},
    transformers::PaynlRequestBuilder,
    Paynl,
};
pub use errors::CustomResult;
pub use transport::{ConnectorTransport, HttpTransport, Method};
