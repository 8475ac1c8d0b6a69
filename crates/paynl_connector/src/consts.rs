//! Provider constants.

/// Identifier of the connector, used as the log target field.
pub const CONNECTOR_ID: &str = "paynl";

/// Endpoint starting a new transaction.
pub const TRANSACTION_START_PATH: &str = "transaction/start";

/// Endpoint returning the details of an existing transaction.
pub const TRANSACTION_INFO_PATH: &str = "transaction/info";

/// Currency used when the order does not specify one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Payment option which accepts an issuer (`paymentOptionSubId`).
pub const BANK_TRANSFER_PAYMENT_OPTION_ID: u32 = 10;

/// Maximum length of a product id derived from the item name.
pub const PRODUCT_ID_MAX_LENGTH: usize = 25;

/// Fixed VAT code sent with every order line.
pub const DEFAULT_VAT_CODE: u8 = 0;

/// Keys the provider accepts inside `statsData`.
pub const STATS_DATA_ALLOWED_KEYS: [&str; 7] = [
    "promotorId",
    "info",
    "tool",
    "extra1",
    "extra2",
    "extra3",
    "transferData",
];

/// Key of the origin marker added to `statsData`.
pub const STATS_DATA_ORIGIN_KEY: &str = "object";

/// Value of the origin marker added to `statsData`.
pub const STATS_DATA_ORIGIN: &str = "paynl_connector";

/// Street name, house number and house number extension of a single address line.
pub const ADDRESS_PATTERN: &str = r"(?i)^([a-z0-9 [:punct:]']*) ([0-9]{1,5})([a-z0-9 \-/]*)$";

/// Accepted range of `customerTrust`.
pub const CUSTOMER_TRUST_RANGE: std::ops::RangeInclusive<i8> = -10..=10;

/// Request level result flag for an accepted call.
pub const REQUEST_RESULT_ACCEPTED: &str = "1";
