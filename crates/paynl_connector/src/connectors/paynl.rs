pub mod requests;
pub mod responses;
pub mod transformers;

use error_stack::ResultExt;

use self::{
    requests::{PaynlPaymentsRequest, PaynlTransactionInfoRequest},
    responses::{PaynlPurchaseResponse, PaynlTransactionView},
    transformers::PaynlRequestBuilder,
};
use crate::{
    consts,
    errors::{ConnectorError, CustomResult},
    logger,
    transport::{ConnectorTransport, Method},
    types::{FetchTransactionRequest, OrderRequest},
};

/// PAY. connector.
///
/// Stateless apart from the precompiled request builder, so a single instance can be shared
/// between callers.
#[derive(Debug, Clone)]
pub struct Paynl {
    request_builder: PaynlRequestBuilder,
}

impl Paynl {
    pub fn new() -> CustomResult<Self, ConnectorError> {
        Ok(Self {
            request_builder: PaynlRequestBuilder::new()?,
        })
    }

    pub fn id(&self) -> &'static str {
        consts::CONNECTOR_ID
    }

    pub fn request_builder(&self) -> &PaynlRequestBuilder {
        &self.request_builder
    }

    /// Builds the `transaction/start` payload without sending it.
    pub fn build_purchase_request(
        &self,
        order: &OrderRequest,
    ) -> CustomResult<PaynlPaymentsRequest, ConnectorError> {
        self.request_builder
            .build(order)
            .change_context(ConnectorError::RequestValidationFailed)
    }

    /// Starts a transaction. The order is validated before anything is sent.
    #[logger::instrument(skip_all, fields(connector = consts::CONNECTOR_ID))]
    pub fn purchase<T>(
        &self,
        transport: &T,
        order: &OrderRequest,
    ) -> CustomResult<PaynlPurchaseResponse, ConnectorError>
    where
        T: ConnectorTransport + ?Sized,
    {
        logger::info!("starting transaction");
        let request = self.build_purchase_request(order)?;
        let payload = serde_json::to_value(&request)
            .change_context(ConnectorError::RequestEncodingFailed)?;
        logger::debug!(
            path = consts::TRANSACTION_START_PATH,
            order_lines = request
                .sale_data
                .order_data
                .as_ref()
                .map_or(0, Vec::len),
            "purchase payload built"
        );

        let response = transport.send(Method::Post, consts::TRANSACTION_START_PATH, &payload)?;
        let response = PaynlPurchaseResponse::new(response);
        logger::info!(
            accepted = response.is_request_accepted(),
            redirect = response.is_redirect(),
            "transaction start response received"
        );
        Ok(response)
    }

    /// Looks up a transaction and wraps the response with the request as back-reference.
    #[logger::instrument(skip_all, fields(connector = consts::CONNECTOR_ID))]
    pub fn fetch_transaction<T>(
        &self,
        transport: &T,
        request: &FetchTransactionRequest,
    ) -> CustomResult<PaynlTransactionView, ConnectorError>
    where
        T: ConnectorTransport + ?Sized,
    {
        logger::info!("fetching transaction");
        let info_request = PaynlTransactionInfoRequest::try_from(request)
            .change_context(ConnectorError::RequestValidationFailed)?;
        let payload = serde_json::to_value(&info_request)
            .change_context(ConnectorError::RequestEncodingFailed)?;
        logger::debug!(path = consts::TRANSACTION_INFO_PATH, "info payload built");

        let response = transport.send(Method::Post, consts::TRANSACTION_INFO_PATH, &payload)?;
        let view = PaynlTransactionView::wrap(response, request);
        logger::info!(
            state_name = view.status().unwrap_or_default(),
            status = %view.transaction_status(),
            "transaction info response received"
        );
        Ok(view)
    }
}
