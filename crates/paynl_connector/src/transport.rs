//! HTTP collaborator used by the connector flows.

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::{
    configs::ConnectorParams,
    errors::{ConnectorError, CustomResult},
    logger,
};

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
        }
    }
}

/// Sends a JSON payload to a provider endpoint and returns the JSON response body.
///
/// `path` is relative to the provider base URL. Non-success HTTP statuses are not errors as long
/// as the body is JSON: the provider reports failures inside the body.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectorTransport {
    fn send(
        &self,
        method: Method,
        path: &str,
        payload: &serde_json::Value,
    ) -> CustomResult<serde_json::Value, ConnectorError>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: url::Url,
}

impl HttpTransport {
    pub fn new(params: &ConnectorParams) -> CustomResult<Self, ConnectorError> {
        let mut base_url = params.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = url::Url::parse(&base_url)
            .change_context(ConnectorError::FailedToObtainIntegrationUrl)
            .attach_printable_lazy(|| format!("invalid connector base URL: {}", params.base_url))?;

        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .change_context(ConnectorError::InitializationFailed)
            .attach_printable("failed to construct HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> CustomResult<url::Url, ConnectorError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .change_context(ConnectorError::FailedToObtainIntegrationUrl)
            .attach_printable_lazy(|| format!("invalid endpoint path: {path}"))
    }
}

impl ConnectorTransport for HttpTransport {
    fn send(
        &self,
        method: Method,
        path: &str,
        payload: &serde_json::Value,
    ) -> CustomResult<serde_json::Value, ConnectorError> {
        let url = self.endpoint(path)?;
        logger::debug!(%method, %url, "sending connector request");

        let response = self
            .client
            .request(method.into(), url)
            .json(payload)
            .send()
            .change_context(ConnectorError::ProcessingStepFailed)
            .attach_printable("failed to send connector request")?;

        let status = response.status();
        if !status.is_success() {
            logger::warn!(status = status.as_u16(), "connector responded with error status");
        }

        response
            .json::<serde_json::Value>()
            .change_context(ConnectorError::ResponseDeserializationFailed)
            .attach_printable_lazy(|| format!("response body with status {status} is not JSON"))
    }
}
