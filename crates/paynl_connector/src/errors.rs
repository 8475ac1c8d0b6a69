//! Errors and error specific types for the connector

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Validation errors raised while building a provider request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The provided input is missing a required field.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },

    /// An invalid input was provided.
    #[error("{message}")]
    InvalidValue { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectorError {
    #[error("Failed to initialize the connector")]
    InitializationFailed,
    #[error("Connector request failed validation")]
    RequestValidationFailed,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Error while obtaining URL for the integration")]
    FailedToObtainIntegrationUrl,
    #[error("Failed to execute a processing step")]
    ProcessingStepFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationError {
    #[error("Failed to load configuration")]
    ConfigurationError,
    #[error("Invalid configuration value provided: {0}")]
    InvalidConfigurationValueError(String),
    #[error("Failed to set up logging")]
    LoggerSetupFailed,
}
