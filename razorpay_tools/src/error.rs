use thiserror::Error;

#[derive(Debug, Error)]
pub enum RazorpayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Order amounts must be positive: {0}")]
    InvalidAmount(String),
    #[error("The payment gateway could not be reached: {0}")]
    GatewayUnavailable(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Order creation failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
