//! REST access to the quest service.

mod client;
mod envelope;
mod error;
mod token;

pub use client::ApiClient;
pub use envelope::{error_message, Envelope, ErrorBody, ErrorEnvelope};
pub use error::ApiError;
pub use token::SecureString;
