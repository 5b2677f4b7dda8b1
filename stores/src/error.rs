use payloads::{
    ClientError, requests::FieldError, responses::EnvelopeError,
};

use crate::fetch::describe_error;

pub const CART_AUTH_REQUIRED: &str = "Please log in to manage your cart";
pub const ADDRESS_AUTH_REQUIRED: &str = "Please log in to manage your addresses";
pub const WISHLIST_AUTH_REQUIRED: &str = "Please log in to save favorites";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The action needs a signed-in user; no request was made.
    #[error("{0}")]
    AuthRequired(&'static str),
    #[error("{}", describe_error(.0))]
    Client(#[from] ClientError),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Address {0} was not found")]
    AddressNotFound(String),
}

impl StoreError {
    /// Signing in would resolve this: either the store refused before
    /// sending, or the server answered 401.
    pub fn needs_sign_in(&self) -> bool {
        match self {
            Self::AuthRequired(_) => true,
            Self::Client(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}
