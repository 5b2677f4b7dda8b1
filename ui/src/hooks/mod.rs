pub mod use_email_verification;
pub mod use_fetch;
pub mod use_logout;
pub mod use_require_auth;

pub use use_email_verification::{VerificationStatus, use_email_verification};
pub use use_fetch::{
    FetchHookReturn, FetchOptions, PaginatedHookReturn, PaginatedOptions,
    use_api_fetch, use_paginated_api,
};
pub use use_logout::use_logout;
pub use use_require_auth::{login_form, use_require_auth};
