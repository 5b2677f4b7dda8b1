pub mod storefront;
pub mod toast;
