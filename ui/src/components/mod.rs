pub mod address_form;
pub mod infinite_scroll;
pub mod layout;
pub mod login_form;
pub mod product_card;
pub mod require_auth;
pub mod toast;

pub use address_form::AddressForm;
pub use infinite_scroll::InfiniteScrollFetcher;
pub use layout::MainLayout;
pub use login_form::LoginForm;
pub use product_card::ProductCard;
pub use require_auth::RequireAuth;
pub use toast::ToastContainer;
