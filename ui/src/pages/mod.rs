pub mod addresses;
pub mod admin_roles;
pub mod cart;
pub mod community;
pub mod events;
pub mod faq;
pub mod favorites;
pub mod home;
pub mod login;
pub mod not_found;
pub mod partners;
pub mod product_detail;

pub use addresses::AddressesPage;
pub use admin_roles::AdminRolesPage;
pub use cart::CartPage;
pub use community::CommunityPage;
pub use events::EventsPage;
pub use faq::FaqPage;
pub use favorites::FavoritesPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use partners::PartnersPage;
pub use product_detail::ProductDetailPage;
