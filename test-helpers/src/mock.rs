//! Sample data shared by the store tests: a couple of users, addresses,
//! cart lines and product pages.

use payloads::{
    Address, AddressId, CartItem, CartItemId, ProductId, Role, RoleId, User,
    UserId, requests,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};

pub const ALICE_TOKEN: &str = "alice-token";

pub fn alice() -> User {
    User {
        id: UserId(1),
        email: "alice@example.com".into(),
        name: Some("Alice".into()),
        email_verified_at: Some("2025-01-01T00:00:00Z".parse().unwrap()),
        roles: vec![Role {
            id: RoleId(2),
            name: "buyer".into(),
        }],
    }
}

pub fn unverified_bob() -> User {
    User {
        id: UserId(2),
        email: "bob@example.com".into(),
        name: None,
        email_verified_at: None,
        roles: vec![],
    }
}

pub fn alice_login_credentials() -> requests::LoginCredentials {
    requests::LoginCredentials {
        email: "alice@example.com".into(),
        password: "supersecret".into(),
    }
}

pub fn orchard_lane() -> requests::NewAddress {
    requests::NewAddress {
        street_address: "1 Orchard Lane".into(),
        city: "Fresno".into(),
        state: "CA".into(),
        country: "US".into(),
        postal_code: "93650".into(),
        ..Default::default()
    }
}

pub fn mill_road() -> requests::NewAddress {
    requests::NewAddress {
        street_address: "200 Mill Road".into(),
        city: "Visalia".into(),
        state: "CA".into(),
        country: "US".into(),
        postal_code: "93291".into(),
        apt: Some("Unit 4".into()),
        ..Default::default()
    }
}

/// A server-side address with a numeric id.
pub fn server_address(
    id: i64,
    details: requests::NewAddress,
    active: bool,
) -> Address {
    let mut address = details.into_temp(AddressId::from(id));
    address.temp = false;
    address.status = active;
    address
}

pub fn cart_item(id: i64, product_id: i64, quantity: u32) -> CartItem {
    CartItem {
        id: CartItemId(id),
        product_id: ProductId(product_id),
        quantity,
        name: format!("Heirloom tomatoes #{product_id}"),
        price: Decimal::new(450, 2),
        image: None,
        unit: Some("lb".into()),
    }
}

/// `count` products with consecutive ids starting at `first_id`.
pub fn products(first_id: i64, count: usize) -> Vec<Value> {
    (0..count as i64)
        .map(|i| {
            let id = first_id + i;
            json!({
                "id": id,
                "name": format!("Product {id}"),
                "price": "3.00",
            })
        })
        .collect()
}
