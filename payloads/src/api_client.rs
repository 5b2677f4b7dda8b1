use crate::{
    Address, AddressId, CartItem, CartItemId, Category, Courier, Event,
    LeaderboardEntry, Partner, Product, ProductId, Role, RoleId, Shop, ShopId,
    User, UserId, Volunteer, WishlistItem, requests,
    responses::{self, Envelope},
};
use futures::future::LocalBoxFuture;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A request relative to the API root (`<address>/api/`).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// The wire underneath [`APIClient`]. The browser build uses reqwest; tests
/// plug in an in-process backend.
pub trait Transport {
    fn send(
        &self,
        address: &str,
        request: HttpRequest,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, ClientError>>;
}

pub struct ReqwestTransport {
    pub inner_client: reqwest::Client,
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        address: &str,
        request: HttpRequest,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, ClientError>> {
        let url = format!("{address}/api/{}", request.path);
        Box::pin(async move {
            let builder = match request.method {
                Method::Get => self.inner_client.get(&url),
                Method::Post => self.inner_client.post(&url),
                Method::Put => self.inner_client.put(&url),
                Method::Delete => self.inner_client.delete(&url),
            };
            let builder = builder.header("Accept", "application/json");
            let builder = match request.bearer {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            };
            let builder = match &request.body {
                Some(body) => builder.json(body),
                None => builder,
            };

            #[cfg(target_arch = "wasm32")]
            let builder = builder.fetch_credentials_include();

            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    transport: Rc<dyn Transport>,
    token: RefCell<Option<SecretString>>,
}

impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_transport(
            address,
            Rc::new(ReqwestTransport {
                inner_client: reqwest::Client::new(),
            }),
        )
    }

    pub fn with_transport(
        address: impl Into<String>,
        transport: Rc<dyn Transport>,
    ) -> Self {
        Self {
            address: address.into(),
            transport,
            token: RefCell::new(None),
        }
    }

    /// Install or clear the bearer token sent with every request.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token.map(SecretString::from);
    }

    pub fn has_token(&self) -> bool {
        self.token.borrow().is_some()
    }
}

/// Helper methods for http actions
impl APIClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, ClientError> {
        let bearer = self
            .token
            .borrow()
            .as_ref()
            .map(|t| t.expose_secret().to_string());
        let request = HttpRequest {
            method,
            path: path.trim_start_matches('/').to_string(),
            body,
            bearer,
        };
        tracing::trace!(?method, path = %request.path, "api request");
        self.transport.send(&self.address, request).await
    }

    async fn get(&self, path: &str) -> Result<HttpResponse, ClientError> {
        self.send(Method::Get, path, None).await
    }

    async fn empty_post(&self, path: &str) -> Result<HttpResponse, ClientError> {
        self.send(Method::Post, path, None).await
    }

    async fn post(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<HttpResponse, ClientError> {
        self.send(Method::Post, path, Some(to_json(body)?)).await
    }

    async fn put(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<HttpResponse, ClientError> {
        self.send(Method::Put, path, Some(to_json(body)?)).await
    }

    async fn empty_put(&self, path: &str) -> Result<HttpResponse, ClientError> {
        self.send(Method::Put, path, None).await
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse, ClientError> {
        self.send(Method::Delete, path, None).await
    }
}

/// Generic access used by the fetch hooks.
impl APIClient {
    /// GET any path and unwrap the `data` field of its envelope.
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ClientError> {
        let response = self.get(path).await?;
        ok_body(response)
    }

    /// GET any path and return the raw JSON body, for callers that need to
    /// reshape it themselves. A `{"success": false}` body is still an error.
    pub async fn get_raw(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.get(path).await?;
        ok_raw(response)
    }
}

/// Session and account endpoints
impl APIClient {
    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<responses::LoginResponse, ClientError> {
        let response = self.post("login", details).await?;
        ok_body(response)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.empty_post("logout").await?;
        ok_empty(response)
    }

    /// Get the current user's profile information.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let response = self.get("user").await?;
        ok_body(response)
    }

    pub async fn send_verification_email(&self) -> Result<(), ClientError> {
        let response = self.empty_post("send-verification-email").await?;
        ok_empty(response)
    }

    /// Verify email address using a token from the verification email.
    pub async fn verify_email(
        &self,
        details: &requests::VerifyEmail,
    ) -> Result<(), ClientError> {
        let response = self.post("verify-email", details).await?;
        ok_empty(response)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ClientError> {
        let response = self.get("roles").await?;
        ok_body(response)
    }

    pub async fn get_user_roles(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Role>, ClientError> {
        let response = self.get(&format!("user/roles/{user_id}")).await?;
        ok_body(response)
    }

    pub async fn assign_role(
        &self,
        details: &requests::AssignRole,
    ) -> Result<(), ClientError> {
        let response = self.post("user/roles", details).await?;
        ok_empty(response)
    }

    pub async fn remove_role(
        &self,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<(), ClientError> {
        let response =
            self.delete(&format!("user/roles/{user_id}/{role_id}")).await?;
        ok_empty(response)
    }
}

/// Cart endpoints
impl APIClient {
    pub async fn get_cart(&self) -> Result<Vec<CartItem>, ClientError> {
        let response = self.get("cart").await?;
        ok_body(response)
    }

    /// Returns the resulting line, with the quantity merged server side
    /// when the product was already in the cart.
    pub async fn add_to_cart(
        &self,
        details: &requests::AddToCart,
    ) -> Result<CartItem, ClientError> {
        let response = self.post("cart", details).await?;
        ok_body(response)
    }

    pub async fn update_cart_item(
        &self,
        item_id: &CartItemId,
        details: &requests::UpdateCartItem,
    ) -> Result<CartItem, ClientError> {
        let response = self.put(&format!("cart/{item_id}"), details).await?;
        ok_body(response)
    }

    pub async fn remove_cart_item(
        &self,
        item_id: &CartItemId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("cart/{item_id}")).await?;
        ok_empty(response)
    }

    pub async fn clear_cart(&self) -> Result<(), ClientError> {
        let response = self.delete("cart").await?;
        ok_empty(response)
    }

    pub async fn cart_count(
        &self,
    ) -> Result<responses::CartCount, ClientError> {
        let response = self.get("cart/count").await?;
        ok_body(response)
    }
}

/// Address endpoints
impl APIClient {
    pub async fn get_addresses(&self) -> Result<Vec<Address>, ClientError> {
        let response = self.get("addresses").await?;
        ok_body(response)
    }

    pub async fn create_address(
        &self,
        details: &requests::NewAddress,
    ) -> Result<Address, ClientError> {
        let response = self.post("addresses", details).await?;
        ok_body(response)
    }

    pub async fn update_address(
        &self,
        address_id: &AddressId,
        details: &requests::NewAddress,
    ) -> Result<Address, ClientError> {
        let response =
            self.put(&format!("addresses/{address_id}"), details).await?;
        ok_body(response)
    }

    pub async fn delete_address(
        &self,
        address_id: &AddressId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("addresses/{address_id}")).await?;
        ok_empty(response)
    }

    /// Mark an address as the delivery address. The server deactivates the
    /// others.
    pub async fn activate_address(
        &self,
        address_id: &AddressId,
    ) -> Result<(), ClientError> {
        let response = self
            .empty_put(&format!("addresses/{address_id}/activate"))
            .await?;
        ok_empty(response)
    }
}

/// Wishlist endpoints
impl APIClient {
    pub async fn get_wishlist(&self) -> Result<Vec<WishlistItem>, ClientError> {
        let response = self.get("wishlist").await?;
        ok_body(response)
    }

    pub async fn add_to_wishlist(
        &self,
        details: &requests::AddToWishlist,
    ) -> Result<WishlistItem, ClientError> {
        let response = self.post("wishlist", details).await?;
        ok_body(response)
    }

    pub async fn remove_from_wishlist(
        &self,
        product_id: &ProductId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("wishlist/{product_id}")).await?;
        ok_empty(response)
    }
}

/// Catalog and community endpoints
impl APIClient {
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.get("categories").await?;
        ok_body(response)
    }

    pub async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Product, ClientError> {
        let response = self.get(&format!("products/{product_id}")).await?;
        ok_body(response)
    }

    pub async fn get_shop(&self, shop_id: &ShopId) -> Result<Shop, ClientError> {
        let response = self.get(&format!("stores/{shop_id}")).await?;
        ok_body(response)
    }

    pub async fn get_partner(&self, partner_id: i64) -> Result<Partner, ClientError> {
        let response = self.get(&format!("partners/{partner_id}")).await?;
        ok_body(response)
    }

    pub async fn get_event(&self, event_id: i64) -> Result<Event, ClientError> {
        let response = self.get(&format!("events/{event_id}")).await?;
        ok_body(response)
    }

    pub async fn leaderboard(
        &self,
    ) -> Result<Vec<LeaderboardEntry>, ClientError> {
        let response = self.get("leaderboard").await?;
        ok_body(response)
    }

    pub async fn list_couriers(&self) -> Result<Vec<Courier>, ClientError> {
        let response = self.get("couriers").await?;
        ok_body(response)
    }

    pub async fn list_volunteers(&self) -> Result<Vec<Volunteer>, ClientError> {
        let response = self.get("volunteers").await?;
        ok_body(response)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing the server message or
    /// the response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    /// The server answered 2xx with `{"success": false}`.
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. Please check your connection.")]
    Network(String),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// The message the server attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::APIError(_, message) | Self::Rejected(message)
                if !message.trim().is_empty() =>
            {
                Some(message)
            }
            _ => None,
        }
    }
}

fn to_json(body: &impl Serialize) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Turn a non-2xx response into an `APIError`, preferring the envelope's
/// `message` over the raw text.
fn check_status(response: &HttpResponse) -> Result<(), ClientError> {
    if response.status.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<Envelope<Value>>(&response.body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| response.body.clone());
    Err(ClientError::APIError(response.status, message))
}

fn rejected(message: Option<String>) -> ClientError {
    ClientError::Rejected(message.unwrap_or_default())
}

/// Deserialize a successful envelope into the desired type, or return an
/// appropriate error.
pub fn ok_body<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<T, ClientError> {
    check_status(&response)?;
    let envelope: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(rejected(envelope.message));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::Decode("missing `data` field".into()))
}

/// Check that a response without payload is OK, returning a ClientError if
/// not. An empty 2xx body counts as success.
pub fn ok_empty(response: HttpResponse) -> Result<(), ClientError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(());
    }
    let envelope: Envelope<Value> = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(rejected(envelope.message));
    }
    Ok(())
}

/// Return the whole JSON body of a successful response.
pub fn ok_raw(response: HttpResponse) -> Result<Value, ClientError> {
    check_status(&response)?;
    let value: Value = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(rejected(message));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Value) -> HttpResponse {
        HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn ok_body_unwraps_data() {
        let value: Vec<u32> =
            ok_body(response(200, json!({"success": true, "data": [1, 2]})))
                .unwrap();
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn rejected_envelope_keeps_server_message() {
        let err = ok_body::<Vec<u32>>(response(
            200,
            json!({"success": false, "message": "Product unavailable"}),
        ))
        .unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
        assert_eq!(err.server_message(), Some("Product unavailable"));
    }

    #[test]
    fn error_status_prefers_envelope_message() {
        let err = ok_empty(response(
            422,
            json!({"success": false, "message": "Postal code is invalid"}),
        ))
        .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(err.to_string(), "Postal code is invalid");

        let err = ok_empty(HttpResponse {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        })
        .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn raw_bodies_still_honor_success_flag() {
        let value = ok_raw(response(200, json!([1, 2, 3]))).unwrap();
        assert_eq!(value, json!([1, 2, 3]));

        let err =
            ok_raw(response(200, json!({"success": false}))).unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
        assert_eq!(err.server_message(), None);
    }
}
