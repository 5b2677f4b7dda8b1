use crate::{Address, AddressId, ProductId, RoleId, UserId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const EMAIL_MAX_LEN: usize = 255;
pub const POSTAL_CODE_MAX_LEN: usize = 16;

/// Deliberately loose: one `@`, no whitespace, a dot in the domain.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("Invalid regex")
});

/// Client-side form validation failures, checked before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required(&'static str),
    InvalidEmail,
    EmailTooLong,
    InvalidUrl(&'static str),
    InvalidPostalCode,
    InvalidQuantity,
}

impl FieldError {
    pub fn message(&self) -> String {
        match self {
            Self::Required(field) => format!("{field} is required"),
            Self::InvalidEmail => "Please enter a valid email address".into(),
            Self::EmailTooLong => {
                format!("Email must be at most {EMAIL_MAX_LEN} characters")
            }
            Self::InvalidUrl(field) => {
                format!("{field} must start with http:// or https://")
            }
            Self::InvalidPostalCode => "Please enter a valid postal code".into(),
            Self::InvalidQuantity => "Quantity must be at least 1".into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for FieldError {}

pub fn validate_required(
    field: &'static str,
    value: &str,
) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required(field));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    validate_required("Email", email)?;
    if email.len() > EMAIL_MAX_LEN {
        return Err(FieldError::EmailTooLong);
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// Optional URL fields (partner websites, store links) must carry a scheme
/// when present.
pub fn validate_url(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), FieldError> {
    match value.map(str::trim) {
        None | Some("") => Ok(()),
        Some(url) if URL_RE.is_match(url) => Ok(()),
        Some(_) => Err(FieldError::InvalidUrl(field)),
    }
}

pub fn validate_postal_code(code: &str) -> Result<(), FieldError> {
    validate_required("Postal code", code)?;
    let code = code.trim();
    if code.len() > POSTAL_CODE_MAX_LEN
        || !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
    {
        return Err(FieldError::InvalidPostalCode);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_email(&self.email)?;
        validate_required("Password", &self.password)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmail {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCart {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItem {
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToWishlist {
    pub product_id: ProductId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRole {
    pub user_id: UserId,
    pub role_id: RoleId,
}

/// Address form contents, used both for server-backed and browser-only
/// addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl NewAddress {
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_required("Street address", &self.street_address)?;
        validate_required("City", &self.city)?;
        validate_required("State", &self.state)?;
        validate_required("Country", &self.country)?;
        validate_postal_code(&self.postal_code)
    }

    /// Build an address that only exists in the browser.
    pub fn into_temp(self, id: AddressId) -> Address {
        Address {
            id,
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            country: self.country,
            postal_code: self.postal_code,
            apt: self.apt,
            business_name: self.business_name,
            latitude: self.latitude,
            longitude: self.longitude,
            status: false,
            temp: true,
        }
    }

    /// Overwrite the editable fields of an existing address, keeping its
    /// id and flags.
    pub fn apply_to(self, address: &mut Address) {
        address.street_address = self.street_address;
        address.city = self.city;
        address.state = self.state;
        address.country = self.country;
        address.postal_code = self.postal_code;
        address.apt = self.apt;
        address.business_name = self.business_name;
        address.latitude = self.latitude;
        address.longitude = self.longitude;
    }
}

impl From<&Address> for NewAddress {
    fn from(address: &Address) -> Self {
        Self {
            street_address: address.street_address.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            country: address.country.clone(),
            postal_code: address.postal_code.clone(),
            apt: address.apt.clone(),
            business_name: address.business_name.clone(),
            latitude: address.latitude,
            longitude: address.longitude,
        }
    }
}

/// Append `page`/`limit` query parameters to a list URL.
pub fn page_url(url: &str, page: u32, limit: usize) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}page={page}&limit={limit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orchard_lane() -> NewAddress {
        NewAddress {
            street_address: "1 Orchard Lane".into(),
            city: "Fresno".into(),
            state: "CA".into(),
            country: "US".into(),
            postal_code: "93650".into(),
            ..Default::default()
        }
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("farmer@example.com").is_ok());
        assert_eq!(validate_email("  "), Err(FieldError::Required("Email")));
        assert_eq!(validate_email("farmer@"), Err(FieldError::InvalidEmail));
        assert_eq!(
            validate_email("two words@example.com"),
            Err(FieldError::InvalidEmail)
        );
        let long = format!("{}@example.com", "x".repeat(EMAIL_MAX_LEN));
        assert_eq!(validate_email(&long), Err(FieldError::EmailTooLong));
    }

    #[test]
    fn url_validation_requires_scheme() {
        assert!(validate_url("Website", None).is_ok());
        assert!(validate_url("Website", Some("")).is_ok());
        assert!(validate_url("Website", Some("https://farm.example")).is_ok());
        assert_eq!(
            validate_url("Website", Some("farm.example")),
            Err(FieldError::InvalidUrl("Website"))
        );
    }

    #[test]
    fn address_validation_reports_first_missing_field() {
        assert!(orchard_lane().validate().is_ok());

        let mut address = orchard_lane();
        address.city = String::new();
        assert_eq!(address.validate(), Err(FieldError::Required("City")));

        let mut address = orchard_lane();
        address.postal_code = "93650!".into();
        assert_eq!(address.validate(), Err(FieldError::InvalidPostalCode));
    }

    #[test]
    fn page_url_respects_existing_query() {
        assert_eq!(page_url("products", 1, 12), "products?page=1&limit=12");
        assert_eq!(
            page_url("products?category=3", 2, 12),
            "products?category=3&page=2&limit=12"
        );
    }
}
