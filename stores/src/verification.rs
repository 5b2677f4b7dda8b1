use payloads::requests::VerifyEmail;

/// The `token` and `email` query parameters carried by an email
/// verification link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLink {
    pub token: String,
    pub email: String,
}

impl VerificationLink {
    /// Parse a query string, with or without its leading `?`. Both
    /// parameters must be present and non-empty.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut token = None;
        let mut email = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "token" => token = Some(value.into_owned()),
                "email" => email = Some(value.into_owned()),
                _ => {}
            }
        }
        let token = token.filter(|t| !t.is_empty())?;
        let email = email.filter(|e| !e.is_empty())?;
        Some(Self { token, email })
    }

    pub fn into_request(self) -> VerifyEmail {
        VerifyEmail {
            token: self.token,
            email: self.email,
        }
    }
}
