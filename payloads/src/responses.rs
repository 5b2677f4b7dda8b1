use crate::User;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// The wrapper every backend endpoint returns around its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartCount {
    pub total_items: usize,
    pub total_quantity: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Unexpected response shape: expected {0}")]
    UnexpectedShape(String),
    #[error("Could not read list items: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The list envelopes the backend is known to produce.
///
/// List endpoints are not uniform: some return a bare array, most wrap it
/// in `{"data": [..]}`, a few key it by resource name (`{"partners": [..]}`,
/// or `{"data": {"partners": [..]}}` inside the standard envelope) and the
/// paginated ones nest it as `{"data": {"data": [..]}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListShape {
    Bare,
    #[default]
    Data,
    Keyed(&'static str),
    DataKeyed(&'static str),
    Paginated,
}

impl ListShape {
    /// Pull the item array out of a raw response body.
    pub fn extract<T: DeserializeOwned>(
        &self,
        raw: Value,
    ) -> Result<Vec<T>, EnvelopeError> {
        let items = match (self, raw) {
            (ListShape::Bare, Value::Array(items)) => items,
            (ListShape::Data, Value::Object(mut map)) => {
                match map.remove("data") {
                    Some(Value::Array(items)) => items,
                    _ => return Err(self.mismatch()),
                }
            }
            (ListShape::Keyed(key), Value::Object(mut map)) => {
                match map.remove(*key) {
                    Some(Value::Array(items)) => items,
                    _ => return Err(self.mismatch()),
                }
            }
            (ListShape::DataKeyed(key), Value::Object(mut map)) => {
                match map.remove("data") {
                    Some(Value::Object(mut inner)) => match inner.remove(*key) {
                        Some(Value::Array(items)) => items,
                        _ => return Err(self.mismatch()),
                    },
                    _ => return Err(self.mismatch()),
                }
            }
            (ListShape::Paginated, Value::Object(mut map)) => {
                match map.remove("data") {
                    Some(Value::Object(mut page)) => match page.remove("data")
                    {
                        Some(Value::Array(items)) => items,
                        _ => return Err(self.mismatch()),
                    },
                    _ => return Err(self.mismatch()),
                }
            }
            _ => return Err(self.mismatch()),
        };

        items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(EnvelopeError::from)
    }

    fn mismatch(&self) -> EnvelopeError {
        let expected = match self {
            ListShape::Bare => "a JSON array".to_string(),
            ListShape::Data => "an object with a `data` array".to_string(),
            ListShape::Keyed(key) => format!("an object with a `{key}` array"),
            ListShape::DataKeyed(key) => {
                format!("an object with a nested `data.{key}` array")
            }
            ListShape::Paginated => {
                "an object with a nested `data.data` array".to_string()
            }
        };
        EnvelopeError::UnexpectedShape(expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn each_shape_extracts_its_array() {
        let bare: Vec<u32> =
            ListShape::Bare.extract(json!([1, 2, 3])).unwrap();
        assert_eq!(bare, vec![1, 2, 3]);

        let data: Vec<u32> = ListShape::Data
            .extract(json!({"success": true, "data": [4]}))
            .unwrap();
        assert_eq!(data, vec![4]);

        let keyed: Vec<u32> = ListShape::Keyed("partners")
            .extract(json!({"partners": [5, 6]}))
            .unwrap();
        assert_eq!(keyed, vec![5, 6]);

        let nested_keyed: Vec<u32> = ListShape::DataKeyed("partners")
            .extract(json!({"success": true, "data": {"partners": [7]}}))
            .unwrap();
        assert_eq!(nested_keyed, vec![7]);

        let paginated: Vec<u32> = ListShape::Paginated
            .extract(json!({"data": {"data": [8, 9], "current_page": 1}}))
            .unwrap();
        assert_eq!(paginated, vec![8, 9]);
    }

    #[test]
    fn unknown_shape_is_an_error_not_an_empty_list() {
        let result: Result<Vec<u32>, _> =
            ListShape::Data.extract(json!({"items": [1]}));
        assert!(matches!(result, Err(EnvelopeError::UnexpectedShape(_))));

        let result: Result<Vec<u32>, _> =
            ListShape::Bare.extract(json!({"data": []}));
        assert!(matches!(result, Err(EnvelopeError::UnexpectedShape(_))));
    }

    #[test]
    fn keyed_shapes_do_not_stand_in_for_each_other() {
        let nested = json!({"success": true, "data": {"partners": [1]}});
        let result: Result<Vec<u32>, _> =
            ListShape::Keyed("partners").extract(nested);
        assert!(matches!(result, Err(EnvelopeError::UnexpectedShape(_))));

        let result: Result<Vec<u32>, _> =
            ListShape::DataKeyed("partners").extract(json!({"partners": [1]}));
        assert!(matches!(result, Err(EnvelopeError::UnexpectedShape(_))));
    }

    #[test]
    fn envelope_without_data_parses() {
        let envelope: Envelope<u32> = serde_json::from_value(
            json!({"success": false, "message": "Out of stock"}),
        )
        .unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.message.as_deref(), Some("Out of stock"));
    }
}
