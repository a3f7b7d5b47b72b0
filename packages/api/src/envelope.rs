//! The `{statusCode, message, data}` wrapper every endpoint answers with.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Response envelope. `data` is absent on most failures and on commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Split success from the two failure shapes the API reports in-band.
    pub fn into_result(self) -> Result<Self, ApiError> {
        match self.status_code {
            404 => Err(ApiError::NotFound(self.message)),
            _ if self.is_success() => Ok(self),
            status => Err(ApiError::Rejected {
                status,
                message: self.message,
            }),
        }
    }
}

impl Envelope<Value> {
    /// Decode `data` into a concrete type. `null` and absent data stay `None`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        let data = match self.data {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value(value)
                    .map_err(|e| ApiError::Transport(format!("unexpected data shape: {e}")))?,
            ),
        };
        Ok(Envelope {
            status_code: self.status_code,
            message: self.message,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(status: u16, message: &str) -> Envelope<Value> {
        Envelope {
            status_code: status,
            message: message.to_string(),
            data: None,
        }
    }

    #[test]
    fn test_parse_envelope() {
        let env: Envelope<Value> =
            serde_json::from_value(json!({ "statusCode": 200, "message": "ok", "data": [1, 2] }))
                .unwrap();
        assert!(env.is_success());
        assert_eq!(env.message, "ok");
        assert_eq!(env.decode::<Vec<u8>>().unwrap().data, Some(vec![1, 2]));
    }

    #[test]
    fn test_missing_message_and_data() {
        let env: Envelope<Value> = serde_json::from_value(json!({ "statusCode": 201 })).unwrap();
        assert_eq!(env.message, "");
        assert!(env.data.is_none());
        assert!(env.into_result().is_ok());
    }

    #[test]
    fn test_in_band_failures() {
        assert_eq!(
            envelope(404, "No categories").into_result(),
            Err(ApiError::NotFound("No categories".to_string()))
        );
        assert_eq!(
            envelope(400, "Out of stock").into_result(),
            Err(ApiError::Rejected {
                status: 400,
                message: "Out of stock".to_string()
            })
        );
    }

    #[test]
    fn test_null_data_decodes_to_none() {
        let env = Envelope {
            status_code: 200,
            message: String::new(),
            data: Some(Value::Null),
        };
        assert_eq!(env.decode::<Vec<u8>>().unwrap().data, None);
    }

    #[test]
    fn test_wrong_shape_is_transport_error() {
        let env = Envelope {
            status_code: 200,
            message: String::new(),
            data: Some(json!("text")),
        };
        assert!(matches!(env.decode::<Vec<u8>>(), Err(ApiError::Transport(_))));
    }
}
