//! The backend's response envelope, decoded once at the service boundary.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Error;

/// The JSON envelope every non-binary backend response is wrapped in:
/// `{ "status": "SUCCESS", "response": <payload> }`.
///
/// Anything other than a literal `"SUCCESS"` status is treated as an
/// application-level failure, including a missing status field. The payload
/// is held as raw JSON because a failure envelope carries an error message
/// where the payload would be, which must not be decoded as one.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl ApiEnvelope {
    /// Convert the envelope into a typed result. The status is checked
    /// before the payload is decoded.
    ///
    /// A successful envelope may still carry no payload (e.g. the income
    /// total for a month with no transactions), hence `Option<T>`.
    pub(crate) fn into_result<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        match self.status.as_deref() {
            Some("SUCCESS") => match self.response {
                None | Some(Value::Null) => Ok(None),
                Some(payload) => serde_json::from_value(payload)
                    .map(Some)
                    .map_err(|error| Error::Decode(error.to_string())),
            },
            Some(other) => Err(Error::Api(other.to_owned())),
            None => Err(Error::Api("missing status field".to_owned())),
        }
    }
}

/// One page of a paginated backend listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageData<T> {
    /// The records on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Total number of pages for the current page size and search key.
    #[serde(default)]
    pub total_no_of_pages: u64,
    /// Total number of matching records across all pages.
    #[serde(default)]
    pub total_no_of_records: u64,
}

// Derived Default would require T: Default.
impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total_no_of_pages: 0,
            total_no_of_records: 0,
        }
    }
}

/// The error payload the backend embeds in binary download responses when
/// authentication fails. Arrives as bytes and must be parsed back to JSON
/// before the 401 policy can be applied.
#[derive(Debug, Deserialize)]
pub(crate) struct BlobErrorPayload {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod envelope_tests {
    use crate::Error;

    use super::ApiEnvelope;

    #[test]
    fn success_envelope_yields_payload() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"status": "SUCCESS", "response": 42.5}"#).unwrap();

        assert_eq!(envelope.into_result::<f64>(), Ok(Some(42.5)));
    }

    #[test]
    fn success_envelope_may_have_no_payload() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"status": "SUCCESS"}"#).unwrap();

        assert_eq!(envelope.into_result::<f64>(), Ok(None));
    }

    #[test]
    fn success_envelope_with_null_payload_yields_none() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"status": "SUCCESS", "response": null}"#).unwrap();

        assert_eq!(envelope.into_result::<f64>(), Ok(None));
    }

    #[test]
    fn non_success_status_is_an_api_error() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"status": "FAILED", "response": 1.0}"#).unwrap();

        assert_eq!(
            envelope.into_result::<f64>(),
            Err(Error::Api("FAILED".to_owned()))
        );
    }

    #[test]
    fn failure_message_is_not_decoded_as_the_payload() {
        // A failed envelope carries an error string where the payload would
        // be; the status must win over the payload shape.
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"status": "FAILED", "response": "boom"}"#).unwrap();

        assert_eq!(
            envelope.into_result::<f64>(),
            Err(Error::Api("FAILED".to_owned()))
        );
    }

    #[test]
    fn missing_status_is_an_api_error() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"response": 1.0}"#).unwrap();

        assert!(matches!(envelope.into_result::<f64>(), Err(Error::Api(_))));
    }

    #[test]
    fn a_mismatched_success_payload_is_a_decode_error() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"status": "SUCCESS", "response": "not a number"}"#).unwrap();

        assert!(matches!(
            envelope.into_result::<f64>(),
            Err(Error::Decode(_))
        ));
    }
}
