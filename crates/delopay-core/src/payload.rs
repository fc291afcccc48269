//! Tolerant decoding of success payloads into response DTOs, and the
//! serializers request DTOs use for amounts.

use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{ser, Serializer};
use serde_json::Value;

/// Decode a success body into a response DTO.
///
/// An absent body (or a literal `null`) yields the all-default DTO. Response
/// DTOs default every field on a missing key, a `null` or a mistyped value,
/// so only a payload that is not a JSON object is rejected. The rejection
/// carries `status`, the HTTP status the body arrived with.
pub fn decode_payload<T>(status: u16, payload: Option<Value>) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    match payload {
        None | Some(Value::Null) => Ok(T::default()),
        Some(Value::Object(map)) => {
            let value = Value::Object(map);
            serde_json::from_value(value.clone())
                .map_err(|_| ApiError::unexpected_payload(status, value))
        }
        Some(other) => Err(ApiError::unexpected_payload(status, other)),
    }
}

/// Serialize an amount, failing on NaN and infinities.
///
/// serde_json writes non-finite floats as `null`, which the gateway would
/// read as an explicit null.
pub(crate) fn finite_amount<S: Serializer>(
    amount: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if !amount.is_finite() {
        return Err(<S::Error as ser::Error>::custom(format!(
            "amount must be finite, got {}",
            amount
        )));
    }
    serializer.serialize_f64(*amount)
}

/// [`finite_amount`] for optional fields; `None` is skipped by the caller.
pub(crate) fn finite_amount_opt<S: Serializer>(
    amount: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match amount {
        Some(amount) => finite_amount(amount, serializer),
        None => serializer.serialize_none(),
    }
}

/// Parse an RFC 3339 wire timestamp, `None` when absent or malformed.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
