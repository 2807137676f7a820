use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::domain::{Response, SUCCESS_CODE};
use crate::transport::numeric::null_as_default;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response data has unexpected shape: {0}")]
    Data(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct JsonEnvelope<'a> {
    code: String,
    #[serde(deserialize_with = "null_as_default")]
    message: String,
    #[serde(default, borrow)]
    data: Option<&'a RawValue>,
}

/// Decode `{code, message, data}` and map `data` through `map`.
///
/// A success envelope must carry `data` of the expected shape. Failure
/// envelopes often carry `[]` or `""` instead, so their `data` falls back to
/// `T::default()`.
pub fn decode_envelope<W, T>(
    json: &str,
    map: impl FnOnce(W) -> T,
) -> Result<Response<T>, TransportError>
where
    W: DeserializeOwned,
    T: Default,
{
    let envelope: JsonEnvelope<'_> = serde_json::from_str(json)?;
    let success = envelope.code == SUCCESS_CODE;

    let data = match envelope.data {
        None => T::default(),
        Some(raw) => match serde_json::from_str::<W>(raw.get()) {
            Ok(wire) => map(wire),
            Err(err) if success => return Err(TransportError::Data(err)),
            Err(_) => T::default(),
        },
    };

    Ok(Response {
        code: envelope.code,
        message: envelope.message,
        data,
    })
}
