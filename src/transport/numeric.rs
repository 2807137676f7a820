use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Read `null` the way a missing key is read: as the field's default.
///
/// `#[serde(default)]` alone only covers absent keys, and the provider sends
/// explicit `null` for empty fields in otherwise successful responses.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// SMS credit amount exactly as the provider wrote it.
///
/// Numeric tokens are kept verbatim so `1.00` reads back as `"1.00"`. A `null`
/// amount is absorbed by the surrounding `Option`; a blank string also means
/// "no amount" once passed through [`WireCredits::into_amount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireCredits(String);

impl WireCredits {
    pub fn into_amount(self) -> Option<String> {
        Some(self.0).filter(|amount| !amount.trim().is_empty())
    }
}

impl<'de> Deserialize<'de> for WireCredits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let token = raw.get();

        if token.starts_with('"') {
            serde_json::from_str::<String>(token)
                .map(Self)
                .map_err(D::Error::custom)
        } else if token.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            Ok(Self(token.to_owned()))
        } else {
            Err(D::Error::custom(format!(
                "credit amount must be a JSON string or number, got {token}"
            )))
        }
    }
}

/// Boolean flags travel as `0` / `1`.
pub fn zero_or_one(flag: bool) -> u8 {
    u8::from(flag)
}

/// Resource id sent by the provider as a JSON number or a numeric JSON string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IdRepr")]
pub struct WireId(u64);

impl WireId {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

impl TryFrom<IdRepr> for WireId {
    type Error = String;

    fn try_from(value: IdRepr) -> Result<Self, Self::Error> {
        match value {
            IdRepr::Number(id) => Ok(Self(id)),
            IdRepr::Text(text) => text
                .trim()
                .parse::<u64>()
                .map(Self)
                .map_err(|_| format!("expected numeric id, got {text:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_keep_number_token_text() {
        let credits: WireCredits = serde_json::from_str("10.00").unwrap();
        assert_eq!(credits.into_amount().as_deref(), Some("10.00"));

        let credits: WireCredits = serde_json::from_str("\"5.5\"").unwrap();
        assert_eq!(credits.into_amount().as_deref(), Some("5.5"));

        assert!(serde_json::from_str::<WireCredits>("true").is_err());
    }

    #[test]
    fn null_or_blank_credits_carry_no_amount() {
        let credits: Option<WireCredits> = serde_json::from_str("null").unwrap();
        assert!(credits.is_none());

        let credits: WireCredits = serde_json::from_str("\" \"").unwrap();
        assert_eq!(credits.into_amount(), None);
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "null_as_default")]
        count: u64,
        #[serde(deserialize_with = "null_as_default")]
        id: WireId,
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let row: Row = serde_json::from_str(r#"{"name":null,"count":null,"id":null}"#).unwrap();
        assert_eq!(row.name, "");
        assert_eq!(row.count, 0);
        assert_eq!(row.id.value(), 0);

        let row: Row = serde_json::from_str(r#"{"count":4}"#).unwrap();
        assert_eq!(row.count, 4);
        assert_eq!(row.name, "");

        assert!(serde_json::from_str::<Row>(r#"{"count":"four"}"#).is_err());
    }

    #[test]
    fn id_accepts_number_or_numeric_string() {
        let id: WireId = serde_json::from_str("83").unwrap();
        assert_eq!(id.value(), 83);

        let id: WireId = serde_json::from_str("\" 83 \"").unwrap();
        assert_eq!(id.value(), 83);

        assert!(serde_json::from_str::<WireId>("\"abc\"").is_err());
        assert!(serde_json::from_str::<WireId>("-1").is_err());
    }
}
