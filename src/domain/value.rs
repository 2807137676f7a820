use std::fmt;

use phonenumber::country;

use crate::domain::validation::{ValidationError, non_blank};

#[derive(Clone, PartialEq, Eq, Hash)]
/// Sendinblue API key sent in the `api-key` header.
///
/// Invariant: non-empty after trimming. `Debug` output never shows the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "api_key";
    /// Header carrying the credential on every request.
    pub const HEADER: &'static str = "api-key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_blank(Self::FIELD, value)?))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Email address as accepted by Sendinblue.
///
/// Invariant: trimmed, has a non-empty local part and domain around `@`, and
/// never contains the `|` recipient delimiter.
pub struct EmailAddress(String);

impl EmailAddress {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "email";

    /// Create a validated [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_blank(Self::FIELD, value)?;
        if value.contains(crate::domain::RECIPIENT_DELIMITER) {
            return Err(ValidationError::ContainsDelimiter {
                field: Self::FIELD,
                delimiter: crate::domain::RECIPIENT_DELIMITER,
            });
        }
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(value)),
            _ => Err(ValidationError::InvalidEmailAddress { input: value }),
        }
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Mobile number as sent to Sendinblue (`to`, `bat_sent`).
///
/// Invariant: non-empty after trimming. No normalization is applied; parse into
/// [`PhoneNumber`] and convert if you want E.164.
pub struct MobileNumber(String);

impl MobileNumber {
    /// JSON field name used by Sendinblue (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) mobile number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_blank(Self::FIELD, value)?))
    }

    /// Raw (trimmed) value as sent to Sendinblue.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for MobileNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input has no explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let raw = non_blank(MobileNumber::FIELD, input)?;

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS sender name (`from`).
///
/// Invariant: non-empty after trimming, at most [`SmsSender::MAX_LEN`] characters.
pub struct SmsSender(String);

impl SmsSender {
    /// JSON field name used by Sendinblue (`from`).
    pub const FIELD: &'static str = "from";
    /// Longest sender accepted by the provider.
    pub const MAX_LEN: usize = 11;

    /// Create a validated [`SmsSender`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_blank(Self::FIELD, value)?;
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: not blank, at most [`SmsText::MAX_LEN`] characters. Whitespace is preserved.
pub struct SmsText(String);

impl SmsText {
    /// JSON field name used by Sendinblue (`text`).
    pub const FIELD: &'static str = "text";
    /// Longest single-message text accepted by the provider.
    pub const MAX_LEN: usize = 160;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a provider-assigned id.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the underlying numeric id.
            pub fn value(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Template id returned by `create_template` and used by template sends and updates.
    TemplateId
);
numeric_id!(
    /// Email campaign id as reported by the campaign details endpoints.
    CampaignId
);
numeric_id!(
    /// SMS campaign id returned by `create_sms_campaign`.
    SmsCampaignId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// SMS routing classification, passed through to the provider as-is.
pub enum SmsType {
    #[default]
    Marketing,
    Transactional,
}

impl SmsType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Transactional => "transactional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Whether a template can be used for sending (`status`: `0` or `1`).
pub enum TemplateStatus {
    #[default]
    Inactive,
    Active,
}

impl TemplateStatus {
    pub fn as_flag(self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Campaign type filter for `list_templates` (`type`).
pub enum CampaignKind {
    Classic,
    Trigger,
    Template,
}

impl CampaignKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Trigger => "trigger",
            Self::Template => "template",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Template status filter for `list_templates` (`status`).
pub enum TemplateListStatus {
    Active,
    Inactive,
}

impl TemplateListStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "temp_active",
            Self::Inactive => "temp_inactive",
        }
    }
}
