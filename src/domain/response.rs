use std::collections::BTreeMap;

use crate::domain::value::{CampaignId, SmsCampaignId, TemplateId};

/// `code` value the provider uses for accepted requests.
pub const SUCCESS_CODE: &str = "success";

/// Envelope wrapping every decoded response.
///
/// `code` and `message` are always present. `data` falls back to its default
/// value when a non-success envelope carries no usable payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response<T> {
    pub code: String,
    pub message: String,
    pub data: T,
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Return `data` for a success envelope, or the envelope's code and message.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// Non-success envelope turned into an error by [`Response::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API error: {code}: {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// One row of `aggregate_report`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub date: String,
    pub tag: String,
    pub requests: u64,
    pub delivered: u64,
    pub bounces: u64,
    pub clicks: u64,
    pub unique_clicks: u64,
    pub opens: u64,
    pub unique_opens: u64,
    pub spam_reports: u64,
    pub blocked: u64,
    pub invalid: u64,
}

/// Campaign or template details from the `campaign/*/detailsv2` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignDetails {
    pub id: CampaignId,
    pub campaign_name: String,
    pub subject: String,
    pub bat_sent: String,
    pub kind: String,
    pub html_content: String,
    pub entered: String,
    pub modified: String,
    pub template_status: String,
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub to_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailData {
    pub message_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateData {
    pub id: TemplateId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateListData {
    pub campaign_records: Vec<CampaignDetails>,
    pub page: u32,
    pub page_limit: u32,
    pub total_campaign_records: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsCampaignData {
    pub id: SmsCampaignId,
}

/// Delivery report for `send_sms` and `sms_campaign_test`.
///
/// Credit amounts keep the provider's number formatting (`"0.50"` stays `"0.50"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsData {
    pub status: String,
    pub number_sent: u64,
    pub to: String,
    pub sms_count: u64,
    pub credits_used: Option<String>,
    pub remaining_credit: Option<String>,
    /// Provider references keyed by message part (`"1"`, `"2"`, ...).
    pub reference: BTreeMap<String, String>,
    pub description: String,
    pub reply: String,
    pub bounce_type: String,
    pub error_code: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_data() {
        let response = Response {
            code: "success".to_owned(),
            message: "Email sent successfully".to_owned(),
            data: EmailData {
                message_id: "<abc@relay>".to_owned(),
            },
        };
        assert!(response.is_success());
        assert_eq!(response.into_result().unwrap().message_id, "<abc@relay>");
    }

    #[test]
    fn failure_envelope_maps_to_api_error() {
        let response = Response::<EmailData> {
            code: "failure".to_owned(),
            message: "Invalid API key".to_owned(),
            data: EmailData::default(),
        };
        assert!(!response.is_success());
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code, "failure");
        assert_eq!(err.message, "Invalid API key");
        assert_eq!(err.to_string(), "API error: failure: Invalid API key");
    }
}
