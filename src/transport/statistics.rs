use serde::{Deserialize, Serialize};

use crate::domain::{AggregateReport, AggregateStats, Response};
use crate::transport::envelope::{TransportError, decode_envelope};
use crate::transport::numeric::{null_as_default, zero_or_one};

#[derive(Debug, Serialize)]
struct AggregateReportJsonBody<'a> {
    aggregate: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AggregateStatsJson {
    #[serde(deserialize_with = "null_as_default")]
    date: String,
    #[serde(deserialize_with = "null_as_default")]
    tag: String,
    #[serde(deserialize_with = "null_as_default")]
    requests: u64,
    #[serde(deserialize_with = "null_as_default")]
    delivered: u64,
    #[serde(deserialize_with = "null_as_default")]
    bounces: u64,
    #[serde(deserialize_with = "null_as_default")]
    clicks: u64,
    #[serde(deserialize_with = "null_as_default")]
    unique_clicks: u64,
    #[serde(deserialize_with = "null_as_default")]
    opens: u64,
    #[serde(deserialize_with = "null_as_default")]
    unique_opens: u64,
    #[serde(deserialize_with = "null_as_default")]
    spamreports: u64,
    #[serde(deserialize_with = "null_as_default")]
    blocked: u64,
    #[serde(deserialize_with = "null_as_default")]
    invalid: u64,
}

impl From<AggregateStatsJson> for AggregateStats {
    fn from(value: AggregateStatsJson) -> Self {
        Self {
            date: value.date,
            tag: value.tag,
            requests: value.requests,
            delivered: value.delivered,
            bounces: value.bounces,
            clicks: value.clicks,
            unique_clicks: value.unique_clicks,
            opens: value.opens,
            unique_opens: value.unique_opens,
            spam_reports: value.spamreports,
            blocked: value.blocked,
            invalid: value.invalid,
        }
    }
}

pub fn encode_aggregate_report_json(
    request: &AggregateReport,
) -> Result<String, serde_json::Error> {
    let body = AggregateReportJsonBody {
        aggregate: zero_or_one(request.aggregate),
        start_date: request.start_date.as_deref(),
        end_date: request.end_date.as_deref(),
        days: request.days,
        tag: request.tag.as_deref(),
    };
    serde_json::to_string(&body)
}

pub fn decode_aggregate_report_json_response(
    json: &str,
) -> Result<Response<Vec<AggregateStats>>, TransportError> {
    decode_envelope(json, |data: Vec<AggregateStatsJson>| {
        data.into_iter().map(AggregateStats::from).collect()
    })
}
