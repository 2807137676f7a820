use serde::{Deserialize, Serialize};

use crate::domain::{
    CampaignDetails, CampaignId, Response, Template, TemplateBody, TemplateData, TemplateId,
    TemplateList, TemplateListData,
};
use crate::transport::envelope::{TransportError, decode_envelope};
use crate::transport::numeric::{WireId, null_as_default};

#[derive(Debug, Serialize)]
struct TemplateJsonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from_name: Option<&'a str>,
    template_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bat: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_url: Option<&'a str>,
    subject: &'a str,
    from_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_field: Option<&'a str>,
    status: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct TemplateListJsonBody {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplateDataJson {
    #[serde(deserialize_with = "null_as_default")]
    id: WireId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CampaignJson {
    #[serde(deserialize_with = "null_as_default")]
    id: WireId,
    #[serde(deserialize_with = "null_as_default")]
    campaign_name: String,
    #[serde(deserialize_with = "null_as_default")]
    subject: String,
    #[serde(deserialize_with = "null_as_default")]
    bat_sent: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    #[serde(deserialize_with = "null_as_default")]
    html_content: String,
    #[serde(deserialize_with = "null_as_default")]
    entered: String,
    #[serde(deserialize_with = "null_as_default")]
    modified: String,
    #[serde(deserialize_with = "null_as_default")]
    templ_status: String,
    #[serde(deserialize_with = "null_as_default")]
    from_name: String,
    #[serde(deserialize_with = "null_as_default")]
    from_email: String,
    #[serde(deserialize_with = "null_as_default")]
    reply_to: String,
    #[serde(deserialize_with = "null_as_default")]
    to_field: String,
}

impl From<CampaignJson> for CampaignDetails {
    fn from(value: CampaignJson) -> Self {
        Self {
            id: CampaignId::new(value.id.value()),
            campaign_name: value.campaign_name,
            subject: value.subject,
            bat_sent: value.bat_sent,
            kind: value.kind,
            html_content: value.html_content,
            entered: value.entered,
            modified: value.modified,
            template_status: value.templ_status,
            from_name: value.from_name,
            from_email: value.from_email,
            reply_to: value.reply_to,
            to_field: value.to_field,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplateListJson {
    #[serde(deserialize_with = "null_as_default")]
    campaign_records: Vec<CampaignJson>,
    #[serde(deserialize_with = "null_as_default")]
    page: u32,
    #[serde(deserialize_with = "null_as_default")]
    page_limit: u32,
    #[serde(deserialize_with = "null_as_default")]
    total_campaign_records: u64,
}

pub fn encode_template_json(template: &Template) -> Result<String, serde_json::Error> {
    let options = template.options();
    let (html_content, html_url) = match template.body() {
        TemplateBody::Html(html) => (Some(html.as_str()), None),
        TemplateBody::Url(url) => (None, Some(url.as_str())),
    };

    let body = TemplateJsonBody {
        from_name: options.from_name.as_deref(),
        template_name: template.name(),
        bat: options.bat.as_ref().map(|address| address.as_str()),
        html_content,
        html_url,
        subject: template.subject(),
        from_email: template.from_email().as_str(),
        reply_to: options.reply_to.as_deref(),
        to_field: options.to_field.as_deref(),
        status: options.status.as_flag(),
        attachment_url: options.attachment_url.as_ref().map(url::Url::as_str),
    };
    serde_json::to_string(&body)
}

pub fn encode_template_list_json(request: &TemplateList) -> Result<String, serde_json::Error> {
    let body = TemplateListJsonBody {
        kind: request.kind.map(|kind| kind.as_str()),
        status: request.status.map(|status| status.as_str()),
        page: request.page,
        page_limit: request.page_limit,
    };
    serde_json::to_string(&body)
}

pub fn decode_template_json_response(
    json: &str,
) -> Result<Response<TemplateData>, TransportError> {
    decode_envelope(json, |data: TemplateDataJson| TemplateData {
        id: TemplateId::new(data.id.value()),
    })
}

pub fn decode_campaign_details_json_response(
    json: &str,
) -> Result<Response<Vec<CampaignDetails>>, TransportError> {
    decode_envelope(json, |data: Vec<CampaignJson>| {
        data.into_iter().map(CampaignDetails::from).collect()
    })
}

pub fn decode_template_list_json_response(
    json: &str,
) -> Result<Response<TemplateListData>, TransportError> {
    decode_envelope(json, |data: TemplateListJson| TemplateListData {
        campaign_records: data
            .campaign_records
            .into_iter()
            .map(CampaignDetails::from)
            .collect(),
        page: data.page,
        page_limit: data.page_limit,
        total_campaign_records: data.total_campaign_records,
    })
}
