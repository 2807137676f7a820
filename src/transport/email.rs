use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Email, EmailData, EmailOptions, Mailbox, RecipientList, RecipientMap, Response,
};
use crate::transport::envelope::{TransportError, decode_envelope};
use crate::transport::numeric::null_as_default;

#[derive(Debug, Serialize)]
struct EmailJsonBody<'a> {
    to: BTreeMap<&'a str, &'a str>,
    subject: &'a str,
    from: [&'a str; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    cc: BTreeMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    bcc: BTreeMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replyto: Option<[&'a str; 2]>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attachment: BTreeMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    inline_image: BTreeMap<&'a str, &'a str>,
}

#[derive(Debug, Serialize)]
struct TemplateEmailJsonBody<'a> {
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replyto: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attr: BTreeMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_url: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attachment: BTreeMap<&'a str, &'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<&'a str, &'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmailDataJson {
    #[serde(rename = "message-id", deserialize_with = "null_as_default")]
    message_id: String,
}

fn recipients(map: &RecipientMap) -> BTreeMap<&str, &str> {
    map.iter()
        .map(|(address, name)| (address.as_str(), name.as_str()))
        .collect()
}

fn string_pairs(map: &BTreeMap<String, String>) -> BTreeMap<&str, &str> {
    map.iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
}

fn mailbox_pair(mailbox: &Mailbox) -> [&str; 2] {
    [mailbox.address().as_str(), mailbox.name().unwrap_or_default()]
}

pub fn encode_email_json(email: &Email) -> Result<String, serde_json::Error> {
    let body = EmailJsonBody {
        to: recipients(email.to_recipients()),
        subject: email.subject(),
        from: mailbox_pair(email.sender()),
        html: email.html_body(),
        text: email.text_body(),
        cc: recipients(email.cc()),
        bcc: recipients(email.bcc()),
        replyto: email.reply_to_mailbox().map(mailbox_pair),
        attachment: string_pairs(email.attachments().as_map()),
        headers: string_pairs(email.headers()),
        inline_image: string_pairs(email.inline_images().as_map()),
    };
    serde_json::to_string(&body)
}

pub fn encode_template_email_json(
    to: &RecipientList,
    options: Option<&EmailOptions>,
) -> Result<String, serde_json::Error> {
    let mut body = TemplateEmailJsonBody {
        to: to.to_pipe_delimited(),
        cc: None,
        bcc: None,
        replyto: None,
        attr: BTreeMap::new(),
        attachment_url: None,
        attachment: BTreeMap::new(),
        headers: BTreeMap::new(),
    };

    if let Some(options) = options {
        body.cc = options.cc.as_ref().map(RecipientList::to_pipe_delimited);
        body.bcc = options.bcc.as_ref().map(RecipientList::to_pipe_delimited);
        body.replyto = options.reply_to.as_ref().map(|address| address.as_str());
        body.attr = string_pairs(&options.attr);
        body.attachment_url = options.attachment_url.as_ref().map(url::Url::as_str);
        body.attachment = string_pairs(options.attachment.as_map());
        body.headers = string_pairs(&options.headers);
    }

    serde_json::to_string(&body)
}

pub fn decode_email_json_response(json: &str) -> Result<Response<EmailData>, TransportError> {
    decode_envelope(json, |data: EmailDataJson| EmailData {
        message_id: data.message_id,
    })
}
