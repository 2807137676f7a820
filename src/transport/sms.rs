use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    MobileNumber, Response, SmsCampaign, SmsCampaignData, SmsCampaignId, SmsData, SmsRequest,
};
use crate::transport::envelope::{TransportError, decode_envelope};
use crate::transport::numeric::{WireCredits, WireId, null_as_default, zero_or_one};

#[derive(Debug, Serialize)]
struct SmsJsonBody<'a> {
    to: &'a str,
    from: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(rename = "type")]
    sms_type: &'static str,
}

#[derive(Debug, Serialize)]
struct SmsCampaignJsonBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bat_sent: Option<&'a str>,
    #[serde(rename = "listid", skip_serializing_if = "<[u64]>::is_empty")]
    list_ids: &'a [u64],
    #[serde(skip_serializing_if = "<[u64]>::is_empty")]
    exclude_list: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_date: Option<&'a str>,
    send_now: u8,
}

#[derive(Debug, Serialize)]
struct SmsTestJsonBody<'a> {
    to: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SmsCampaignDataJson {
    #[serde(deserialize_with = "null_as_default")]
    id: WireId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SmsDataJson {
    #[serde(deserialize_with = "null_as_default")]
    status: String,
    #[serde(deserialize_with = "null_as_default")]
    number_sent: u64,
    #[serde(deserialize_with = "null_as_default")]
    to: String,
    #[serde(deserialize_with = "null_as_default")]
    sms_count: u64,
    credits_used: Option<WireCredits>,
    remaining_credit: Option<WireCredits>,
    #[serde(deserialize_with = "null_as_default")]
    reference: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    description: String,
    #[serde(deserialize_with = "null_as_default")]
    reply: String,
    #[serde(deserialize_with = "null_as_default")]
    bounce_type: String,
    #[serde(deserialize_with = "null_as_default")]
    error_code: i64,
}

pub fn encode_sms_json(request: &SmsRequest) -> Result<String, serde_json::Error> {
    let options = request.options();
    let body = SmsJsonBody {
        to: request.to().raw(),
        from: request.sender().as_str(),
        text: request.text().as_str(),
        web_url: options.web_url.as_ref().map(url::Url::as_str),
        tag: options.tag.as_deref(),
        sms_type: options.sms_type.as_str(),
    };
    serde_json::to_string(&body)
}

pub fn encode_sms_campaign_json(campaign: &SmsCampaign) -> Result<String, serde_json::Error> {
    let options = campaign.options();
    let body = SmsCampaignJsonBody {
        name: campaign.name(),
        sender: options.sender.as_ref().map(|sender| sender.as_str()),
        content: options.content.as_deref(),
        bat_sent: options.bat_sent.as_ref().map(MobileNumber::raw),
        list_ids: &options.list_ids,
        exclude_list: &options.exclude_list,
        scheduled_date: options.scheduled_date.as_deref(),
        send_now: zero_or_one(options.send_now),
    };
    serde_json::to_string(&body)
}

pub fn encode_sms_test_json(to: &MobileNumber) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SmsTestJsonBody { to: to.raw() })
}

pub fn decode_sms_json_response(json: &str) -> Result<Response<SmsData>, TransportError> {
    decode_envelope(json, |data: SmsDataJson| SmsData {
        status: data.status,
        number_sent: data.number_sent,
        to: data.to,
        sms_count: data.sms_count,
        credits_used: data.credits_used.and_then(WireCredits::into_amount),
        remaining_credit: data.remaining_credit.and_then(WireCredits::into_amount),
        reference: data.reference,
        description: data.description,
        reply: data.reply,
        bounce_type: data.bounce_type,
        error_code: data.error_code,
    })
}

pub fn decode_sms_campaign_json_response(
    json: &str,
) -> Result<Response<SmsCampaignData>, TransportError> {
    decode_envelope(json, |data: SmsCampaignDataJson| SmsCampaignData {
        id: SmsCampaignId::new(data.id.value()),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{SmsCampaignOptions, SmsOptions, SmsSender, SmsText, SmsType};

    #[test]
    fn encode_sms_request() {
        let request = SmsRequest::new(
            MobileNumber::new("+33689965433").unwrap(),
            SmsSender::new("Tester").unwrap(),
            SmsText::new("Hello World").unwrap(),
            SmsOptions {
                web_url: Some(url::Url::parse("https://example.net/sms-hook").unwrap()),
                tag: Some("welcome".to_owned()),
                sms_type: SmsType::Transactional,
            },
        );

        let encoded: Value = serde_json::from_str(&encode_sms_json(&request).unwrap()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "to": "+33689965433",
                "from": "Tester",
                "text": "Hello World",
                "web_url": "https://example.net/sms-hook",
                "tag": "welcome",
                "type": "transactional"
            })
        );
    }

    #[test]
    fn encode_sms_request_defaults_to_marketing() {
        let request = SmsRequest::new(
            MobileNumber::new("+33689965433").unwrap(),
            SmsSender::new("Tester").unwrap(),
            SmsText::new("Hi").unwrap(),
            SmsOptions::default(),
        );
        assert_eq!(
            encode_sms_json(&request).unwrap(),
            r#"{"to":"+33689965433","from":"Tester","text":"Hi","type":"marketing"}"#
        );
    }

    #[test]
    fn encode_sms_campaign_uses_listid_key_and_flags() {
        let campaign = SmsCampaign::new(
            "Test SMS Campaign",
            SmsCampaignOptions {
                sender: Some(SmsSender::new("Tester").unwrap()),
                content: Some("Hello World".to_owned()),
                list_ids: vec![2, 5],
                scheduled_date: Some("2026-11-01 10:00:00".to_owned()),
                send_now: true,
                ..Default::default()
            },
        )
        .unwrap();

        let encoded: Value =
            serde_json::from_str(&encode_sms_campaign_json(&campaign).unwrap()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "name": "Test SMS Campaign",
                "sender": "Tester",
                "content": "Hello World",
                "listid": [2, 5],
                "scheduled_date": "2026-11-01 10:00:00",
                "send_now": 1
            })
        );
    }

    #[test]
    fn encode_sms_test_body() {
        let to = MobileNumber::new("+00000000000").unwrap();
        assert_eq!(encode_sms_test_json(&to).unwrap(), r#"{"to":"+00000000000"}"#);
    }

    #[test]
    fn decode_documented_send_sms_response() {
        let json = r#"
        {
          "code": "success",
          "message": "Message has been sent successfully to 33689965433",
          "data": {
            "status": "OK",
            "number_sent": 1,
            "to": "33689965433",
            "sms_count": 1,
            "credits_used": 5.50,
            "remaining_credit": "127.6",
            "reference": {"1": "ab1cde2fgh3i4jklmno"},
            "description": "",
            "reply": "",
            "bounce_type": "",
            "error_code": 0
          }
        }
        "#;
        let response = decode_sms_json_response(json).unwrap();
        assert_eq!(response.code, "success");
        assert_eq!(
            response.message,
            "Message has been sent successfully to 33689965433"
        );
        assert_eq!(response.data.status, "OK");
        assert_eq!(response.data.number_sent, 1);
        assert_eq!(response.data.credits_used.as_deref(), Some("5.50"));
        assert_eq!(response.data.remaining_credit.as_deref(), Some("127.6"));
        assert_eq!(
            response.data.reference.get("1").map(String::as_str),
            Some("ab1cde2fgh3i4jklmno")
        );
    }

    #[test]
    fn decode_documented_create_sms_campaign_response() {
        let json = r#"
        {
          "code": "success",
          "message": "SMS campaign created successfully",
          "data": {"id": 5}
        }
        "#;
        let response = decode_sms_campaign_json_response(json).unwrap();
        assert_eq!(response.message, "SMS campaign created successfully");
        assert_eq!(response.data.id, SmsCampaignId::new(5));
    }

    #[test]
    fn decode_sms_response_tolerates_null_fields() {
        let json = r#"{"code":"success","message":"Sent","data":{"status":"OK","number_sent":null,"credits_used":null,"remaining_credit":"","reference":null,"description":null,"error_code":null}}"#;
        let response = decode_sms_json_response(json).unwrap();
        assert_eq!(response.data.status, "OK");
        assert_eq!(response.data.number_sent, 0);
        assert_eq!(response.data.credits_used, None);
        assert_eq!(response.data.remaining_credit, None);
        assert!(response.data.reference.is_empty());
        assert_eq!(response.data.description, "");
        assert_eq!(response.data.error_code, 0);
    }
}
