//! End-to-end checks against a local mock server, using the real HTTP transport.

use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use sendinblue::{
    ApiKey, DeleteBounces, Email, EmailAddress, EmailOptions, Mailbox, MobileNumber,
    RecipientList, RecipientMap, SendinblueClient, SendinblueError, SmsCampaign,
    SmsCampaignId, SmsCampaignOptions, SmsOptions, SmsRequest, SmsSender, SmsText, SmsType,
    Template, TemplateBody, TemplateId, TemplateList, TemplateOptions,
};

const API_KEY: &str = "test-key";

fn client_for(server: &Server) -> SendinblueClient {
    SendinblueClient::builder(ApiKey::new(API_KEY).unwrap())
        .base_url(format!("{}/v2.0", server.url()))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn address(value: &str) -> EmailAddress {
    EmailAddress::new(value).unwrap()
}

fn template() -> Template {
    Template::new(
        "Test Template",
        "Test Template Email",
        address("sender@example.net"),
        TemplateBody::Html("Hello World.".to_owned()),
        TemplateOptions::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn send_email_posts_json_with_api_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2.0/email")
        .match_header("api-key", API_KEY)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "to": {"to@example.net": "To Whom"},
            "subject": "Invitation",
            "from": ["from@example.net", "From"],
            "html": "<b>Hello</b>",
            "replyto": ["reply@example.net", ""],
            "attachment": {"notes.txt": "aGVsbG8="}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"code":"success","message":"Email sent successfully","data":{"message-id":"<201610181106.12345@relay>"}}"#,
        )
        .create_async()
        .await;

    let mut to = RecipientMap::new();
    to.insert(address("to@example.net"), "To Whom".to_owned());
    let mut email = Email::new(
        Mailbox::named(address("from@example.net"), "From"),
        to,
        "Invitation",
    )
    .unwrap();
    email
        .html("<b>Hello</b>")
        .reply_to(Mailbox::new(address("reply@example.net")));
    email.add_attachment("notes.txt", &b"hello"[..]).unwrap();

    let client = client_for(&server);
    let response = client.send_email(&email).await.unwrap();

    mock.assert_async().await;
    assert!(response.is_success());
    assert_eq!(response.data.message_id, "<201610181106.12345@relay>");
}

#[tokio::test]
async fn send_template_email_puts_pipe_delimited_recipients() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/v2.0/template/12")
        .match_header("api-key", API_KEY)
        .match_body(Matcher::Json(json!({
            "to": "a@example.net|b@example.net",
            "cc": "c@example.net",
            "attr": {"NAME": "Ada"}
        })))
        .with_status(200)
        .with_body(r#"{"code":"success","message":"Email sent successfully","data":{"message-id":"<m@relay>"}}"#)
        .create_async()
        .await;

    let to = RecipientList::parse(["a@example.net", "b@example.net"]).unwrap();
    let mut options = EmailOptions {
        cc: Some(RecipientList::one(address("c@example.net"))),
        ..Default::default()
    };
    options.attr.insert("NAME".to_owned(), "Ada".to_owned());

    let client = client_for(&server);
    let response = client
        .send_template_email(TemplateId::new(12), &to, Some(&options))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.data.message_id, "<m@relay>");
}

#[tokio::test]
async fn get_template_sends_get_without_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2.0/campaign/83/detailsv2")
        .match_header("api-key", API_KEY)
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .with_body(
            r#"{"code":"success","message":"Data retrieved","data":[{"id":83,"campaign_name":"Test Template","type":"template","templ_status":"Active"}]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client.get_template(TemplateId::new(83)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].campaign_name, "Test Template");
    assert_eq!(response.data[0].template_status, "Active");
}

#[tokio::test]
async fn get_template_accepts_null_fields_in_success_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v2.0/campaign/83/detailsv2")
        .with_status(200)
        .with_body(
            r#"{"code":"success","message":"Data retrieved","data":[{"id":83,"campaign_name":"T","reply_to":null,"bat_sent":null,"from_name":null}]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client.get_template(TemplateId::new(83)).await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.data[0].campaign_name, "T");
    assert_eq!(response.data[0].reply_to, "");
    assert_eq!(response.data[0].from_name, "");
}

#[tokio::test]
async fn list_templates_sends_json_body_with_get() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2.0/campaign/detailsv2")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"page": 1, "page_limit": 2})))
        .with_status(200)
        .with_body(
            r#"{"code":"success","message":"Data retrieved","data":{"campaign_records":[{"id":"1"},{"id":"2"}],"page":1,"page_limit":2,"total_campaign_records":4}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .list_templates(&TemplateList {
            page: Some(1),
            page_limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.data.campaign_records.len(), 2);
    assert_eq!(response.data.total_campaign_records, 4);
}

#[tokio::test]
async fn send_sms_returns_delivery_report() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2.0/sms")
        .match_header("api-key", API_KEY)
        .match_body(Matcher::Json(json!({
            "to": "+33689965433",
            "from": "Tester",
            "text": "Hello World",
            "type": "transactional"
        })))
        .with_status(200)
        .with_body(
            r#"{"code":"success","message":"Message has been sent successfully to 33689965433","data":{"status":"OK","number_sent":1,"to":"33689965433","sms_count":1,"credits_used":1.00,"remaining_credit":127.6,"reference":{"1":"ab1cde2fgh3i4jklmno"},"description":"","reply":"","bounce_type":"","error_code":0}}"#,
        )
        .create_async()
        .await;

    let request = SmsRequest::new(
        MobileNumber::new("+33689965433").unwrap(),
        SmsSender::new("Tester").unwrap(),
        SmsText::new("Hello World").unwrap(),
        SmsOptions {
            sms_type: SmsType::Transactional,
            ..Default::default()
        },
    );

    let client = client_for(&server);
    let response = client.send_sms(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.data.status, "OK");
    assert_eq!(response.data.credits_used.as_deref(), Some("1.00"));
    assert_eq!(response.data.remaining_credit.as_deref(), Some("127.6"));
}

#[tokio::test]
async fn sms_campaign_lifecycle() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/v2.0/sms")
        .match_body(Matcher::Json(json!({
            "name": "Test SMS Campaign",
            "sender": "Tester",
            "content": "Hello World",
            "send_now": 0
        })))
        .with_status(200)
        .with_body(r#"{"code":"success","message":"SMS campaign created successfully","data":{"id":5}}"#)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/v2.0/sms/5")
        .match_body(Matcher::PartialJson(json!({"send_now": 1})))
        .with_status(200)
        .create_async()
        .await;
    let test = server
        .mock("GET", "/v2.0/sms/5")
        .match_body(Matcher::Json(json!({"to": "+00000000000"})))
        .with_status(200)
        .with_body(r#"{"code":"success","message":"Test SMS sent","data":{"status":"OK","to":"+00000000000"}}"#)
        .create_async()
        .await;

    let options = SmsCampaignOptions {
        sender: Some(SmsSender::new("Tester").unwrap()),
        content: Some("Hello World".to_owned()),
        ..Default::default()
    };
    let client = client_for(&server);

    let campaign = SmsCampaign::new("Test SMS Campaign", options.clone()).unwrap();
    let created = client.create_sms_campaign(&campaign).await.unwrap();
    assert_eq!(created.data.id, SmsCampaignId::new(5));

    let ready = SmsCampaign::new(
        "Test SMS Campaign",
        SmsCampaignOptions {
            send_now: true,
            ..options
        },
    )
    .unwrap();
    client
        .update_sms_campaign(created.data.id, &ready)
        .await
        .unwrap();

    let response = client
        .sms_campaign_test(created.data.id, &MobileNumber::new("+00000000000").unwrap())
        .await
        .unwrap();
    assert_eq!(response.message, "Test SMS sent");

    create.assert_async().await;
    update.assert_async().await;
    test.assert_async().await;
}

#[tokio::test]
async fn update_template_surfaces_non_200_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/v2.0/template/83")
        .match_body(Matcher::PartialJson(json!({"template_name": "Test Template"})))
        .with_status(500)
        .with_body("upstream failure")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .update_template(TemplateId::new(83), &template())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(err.to_string().contains("500"), "{err}");
    match err {
        SendinblueError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body.as_deref(), Some("upstream failure"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn delete_bounced_emails_accepts_200() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2.0/bounces")
        .match_body(Matcher::Json(json!({
            "start_date": "2026-01-01",
            "end_date": "2026-01-31",
            "email": "bounced@example.net"
        })))
        .with_status(200)
        .with_body(r#"{"code":"success","message":"Deleted","data":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .delete_bounced_emails(&DeleteBounces {
            start_date: Some("2026-01-01".to_owned()),
            end_date: Some("2026-01-31".to_owned()),
            email: Some(address("bounced@example.net")),
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn failure_envelope_is_returned_not_raised() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v2.0/template")
        .with_status(401)
        .with_body(r#"{"code":"failure","message":"Key Not Found In Database","data":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client.create_template(&template()).await.unwrap();

    assert_eq!(response.code, "failure");
    assert_eq!(response.message, "Key Not Found In Database");
    assert_eq!(response.data.id, TemplateId::default());
}

#[tokio::test]
async fn html_error_page_maps_to_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v2.0/template")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.create_template(&template()).await.unwrap_err();

    match err {
        SendinblueError::Decode { body, .. } => assert_eq!(body, "<html>Bad Gateway</html>"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_maps_to_transport_error() {
    let client = SendinblueClient::builder(ApiKey::new(API_KEY).unwrap())
        .base_url("http://127.0.0.1:1/v2.0/")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client.get_template(TemplateId::new(1)).await.unwrap_err();
    assert!(matches!(err, SendinblueError::Transport(_)), "{err:?}");
}
