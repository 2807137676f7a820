use serde::Serialize;

use crate::domain::DeleteBounces;

#[derive(Debug, Serialize)]
struct DeleteBouncesJsonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

pub fn encode_delete_bounces_json(request: &DeleteBounces) -> Result<String, serde_json::Error> {
    let body = DeleteBouncesJsonBody {
        start_date: request.start_date.as_deref(),
        end_date: request.end_date.as_deref(),
        email: request.email.as_ref().map(|email| email.as_str()),
    };
    serde_json::to_string(&body)
}
