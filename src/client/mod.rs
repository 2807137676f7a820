//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderName};
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    AggregateReport, AggregateStats, ApiError, ApiKey, AttachmentError, CampaignDetails,
    DeleteBounces, Email, EmailData, EmailOptions, MobileNumber, RecipientList, Response,
    SmsCampaign, SmsCampaignData, SmsCampaignId, SmsData, SmsRequest, Template, TemplateData,
    TemplateId, TemplateList, TemplateListData, ValidationError,
};
use crate::transport::TransportError;

const DEFAULT_BASE_URL: &str = "https://api.sendinblue.com/v2.0/";
const DEFAULT_USER_AGENT: &str = concat!("sendinblue/", env!("CARGO_PKG_VERSION"));
const JSON_CONTENT_TYPE: &str = "application/json";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    headers: Vec<(HeaderName, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            // Reading to the end hands the connection back to the pool.
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Reasons a [`SendinblueClient`] could not be configured.
pub enum ConfigError {
    /// The API key is empty or blank.
    #[error("invalid API key: {0}")]
    ApiKey(#[source] ValidationError),

    /// The base URL does not parse or cannot carry relative paths.
    #[error("invalid base URL {input:?}: {reason}")]
    BaseUrl { input: String, reason: String },

    /// A zero timeout would never let a request complete.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SendinblueClient`].
///
/// Nothing is retried internally; every failure reaches the caller as one of
/// these variants.
pub enum SendinblueError {
    /// The client could not be constructed from the given settings.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The request value could not be serialized to JSON. Nothing was sent.
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// HTTP client / transport failure (DNS, TLS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body is not valid JSON or does not match the expected shape.
    ///
    /// `body` holds the raw response for diagnosis.
    #[error("could not decode response: {source}")]
    Decode {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
        body: String,
    },

    /// An operation without a response body got a status other than `200`.
    #[error("request failed with HTTP status {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: Option<String>,
    },

    /// The envelope reported a non-success `code` (see [`Response::into_result`]).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An attachment or inline image could not be added.
    #[error("attachment error: {0}")]
    Attachment(#[from] AttachmentError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SendinblueClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct SendinblueClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl SendinblueClientBuilder {
    /// Create a builder with the default base URL, timeout and user-agent.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Override the API root (`https://api.sendinblue.com/v2.0/`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each whole request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a [`SendinblueClient`]. No network activity happens here.
    pub fn build(self) -> Result<SendinblueClient, SendinblueError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout.into());
        }
        let base_url = parse_base_url(&self.base_url)?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|err| SendinblueError::Transport(Box::new(err)))?;

        Ok(SendinblueClient {
            api_key: self.api_key,
            base_url,
            timeout: self.timeout,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_base_url(input: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(input).map_err(|err| ConfigError::BaseUrl {
        input: input.to_owned(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::BaseUrl {
            input: input.to_owned(),
            reason: "URL cannot be used as a base".to_owned(),
        });
    }
    // Resource paths are joined relative to the base; without the slash the
    // last segment (`v2.0`) would be replaced.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level Sendinblue client.
///
/// Holds the API key and a pooled HTTP client; it keeps no per-call state, so
/// one instance can be cloned and shared across tasks. Each method performs a
/// single request: encode the JSON body, send it with the `api-key` header,
/// read the whole response and decode it.
pub struct SendinblueClient {
    api_key: ApiKey,
    base_url: Url,
    timeout: Duration,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for SendinblueClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendinblueClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SendinblueClient {
    /// Create a client with default settings.
    ///
    /// Fails with [`SendinblueError::Configuration`] if `api_key` is blank.
    /// For more customization, use [`SendinblueClient::builder`].
    pub fn new(api_key: impl Into<String>) -> Result<Self, SendinblueError> {
        let api_key = ApiKey::new(api_key).map_err(ConfigError::ApiKey)?;
        SendinblueClientBuilder::new(api_key).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> SendinblueClientBuilder {
        SendinblueClientBuilder::new(api_key)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Aggregate or per-day email statistics (`POST statistics`).
    pub async fn aggregate_report(
        &self,
        request: &AggregateReport,
    ) -> Result<Response<Vec<AggregateStats>>, SendinblueError> {
        let body = crate::transport::encode_aggregate_report_json(request)
            .map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::POST,
            "statistics",
            Some(body),
            crate::transport::decode_aggregate_report_json_response,
        )
        .await
    }

    /// Create an SMS campaign (`POST sms`). The returned id drives
    /// [`update_sms_campaign`](Self::update_sms_campaign) and
    /// [`sms_campaign_test`](Self::sms_campaign_test).
    pub async fn create_sms_campaign(
        &self,
        campaign: &SmsCampaign,
    ) -> Result<Response<SmsCampaignData>, SendinblueError> {
        let body =
            crate::transport::encode_sms_campaign_json(campaign).map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::POST,
            "sms",
            Some(body),
            crate::transport::decode_sms_campaign_json_response,
        )
        .await
    }

    /// Create an email template (`POST template`).
    pub async fn create_template(
        &self,
        template: &Template,
    ) -> Result<Response<TemplateData>, SendinblueError> {
        let body =
            crate::transport::encode_template_json(template).map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::POST,
            "template",
            Some(body),
            crate::transport::decode_template_json_response,
        )
        .await
    }

    /// Clear hard bounces, optionally for a single address (`POST bounces`).
    ///
    /// Succeeds only on HTTP `200`; dates are passed through unchecked.
    pub async fn delete_bounced_emails(
        &self,
        request: &DeleteBounces,
    ) -> Result<(), SendinblueError> {
        let body =
            crate::transport::encode_delete_bounces_json(request).map_err(SendinblueError::Encode)?;
        self.send_expecting_ok(Method::POST, "bounces", body).await
    }

    /// Fetch template details (`GET campaign/{id}/detailsv2`).
    pub async fn get_template(
        &self,
        id: TemplateId,
    ) -> Result<Response<Vec<CampaignDetails>>, SendinblueError> {
        self.send_decoded(
            Method::GET,
            &format!("campaign/{id}/detailsv2"),
            None,
            crate::transport::decode_campaign_details_json_response,
        )
        .await
    }

    /// List templates page by page (`GET campaign/detailsv2` with a JSON body).
    pub async fn list_templates(
        &self,
        request: &TemplateList,
    ) -> Result<Response<TemplateListData>, SendinblueError> {
        let body =
            crate::transport::encode_template_list_json(request).map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::GET,
            "campaign/detailsv2",
            Some(body),
            crate::transport::decode_template_list_json_response,
        )
        .await
    }

    /// Send a transactional email (`POST email`).
    pub async fn send_email(&self, email: &Email) -> Result<Response<EmailData>, SendinblueError> {
        let body = crate::transport::encode_email_json(email).map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::POST,
            "email",
            Some(body),
            crate::transport::decode_email_json_response,
        )
        .await
    }

    /// Send a single SMS (`POST sms`).
    pub async fn send_sms(
        &self,
        request: &SmsRequest,
    ) -> Result<Response<SmsData>, SendinblueError> {
        let body = crate::transport::encode_sms_json(request).map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::POST,
            "sms",
            Some(body),
            crate::transport::decode_sms_json_response,
        )
        .await
    }

    /// Send an email from a stored template (`PUT template/{id}`).
    ///
    /// Recipients travel as one `|`-delimited string.
    pub async fn send_template_email(
        &self,
        id: TemplateId,
        to: &RecipientList,
        options: Option<&EmailOptions>,
    ) -> Result<Response<EmailData>, SendinblueError> {
        let body = crate::transport::encode_template_email_json(to, options)
            .map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::PUT,
            &format!("template/{id}"),
            Some(body),
            crate::transport::decode_email_json_response,
        )
        .await
    }

    /// Send an SMS campaign to a single test number (`GET sms/{id}` with a JSON body).
    pub async fn sms_campaign_test(
        &self,
        id: SmsCampaignId,
        to: &MobileNumber,
    ) -> Result<Response<SmsData>, SendinblueError> {
        let body = crate::transport::encode_sms_test_json(to).map_err(SendinblueError::Encode)?;
        self.send_decoded(
            Method::GET,
            &format!("sms/{id}"),
            Some(body),
            crate::transport::decode_sms_json_response,
        )
        .await
    }

    /// Replace an SMS campaign's settings (`PUT sms/{id}`). Succeeds only on HTTP `200`.
    pub async fn update_sms_campaign(
        &self,
        id: SmsCampaignId,
        campaign: &SmsCampaign,
    ) -> Result<(), SendinblueError> {
        let body =
            crate::transport::encode_sms_campaign_json(campaign).map_err(SendinblueError::Encode)?;
        self.send_expecting_ok(Method::PUT, &format!("sms/{id}"), body)
            .await
    }

    /// Replace a template (`PUT template/{id}`). Succeeds only on HTTP `200`.
    pub async fn update_template(
        &self,
        id: TemplateId,
        template: &Template,
    ) -> Result<(), SendinblueError> {
        let body =
            crate::transport::encode_template_json(template).map_err(SendinblueError::Encode)?;
        self.send_expecting_ok(Method::PUT, &format!("template/{id}"), body)
            .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, SendinblueError> {
        let url = self.base_url.join(path).map_err(|err| ConfigError::BaseUrl {
            input: self.base_url.to_string(),
            reason: err.to_string(),
        })?;

        let mut headers = Vec::with_capacity(2);
        if body.is_some() {
            headers.push((CONTENT_TYPE, JSON_CONTENT_TYPE.to_owned()));
        }
        headers.push((
            HeaderName::from_static(ApiKey::HEADER),
            self.api_key.as_str().to_owned(),
        ));

        debug!(%method, %url, has_body = body.is_some(), "sending request");
        let response = self
            .http
            .execute(HttpRequest {
                method: method.clone(),
                url: url.clone(),
                headers,
                body,
            })
            .await
            .map_err(|err| {
                warn!(%method, %url, error = %err, "request failed");
                SendinblueError::Transport(err)
            })?;
        debug!(%method, %url, status = response.status, "received response");

        Ok(response)
    }

    async fn send_decoded<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        decode: fn(&str) -> Result<Response<T>, TransportError>,
    ) -> Result<Response<T>, SendinblueError> {
        let response = self.execute(method, path, body).await?;

        match decode(&response.body) {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                warn!(
                    status = response.status,
                    error = %err,
                    "could not decode response body"
                );
                Err(SendinblueError::Decode {
                    source: Box::new(err),
                    body: response.body,
                })
            }
        }
    }

    async fn send_expecting_ok(
        &self,
        method: Method,
        path: &str,
        body: String,
    ) -> Result<(), SendinblueError> {
        let response = self.execute(method, path, Some(body)).await?;
        if response.status == 200 {
            return Ok(());
        }

        let status_text = reqwest::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default()
            .to_owned();
        warn!(status = response.status, %status_text, "request was not accepted");

        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        Err(SendinblueError::Status {
            status: response.status,
            status_text,
            body,
        })
    }
}
