//! Typed Rust client for the Sendinblue v2.0 email and SMS HTTP API.
//!
//! The crate is split into a domain layer of validated request and response
//! types, a private transport layer for the JSON wire format, and a small
//! client layer that issues one HTTP request per call.
//!
//! ```rust,no_run
//! use sendinblue::{EmailAddress, RecipientList, SendinblueClient, TemplateId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sendinblue::SendinblueError> {
//!     let client = SendinblueClient::new("...")?;
//!     let to = RecipientList::one(EmailAddress::new("user@example.net")?);
//!     let response = client
//!         .send_template_email(TemplateId::new(12), &to, None)
//!         .await?;
//!     println!("{}: {}", response.code, response.message);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ConfigError, DEFAULT_TIMEOUT, SendinblueClient, SendinblueClientBuilder, SendinblueError,
};
pub use domain::{
    AggregateReport, AggregateStats, ApiError, ApiKey, AttachmentError, Attachments,
    CampaignDetails, CampaignId, CampaignKind, DeleteBounces, Email, EmailAddress, EmailData,
    EmailOptions, Mailbox, MobileNumber, PhoneNumber, RECIPIENT_DELIMITER, RecipientList,
    RecipientMap, Response, SUCCESS_CODE, SmsCampaign, SmsCampaignData, SmsCampaignId,
    SmsCampaignOptions, SmsData, SmsOptions, SmsRequest, SmsSender, SmsText, SmsType, Template,
    TemplateBody, TemplateData, TemplateId, TemplateList, TemplateListData, TemplateListStatus,
    TemplateOptions, TemplateStatus, ValidationError,
};
