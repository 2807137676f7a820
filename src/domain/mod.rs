//! Domain layer: strong types with validation and invariants (no network I/O).

mod attachment;
mod recipients;
mod request;
mod response;
mod validation;
mod value;

pub use attachment::{AttachmentError, Attachments};
pub use recipients::{RECIPIENT_DELIMITER, RecipientList, RecipientMap};
pub use request::{
    AggregateReport, DeleteBounces, Email, EmailOptions, Mailbox, SmsCampaign,
    SmsCampaignOptions, SmsOptions, SmsRequest, Template, TemplateBody, TemplateList,
    TemplateOptions,
};
pub use response::{
    AggregateStats, ApiError, CampaignDetails, EmailData, Response, SUCCESS_CODE,
    SmsCampaignData, SmsData, TemplateData, TemplateListData,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, CampaignId, CampaignKind, EmailAddress, MobileNumber, PhoneNumber, SmsCampaignId,
    SmsSender, SmsText, SmsType, TemplateId, TemplateListStatus, TemplateStatus,
};
