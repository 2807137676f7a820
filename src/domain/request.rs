use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use url::Url;

use crate::domain::attachment::{AttachmentError, Attachments};
use crate::domain::recipients::{RecipientList, RecipientMap};
use crate::domain::validation::{ValidationError, non_blank};
use crate::domain::value::{
    CampaignKind, EmailAddress, MobileNumber, SmsSender, SmsText, SmsType, TemplateListStatus,
    TemplateStatus,
};

/// Parameters for `aggregate_report` (`statistics`).
///
/// Dates are `YYYY-MM-DD` strings and are passed through unchecked.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    /// `false` returns one row per day, `true` a single aggregated row.
    pub aggregate: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Number of past days to report on, as an alternative to a date range.
    pub days: Option<u32>,
    pub tag: Option<String>,
}

/// Address plus optional display name, used for `from` and `replyto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    address: EmailAddress,
    name: Option<String>,
}

impl Mailbox {
    pub fn new(address: EmailAddress) -> Self {
        Self {
            address,
            name: None,
        }
    }

    pub fn named(address: EmailAddress, name: impl Into<String>) -> Self {
        Self {
            address,
            name: Some(name.into()),
        }
    }

    pub fn address(&self) -> &EmailAddress {
        &self.address
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Transactional email for `send_email`.
///
/// Recipients are address → display name mappings. At least one `to`
/// recipient is required at construction.
#[derive(Debug, Clone)]
pub struct Email {
    to: RecipientMap,
    subject: String,
    from: Mailbox,
    html: Option<String>,
    text: Option<String>,
    cc: RecipientMap,
    bcc: RecipientMap,
    reply_to: Option<Mailbox>,
    attachment: Attachments,
    headers: BTreeMap<String, String>,
    inline_image: Attachments,
}

impl Email {
    pub const SUBJECT_FIELD: &'static str = "subject";

    pub fn new(
        from: Mailbox,
        to: RecipientMap,
        subject: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if to.is_empty() {
            return Err(ValidationError::Empty {
                field: RecipientList::FIELD,
            });
        }
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::SUBJECT_FIELD,
            });
        }
        Ok(Self {
            to,
            subject,
            from,
            html: None,
            text: None,
            cc: RecipientMap::new(),
            bcc: RecipientMap::new(),
            reply_to: None,
            attachment: Attachments::new(),
            headers: BTreeMap::new(),
            inline_image: Attachments::new(),
        })
    }

    pub fn add_to(&mut self, address: EmailAddress, name: impl Into<String>) -> &mut Self {
        self.to.insert(address, name.into());
        self
    }

    pub fn add_cc(&mut self, address: EmailAddress, name: impl Into<String>) -> &mut Self {
        self.cc.insert(address, name.into());
        self
    }

    pub fn add_bcc(&mut self, address: EmailAddress, name: impl Into<String>) -> &mut Self {
        self.bcc.insert(address, name.into());
        self
    }

    pub fn html(&mut self, html: impl Into<String>) -> &mut Self {
        self.html = Some(html.into());
        self
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    pub fn reply_to(&mut self, reply_to: Mailbox) -> &mut Self {
        self.reply_to = Some(reply_to);
        self
    }

    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a file's contents under `name`.
    pub fn add_attachment(
        &mut self,
        name: impl Into<String>,
        reader: impl Read,
    ) -> Result<(), AttachmentError> {
        self.attachment.add(name, reader)
    }

    /// Attach a file from disk under its file name.
    pub fn add_attachment_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<String, AttachmentError> {
        self.attachment.add_path(path)
    }

    /// Embed an inline image and return its name.
    ///
    /// Reference it from the HTML body as `<img src="{{{name}}}">`.
    pub fn add_image(
        &mut self,
        name: impl Into<String>,
        reader: impl Read,
    ) -> Result<String, AttachmentError> {
        let name = name.into();
        self.inline_image.add(name.clone(), reader)?;
        Ok(name)
    }

    /// Embed an inline image from disk and return its file name.
    pub fn add_image_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<String, AttachmentError> {
        self.inline_image.add_path(path)
    }

    pub fn to_recipients(&self) -> &RecipientMap {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn sender(&self) -> &Mailbox {
        &self.from
    }

    pub fn html_body(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn text_body(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn cc(&self) -> &RecipientMap {
        &self.cc
    }

    pub fn bcc(&self) -> &RecipientMap {
        &self.bcc
    }

    pub fn reply_to_mailbox(&self) -> Option<&Mailbox> {
        self.reply_to.as_ref()
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachment
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn inline_images(&self) -> &Attachments {
        &self.inline_image
    }
}

/// Optional parts of a template send (`send_template_email`).
#[derive(Debug, Clone, Default)]
pub struct EmailOptions {
    pub cc: Option<RecipientList>,
    pub bcc: Option<RecipientList>,
    pub reply_to: Option<EmailAddress>,
    /// Values substituted into the template's `%ATTR%` placeholders.
    pub attr: BTreeMap<String, String>,
    pub attachment_url: Option<Url>,
    pub attachment: Attachments,
    pub headers: BTreeMap<String, String>,
}

impl EmailOptions {
    /// Attach a file's contents under `name`.
    pub fn add_attachment(
        &mut self,
        name: impl Into<String>,
        reader: impl Read,
    ) -> Result<(), AttachmentError> {
        self.attachment.add(name, reader)
    }

    /// Attach a file from disk under its file name.
    pub fn add_attachment_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<String, AttachmentError> {
        self.attachment.add_path(path)
    }
}

/// Template HTML source: either inline content or a URL to fetch it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateBody {
    Html(String),
    Url(Url),
}

#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    pub from_name: Option<String>,
    /// Address receiving the test ("BAT") email.
    pub bat: Option<EmailAddress>,
    pub reply_to: Option<String>,
    pub to_field: Option<String>,
    pub status: TemplateStatus,
    pub attachment_url: Option<Url>,
}

/// Email template for `create_template` and `update_template`.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    subject: String,
    from_email: EmailAddress,
    body: TemplateBody,
    options: TemplateOptions,
}

impl Template {
    pub const NAME_FIELD: &'static str = "template_name";
    pub const SUBJECT_FIELD: &'static str = "subject";
    pub const HTML_FIELD: &'static str = "html_content";

    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        from_email: EmailAddress,
        body: TemplateBody,
        options: TemplateOptions,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(Self::NAME_FIELD, name)?;
        let subject = non_blank(Self::SUBJECT_FIELD, subject)?;
        if matches!(&body, TemplateBody::Html(html) if html.trim().is_empty()) {
            return Err(ValidationError::Empty {
                field: Self::HTML_FIELD,
            });
        }
        Ok(Self {
            name,
            subject,
            from_email,
            body,
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn from_email(&self) -> &EmailAddress {
        &self.from_email
    }

    pub fn body(&self) -> &TemplateBody {
        &self.body
    }

    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }
}

/// Filters for `list_templates`.
#[derive(Debug, Clone, Default)]
pub struct TemplateList {
    pub kind: Option<CampaignKind>,
    pub status: Option<TemplateListStatus>,
    pub page: Option<u32>,
    pub page_limit: Option<u32>,
}

/// Parameters for `delete_bounced_emails`.
///
/// Without `email`, every bounce in the date range is cleared.
#[derive(Debug, Clone, Default)]
pub struct DeleteBounces {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub email: Option<EmailAddress>,
}

#[derive(Debug, Clone, Default)]
pub struct SmsOptions {
    /// Endpoint notified by the provider with delivery reports.
    pub web_url: Option<Url>,
    pub tag: Option<String>,
    pub sms_type: SmsType,
}

/// Single SMS for `send_sms`.
#[derive(Debug, Clone)]
pub struct SmsRequest {
    to: MobileNumber,
    from: SmsSender,
    text: SmsText,
    options: SmsOptions,
}

impl SmsRequest {
    pub fn new(to: MobileNumber, from: SmsSender, text: SmsText, options: SmsOptions) -> Self {
        Self {
            to,
            from,
            text,
            options,
        }
    }

    pub fn to(&self) -> &MobileNumber {
        &self.to
    }

    pub fn sender(&self) -> &SmsSender {
        &self.from
    }

    pub fn text(&self) -> &SmsText {
        &self.text
    }

    pub fn options(&self) -> &SmsOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmsCampaignOptions {
    pub sender: Option<SmsSender>,
    pub content: Option<String>,
    /// Number receiving the test SMS.
    pub bat_sent: Option<MobileNumber>,
    pub list_ids: Vec<u64>,
    pub exclude_list: Vec<u64>,
    /// `YYYY-MM-DD HH:MM:SS`; requires at least one list id.
    pub scheduled_date: Option<String>,
    /// `true` marks the campaign ready to send immediately.
    pub send_now: bool,
}

/// SMS campaign for `create_sms_campaign` and `update_sms_campaign`.
#[derive(Debug, Clone)]
pub struct SmsCampaign {
    name: String,
    options: SmsCampaignOptions,
}

impl SmsCampaign {
    pub const NAME_FIELD: &'static str = "name";
    pub const LIST_IDS_FIELD: &'static str = "listid";
    pub const SCHEDULED_DATE_FIELD: &'static str = "scheduled_date";

    pub fn new(
        name: impl Into<String>,
        options: SmsCampaignOptions,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(Self::NAME_FIELD, name)?;
        if options.scheduled_date.is_some() && options.list_ids.is_empty() {
            return Err(ValidationError::MissingDependentField {
                field: Self::LIST_IDS_FIELD,
                required_by: Self::SCHEDULED_DATE_FIELD,
            });
        }
        Ok(Self { name, options })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &SmsCampaignOptions {
        &self.options
    }
}
