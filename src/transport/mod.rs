//! Transport layer: JSON wire-format details (serialization/deserialization).

mod bounces;
mod email;
mod envelope;
mod numeric;
mod sms;
mod statistics;
mod template;

pub use bounces::encode_delete_bounces_json;
pub use email::{decode_email_json_response, encode_email_json, encode_template_email_json};
pub use envelope::TransportError;
pub use sms::{
    decode_sms_campaign_json_response, decode_sms_json_response, encode_sms_campaign_json,
    encode_sms_json, encode_sms_test_json,
};
pub use statistics::{decode_aggregate_report_json_response, encode_aggregate_report_json};
pub use template::{
    decode_campaign_details_json_response, decode_template_json_response,
    decode_template_list_json_response, encode_template_json, encode_template_list_json,
};
