use std::io;

use sendinblue::{
    MobileNumber, PhoneNumber, SendinblueClient, SmsOptions, SmsRequest, SmsSender, SmsText,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("SIB_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SIB_KEY environment variable is required",
        )
    })?;
    let phone_raw = std::env::var("SIB_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SIB_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("SIB_MESSAGE")
        .unwrap_or_else(|_| "Hello from the sendinblue demo.".to_owned());

    let client = SendinblueClient::new(api_key)?;
    let to = MobileNumber::from(PhoneNumber::parse(None, phone_raw)?);
    let request = SmsRequest::new(
        to,
        SmsSender::new("Demo")?,
        SmsText::new(message)?,
        SmsOptions::default(),
    );

    let response = client.send_sms(&request).await?;
    println!(
        "code: {}, status: {}, credits_used: {:?}, remaining_credit: {:?}",
        response.code,
        response.data.status,
        response.data.credits_used,
        response.data.remaining_credit
    );

    Ok(())
}
