use std::io;

use sendinblue::{MobileNumber, SendinblueClient, SmsCampaign, SmsCampaignOptions, SmsSender};
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

    let client = SendinblueClient::new(api_key)?;
    let options = SmsCampaignOptions {
        sender: Some(SmsSender::new("Demo")?),
        content: Some("Hello from the sendinblue demo.".to_owned()),
        ..Default::default()
    };

    let campaign = SmsCampaign::new("Demo SMS Campaign", options.clone())?;
    let created = client.create_sms_campaign(&campaign).await?.into_result()?;
    println!("created SMS campaign {}", created.id);

    let renamed = SmsCampaign::new("Demo SMS Campaign (updated)", options)?;
    client.update_sms_campaign(created.id, &renamed).await?;
    println!("updated SMS campaign {}", created.id);

    let response = client
        .sms_campaign_test(created.id, &MobileNumber::new(phone_raw)?)
        .await?;
    println!("code: {}, message: {}", response.code, response.message);

    Ok(())
}
