use std::io;

use sendinblue::{
    EmailAddress, RecipientList, SendinblueClient, Template, TemplateBody, TemplateList,
    TemplateOptions, TemplateStatus,
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
    let sender = std::env::var("SIB_FROM").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SIB_FROM environment variable is required",
        )
    })?;

    let client = SendinblueClient::new(api_key)?;
    let sender = EmailAddress::new(sender)?;

    let template = Template::new(
        "Demo Template",
        "Demo Template Email",
        sender.clone(),
        TemplateBody::Html("<p>Hello %NAME%.</p>".to_owned()),
        TemplateOptions {
            status: TemplateStatus::Active,
            ..Default::default()
        },
    )?;
    let created = client.create_template(&template).await?.into_result()?;
    println!("created template {}", created.id);

    let details = client.get_template(created.id).await?;
    for campaign in &details.data {
        println!(
            "{} {:?} status={}",
            campaign.id, campaign.campaign_name, campaign.template_status
        );
    }

    let listing = client.list_templates(&TemplateList::default()).await?;
    println!(
        "page {} of {} records",
        listing.data.page, listing.data.total_campaign_records
    );

    if let Ok(to) = std::env::var("SIB_TO") {
        let to = RecipientList::parse(to.split(','))?;
        let sent = client.send_template_email(created.id, &to, None).await?;
        println!("sent: {} ({})", sent.message, sent.data.message_id);
    }

    Ok(())
}
