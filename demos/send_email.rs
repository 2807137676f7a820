use std::io;

use sendinblue::{Email, EmailAddress, Mailbox, RecipientMap, SendinblueClient};
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
    let to_raw = std::env::var("SIB_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SIB_TO environment variable is required",
        )
    })?;
    let from_raw = std::env::var("SIB_FROM").unwrap_or_else(|_| to_raw.clone());

    let client = SendinblueClient::new(api_key)?;

    let mut to = RecipientMap::new();
    to.insert(EmailAddress::new(to_raw)?, "Test Recipient".to_owned());
    let mut email = Email::new(
        Mailbox::named(EmailAddress::new(from_raw)?, "Sender"),
        to,
        "Test Email",
    )?;
    email
        .html("<p>Hello from the <b>sendinblue</b> demo.</p>")
        .text("Hello from the sendinblue demo.");
    if let Ok(path) = std::env::var("SIB_ATTACHMENT") {
        let name = email.add_attachment_path(path)?;
        println!("attached {name}");
    }

    let response = client.send_email(&email).await?;
    println!(
        "code: {}, message: {}, message_id: {}",
        response.code, response.message, response.data.message_id
    );

    Ok(())
}
