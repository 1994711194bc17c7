//! Issue a member access token for local development.
//!
//! Usage: `mint_token <user-id> <display-name>`; reads the signing key and
//! TTL from the same environment as the server.
use anyhow::{Context, Result, bail};
use quill_core::{
    application::{dto::TokenSubject, ports::security::TokenManager},
    config::AppConfig,
    domain::user::{DisplayName, UserId},
    infrastructure::security::token::BiscuitTokenManager,
};

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(user_id), Some(name)) = (args.next(), args.next()) else {
        bail!("usage: mint_token <user-id> <display-name>");
    };

    let user_id: i64 = user_id.parse().context("user id must be an integer")?;
    let subject = TokenSubject::member(UserId::new(user_id)?, DisplayName::new(name)?);

    let config = AppConfig::from_env()?;
    let manager = BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;
    let token = manager.issue(subject).await?;

    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}
