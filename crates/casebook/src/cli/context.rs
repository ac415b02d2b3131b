//! Shared command context: saved profile resolved into a client and session.

use anyhow::{bail, Result};
use casebook::profile;
use casebook_client::ConsoleClient;
use casebook_protocol::Session;

pub struct CommandContext {
    pub client: ConsoleClient,
    pub session: Session,
}

/// Resolve the saved profile into an authenticated client. `api_url`
/// overrides the URL captured at login.
pub fn require_login(api_url: Option<&str>) -> Result<CommandContext> {
    let Some(profile) = profile::load()? else {
        bail!("Not logged in. Run `casebook login` first.");
    };
    let base_url = api_url.unwrap_or(&profile.base_url);
    let client = ConsoleClient::new(base_url).with_token(profile.token.clone());
    Ok(CommandContext {
        client,
        session: profile.session,
    })
}
