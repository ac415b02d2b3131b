//! Login and logout commands.

use anyhow::{Context, Result};
use casebook::profile::{self, Profile};
use casebook_client::ConsoleClient;
use casebook_protocol::Session;
use std::io::{self, BufRead, Write};

#[derive(Debug)]
pub struct LoginArgs {
    pub api_url: String,
    pub email: String,
    /// Read from stdin when not given on the command line.
    pub password: Option<String>,
}

pub async fn login(args: LoginArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let client = ConsoleClient::new(args.api_url.clone());
    let resp = client
        .login(&args.email, &password)
        .await
        .context("Login failed")?;

    let session = Session {
        user_id: resp.user.id,
        name: resp.user.name,
        role: resp.user.role,
    };
    profile::save(&Profile {
        base_url: args.api_url,
        token: resp.token,
        session: session.clone(),
    })?;

    println!("Logged in as {} ({})", session.name, session.role);
    Ok(())
}

pub fn logout() -> Result<()> {
    profile::clear()?;
    println!("Logged out.");
    Ok(())
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
