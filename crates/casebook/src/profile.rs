//! Persisted login profile.
//!
//! Stored as JSON at ~/.casebook/profile.json: backend URL, bearer token, and
//! the session used for capability checks. Written at login, removed at
//! logout.

use anyhow::{Context, Result};
use casebook_logging::casebook_home;
use casebook_protocol::Session;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub base_url: String,
    pub token: String,
    pub session: Session,
}

pub fn profile_path() -> PathBuf {
    casebook_home().join("profile.json")
}

/// Load the saved profile, `None` when not logged in.
pub fn load() -> Result<Option<Profile>> {
    let path = profile_path();
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read profile at {}", path.display()))?;
    let profile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse profile at {}", path.display()))?;
    Ok(Some(profile))
}

pub fn save(profile: &Profile) -> Result<()> {
    let path = profile_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let raw = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
    fs::write(&path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Remove the saved profile; no-op when absent.
pub fn clear() -> Result<()> {
    let path = profile_path();
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}
