//! Build-time configuration and the signed-in user.
//!
//! `AppConfig` is resolved from environment variables captured when the wasm
//! bundle is built:
//!
//! - `LOGBOOK_API_BASE`: origin prefixed to every `/api/...` path. Empty means
//!   the page's own origin.
//! - `LOGBOOK_EMBED_GROUP_SEQUENCE`: whether submitted entries carry each
//!   group's `_sequence` (default `true`, which is what the backend expects).
//!
//! The session is written to `localStorage` by the sign-in flow, which lives
//! outside this application. It is read once at startup and handed to the
//! pages explicitly through their properties.

use common::submission::SubmissionOptions;
use serde::Deserialize;

/// Key under which the sign-in flow stores the session JSON.
pub const SESSION_STORAGE_KEY: &str = "logbook.session";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub embed_group_sequence: bool,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("LOGBOOK_API_BASE"),
            option_env!("LOGBOOK_EMBED_GROUP_SEQUENCE"),
        )
    }

    fn from_values(api_base: Option<&str>, embed_group_sequence: Option<&str>) -> Self {
        Self {
            api_base: api_base.unwrap_or("").trim().trim_end_matches('/').to_string(),
            embed_group_sequence: embed_group_sequence.map_or(true, parse_flag),
        }
    }

    /// Absolute URL for an API path such as `/api/log-books`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub fn submission_options(&self) -> SubmissionOptions {
        SubmissionOptions {
            embed_group_sequence: self.embed_group_sequence,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

/// The signed-in user as published by the sign-in flow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    /// Teacher a student's entries are addressed to.
    #[serde(default)]
    pub teacher_id: Option<String>,
    /// Students a teacher reviews.
    #[serde(default)]
    pub student_ids: Vec<String>,
}

impl Session {
    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("Invalid session data: {}", e))
    }
}

/// Reads the session from `localStorage`. `Ok(None)` when nobody is signed in.
pub fn load_session() -> Result<Option<Session>, String> {
    let storage = web_sys::window()
        .ok_or("No browser window available")?
        .local_storage()
        .map_err(|_| "Local storage is not accessible".to_string())?
        .ok_or("Local storage is disabled")?;

    match storage
        .get_item(SESSION_STORAGE_KEY)
        .map_err(|_| "Could not read the session".to_string())?
    {
        Some(raw) => Session::parse(&raw).map(Some),
        None => Ok(None),
    }
}
