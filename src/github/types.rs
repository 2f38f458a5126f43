// GitHub API response types.
// Defines the user profile record returned by GET /users/{username}.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Account type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountType {
    #[default]
    User,
    Organization,
    Bot,
    #[serde(other)]
    Unknown,
}

/// Public profile of a GitHub user.
///
/// Every field defaults when absent so that a 2xx body which is not a
/// profile still decodes; [`UserProfile::is_valid`] rejects it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub login: String,
    pub id: u64,
    pub node_id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub site_admin: bool,

    pub avatar_url: Option<String>,
    pub gravatar_id: Option<String>,
    pub html_url: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub hireable: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub bio: Option<String>,

    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// A decoded profile is only usable if it carries a login.
    pub fn is_valid(&self) -> bool {
        !self.login.is_empty()
    }
}

/// Accept a string, a bool or number (rendered as text), or null.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
