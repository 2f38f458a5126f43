// GitHub API endpoint functions.
// Classifies a single user lookup response into a fetch outcome.

use reqwest::StatusCode;
use tracing::info;

use crate::error::Result;

use super::client::GitHubClient;
use super::fetcher::FetchOutcome;

impl GitHubClient {
    /// Make one attempt at fetching a user's raw profile JSON.
    ///
    /// Transport failures and non-2xx statuses other than 404 come back as
    /// [`FetchOutcome::Transient`]. Only a failure to read a 2xx body is an `Err`.
    pub async fn try_get_user(&self, username: &str) -> Result<FetchOutcome> {
        let endpoint = format!("/users/{}", urlencoding::encode(username));
        let response = match self.get(&endpoint).await {
            Ok(response) => response,
            Err(e) => {
                return Ok(FetchOutcome::Transient(format!(
                    "error on GET for github user {:?}: {}",
                    username, e
                )));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!(username, "GitHub user not found");
            return Ok(FetchOutcome::NotFound);
        }
        if !status.is_success() {
            return Ok(FetchOutcome::Transient(format!(
                "github returned status {} for user {:?}",
                status, username
            )));
        }

        let body = response.bytes().await?;
        Ok(FetchOutcome::Success(body.to_vec()))
    }
}
