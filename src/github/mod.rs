use std::time::Duration;

use reqwest::{header, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::GithubConfig;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("invalid GitHub API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("GitHub returned {status} for user '{username}'")]
    NotFound { username: String, status: StatusCode },

    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Looks up a user's public repositories on the GitHub REST API
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: Url,
    token: Option<String>,
    repo_count: u32,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("profile-api/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: Url::parse(&config.api_url)?,
            token: config.token.clone(),
            repo_count: config.repo_count,
        })
    }

    /// `{api}/users/{username}/repos`, newest first, limited to `repo_count`
    pub fn repos_url(&self, username: &str) -> Result<Url, GithubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &self.repo_count.to_string())
            .append_pair("sort", "created")
            .append_pair("direction", "desc");
        Ok(url)
    }

    /// Repository list exactly as GitHub returned it
    pub async fn user_repos(&self, username: &str) -> Result<Value, GithubError> {
        let url = self.repos_url(username)?;

        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::NotFound {
                username: username.to_string(),
                status,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GithubClient {
        GithubClient::new(&GithubConfig {
            api_url: api_url.to_string(),
            token: None,
            timeout_secs: 1,
            repo_count: 5,
        })
        .unwrap()
    }

    #[test]
    fn builds_repos_url() {
        let url = client("https://api.github.com").repos_url("octocat").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/users/octocat/repos?per_page=5&sort=created&direction=desc"
        );
    }

    #[test]
    fn escapes_username_and_keeps_base_path() {
        let url = client("http://127.0.0.1:9000/github/").repos_url("a b/c").unwrap();
        assert_eq!(url.path(), "/github/users/a%20b%2Fc/repos");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = GithubClient::new(&GithubConfig {
            api_url: "not a url".to_string(),
            token: None,
            timeout_secs: 1,
            repo_count: 5,
        });
        assert!(matches!(result, Err(GithubError::InvalidUrl(_))));
    }
}
