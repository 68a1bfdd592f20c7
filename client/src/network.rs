use log::debug;
use reqwest::{StatusCode, Url};
use shared::{Ack, Action, GameState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("update to {0} was not acknowledged")]
    NotAcknowledged(String),
    #[error("invalid server address {0}")]
    InvalidUrl(String),
}

/// HTTP client for one scoreboard server
pub struct ScoreboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScoreboardClient {
    /// `server` is either `host:port` or a full `http://` URL.
    pub fn new(server: &str) -> Self {
        let base_url = if server.starts_with("http://") || server.starts_with("https://") {
            server.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", server.trim_end_matches('/'))
        };

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state_url(&self, match_id: &str) -> Result<Url, ClientError> {
        self.endpoint("state", match_id)
    }

    pub fn update_url(&self, match_id: &str) -> Result<Url, ClientError> {
        self.endpoint("update", match_id)
    }

    /// Builds `/api/{route}/{match_id}` with the identifier encoded as one path segment
    fn endpoint(&self, route: &str, match_id: &str) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", route, match_id]);
        Ok(url)
    }

    /// Fetches the current snapshot of a match
    pub async fn fetch_state(&self, match_id: &str) -> Result<GameState, ClientError> {
        let url = self.state_url(match_id)?;
        let response = self.http.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<GameState>().await?)
    }

    /// Lists the matches the server currently knows
    pub async fn list_matches(&self) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/api/matches", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url,
            });
        }
        Ok(response.json::<Vec<String>>().await?)
    }

    /// Sends an update action to a match
    pub async fn send_action(&self, match_id: &str, action: &Action) -> Result<(), ClientError> {
        let url = self.update_url(match_id)?;
        debug!("POST {} {}", url, action.name());

        let response = self
            .http
            .post(url.clone())
            .json(&action.to_payload())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let ack = response.json::<Ack>().await?;
        if ack.ok {
            Ok(())
        } else {
            Err(ClientError::NotAcknowledged(url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            ScoreboardClient::new("127.0.0.1:8080").base_url(),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            ScoreboardClient::new("http://scoreboard.local:9000/").base_url(),
            "http://scoreboard.local:9000"
        );
    }

    #[test]
    fn test_endpoint_urls() {
        let client = ScoreboardClient::new("10.0.0.2:8080");
        assert_eq!(
            client.state_url("Volley").unwrap().as_str(),
            "http://10.0.0.2:8080/api/state/Volley"
        );
        assert_eq!(
            client.update_url("Basket").unwrap().as_str(),
            "http://10.0.0.2:8080/api/update/Basket"
        );
    }

    #[test]
    fn test_match_id_encoded_as_single_segment() {
        let client = ScoreboardClient::new("http://10.0.0.2:8080/");

        assert_eq!(
            client.state_url("Court #1").unwrap().as_str(),
            "http://10.0.0.2:8080/api/state/Court%20%231"
        );
        assert_eq!(
            client.update_url("50%?x").unwrap().as_str(),
            "http://10.0.0.2:8080/api/update/50%25%3Fx"
        );
        assert_eq!(
            client.update_url("league/final").unwrap().as_str(),
            "http://10.0.0.2:8080/api/update/league%2Ffinal"
        );
    }

    #[test]
    fn test_unparsable_server_reports_invalid_url() {
        let client = ScoreboardClient::new("http://exa mple:80");

        assert!(matches!(
            client.state_url("Volley"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unreachable_server_reports_http_error() {
        let client = ScoreboardClient::new("127.0.0.1:1");

        let result = tokio_test::block_on(client.fetch_state("Volley"));

        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}
