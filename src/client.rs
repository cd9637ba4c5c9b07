use reqwest::{Client, StatusCode};
use url::Url;

use crate::routes::{CountResponse, ErrorResponse, SignupData, SignupResponse};

/// Waitlist API client
pub struct WaitlistClient {
    http_client: Client,
    base_url: Url,
}

/// Error returned by the waitlist client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("the server rejected the request with status {status}")]
    Rejected {
        status: StatusCode,
        error: Option<String>,
    },
    /// No usable response was received
    #[error("failed to reach the waitlist endpoint")]
    Network(#[from] reqwest::Error),
}

impl WaitlistClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
        }
    }

    /// Submit an email address to the waitlist
    pub async fn join(&self, email: &str) -> Result<SignupResponse, ClientError> {
        let response = self
            .http_client
            .post(self.endpoint())
            .json(&SignupData {
                email: email.to_owned(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch the current number of waitlist signups
    pub async fn count(&self) -> Result<u64, ClientError> {
        let response = self.http_client.get(self.endpoint()).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: CountResponse = response.json().await?;
        Ok(body.count)
    }

    fn endpoint(&self) -> Url {
        self.base_url
            .join("/api/waitlist")
            .expect("Cannot parse URL")
    }

    /// Build a rejection, keeping the server's error text when it sent one
    async fn rejection(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let error = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.error);

        ClientError::Rejected { status, error }
    }
}
