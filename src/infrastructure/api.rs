//! Letters HTTP API client
//!
//! Every call carries `Authorization: Bearer <token>`. A `401` from the server
//! is reported as [`ApiError::AuthExpired`]; every other failure, including
//! transport and decoding errors, is [`ApiError::RequestFailed`].

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;

use crate::domain::letter::{Letter, LetterId, LettersPayload, NewLetter};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The bearer credential is missing, invalid or expired
    #[error("session expired")]
    AuthExpired,
    /// Anything else; `detail` is the server's explanation when it sent one
    #[error("request failed (status: {status:?}, detail: {detail:?})")]
    RequestFailed {
        status: Option<u16>,
        detail: Option<String>,
    },
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        log::warn!("Letters API transport error: {err}");
        ApiError::RequestFailed {
            status: None,
            detail: None,
        }
    }

    /// Message for the user: the server's detail if present, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::RequestFailed {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[async_trait]
pub trait LetterApi: Send + Sync {
    async fn list_letters(&self, token: &SecretString) -> Result<Vec<Letter>, ApiError>;
    async fn delete_letter(&self, token: &SecretString, id: &LetterId) -> Result<(), ApiError>;
    async fn create_letter(&self, token: &SecretString, letter: &NewLetter)
        -> Result<(), ApiError>;
}

/// [`LetterApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpLetterApi {
    client: Client,
    base_url: String,
}

impl HttpLetterApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn letters_url(&self) -> String {
        format!("{}/api/letters", self.base_url)
    }

    /// The id is opaque text, so it is encoded as a single path segment
    pub fn letter_url(&self, id: &LetterId) -> String {
        let segment = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC);
        format!("{}/api/letters/{segment}", self.base_url)
    }
}

#[async_trait]
impl LetterApi for HttpLetterApi {
    async fn list_letters(&self, token: &SecretString) -> Result<Vec<Letter>, ApiError> {
        log::debug!("GET {}", self.letters_url());
        let response = self
            .client
            .get(self.letters_url())
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(ApiError::transport)?;
        let payload: LettersPayload = check_status(response)
            .await?
            .json()
            .await
            .map_err(ApiError::transport)?;
        Ok(payload.into_letters())
    }

    async fn delete_letter(&self, token: &SecretString, id: &LetterId) -> Result<(), ApiError> {
        log::debug!("DELETE {}", self.letter_url(id));
        let response = self
            .client
            .delete(self.letter_url(id))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(ApiError::transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn create_letter(
        &self,
        token: &SecretString,
        letter: &NewLetter,
    ) -> Result<(), ApiError> {
        log::debug!("POST {}", self.letters_url());
        let response = self
            .client
            .post(self.letters_url())
            .bearer_auth(token.expose_secret())
            .json(letter)
            .send()
            .await
            .map_err(ApiError::transport)?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        log::info!("Letters API answered 401 for {}", response.url());
        return Err(ApiError::AuthExpired);
    }

    let body = response.text().await.unwrap_or_default();
    log::warn!("Letters API answered {status}: {body}");
    Err(ApiError::RequestFailed {
        status: Some(status.as_u16()),
        detail: error_detail(&body),
    })
}

/// Pull a human readable message out of an error body.
/// Accepts `{"detail": "..."}` and `{"error": "..."}`.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
