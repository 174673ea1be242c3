//! Non-interactive subcommands: `login`, `logout` and `write`

use std::path::Path;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use color_eyre::eyre::{bail, WrapErr};
use secrecy::SecretString;

use crate::{
    domain::{
        letter::{delivery_instant, NewLetter, NewLetterError},
        session::SessionContext,
    },
    infrastructure::api::{ApiError, LetterApi},
    Result,
};

pub const WRITE_FAILED_MESSAGE: &str = "Failed to schedule the letter. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired. Please sign in again and store the new token with `login`.";

/// Result of `write` as reported to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Scheduled,
    /// The server refused the letter; the message is safe to print
    Rejected(String),
    /// The credential was rejected and has been cleared
    SessionExpired,
}

pub fn run_login(session: &SessionContext, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        bail!("Token must not be empty");
    }
    session.replace(SecretString::from(token.to_string()))?;
    log::info!("Credential stored");
    Ok(())
}

pub fn run_logout(session: &SessionContext) -> Result<()> {
    session.invalidate()?;
    log::info!("Credential cleared");
    Ok(())
}

/// Letter body from `--content` or `--content-file`
pub fn read_content(content: Option<String>, content_file: Option<&Path>) -> Result<String> {
    match (content, content_file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        (None, None) => bail!("Either --content or --content-file is required"),
    }
}

/// Validate a draft before anything is sent: the day is scheduled at noon in `tz`
/// and must lie strictly after `now`.
pub fn prepare_letter<Tz: TimeZone>(
    title: &str,
    content: &str,
    deliver_on: NaiveDate,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<NewLetter, NewLetterError> {
    let delivery_date = delivery_instant(deliver_on, tz)?;
    NewLetter::new(title, content, delivery_date, now)
}

/// Send `letter` with the session credential
pub async fn write_letter(
    api: &dyn LetterApi,
    session: &SessionContext,
    letter: &NewLetter,
) -> Result<WriteOutcome> {
    let Some(token) = session.credential() else {
        return Ok(WriteOutcome::SessionExpired);
    };

    match api.create_letter(&token, letter).await {
        Ok(()) => {
            log::info!("Scheduled letter \"{}\" for {}", letter.title, letter.delivery_date);
            Ok(WriteOutcome::Scheduled)
        }
        Err(ApiError::AuthExpired) => {
            session.invalidate()?;
            Ok(WriteOutcome::SessionExpired)
        }
        Err(error) => {
            log::warn!("Creating letter failed: {error}");
            Ok(WriteOutcome::Rejected(error.user_message(WRITE_FAILED_MESSAGE)))
        }
    }
}
