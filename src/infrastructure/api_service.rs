use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    core::raw_msg::RawMsg,
    domain::{
        letter::{Letter, LetterId},
        session::SessionContext,
    },
    infrastructure::api::{ApiError, LetterApi},
};

/// Work the dashboard asks of the letters API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOperation {
    FetchLetters,
    DeleteLetter { id: LetterId },
}

impl ApiOperation {
    pub fn name(&self) -> &'static str {
        match self {
            ApiOperation::FetchLetters => "FetchLetters",
            ApiOperation::DeleteLetter { .. } => "DeleteLetter",
        }
    }
}

/// Outcome of an [`ApiOperation`], delivered back as [`RawMsg::Api`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    LettersFetched(Vec<Letter>),
    FetchFailed(ApiError),
    LetterDeleted(LetterId),
    DeleteFailed { id: LetterId, error: ApiError },
}

/// ApiService runs letters API calls off the UI loop
///
/// Each operation runs in its own task, so a slow delete does not hold up a
/// reload. The bearer credential is read from the [`SessionContext`] when the
/// operation starts.
pub struct ApiService {
    api: Arc<dyn LetterApi>,
    session: SessionContext,
    // Incoming channels
    op_rx: mpsc::UnboundedReceiver<ApiOperation>,
    cancel_token: CancellationToken,
    // Outgoing channels
    raw_tx: mpsc::UnboundedSender<RawMsg>,
}

pub type NewApiService = (
    mpsc::UnboundedSender<ApiOperation>, // op_tx - operations to send
    CancellationToken,                   // shutdown signal
    ApiService,
);

impl ApiService {
    pub fn new(
        api: Arc<dyn LetterApi>,
        session: SessionContext,
        raw_tx: mpsc::UnboundedSender<RawMsg>,
    ) -> NewApiService {
        let (op_tx, op_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        (
            op_tx,
            cancel_token.clone(),
            Self {
                api,
                session,
                op_rx,
                cancel_token,
                raw_tx,
            },
        )
    }

    /// Run the ApiService in background task
    pub fn run(mut self) {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = self.op_rx.recv() => {
                        let Some(op) = result else {
                            log::info!("ApiService: operation channel closed");
                            break;
                        };
                        log::debug!("ApiService: handling {}", op.name());
                        let api = Arc::clone(&self.api);
                        let session = self.session.clone();
                        let raw_tx = self.raw_tx.clone();
                        tokio::spawn(async move {
                            let event = execute(api.as_ref(), &session, op).await;
                            if raw_tx.send(RawMsg::Api(event)).is_err() {
                                log::debug!("ApiService: runtime gone, dropping result");
                            }
                        });
                    }

                    _ = self.cancel_token.cancelled() => {
                        log::info!("ApiService received cancellation signal");
                        break;
                    }
                }
            }
        });
    }
}

/// Perform one operation against `api` with the current credential
pub async fn execute(api: &dyn LetterApi, session: &SessionContext, op: ApiOperation) -> ApiEvent {
    let token = session.credential();

    match op {
        ApiOperation::FetchLetters => {
            let result = match token {
                Some(token) => api.list_letters(&token).await,
                None => Err(ApiError::AuthExpired),
            };
            match result {
                Ok(letters) => {
                    log::info!("Fetched {} letters", letters.len());
                    ApiEvent::LettersFetched(letters)
                }
                Err(error) => ApiEvent::FetchFailed(error),
            }
        }

        ApiOperation::DeleteLetter { id } => {
            let result = match token {
                Some(token) => api.delete_letter(&token, &id).await,
                None => Err(ApiError::AuthExpired),
            };
            match result {
                Ok(()) => {
                    log::info!("Deleted letter {id}");
                    ApiEvent::LetterDeleted(id)
                }
                Err(error) => ApiEvent::DeleteFailed { id, error },
            }
        }
    }
}
