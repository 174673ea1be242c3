use tokio::sync::mpsc;

use crate::{
    core::cmd::Cmd,
    domain::session::SessionContext,
    infrastructure::api_service::ApiOperation,
    Result,
};

/// Command executor that bridges Elm commands to the API service and the session
#[derive(Clone, Default)]
pub struct CmdExecutor {
    api_sender: Option<mpsc::UnboundedSender<ApiOperation>>,
    session: Option<SessionContext>,
}

impl CmdExecutor {
    pub fn new(api_sender: mpsc::UnboundedSender<ApiOperation>, session: SessionContext) -> Self {
        Self {
            api_sender: Some(api_sender),
            session: Some(session),
        }
    }

    fn send_operation(&self, op: ApiOperation) -> Result<()> {
        if let Some(sender) = &self.api_sender {
            sender.send(op)?;
        } else {
            log::warn!("{} ignored: ApiService not available", op.name());
        }
        Ok(())
    }

    /// Execute a single command
    pub fn execute_command(&self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}

            Cmd::FetchLetters => self.send_operation(ApiOperation::FetchLetters)?,

            Cmd::DeleteLetter { id } => {
                self.send_operation(ApiOperation::DeleteLetter { id: id.clone() })?
            }

            Cmd::InvalidateSession => {
                if let Some(session) = &self.session {
                    session.invalidate()?;
                    log::info!("Stored credential cleared");
                } else {
                    log::warn!("InvalidateSession ignored: no session attached");
                }
            }

            Cmd::LogError { message } => {
                log::error!("Elm command error: {message}");
            }

            Cmd::LogInfo { message } => {
                log::info!("Elm command info: {message}");
            }

            Cmd::Batch(commands) => {
                for cmd in commands {
                    self.execute_command(cmd)?;
                }
            }
        }

        Ok(())
    }

    /// Execute multiple commands, highest priority first
    pub fn execute_commands(&self, commands: &[Cmd]) -> Vec<String> {
        let mut ordered: Vec<&Cmd> = commands.iter().collect();
        ordered.sort_by_key(|cmd| cmd.priority());

        let mut execution_log = Vec::new();
        for cmd in ordered {
            match self.execute_command(cmd) {
                Ok(()) => {
                    execution_log.push(format!("✓ Executed: {}", cmd.name()));
                }
                Err(e) => {
                    let error_msg = format!("✗ Failed to execute {}: {e}", cmd.name());
                    log::error!("{error_msg}");
                    execution_log.push(error_msg);
                }
            }
        }

        execution_log
    }
}
