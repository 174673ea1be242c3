use std::collections::VecDeque;

use color_eyre::eyre::eyre;
use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::Cmd, cmd_executor::CmdExecutor, msg::Msg, raw_msg::RawMsg, state::AppState,
        translator::translate_raw_to_domain, update::update,
    },
    Result,
};

/// Message queues around the pure update function
///
/// Raw messages arrive either through [`Runtime::send_raw_msg`] or the channel
/// handed out by [`Runtime::get_raw_sender`] (used by the API service). They are
/// translated against the current state, applied in order, and the resulting
/// commands are queued for the [`CmdExecutor`].
pub struct Runtime {
    state: AppState,
    msg_queue: VecDeque<Msg>,
    raw_msg_queue: VecDeque<RawMsg>,
    cmd_queue: VecDeque<Cmd>,
    raw_msg_tx: mpsc::UnboundedSender<RawMsg>,
    raw_msg_rx: mpsc::UnboundedReceiver<RawMsg>,
    cmd_executor: Option<CmdExecutor>,
}

impl Runtime {
    /// Create a new Runtime
    pub fn new(initial_state: AppState) -> Self {
        let (raw_msg_tx, raw_msg_rx) = mpsc::unbounded_channel();

        Self {
            state: initial_state,
            msg_queue: VecDeque::new(),
            raw_msg_queue: VecDeque::new(),
            cmd_queue: VecDeque::new(),
            raw_msg_tx,
            raw_msg_rx,
            cmd_executor: None,
        }
    }

    pub fn set_executor(&mut self, executor: CmdExecutor) {
        self.cmd_executor = Some(executor);
    }

    pub fn has_executor(&self) -> bool {
        self.cmd_executor.is_some()
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Send message directly (for testing)
    pub fn send_msg(&mut self, msg: Msg) {
        self.msg_queue.push_back(msg);
    }

    /// Send raw message (for integration with external systems)
    pub fn send_raw_msg(&mut self, raw_msg: RawMsg) {
        self.raw_msg_queue.push_back(raw_msg);
    }

    /// Get raw message sender
    pub fn get_raw_sender(&self) -> mpsc::UnboundedSender<RawMsg> {
        self.raw_msg_tx.clone()
    }

    /// Get pending commands
    pub fn pending_commands(&mut self) -> Vec<Cmd> {
        self.cmd_queue.drain(..).collect()
    }

    /// Execute all pending commands using the command executor
    pub fn execute_pending_commands(&mut self) -> Result<Vec<String>> {
        let Some(executor) = &self.cmd_executor else {
            return Err(eyre!(
                "No command executor available. Use set_executor() to configure."
            ));
        };

        let commands: Vec<Cmd> = self.cmd_queue.drain(..).collect();
        if commands.is_empty() {
            return Ok(vec![]);
        }
        Ok(executor.execute_commands(&commands))
    }

    /// Process a single message
    pub fn process_message(&mut self, msg: Msg) -> Vec<Cmd> {
        if !msg.is_frequent() {
            log::debug!("Runtime: {msg:?}");
        }
        let (new_state, commands) = update(msg, std::mem::take(&mut self.state));
        self.state = new_state;
        self.cmd_queue.extend(commands.iter().cloned());
        commands
    }

    /// Process all messages in queue
    ///
    /// Each raw message is translated against the state left by the previous
    /// one, so a key pressed after a dialog opened sees the dialog.
    pub fn process_all_messages(&mut self) -> Vec<Cmd> {
        let mut all_commands = Vec::new();

        // Messages queued directly come first
        while let Some(msg) = self.msg_queue.pop_front() {
            all_commands.extend(self.process_message(msg));
        }

        while let Some(raw_msg) = self.next_raw_msg() {
            for msg in translate_raw_to_domain(raw_msg, &self.state) {
                all_commands.extend(self.process_message(msg));
            }
        }

        all_commands
    }

    fn next_raw_msg(&mut self) -> Option<RawMsg> {
        self.raw_msg_queue
            .pop_front()
            .or_else(|| self.raw_msg_rx.try_recv().ok())
    }

    /// Process all messages and execute commands in one step
    pub fn run_update_cycle(&mut self) -> Result<Vec<String>> {
        self.process_all_messages();
        if self.cmd_executor.is_none() {
            // Nothing can run the commands; keep them for inspection
            return Ok(vec![]);
        }
        self.execute_pending_commands()
    }
}
