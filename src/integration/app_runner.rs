use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        cmd_executor::CmdExecutor,
        msg::{letters::LettersMsg, Msg},
        raw_msg::RawMsg,
        state::AppState,
    },
    domain::session::SessionContext,
    infrastructure::{
        api::LetterApi,
        api_service::ApiService,
        config::Config,
        tui::{self, TuiLike},
    },
    integration::runtime::Runtime,
    presentation::components::Components,
    Result,
};

/// Runner that drives the Elm architecture: terminal events in, frames out
pub struct AppRunner<T: TuiLike> {
    runtime: Runtime,
    tui: Arc<Mutex<T>>,
    components: Components,
    api_cancel: CancellationToken,
}

impl<T: TuiLike> AppRunner<T> {
    /// Wire the runtime, the API service and the terminal together.
    ///
    /// The initial view load is queued right away when a credential is present.
    pub fn new(
        config: &Config,
        session: SessionContext,
        api: Arc<dyn LetterApi>,
        tui: Arc<Mutex<T>>,
    ) -> Self {
        let initial_state = AppState::new(session.is_authenticated());
        let mut runtime = Runtime::new(initial_state);

        let (op_tx, api_cancel, api_service) =
            ApiService::new(api, session.clone(), runtime.get_raw_sender());
        api_service.run();
        runtime.set_executor(CmdExecutor::new(op_tx, session));

        if runtime.state().route.is_dashboard() {
            runtime.send_msg(Msg::Letters(LettersMsg::Load));
        }

        Self {
            runtime,
            tui,
            components: Components::new(config.styles),
            api_cancel,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn state(&self) -> &AppState {
        self.runtime.state()
    }

    /// Run the main loop until the user quits or the event source closes.
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        self.runtime
            .send_raw_msg(RawMsg::Tick(Local::now().fixed_offset()));
        self.update_cycle();
        self.render().await?;

        loop {
            let event = self.tui.lock().await.next().await;
            let Some(event) = event else {
                log::info!("Event source closed");
                break;
            };

            let mut needs_render = true;
            match event {
                tui::Event::Quit | tui::Event::Closed => self.runtime.send_raw_msg(RawMsg::Quit),
                tui::Event::Tick => self
                    .runtime
                    .send_raw_msg(RawMsg::Tick(Local::now().fixed_offset())),
                tui::Event::Resize(w, h) => {
                    self.tui
                        .lock()
                        .await
                        .resize(ratatui::prelude::Rect::new(0, 0, w, h))?;
                    self.runtime.send_raw_msg(RawMsg::Resize(w, h));
                }
                tui::Event::Key(key) => self.runtime.send_raw_msg(RawMsg::Key(key)),
                tui::Event::Error => self
                    .runtime
                    .send_raw_msg(RawMsg::Error("Terminal input error".to_string())),
                tui::Event::Render => self.runtime.send_raw_msg(RawMsg::Render),
                tui::Event::Init
                | tui::Event::FocusGained
                | tui::Event::FocusLost
                | tui::Event::Paste(_) => needs_render = false,
            }

            // API results arrive on the runtime channel and are drained here too
            self.update_cycle();
            if needs_render {
                self.render().await?;
            }

            // Check quit condition from Elm state
            if self.runtime.state().system.should_quit {
                break;
            }
        }

        // Shutdown services and exit TUI
        self.api_cancel.cancel();
        self.tui.lock().await.exit()?;
        Ok(())
    }

    fn update_cycle(&mut self) {
        if let Err(e) = self.runtime.run_update_cycle() {
            log::error!("Runtime error: {e}");
            self.runtime
                .send_raw_msg(RawMsg::Error(format!("Runtime error: {e}")));
        }
    }

    async fn render(&self) -> Result<()> {
        let state = self.runtime.state();
        let components = &self.components;
        self.tui
            .lock()
            .await
            .draw(&mut |frame| components.render(frame, state))
    }
}
