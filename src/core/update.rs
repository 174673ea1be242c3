use crate::{
    core::{
        cmd::Cmd,
        msg::{letters::LettersMsg, ui::UiMsg, Msg},
        state::{AppState, Modal, Route, ViewPhase},
    },
    infrastructure::api::ApiError,
};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load your letters. Please try again.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete the letter. Please try again.";
pub const DELETED_MESSAGE: &str = "Letter deleted.";
pub const DELIVERED_NOT_DELETABLE_MESSAGE: &str = "Delivered letters cannot be deleted.";

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    let commands = match msg {
        // System messages (delegated to SystemState)
        Msg::System(system_msg) => state.system.update(system_msg),
        Msg::Letters(letters_msg) => update_letters(letters_msg, &mut state),
        Msg::Ui(ui_msg) => update_ui(ui_msg, &mut state),
    };
    (state, commands)
}

fn update_letters(msg: LettersMsg, state: &mut AppState) -> Vec<Cmd> {
    match msg {
        LettersMsg::Load => {
            if !state.route.is_dashboard() {
                return vec![];
            }
            state.ui.close();
            state.letters.update(LettersMsg::Load)
        }

        LettersMsg::LoadFailed(error) => {
            // only the fetch of the current view load counts
            if state.letters.phase() != ViewPhase::Loading {
                return vec![];
            }
            let mut cmds = state.letters.update(LettersMsg::LoadFailed(error.clone()));
            match error {
                ApiError::AuthExpired => cmds.extend(expire_session(state)),
                other => {
                    cmds.push(Cmd::LogError {
                        message: format!("Loading letters failed: {other}"),
                    });
                    state
                        .system
                        .show_error(other.user_message(LOAD_FAILED_MESSAGE));
                }
            }
            cmds
        }

        LettersMsg::Deleted(id) => {
            let was_known = state.letters.find(&id).is_some() || state.letters.is_deleting(&id);
            let cmds = state.letters.update(LettersMsg::Deleted(id.clone()));
            if matches!(&state.ui.modal, Modal::Detail { id: shown } if *shown == id) {
                state.ui.close();
            }
            if was_known {
                state.system.show_info(DELETED_MESSAGE);
            }
            cmds
        }

        LettersMsg::DeleteFailed { id, error } => {
            let mut cmds = state.letters.update(LettersMsg::DeleteFailed {
                id: id.clone(),
                error: error.clone(),
            });
            match error {
                ApiError::AuthExpired => cmds.extend(expire_session(state)),
                other => {
                    cmds.push(Cmd::LogError {
                        message: format!("Deleting letter {id} failed: {other}"),
                    });
                    state
                        .system
                        .show_error(other.user_message(DELETE_FAILED_MESSAGE));
                }
            }
            cmds
        }

        other => state.letters.update(other),
    }
}

fn update_ui(msg: UiMsg, state: &mut AppState) -> Vec<Cmd> {
    match msg {
        UiMsg::OpenDetail => {
            if let Some(letter) = state.letters.selected_letter() {
                state.ui.modal = Modal::Detail {
                    id: letter.id.clone(),
                };
            }
            vec![]
        }

        UiMsg::CloseDetail => {
            if state.ui.is_showing_detail() {
                state.ui.close();
            }
            vec![]
        }

        UiMsg::AskDeleteSelected => {
            let Some(letter) = state.letters.selected_letter() else {
                return vec![];
            };
            if letter.is_delivered {
                state.system.show_info(DELIVERED_NOT_DELETABLE_MESSAGE);
            } else if !state.letters.is_deleting(&letter.id) {
                state.ui.modal = Modal::ConfirmDelete {
                    id: letter.id.clone(),
                    title: letter.title.clone(),
                };
            }
            vec![]
        }

        UiMsg::ConfirmDelete => match state.ui.close() {
            Modal::ConfirmDelete { id, title } => {
                let cmds = state.letters.begin_delete(id);
                if !cmds.is_empty() {
                    state.system.show_info(format!("Deleting \"{title}\"..."));
                }
                cmds
            }
            other => {
                state.ui.modal = other;
                vec![]
            }
        },

        UiMsg::CancelDelete => {
            if state.ui.is_confirming_delete() {
                state.ui.close();
            }
            vec![]
        }
    }
}

/// The server rejected the credential: drop it and show the sign-in notice.
fn expire_session(state: &mut AppState) -> Vec<Cmd> {
    if state.route == (Route::Login { expired: true }) {
        return vec![];
    }
    state.route = Route::Login { expired: true };
    state.ui.close();
    state.letters = Default::default();
    state.system.status_message = None;
    vec![
        Cmd::InvalidateSession,
        Cmd::LogInfo {
            message: "Session expired, credential invalidated".to_string(),
        },
    ]
}
