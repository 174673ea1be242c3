use std::sync::Arc;

use chrono::TimeDelta;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use futureletters::{
    core::{
        cmd::Cmd,
        cmd_executor::CmdExecutor,
        msg::{letters::LettersMsg, Msg},
        raw_msg::RawMsg,
        state::{AppState, Modal, Route, ViewPhase},
        update::{DELETED_MESSAGE, DELETE_FAILED_MESSAGE, DELIVERED_NOT_DELETABLE_MESSAGE},
    },
    domain::{
        letter::LetterId,
        presenter::{present, LetterListView, EMPTY_PLACEHOLDER},
        session::SessionContext,
    },
    infrastructure::{
        api::ApiError,
        api_service::{ApiEvent, ApiOperation},
        credential_store::MemoryCredentialStore,
    },
    integration::runtime::Runtime,
    test_helpers::{delivered_letter, fixed_now, pending_letter, DashboardTestHelper},
};

/// Runtime wired to a credential store the test can inspect
fn runtime_with_store() -> Result<(
    Runtime,
    mpsc::UnboundedReceiver<ApiOperation>,
    Arc<MemoryCredentialStore>,
)> {
    let store = Arc::new(MemoryCredentialStore::with_token("secret"));
    let session = SessionContext::new(store.clone(), None)?;
    let (op_tx, op_rx) = mpsc::unbounded_channel();

    let mut runtime = Runtime::new(AppState::new(session.is_authenticated()));
    runtime.set_executor(CmdExecutor::new(op_tx, session));
    Ok((runtime, op_rx, store))
}

#[test]
fn test_load_sends_fetch_operation() -> Result<()> {
    let (mut runtime, mut op_rx, _store) = runtime_with_store()?;

    runtime.send_msg(Msg::Letters(LettersMsg::Load));
    runtime.run_update_cycle()?;

    assert_eq!(op_rx.try_recv().ok(), Some(ApiOperation::FetchLetters));
    assert_eq!(runtime.state().letters.phase(), ViewPhase::Loading);
    Ok(())
}

#[test]
fn test_rejected_credential_on_load_signs_out_once() -> Result<()> {
    let (mut runtime, _op_rx, store) = runtime_with_store()?;
    runtime.send_msg(Msg::Letters(LettersMsg::Load));
    runtime.run_update_cycle()?;

    runtime.send_raw_msg(RawMsg::Api(ApiEvent::FetchFailed(ApiError::AuthExpired)));
    runtime.run_update_cycle()?;

    assert_eq!(runtime.state().route, Route::Login { expired: true });
    assert!(runtime.state().letters.is_empty());
    assert_eq!(store.clear_count(), 1);

    // a straggling 401 from another request must not clear twice
    runtime.send_raw_msg(RawMsg::Api(ApiEvent::DeleteFailed {
        id: LetterId::from(1),
        error: ApiError::AuthExpired,
    }));
    runtime.run_update_cycle()?;

    assert_eq!(store.clear_count(), 1);
    assert_eq!(runtime.state().route, Route::Login { expired: true });
    Ok(())
}

#[test]
fn test_raw_channel_feeds_runtime() -> Result<()> {
    let (mut runtime, _op_rx, _store) = runtime_with_store()?;
    runtime.send_msg(Msg::Letters(LettersMsg::Load));
    runtime.run_update_cycle()?;

    let raw_tx = runtime.get_raw_sender();
    raw_tx.send(RawMsg::Api(ApiEvent::LettersFetched(vec![
        pending_letter(1, 3),
        pending_letter(2, 1),
    ])))?;
    runtime.run_update_cycle()?;

    let titles: Vec<&str> = runtime
        .state()
        .letters
        .letters()
        .iter()
        .map(|l| l.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Letter 2", "Letter 1"]);
    Ok(())
}

#[test]
fn test_keys_are_translated_against_updated_state() -> Result<()> {
    let (mut runtime, mut op_rx, _store) = runtime_with_store()?;
    runtime.send_msg(Msg::Letters(LettersMsg::Load));
    runtime.send_raw_msg(RawMsg::Api(ApiEvent::LettersFetched(vec![pending_letter(
        7, 4,
    )])));
    runtime.run_update_cycle()?;
    let _ = op_rx.try_recv();

    // `y` only confirms because `d` opened the dialog in the same cycle
    runtime.send_raw_msg(RawMsg::Key(KeyEvent::new(
        KeyCode::Char('d'),
        KeyModifiers::NONE,
    )));
    runtime.send_raw_msg(RawMsg::Key(KeyEvent::new(
        KeyCode::Char('y'),
        KeyModifiers::NONE,
    )));
    runtime.run_update_cycle()?;

    assert_eq!(
        op_rx.try_recv().ok(),
        Some(ApiOperation::DeleteLetter {
            id: LetterId::from(7)
        })
    );
    assert!(runtime.state().letters.is_deleting(&LetterId::from(7)));
    Ok(())
}

#[test]
fn test_pending_first_then_soonest() {
    let helper = DashboardTestHelper::with_letters(vec![
        delivered_letter(1, -2),
        pending_letter(2, 30),
        delivered_letter(3, -40),
        pending_letter(4, 1),
    ]);

    helper.assert_titles(&["Letter 4", "Letter 2", "Letter 3", "Letter 1"]);
}

#[test]
fn test_deleting_only_letter_reveals_placeholder() {
    let mut helper = DashboardTestHelper::with_letters(vec![pending_letter(1, 3)]);

    helper.press_char('d');
    assert!(helper.state().ui.is_confirming_delete());
    helper.press_char('y');

    let commands = helper.take_commands();
    assert!(commands.contains(&Cmd::DeleteLetter {
        id: LetterId::from(1)
    }));
    // pessimistic: still listed until the server confirms
    helper.assert_titles(&["Letter 1"]);

    helper.api_event(ApiEvent::LetterDeleted(LetterId::from(1)));

    helper.assert_titles(&[]);
    helper.assert_status_message(DELETED_MESSAGE);
    assert_eq!(helper.state().letters.phase(), ViewPhase::EmptyRendered);
    assert_eq!(
        present(helper.state().letters.letters(), helper.state().system.now),
        LetterListView::Empty {
            message: EMPTY_PLACEHOLDER
        }
    );
}

#[test]
fn test_cancelled_delete_sends_nothing() {
    let mut helper = DashboardTestHelper::with_letters(vec![pending_letter(1, 3)]);

    helper.press_char('d').press_char('n');

    assert_eq!(helper.state().ui.modal, Modal::None);
    assert!(!helper
        .take_commands()
        .iter()
        .any(|cmd| matches!(cmd, Cmd::DeleteLetter { .. })));
    helper.assert_titles(&["Letter 1"]);
}

#[test]
fn test_failed_delete_keeps_letter() {
    let mut helper = DashboardTestHelper::with_letters(vec![pending_letter(1, 3)]);
    helper.press_char('d').press_char('y');

    helper.api_event(ApiEvent::DeleteFailed {
        id: LetterId::from(1),
        error: ApiError::RequestFailed {
            status: Some(500),
            detail: None,
        },
    });

    helper.assert_titles(&["Letter 1"]);
    helper.assert_status_message(DELETE_FAILED_MESSAGE);
    assert!(!helper.state().letters.is_deleting(&LetterId::from(1)));
}

#[test]
fn test_failed_delete_shows_server_detail() {
    let mut helper = DashboardTestHelper::with_letters(vec![pending_letter(1, 3)]);
    helper.press_char('d').press_char('y');

    helper.api_event(ApiEvent::DeleteFailed {
        id: LetterId::from(1),
        error: ApiError::RequestFailed {
            status: Some(400),
            detail: Some("Delivered letters cannot be deleted.".to_string()),
        },
    });

    helper.assert_titles(&["Letter 1"]);
    helper.assert_status_message("Delivered letters cannot be deleted.");
}

#[test]
fn test_rejected_credential_on_delete() {
    let mut helper = DashboardTestHelper::with_letters(vec![pending_letter(1, 3)]);
    helper.press_char('d').press_char('y');
    helper.take_commands();

    helper.api_event(ApiEvent::DeleteFailed {
        id: LetterId::from(1),
        error: ApiError::AuthExpired,
    });

    assert_eq!(helper.state().route, Route::Login { expired: true });
    assert!(helper.take_commands().contains(&Cmd::InvalidateSession));
}

#[test]
fn test_delivered_letter_is_not_offered_for_deletion() {
    let mut helper = DashboardTestHelper::with_letters(vec![delivered_letter(1, -3)]);

    helper.press_char('d');

    assert_eq!(helper.state().ui.modal, Modal::None);
    helper.assert_status_message(DELIVERED_NOT_DELETABLE_MESSAGE);
}

#[test]
fn test_countdown_follows_clock() {
    let mut helper = DashboardTestHelper::with_letters(vec![pending_letter(1, 3)]);
    let label = |helper: &DashboardTestHelper| {
        present(helper.state().letters.letters(), helper.state().system.now).items()[0]
            .time_remaining
            .clone()
    };

    assert_eq!(label(&helper), Some("3 days remaining".to_string()));

    helper.tick(fixed_now() + TimeDelta::days(2));
    assert_eq!(label(&helper), Some("Delivers tomorrow!".to_string()));
}

#[test]
fn test_reload_while_loading_is_ignored() {
    let mut helper = DashboardTestHelper::loading();
    assert_eq!(helper.take_commands(), vec![Cmd::FetchLetters]);

    helper.press_char('r');

    assert!(!helper.take_commands().contains(&Cmd::FetchLetters));
    assert_eq!(helper.state().letters.phase(), ViewPhase::Loading);
}

#[test]
fn test_refresh_during_delete_does_not_resurrect_letter() {
    let mut helper =
        DashboardTestHelper::with_letters(vec![pending_letter(1, 3), pending_letter(2, 5)]);
    helper.press_char('d').press_char('y').press_char('r');
    assert_eq!(helper.state().letters.phase(), ViewPhase::Loading);
    assert!(helper.state().letters.is_deleting(&LetterId::from(1)));

    helper.api_event(ApiEvent::LetterDeleted(LetterId::from(1)));
    // fetch served before the server applied the delete
    helper.api_event(ApiEvent::LettersFetched(vec![
        pending_letter(1, 3),
        pending_letter(2, 5),
    ]));

    helper.assert_titles(&["Letter 2"]);
    helper.assert_status_message(DELETED_MESSAGE);
}

#[test]
fn test_refresh_keeps_pending_delete_guard() {
    let mut helper = DashboardTestHelper::with_letters(vec![pending_letter(1, 3)]);
    helper.press_char('d').press_char('y').press_char('r');
    helper.api_event(ApiEvent::LettersFetched(vec![pending_letter(1, 3)]));
    helper.take_commands();

    // still in flight: no second dialog, no second request
    helper.press_char('d');
    assert_eq!(helper.state().ui.modal, Modal::None);
    helper.press_char('y');
    assert!(!helper
        .take_commands()
        .iter()
        .any(|cmd| matches!(cmd, Cmd::DeleteLetter { .. })));
}
