use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tokio::sync::Mutex;

use futureletters::{
    core::state::Route,
    domain::{letter::LetterId, presenter::EMPTY_PLACEHOLDER, session::SessionContext},
    infrastructure::{
        api::ApiError,
        config::Config,
        credential_store::MemoryCredentialStore,
        tui::{test::TestTui, Event},
    },
    integration::app_runner::AppRunner,
    presentation::components::login::{EXPIRED_NOTICE, SIGN_IN_NOTICE},
    test_helpers::{pending_letter, FakeLetterApi},
};

const EVENT_DELAY: Duration = Duration::from_millis(20);

fn key(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
}

fn tui(events: Vec<Event>) -> Result<Arc<Mutex<TestTui>>> {
    Ok(Arc::new(Mutex::new(
        TestTui::with_events(80, 24, events)?.with_event_delay(EVENT_DELAY),
    )))
}

fn signed_in() -> Result<(SessionContext, Arc<MemoryCredentialStore>)> {
    let store = Arc::new(MemoryCredentialStore::with_token("secret"));
    Ok((SessionContext::new(store.clone(), None)?, store))
}

#[tokio::test]
async fn test_dashboard_lists_letters() -> Result<()> {
    let (session, _store) = signed_in()?;
    let api = Arc::new(FakeLetterApi::with_letters(vec![
        pending_letter(1, 900),
        pending_letter(2, 400),
    ]));
    let tui = tui(vec![Event::Tick, Event::Tick])?;

    let mut runner = AppRunner::new(&Config::default(), session, api.clone(), tui.clone());
    runner.run().await?;

    let tui = tui.lock().await;
    assert!(tui.screen_contains("Letter 1"));
    assert!(tui.screen_contains("Letter 2"));
    assert!(tui.draw_count() >= 3);
    assert_eq!(api.tokens_seen(), vec!["secret".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_delete_through_confirmation() -> Result<()> {
    let (session, _store) = signed_in()?;
    let api = Arc::new(FakeLetterApi::with_letters(vec![pending_letter(1, 900)]));
    let tui = tui(vec![Event::Tick, key('d'), key('y'), Event::Tick, Event::Tick])?;

    let mut runner = AppRunner::new(&Config::default(), session, api.clone(), tui.clone());
    runner.run().await?;

    assert_eq!(api.deleted(), vec![LetterId::from(1)]);
    assert!(runner.state().letters.is_empty());

    let tui = tui.lock().await;
    assert!(tui.screen_contains(EMPTY_PLACEHOLDER));
    assert!(tui.screen_contains("Letter deleted."));
    Ok(())
}

#[tokio::test]
async fn test_rejected_credential_shows_login_notice() -> Result<()> {
    let (session, store) = signed_in()?;
    let api = Arc::new(FakeLetterApi::with_letters(vec![pending_letter(1, 900)]));
    api.fail_lists_with(ApiError::AuthExpired);
    let tui = tui(vec![Event::Tick, Event::Tick])?;

    let mut runner = AppRunner::new(&Config::default(), session.clone(), api, tui.clone());
    runner.run().await?;

    assert_eq!(runner.state().route, Route::Login { expired: true });
    assert_eq!(store.clear_count(), 1);
    assert!(!session.is_authenticated());
    assert!(tui.lock().await.screen_contains(EXPIRED_NOTICE));
    Ok(())
}

#[tokio::test]
async fn test_without_credential_nothing_is_fetched() -> Result<()> {
    let session = SessionContext::new(Arc::new(MemoryCredentialStore::default()), None)?;
    let api = Arc::new(FakeLetterApi::with_letters(vec![pending_letter(1, 900)]));
    let tui = tui(vec![Event::Tick])?;

    let mut runner = AppRunner::new(&Config::default(), session, api.clone(), tui.clone());
    runner.run().await?;

    assert!(api.tokens_seen().is_empty());
    assert!(tui.lock().await.screen_contains(SIGN_IN_NOTICE));
    Ok(())
}

#[tokio::test]
async fn test_quit_key_stops_loop() -> Result<()> {
    let (session, _store) = signed_in()?;
    let api = Arc::new(FakeLetterApi::default());
    let tui = tui(vec![Event::Tick, key('q'), Event::Tick, Event::Tick])?;

    let mut runner = AppRunner::new(&Config::default(), session, api, tui.clone());
    runner.run().await?;

    assert!(runner.state().system.should_quit);
    // the two ticks after `q` were never drawn
    assert_eq!(tui.lock().await.draw_count(), 3);
    Ok(())
}
