use std::{process, sync::Arc};

use chrono::{Local, Utc};
use clap::Parser;
use color_eyre::eyre::Result;
use secrecy::SecretString;
use tokio::sync::Mutex;

use futureletters::{
    domain::session::SessionContext,
    infrastructure::{
        api::HttpLetterApi,
        cli::{Cli, Command},
        config::Config,
        credential_store::FileCredentialStore,
        tui::real::RealTui,
    },
    integration::{
        app_runner::AppRunner,
        commands::{
            prepare_letter, read_content, run_login, run_logout, write_letter, WriteOutcome,
            SESSION_EXPIRED_MESSAGE,
        },
    },
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let config = Config::new()?;
    let session = SessionContext::new(
        Arc::new(FileCredentialStore::in_data_dir()),
        config.token.clone().map(SecretString::from),
    )?;

    match args.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => {
            let api = Arc::new(HttpLetterApi::new(config.api_base_url.clone()));
            let tui = Arc::new(Mutex::new(
                RealTui::new()?
                    .tick_rate(args.tick_rate)
                    .frame_rate(args.frame_rate),
            ));
            let mut runner = AppRunner::new(&config, session, api, tui);
            runner.run().await?;
        }
        Command::Login { token } => {
            run_login(&session, &token)?;
            println!("Signed in.");
        }
        Command::Logout => {
            run_logout(&session)?;
            println!("Signed out.");
        }
        Command::Write {
            title,
            content,
            content_file,
            deliver_on,
        } => {
            let content = read_content(content, content_file.as_deref())?;
            let letter = match prepare_letter(&title, &content, deliver_on, &Local, Utc::now()) {
                Ok(letter) => letter,
                Err(e) => {
                    eprintln!("{e}");
                    process::exit(libc::EXIT_FAILURE);
                }
            };

            let api = HttpLetterApi::new(config.api_base_url.clone());
            match write_letter(&api, &session, &letter).await? {
                WriteOutcome::Scheduled => {
                    println!("Letter scheduled for {deliver_on}.")
                }
                WriteOutcome::Rejected(message) => {
                    eprintln!("{message}");
                    process::exit(libc::EXIT_FAILURE);
                }
                WriteOutcome::SessionExpired => {
                    eprintln!("{SESSION_EXPIRED_MESSAGE}");
                    process::exit(libc::EXIT_FAILURE);
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
