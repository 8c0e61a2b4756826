use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use services::{SessionError, TutorSession};
use tutor_core::mentor;
use tutor_core::model::ModuleId;

use crate::input::{Command, parse_command, resolve_answer};
use crate::render;

fn say(session: &TutorSession) {
    println!("\nProf. Max: {}\n", session.mentor_message());
}

fn show(session: &TutorSession) {
    say(session);
    println!("{}", render::question(session.state()));
}

async fn select(session: &mut TutorSession, id: ModuleId) -> Result<(), SessionError> {
    println!("{}", mentor::REVIEWING_CASE_FILES);
    session.select_module(id).await?;
    show(session);
    Ok(())
}

/// Wait out the feedback delay after a correct answer, then load the next tier.
async fn advance(session: &mut TutorSession) -> Result<(), SessionError> {
    if let Some(wait) = session.time_until_advance() {
        debug!(?wait, "waiting before next tier");
        tokio::time::sleep(wait).await;
    }
    if session.poll_advance().await? {
        show(session);
    }
    Ok(())
}

async fn answer(session: &mut TutorSession, raw: &str) -> Result<(), SessionError> {
    let Some(question) = session.state().question() else {
        println!("{}", render::question(session.state()));
        return Ok(());
    };
    let resolved = match resolve_answer(question, raw) {
        Ok(resolved) => resolved,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };
    session.set_answer(resolved)?;
    println!("Evaluating...");
    let outcome = session.submit().await?;
    say(session);
    match outcome.change {
        Some(change) if change.is_correct => {
            println!(
                "+{} points. Score {} | streak {}",
                change.points, change.score, change.streak
            );
            advance(session).await?;
        }
        Some(change) => println!("Streak reset. Score {}", change.score),
        None => println!("(not scored, try again)"),
    }
    Ok(())
}

async fn dispatch(session: &mut TutorSession, command: Command) -> Result<bool, SessionError> {
    match command {
        Command::Empty => {}
        Command::Help => println!("{}", render::HELP),
        Command::Modules => print!("{}", render::modules(session.curriculum())),
        Command::Status => println!("{}", render::status(session.state())),
        Command::Module(id) => select(session, id).await?,
        Command::Skip => {
            session.skip().await?;
            show(session);
        }
        Command::Retry => {
            session.retry_load().await?;
            show(session);
        }
        Command::Reset => {
            let reloads = session.state().pending_advance().is_some();
            session.reset_progress().await?;
            if reloads {
                show(session);
            }
            println!("{}", render::status(session.state()));
        }
        Command::Quit => return Ok(false),
        Command::Answer(raw) => answer(session, &raw).await?,
    }
    Ok(true)
}

/// Interactive loop over stdin until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error only when stdin cannot be read.
pub async fn run(
    mut session: TutorSession,
    start: Option<ModuleId>,
) -> Result<(), Box<dyn std::error::Error>> {
    say(&session);
    print!("{}", render::modules(session.curriculum()));
    println!("Type :help for commands.");

    if let Some(id) = start {
        if let Err(err) = select(&mut session, id).await {
            println!("{err}");
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match dispatch(&mut session, command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => println!("{err}"),
        }
    }

    println!("{}", render::status(session.state()));
    Ok(())
}
