//! Interactive Loop
//!
//! Reads one question per line and prints the advisor's reply. Exit words,
//! end of input and an interrupt all end the session with a farewell.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use coin_advisor::Advisor;
use coin_advisor::engine::BOT_NAME;

/// Lines that end the session (case-insensitive)
pub const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

const PROMPT: &str = "You: ";

pub fn is_exit_word(line: &str) -> bool {
    let line = line.trim();
    EXIT_WORDS.iter().any(|word| word.eq_ignore_ascii_case(line))
}

pub fn greeting() -> String {
    format!(
        "{BOT_NAME}: Hey there! I'm {BOT_NAME}, your crypto sidekick.\n\
         {BOT_NAME}: Ask me things like 'Which crypto is trending up?' or 'Most sustainable coin?'.\n"
    )
}

pub fn farewell() -> String {
    format!("{BOT_NAME}: Bye! Happy investing!")
}

/// Resolves on Ctrl-C; stays pending if the handler cannot be installed
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Why the session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    ExitWord,
    EndOfInput,
    Interrupted,
}

/// Run the conversation until the user leaves
///
/// `interrupt` is raced against every await in a turn (reading, answering,
/// pausing), so it ends the session wherever it fires.
pub async fn run<R, W, I>(
    advisor: &Advisor,
    input: R,
    mut output: W,
    turn_pause: Duration,
    interrupt: I,
) -> anyhow::Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);

    output.write_all(greeting().as_bytes()).await?;
    let mut lines = input.lines();

    let end = loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = &mut interrupt => break SessionEnd::Interrupted,
        };

        let Some(line) = line else {
            output.write_all(b"\n").await?;
            break SessionEnd::EndOfInput;
        };

        let query = line.trim();
        if is_exit_word(query) {
            break SessionEnd::ExitWord;
        }

        tracing::info!(query, "handling query");
        let reply = tokio::select! {
            reply = advisor.respond(query) => reply,
            () = &mut interrupt => break SessionEnd::Interrupted,
        };
        output.write_all(format!("{reply}\n\n").as_bytes()).await?;
        output.flush().await?;

        if !turn_pause.is_zero() {
            tokio::select! {
                () = tokio::time::sleep(turn_pause) => {}
                () = &mut interrupt => break SessionEnd::Interrupted,
            }
        }
    };

    if end == SessionEnd::Interrupted {
        output.write_all(b"\n").await?;
    }
    output.write_all(format!("{}\n", farewell()).as_bytes()).await?;
    output.flush().await?;
    tracing::debug!(?end, "session ended");
    Ok(end)
}
