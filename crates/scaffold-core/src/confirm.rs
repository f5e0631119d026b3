//! Overwrite confirmation.

use std::io::{self, BufRead, Write};
use tokio::task;

/// Asks whether an existing target may be replaced.
///
/// Injected into each command so orchestrators can swap the interactive prompt
/// for a fixed answer (`--force`, dry runs, tests).
#[async_trait::async_trait]
pub trait OverwriteConfirmer: Send + Sync {
    /// Present `message` and wait for a yes/no answer. No timeout.
    async fn confirm(&self, message: &str) -> io::Result<bool>;
}

/// Answers every prompt the same way without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoConfirm {
    /// Always overwrite (after backing up).
    Accept,
    /// Never overwrite.
    Decline,
}

#[async_trait::async_trait]
impl OverwriteConfirmer for AutoConfirm {
    async fn confirm(&self, _message: &str) -> io::Result<bool> {
        Ok(*self == Self::Accept)
    }
}

/// Prompts on stdout and reads the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirmer;

#[async_trait::async_trait]
impl OverwriteConfirmer for StdinConfirmer {
    async fn confirm(&self, message: &str) -> io::Result<bool> {
        let message = message.to_string();
        task::spawn_blocking(move || {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{message}")?;
            stdout.flush()?;

            let mut input = String::new();
            io::stdin().lock().read_line(&mut input)?;
            Ok(is_affirmative(&input))
        })
        .await
        .map_err(io::Error::other)?
    }
}

/// Whether a typed answer means yes.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    ["y", "yes", "ok", "true"]
        .iter()
        .any(|yes| answer.eq_ignore_ascii_case(yes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        for answer in ["y", "Y\n", " yes ", "OK", "true\r\n"] {
            assert!(is_affirmative(answer), "{answer:?} should confirm");
        }
    }

    #[test]
    fn everything_else_declines() {
        for answer in ["", "\n", "n", "no", "yep", "y e s"] {
            assert!(!is_affirmative(answer), "{answer:?} should decline");
        }
    }

    #[tokio::test]
    async fn auto_confirm_answers_fixed() {
        assert!(AutoConfirm::Accept.confirm("override?: ").await.unwrap());
        assert!(!AutoConfirm::Decline.confirm("override?: ").await.unwrap());
    }
}
