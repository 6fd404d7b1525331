//! Submission client: task board, `/submit` HTTP client and the terminal
//! session driving them.

mod board;
mod http;

pub use board::{BoardError, SubmissionBoard, TaskRow};
pub use http::{SubmitClient, SubmitError, DEFAULT_SERVER_URL};

use crate::task::VerificationResult;

/// A command typed into the terminal client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    /// Open the submission for a task number
    Submit(u32),
    /// Submit a link for the open task
    Link(String),
    Cancel,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "submit" | "open" => rest
                .parse()
                .map(Command::Submit)
                .map_err(|_| format!("Usage: submit <task number> (got '{}')", rest)),
            "link" => Ok(Command::Link(rest.to_string())),
            "cancel" => Ok(Command::Cancel),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("Type 'help' for a list of commands.".to_string()),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

/// What the user is told after a submission attempt went out.
#[derive(Debug)]
pub enum Notice {
    Success(VerificationResult),
    Failure(SubmitError),
}

impl Notice {
    pub fn headline(&self) -> &'static str {
        match self {
            Notice::Success(_) => "Submission successful!",
            Notice::Failure(_) => "Error submitting the task.",
        }
    }
}

/// Submit `raw_link` for the open task.
///
/// Validation errors leave the selection open and send nothing. Once a
/// request has gone out the selection is closed whatever the outcome.
pub async fn submit_current(
    board: &mut SubmissionBoard,
    client: &SubmitClient,
    raw_link: &str,
) -> Result<Notice, BoardError> {
    let request = board.prepare_submission(raw_link)?;

    tracing::debug!(
        "Submitting task {:?} link {:?}",
        request.task_number,
        request.submission_link
    );

    let notice = match client.submit(&request).await {
        Ok(result) => Notice::Success(result),
        Err(e) => {
            tracing::warn!("Submission failed: {}", e);
            Notice::Failure(e)
        }
    };

    board.close();
    Ok(notice)
}
