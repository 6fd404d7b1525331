//! In-memory submission board: one optional link per task plus the task
//! currently being edited.

use crate::task::{Task, VerificationRequest, TASKS};

/// Client-side validation failures. Nothing is sent when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Error: Task index is not set.")]
    NoTaskSelected,

    #[error("Please enter a valid link!")]
    EmptyLink,

    #[error("There is no task {0}.")]
    UnknownTask(u32),
}

/// One displayed row: the task and its recorded link, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub task: &'static Task,
    /// `None` shows a "Submit" action, `Some` a "View Submission" link
    pub link: Option<&'a str>,
}

/// Links recorded so far, indexed like [`TASKS`].
#[derive(Debug, Clone)]
pub struct SubmissionBoard {
    links: Vec<Option<String>>,
    current: Option<usize>,
}

impl Default for SubmissionBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionBoard {
    pub fn new() -> Self {
        Self {
            links: vec![None; TASKS.len()],
            current: None,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = TaskRow<'_>> {
        TASKS.iter().zip(&self.links).map(|(task, link)| TaskRow {
            task,
            link: link.as_deref(),
        })
    }

    /// Start editing the submission for task `number`.
    pub fn open(&mut self, number: u32) -> Result<&'static Task, BoardError> {
        let index = TASKS
            .iter()
            .position(|t| t.number == number)
            .ok_or(BoardError::UnknownTask(number))?;
        self.current = Some(index);
        Ok(&TASKS[index])
    }

    /// Stop editing without submitting.
    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current_task(&self) -> Option<&'static Task> {
        self.current.map(|index| &TASKS[index])
    }

    pub fn link_for(&self, number: u32) -> Option<&str> {
        let index = TASKS.iter().position(|t| t.number == number)?;
        self.links[index].as_deref()
    }

    /// Validate `raw_link` for the selected task, record it, and build the request.
    ///
    /// The link is stored before anything is sent, so it stays recorded even
    /// if the server later rejects it. A resubmission overwrites it.
    pub fn prepare_submission(&mut self, raw_link: &str) -> Result<VerificationRequest, BoardError> {
        let index = self.current.ok_or(BoardError::NoTaskSelected)?;
        let link = raw_link.trim();
        if link.is_empty() {
            return Err(BoardError::EmptyLink);
        }

        self.links[index] = Some(link.to_string());
        let task = &TASKS[index];

        Ok(VerificationRequest {
            task_number: Some(task.number),
            task_name: Some(task.name.to_string()),
            submission_link: Some(link.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_has_no_links() {
        let board = SubmissionBoard::new();
        assert_eq!(board.rows().count(), TASKS.len());
        assert!(board.rows().all(|row| row.link.is_none()));
        assert_eq!(board.current_task(), None);
    }

    #[test]
    fn submit_without_selection_is_refused() {
        let mut board = SubmissionBoard::new();
        assert_eq!(
            board.prepare_submission("https://github.com/alice/site"),
            Err(BoardError::NoTaskSelected)
        );
        assert!(board.rows().all(|row| row.link.is_none()));
    }

    #[test]
    fn blank_link_is_refused_and_selection_kept() {
        let mut board = SubmissionBoard::new();
        board.open(2).unwrap();
        assert_eq!(board.prepare_submission("   "), Err(BoardError::EmptyLink));
        assert_eq!(board.current_task().map(|t| t.number), Some(2));
        assert_eq!(board.link_for(2), None);
    }

    #[test]
    fn unknown_task_cannot_be_opened() {
        let mut board = SubmissionBoard::new();
        assert_eq!(board.open(0), Err(BoardError::UnknownTask(0)));
        assert_eq!(board.open(8), Err(BoardError::UnknownTask(8)));
        assert_eq!(board.current_task(), None);
    }

    #[test]
    fn prepared_submission_records_trimmed_link() {
        let mut board = SubmissionBoard::new();
        board.open(1).unwrap();

        let request = board
            .prepare_submission("  https://github.com/alice/site \n")
            .unwrap();

        assert_eq!(request.task_number, Some(1));
        assert_eq!(request.task_name.as_deref(), Some("Hello World"));
        assert_eq!(
            request.submission_link.as_deref(),
            Some("https://github.com/alice/site")
        );
        assert_eq!(board.link_for(1), Some("https://github.com/alice/site"));
    }

    #[test]
    fn resubmission_overwrites() {
        let mut board = SubmissionBoard::new();
        board.open(3).unwrap();
        board.prepare_submission("https://github.com/alice/v1").unwrap();
        board.open(3).unwrap();
        board.prepare_submission("https://github.com/alice/v2").unwrap();
        assert_eq!(board.link_for(3), Some("https://github.com/alice/v2"));
    }
}
