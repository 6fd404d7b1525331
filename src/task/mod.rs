//! Task module - the fixed task catalog and submission verification.

pub mod catalog;
mod verification;

pub use catalog::{rubric_for, task_by_number, Task, DEFAULT_RUBRIC, TASKS};
pub use verification::{
    build_prompt, SubmittedFiles, Verdict, VerificationError, VerificationRequest,
    VerificationResult, Verifier, AI_FALLBACK_FEEDBACK, INDEX_HTML, STYLE_CSS,
    STYLE_CSS_PLACEHOLDER, SUCCESS_MESSAGE,
};
