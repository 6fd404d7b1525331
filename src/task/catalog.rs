//! The fixed task catalog and the grading rubric for each task.

/// A named task a submission can be made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    /// 1-based task number, as sent on the wire
    pub number: u32,
    pub name: &'static str,
}

/// Every task, in display order.
pub static TASKS: [Task; 7] = [
    Task { number: 1, name: "Hello World" },
    Task { number: 2, name: "HTML Practice" },
    Task { number: 3, name: "Style a page with Tailwind" },
    Task { number: 4, name: "Implement Authentication" },
    Task { number: 5, name: "Connect to a Database" },
    Task { number: 6, name: "Optimize Performance" },
    Task { number: 7, name: "Deploy the Application" },
];

/// Rubric used for task numbers without a dedicated one.
pub const DEFAULT_RUBRIC: &str =
    "Analyze the submitted HTML and CSS for correctness and best practices.";

/// Look up a task by its 1-based number.
pub fn task_by_number(number: u32) -> Option<&'static Task> {
    TASKS.iter().find(|t| t.number == number)
}

/// What "correct" means for `task_number`. Defined for every number.
pub fn rubric_for(task_number: u32) -> &'static str {
    match task_number {
        1 => "Ensure index.html prints 'Hello World'.",
        2 => "Check for proper HTML structure and semantic elements.",
        3 => "Validate if Tailwind classes are correctly applied.",
        4 => "Check if authentication is properly implemented.",
        _ => DEFAULT_RUBRIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_numbered_from_one() {
        for (i, task) in TASKS.iter().enumerate() {
            assert_eq!(task.number as usize, i + 1);
        }
        assert_eq!(task_by_number(1).map(|t| t.name), Some("Hello World"));
        assert_eq!(task_by_number(0), None);
        assert_eq!(task_by_number(8), None);
    }

    #[test]
    fn rubric_falls_back_to_default() {
        assert_eq!(rubric_for(1), "Ensure index.html prints 'Hello World'.");
        assert_eq!(rubric_for(4), "Check if authentication is properly implemented.");
        // Tasks 5-7 exist but have no dedicated rubric.
        assert_eq!(rubric_for(5), DEFAULT_RUBRIC);
        assert_eq!(rubric_for(0), DEFAULT_RUBRIC);
        assert_eq!(rubric_for(u32::MAX), DEFAULT_RUBRIC);
    }
}
