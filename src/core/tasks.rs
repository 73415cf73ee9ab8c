// ToolFusion - core/tasks.rs
//
// Ordered to-do list with flat-file persistence.
//
// On-disk format: one task per line, a completion flag ('0' or '1'), a tab,
// then the task text. Lines without a recognised flag prefix are loaded as
// incomplete tasks so plain-text task files from older versions keep working.
// Save followed by load reproduces the same ordered {text, completed} list.

use crate::core::model::Task;
use crate::util::constants::{MAX_TASKS, MAX_TASK_TEXT_LEN};
use crate::util::error::TaskError;
use std::io::Write;
use std::path::Path;

/// The in-memory task list. All mutation happens on the UI thread in
/// response to discrete user actions; persistence is explicit.
#[derive(Debug, Default, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new incomplete task. Blank text is rejected; overlong text
    /// is truncated to the character cap. Returns false when nothing was
    /// added (blank text or the list is full).
    pub fn add(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.tasks.len() >= MAX_TASKS {
            return false;
        }
        let text: String = trimmed.chars().take(MAX_TASK_TEXT_LEN).collect();
        self.tasks.push(Task::new(text));
        true
    }

    /// Flip the completion flag of the task at `index`.
    /// Out-of-range indices are a no-op returning false.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove the task at `index`.
    /// Out-of-range indices are a no-op returning false.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.tasks.len() {
            self.tasks.remove(index);
            true
        } else {
            false
        }
    }

    /// Serialise the whole list to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), TaskError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| TaskError::Io {
                    path: path.to_path_buf(),
                    operation: "create directory for",
                    source: e,
                })?;
            }
        }

        let mut file = std::fs::File::create(path).map_err(|e| TaskError::Io {
            path: path.to_path_buf(),
            operation: "create",
            source: e,
        })?;

        for task in &self.tasks {
            let flag = if task.completed { '1' } else { '0' };
            writeln!(file, "{flag}\t{}", task.text).map_err(|e| TaskError::Io {
                path: path.to_path_buf(),
                operation: "write",
                source: e,
            })?;
        }

        tracing::info!(path = %path.display(), tasks = self.tasks.len(), "Tasks saved");
        Ok(())
    }

    /// Replace the in-memory list with the contents of `path`.
    ///
    /// The previous list is only discarded once the file has been read
    /// successfully, so a failed load leaves the current list intact.
    pub fn load(&mut self, path: &Path) -> Result<usize, TaskError> {
        if !path.exists() {
            return Err(TaskError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TaskError::Io {
            path: path.to_path_buf(),
            operation: "read",
            source: e,
        })?;

        let mut loaded: Vec<Task> = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if loaded.len() >= MAX_TASKS {
                return Err(TaskError::TooManyTasks {
                    count: content.lines().count(),
                    max: MAX_TASKS,
                });
            }
            loaded.push(parse_line(line));
        }

        let count = loaded.len();
        self.tasks = loaded;
        tracing::info!(path = %path.display(), tasks = count, "Tasks loaded");
        Ok(count)
    }
}

/// Parse one task line. `<flag>\t<text>` with flag '0'/'1' is the native
/// format; anything else is treated as legacy plain text (incomplete task).
fn parse_line(line: &str) -> Task {
    match line.split_once('\t') {
        Some(("0", text)) => Task {
            text: text.to_string(),
            completed: false,
        },
        Some(("1", text)) => Task {
            text: text.to_string(),
            completed: true,
        },
        _ => Task {
            text: line.trim().to_string(),
            completed: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_blank_text() {
        let mut list = TaskList::new();
        assert!(!list.add("   "));
        assert!(!list.add(""));
        assert!(list.is_empty());
    }

    #[test]
    fn add_trims_and_appends_incomplete() {
        let mut list = TaskList::new();
        assert!(list.add("  buy milk  "));
        assert_eq!(list.tasks()[0].text, "buy milk");
        assert!(!list.tasks()[0].completed);
    }

    #[test]
    fn toggle_flips_and_rejects_out_of_range() {
        let mut list = TaskList::new();
        list.add("a");
        assert!(list.toggle(0));
        assert!(list.tasks()[0].completed);
        assert!(list.toggle(0));
        assert!(!list.tasks()[0].completed);
        assert!(!list.toggle(1));
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut list = TaskList::new();
        list.add("a");
        list.add("b");
        list.add("c");
        assert!(list.remove(1));
        let texts: Vec<_> = list.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
        assert!(!list.remove(5));
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");

        let mut list = TaskList::new();
        list.add("first");
        list.add("second");
        list.add("third");
        list.toggle(1);
        list.save(&path).unwrap();

        let mut loaded = TaskList::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.tasks(), list.tasks());
    }

    #[test]
    fn legacy_plain_lines_load_as_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        std::fs::write(&path, "old task one\nold task two\n").unwrap();

        let mut list = TaskList::new();
        let count = list.load(&path).unwrap();
        assert_eq!(count, 2);
        assert!(list.tasks().iter().all(|t| !t.completed));
        assert_eq!(list.tasks()[0].text, "old task one");
    }

    #[test]
    fn load_missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = TaskList::new();
        list.add("kept");
        let result = list.load(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(TaskError::FileNotFound { .. })));
        // The in-memory list survives a failed load.
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn task_text_containing_tab_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");

        let mut list = TaskList::new();
        list.add("text\twith tab");
        list.save(&path).unwrap();

        let mut loaded = TaskList::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.tasks()[0].text, "text\twith tab");
    }
}
