//! Confirmation prompting seam.
//!
//! Quest acceptance and the quit flow block on a yes/no answer that the
//! engine cannot produce itself; the presentation layer supplies it
//! through this trait.

use std::collections::VecDeque;

/// A synchronous yes/no prompt. The call blocks the current action until
/// the player answers.
pub trait ConfirmPrompt {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Queue-driven prompt for tests and headless runs: pops pre-loaded
/// answers in order and falls back to a default once the queue is empty.
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    default: bool,
}

impl ScriptedPrompt {
    pub fn new(default: bool) -> Self {
        Self {
            answers: VecDeque::new(),
            default,
        }
    }

    pub fn push(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    pub fn with_answers(answers: &[bool], default: bool) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            default,
        }
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        self.answers.pop_front().unwrap_or(self.default)
    }
}
