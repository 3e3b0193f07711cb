use crate::model::{Category, Site};
use crate::scheduler::TaskId;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Invalid input for {category}: {input}")]
    InvalidInput { category: Category, input: String },
    #[error("inputs are locked until the cool-down ends")]
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editable,
    /// Submitted; waiting for the cool-down task
    Locked,
}

/// Per-plant entry form: one text input per category
pub struct EntryForm {
    site: Site,
    inputs: Vec<(Category, String)>,
    selected: usize,
    state: FormState,
    error: Option<String>,
    unlock_task: Option<TaskId>,
}

impl EntryForm {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            inputs: Category::ALL.iter().map(|&c| (c, String::new())).collect(),
            selected: 0,
            state: FormState::Editable,
            error: None,
            unlock_task: None,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == FormState::Locked
    }

    pub fn inputs(&self) -> &[(Category, String)] {
        &self.inputs
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Message from the last rejected submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn unlock_task(&self) -> Option<TaskId> {
        self.unlock_task
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.inputs.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.inputs.len() - 1) % self.inputs.len();
    }

    /// Append a character to the selected input (ignored while locked)
    pub fn push_char(&mut self, ch: char) {
        if self.is_locked() {
            return;
        }
        self.inputs[self.selected].1.push(ch);
    }

    pub fn backspace(&mut self) {
        if self.is_locked() {
            return;
        }
        self.inputs[self.selected].1.pop();
    }

    /// Replace the text of one input (ignored while locked)
    pub fn set_input(&mut self, category: Category, text: &str) {
        if self.is_locked() {
            return;
        }
        if let Some((_, value)) = self.inputs.iter_mut().find(|(c, _)| *c == category) {
            *value = text.to_string();
        }
    }

    /// Parse every input. All must be non-negative integers, otherwise nothing
    /// is submitted and the form stays editable. On success the form locks.
    pub fn submit(&mut self) -> Result<BTreeMap<Category, u32>, FormError> {
        if self.is_locked() {
            return Err(FormError::Locked);
        }

        let mut values = BTreeMap::new();
        for (category, text) in &self.inputs {
            match text.trim().parse::<u32>() {
                Ok(v) => {
                    values.insert(*category, v);
                }
                Err(_) => {
                    let err = FormError::InvalidInput {
                        category: *category,
                        input: text.clone(),
                    };
                    self.error = Some(err.to_string());
                    return Err(err);
                }
            }
        }

        self.error = None;
        self.state = FormState::Locked;
        Ok(values)
    }

    /// Remember the task that will end the cool-down
    pub fn set_unlock_task(&mut self, task: TaskId) {
        self.unlock_task = Some(task);
    }

    /// End of cool-down: clear and re-enable every input
    pub fn unlock(&mut self) {
        for (_, value) in &mut self.inputs {
            value.clear();
        }
        self.state = FormState::Editable;
        self.unlock_task = None;
        self.selected = 0;
    }
}
