use crate::model::{Item, Priority};

/// Minimum length for name and description, counted in characters on the
/// value as submitted (no trimming).
pub const MIN_FIELD_LEN: usize = 3;

pub const VALIDATION_MSG: &str = "name and description must each be at least 3 characters";

/// In-progress field values for a create or edit flow. `edit_target` is set
/// while editing an existing item and absent while creating.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub edit_target: Option<u64>,
    /// Result of the last `validate` call. Drives the validation message in
    /// the view; never blocks further edits to the fields.
    pub is_valid: bool,
}

impl Default for Form {
    fn default() -> Self {
        // A form that was never submitted shows no validation message.
        Self {
            name: String::new(),
            description: String::new(),
            priority: Priority::Low,
            edit_target: None,
            is_valid: true,
        }
    }
}

impl Form {
    pub fn validate(&mut self) -> bool {
        self.is_valid = self.name.chars().count() >= MIN_FIELD_LEN
            && self.description.chars().count() >= MIN_FIELD_LEN;
        self.is_valid
    }

    /// Back to defaults after a successful commit or an explicit cancel.
    /// `is_valid` is owned by `validate` and left as-is.
    pub fn reset(&mut self) {
        self.name.clear();
        self.description.clear();
        self.priority = Priority::Low;
        self.edit_target = None;
    }

    /// Pre-populate the fields from an existing item for an edit flow.
    pub fn begin_edit(&mut self, item: &Item) {
        self.name = item.name.clone();
        self.description = item.description.clone();
        self.priority = item.priority;
        self.edit_target = Some(item.id);
    }
}
