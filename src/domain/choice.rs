use serde::{Deserialize, Serialize};

use super::choice_label::ChoiceLabel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: ChoiceLabel,
    pub text: String,
}

impl Choice {
    pub fn new(label: ChoiceLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}
