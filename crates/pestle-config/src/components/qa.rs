//! Question-answering settings.

use serde::{Deserialize, Serialize};

/// Query translator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QaConfig {
    /// Maximum rows a generated query may return; injected into the prompt
    /// rules.
    pub top_k: usize,
    /// Print the generated query alongside the answer.
    pub show_query: bool,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            show_query: false,
        }
    }
}
