use serde::{Deserialize, Serialize};

/// Include/redirect expansion settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExpansionConfig {
    /// Maximum number of extra expansion rounds (default: 5)
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> u32 {
    5
}
