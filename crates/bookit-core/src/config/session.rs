//! Session agent configuration.

use serde::{Deserialize, Serialize};

/// Settings for the headless session agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Identity the agent signs in as. May also come from `BOOKIT_USER`.
    #[serde(default)]
    pub user_id: Option<String>,
}
