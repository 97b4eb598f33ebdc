//! Report threshold configuration.

use serde::{Deserialize, Serialize};

/// History shorter than this triggers the "collect more data" recommendation.
const fn default_min_history_days() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_min_history_days")]
    pub min_history_days: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_history_days: default_min_history_days(),
        }
    }
}
