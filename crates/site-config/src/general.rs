//! General application configuration.

use serde::{Deserialize, Serialize};

/// People who log issues on site. The entry form only offers these names.
fn default_loggers() -> Vec<String> {
    vec![
        String::from("Shaheer Syed"),
        String::from("Site Supervisor"),
        String::from("Safety Officer"),
    ]
}

const fn default_newest_first() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Known logger names.
    #[serde(default = "default_loggers")]
    pub loggers: Vec<String>,

    /// Whether issue listings sort newest first by default.
    #[serde(default = "default_newest_first")]
    pub newest_first: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            loggers: default_loggers(),
            newest_first: default_newest_first(),
        }
    }
}
