use clap::Args;
use serde::{Deserialize, Serialize};

/// Markers and scoring constants shared by training and decoding.
#[derive(Debug, Clone, PartialEq, Args, Serialize, Deserialize)]
#[serde(default)]
pub struct HmmConfig {
    /// pseudo tag standing for the position before the first word
    #[arg(long, default_value = "#")]
    pub start_tag: String,
    /// tag that is never recorded or decoded as a transition destination
    #[arg(long, default_value = ".")]
    pub terminator: String,
    /// score used when a tag has no emission recorded for a word
    #[arg(long, default_value_t = -100.0, allow_negative_numbers = true)]
    pub unseen_penalty: f64,
}

impl Default for HmmConfig {
    fn default() -> Self {
        Self {
            start_tag: "#".to_string(),
            terminator: ".".to_string(),
            unseen_penalty: -100.0,
        }
    }
}
