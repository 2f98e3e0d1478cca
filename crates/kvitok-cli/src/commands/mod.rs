//! CLI subcommands.

pub mod config;
pub mod email;
pub mod process;

use indicatif::{ProgressBar, ProgressStyle};
use kvitok_core::KvitokConfig;

/// Load configuration from an explicit path, or fall back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<KvitokConfig> {
    match path {
        Some(p) => Ok(KvitokConfig::from_file(std::path::Path::new(p))?),
        None => Ok(KvitokConfig::default()),
    }
}

/// Standard 0-100 progress bar driven by pipeline callbacks.
pub fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb
}
