pub mod browse;
pub mod config;
pub mod prompts;
pub mod search;
pub mod show;
pub mod watched;

use crate::output::{Output, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a remote fetch is in flight. Hidden outside
/// interactive human output.
pub fn fetch_spinner(output: &Output, msg: &str) -> ProgressBar {
    if output.format() != OutputFormat::Human || output.is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid spinner template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
