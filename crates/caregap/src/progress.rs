//! Terminal progress bars for long scans and inserts.

use indicatif::{ProgressBar, ProgressStyle};

/// A bar over `len` items, or a hidden one when progress is disabled.
pub(crate) fn bar(len: u64, visible: bool, unit: &str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    let template = format!(
        "  {{msg:<24}} {{bar:40.cyan/blue}} {{pos}}/{{len}} {unit} [{{elapsed_precise}}]"
    );
    if let Ok(style) = ProgressStyle::with_template(&template) {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}
