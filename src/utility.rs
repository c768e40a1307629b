use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

/// Progress bar for jobs that run long enough to be worth an ETA. Hidden bars
/// swallow all updates.
pub fn get_progressbar(job_name: &str, len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Installs the log subscriber of the binaries. Honors `RUST_LOG` and falls
/// back to `info`. Logs go to stderr, stdout is reserved for results.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
