//! Structured console logging for the provisioning workflows.
//!
//! Tagged, colorized, timestamped output on stdout. Errors are always shown;
//! debug output is gated by `--verbose`.
//!
//! ```ignore
//! logger::log(LogTag::Deploy, "TX", "Initialize confirmed: ...");
//! logger::error(LogTag::System, "Provisioning failed: ...");
//! ```

use chrono::Local;
use colored::Colorize;
use once_cell::sync::OnceCell;

/// Log format width for tag alignment
const TAG_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Config,
    Wallet,
    Deploy,
    Fork,
    Rpc,
}

impl LogTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Wallet => "WALLET",
            LogTag::Deploy => "DEPLOY",
            LogTag::Fork => "FORK",
            LogTag::Rpc => "RPC",
        }
    }
}

static VERBOSE: OnceCell<bool> = OnceCell::new();

/// Initialize the logger once at startup, before any logging occurs.
pub fn init(verbose: bool) {
    VERBOSE.set(verbose).ok();
}

fn is_verbose() -> bool {
    *VERBOSE.get().unwrap_or(&false)
}

/// Log a tagged message with a short kind marker (e.g. "TX", "VERIFY").
pub fn log(tag: LogTag, kind: &str, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();
    let tag_str = format!("{:<width$}", tag.as_str(), width = TAG_WIDTH);
    let kind_str = match kind {
        "ERROR" => kind.red().bold().to_string(),
        "WARNING" => kind.yellow().to_string(),
        "SUCCESS" => kind.green().to_string(),
        _ => kind.white().to_string(),
    };
    println!("{} [{}] [{}] {}", time.dimmed(), tag_str.cyan(), kind_str, message);
}

/// Log at ERROR level (always shown).
pub fn error(tag: LogTag, message: &str) {
    log(tag, "ERROR", message);
}

/// Log at INFO level.
pub fn info(tag: LogTag, message: &str) {
    log(tag, "INFO", message);
}

/// Log at DEBUG level (only shown with `--verbose`).
pub fn debug(tag: LogTag, message: &str) {
    if is_verbose() {
        log(tag, "DEBUG", message);
    }
}
