use std::process;

use crossterm::style::Stylize;

/// Print error message and exit with error code
pub fn exit_with_error(message: &str, code: i32) -> ! {
    eprintln!("{} {}", "[Error]:".red(), message);
    process::exit(code);
}

/// Validate probe loop parameters
pub fn validate_probe_params(timeout: u64, count: Option<u64>) -> anyhow::Result<()> {
    if timeout == 0 {
        return Err(anyhow::anyhow!("timeout must be greater than 0"));
    }

    if count == Some(0) {
        return Err(anyhow::anyhow!("count must be greater than 0"));
    }

    Ok(())
}

/// Format time duration for display
pub fn format_time(ms: u64) -> String {
    if ms < 1 {
        "<1ms".to_string()
    } else {
        format!("{}ms", ms)
    }
}

/// Handle Ctrl+C signal for graceful shutdown
pub fn setup_signal_handler() -> tokio::sync::oneshot::Receiver<()> {
    let (tx, rx) = tokio::sync::oneshot::channel();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(());
        }
    });

    rx
}
