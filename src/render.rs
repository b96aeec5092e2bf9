use crossterm::style::Stylize;
use echoprobe::{ErrorKind, ProbeError, ProbeOutcome};

use crate::utils::format_time;

pub fn format_header(host: &str, timeout: u64, interval: u64) -> String {
    format!(
        "Probing {} with a {}ms reply timeout every {}ms:",
        host.cyan(),
        timeout,
        interval
    )
}

pub fn format_outcome(host: &str, timeout: u64, outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Success { elapsed_ms } => format!(
            "{} Reply from {}: timeout={}ms time={}",
            "[Success]:".green(),
            host,
            timeout,
            format_time(*elapsed_ms).green()
        ),
        ProbeOutcome::Timeout => format!("{} Timeout!", "[Warning]:".yellow()),
    }
}

pub fn format_failure(host: &str, err: &ProbeError) -> String {
    let hint = match err.kind() {
        ErrorKind::Input => "invalid input",
        ErrorKind::Resource => "cannot open a raw socket",
        ErrorKind::Transport => "network failure",
    };
    format!("Host {} is not available ({}): {}", host, hint, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_formatting() {
        let line = format_outcome("10.0.0.1", 500, &ProbeOutcome::Success { elapsed_ms: 12 });
        assert!(line.contains("[Success]:"));
        assert!(line.contains("Reply from 10.0.0.1"));
        assert!(line.contains("timeout=500ms"));
        assert!(line.contains("12ms"));
    }

    #[test]
    fn test_timeout_formatting() {
        let line = format_outcome("10.0.0.1", 500, &ProbeOutcome::Timeout);
        assert!(line.contains("[Warning]:"));
        assert!(line.contains("Timeout!"));
    }

    #[test]
    fn test_failure_formatting() {
        let line = format_failure("255.255.255.255", &ProbeError::BroadcastAddress);
        assert_eq!(
            line,
            "Host 255.255.255.255 is not available (invalid input): the IP address is broadcast"
        );
    }
}
