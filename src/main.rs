mod cli;
mod render;
mod utils;

use echoprobe::{probe, ProbeOutcome};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    // Enable debug logging if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    }

    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => match e.downcast_ref::<clap::Error>() {
            Some(clap_err) => clap_err.exit(),
            None => utils::exit_with_error(&format!("argument error: {}", e), 1),
        },
    };

    if let Err(e) = utils::validate_probe_params(args.timeout, args.count) {
        utils::exit_with_error(&e.to_string(), 1);
    }

    println!("{}", render::format_header(&args.host, args.timeout, args.interval));

    let mut shutdown_signal = utils::setup_signal_handler();
    let mut sent = 0u64;

    loop {
        if shutdown_signal.try_recv().is_ok() {
            break;
        }

        // The probe blocks on the socket, so keep it off the runtime threads.
        let host = args.host.clone();
        let timeout = args.timeout;
        let result = match tokio::task::spawn_blocking(move || probe(&host, timeout)).await {
            Ok(result) => result,
            Err(e) => utils::exit_with_error(&format!("probe task failed: {}", e), 1),
        };
        sent += 1;

        match result {
            Ok(outcome) => {
                if outcome == ProbeOutcome::Timeout {
                    log::debug!("probe {} timed out after {}ms", sent, args.timeout);
                }
                println!("{}", render::format_outcome(&args.host, args.timeout, &outcome));
            }
            Err(e) => {
                log::debug!("probe failed: {:?}", e);
                utils::exit_with_error(&render::format_failure(&args.host, &e), 1);
            }
        }

        if args.count.is_some_and(|count| sent >= count) {
            break;
        }

        sleep(Duration::from_millis(args.interval)).await;
    }
}
