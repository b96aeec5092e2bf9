use clap::{Arg, Command};

pub const DEFAULT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeArgs {
    pub host: String,
    pub timeout: u64,
    pub interval: u64,
    pub count: Option<u64>,
}

pub fn build_cli() -> Command {
    Command::new("echoprobe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Send ICMP echo requests to an IPv4 host, one at a time, until stopped")
        .arg(
            Arg::new("host")
                .help("Target IPv4 address in dotted-quad form")
                .required(true)
                .index(1)
        )
        .arg(
            Arg::new("timeout")
                .help("Timeout in milliseconds to wait for each reply")
                .required(true)
                .index(2)
                .value_parser(clap::value_parser!(u64))
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .help("Delay in milliseconds between probes")
                .value_name("ms")
                .value_parser(clap::value_parser!(u64))
        )
        .arg(
            Arg::new("count")
                .short('c')
                .long("count")
                .help("Stop after this many probes (default: run until stopped)")
                .value_name("count")
                .value_parser(clap::value_parser!(u64))
        )
}

pub fn parse_args() -> anyhow::Result<ProbeArgs> {
    parse_from(std::env::args_os())
}

pub fn parse_from<I, T>(args: I) -> anyhow::Result<ProbeArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(args)?;

    let host = matches
        .get_one::<String>("host")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("missing host"))?;
    let timeout = *matches
        .get_one::<u64>("timeout")
        .ok_or_else(|| anyhow::anyhow!("missing timeout"))?;

    Ok(ProbeArgs {
        host,
        timeout,
        interval: matches.get_one::<u64>("interval").copied().unwrap_or(DEFAULT_INTERVAL_MS),
        count: matches.get_one::<u64>("count").copied(),
    })
}
