use crate::CLAP_STYLING;
use clap::arg;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("pagepulse")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("pagepulse")
        .styles(CLAP_STYLING)
        .about("Repeated page-performance measurements with stable min/mean/max summaries")
        .after_help(
            "Examples:\n  \
             pagepulse https://example.com/ https://example.org/\n  \
             pagepulse https://example.com/ -c 10 -d desktop\n  \
             pagepulse index https://example.com/",
        )
        .arg(arg!([TARGETS] ... "URLs to measure, or 'index <seed>' to discover URLs on a site"))
        .arg(
            arg!(-c --"count" <COUNT>)
                .required(false)
                .help("Number of measurement iterations per URL")
                .value_parser(clap::value_parser!(usize))
                .default_value("5"),
        )
        .arg(
            arg!(-d --"device" <DEVICE>)
                .required(false)
                .help("Device strategy forwarded to the scoring service")
                .value_parser(["mobile", "desktop"])
                .default_value("mobile"),
        )
        .arg(
            arg!(--"hash" <HASH>)
                .required(false)
                .help("Run identifier written to the batch log header"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Batch log appended to when running under CI")
                .default_value("psi.txt"),
        )
        .arg(
            arg!(--"api-key" <KEY>)
                .required(false)
                .help("Scoring API key (falls back to PAGEPULSE_API_KEY)"),
        )
        .arg(
            arg!(--"retries" <N>)
                .required(false)
                .help("Retry ceiling per measurement iteration")
                .value_parser(clap::value_parser!(u32))
                .default_value("30"),
        )
        .arg(
            arg!(--"backoff" <SECONDS>)
                .required(false)
                .help("Pause between retries")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-URL collection timeout (unbounded when omitted)")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"max-pages" <N>)
                .required(false)
                .help("Page cap for discovery mode")
                .value_parser(clap::value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            arg!(--"liveness-concurrency" <N>)
                .required(false)
                .help("Concurrent liveness checks in discovery mode")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(arg!(--"debug" "Print every raw performance sample").action(clap::ArgAction::SetTrue))
        .arg(
            arg!(-q --"quiet" "Suppress the spinner and non-essential output")
                .action(clap::ArgAction::SetTrue),
        )
}
