use pagepulse::handlers::{handle_index, handle_measure};

mod commands;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = commands::command_argument_builder();
    let matches = cmd.get_matches();

    let targets: Vec<String> = matches
        .get_many::<String>("TARGETS")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if targets.is_empty() {
        let mut help = commands::command_argument_builder();
        help.print_help().ok();
        return;
    }

    // A first target of "index" switches to discovery mode; everything else
    // is a URL to measure.
    let outcome = if targets[0] == "index" {
        match targets.get(1) {
            Some(seed) => handle_index(&matches, seed).await,
            None => Err(anyhow::anyhow!(
                "discovery mode needs a seed URL: pagepulse index <url>"
            )),
        }
    } else {
        handle_measure(&matches, &targets).await
    };

    if let Err(e) = outcome {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
