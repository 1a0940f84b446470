mod cmd;

use clap::Parser;
use cmd::config::{DocArgs, Effective};

#[derive(Parser)]
#[command(
    name = "dbdoc",
    version,
    about = "Generate documentation from a database catalog snapshot"
)]
struct Cli {
    #[command(flatten)]
    args: DocArgs,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::generate::run(&eff) {
        eprintln!("Error: {e}");
        if eff.debug {
            eprintln!("{e:?}");
        }
        std::process::exit(1);
    }
}
