use clap::Parser;

use rigup::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use rigup::adapter::inbound::cli::output::{self, OutputConfig};
use rigup::adapter::inbound::cli::{check, config, provision};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let result = match &cli.command {
        Commands::Provision(args) => provision::execute(args).await,
        Commands::Check(args) => check::execute(args).await,
        Commands::Config(command) => match command {
            ConfigCommand::Init(args) => config::execute_init(&args.path, args.force),
            ConfigCommand::Show(args) => config::execute_show(&args.config),
            ConfigCommand::Validate(args) => config::execute_validate(&args.config),
        },
    };

    if let Err(err) = result {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}
