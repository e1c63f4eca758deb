use clap::Parser;

use changelog_hub::{
    Result,
    cli::{Args, Command},
    command,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("changelog_hub")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = cli_args.resolve_config()?;

    match cli_args.command {
        Command::Publish => {
            command::publish::execute(config).await?;
        }
        Command::Show { out_file } => {
            command::show::execute(config, out_file).await?;
        }
    }

    Ok(())
}
