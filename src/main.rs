use clap::Parser;

use glyphcast::cli::{self, Args, Command};
use glyphcast::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Render(render) => {
            let config = Config::load(args.config.as_deref())?;
            cli::render(&render, &config).await?;
        }
        Command::Formats => cli::list_formats(),
        Command::Config { action } => cli::handle_config_action(action, args.config.as_deref())?,
    }

    Ok(())
}
