use args::{Args, Command};
use clap::Parser;
use config::Config;

mod args;
mod commands;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(&args);

    let config = Config::load(&args.config)?;
    let client = coach::Client::new(&config.api)?;

    match args.command {
        Command::Sparks(cmd) => commands::sparks::run(&client, cmd).await,
        Command::Train(cmd) => commands::train::run(&client, cmd).await,
        Command::Tip(cmd) => commands::daily::tip(&client, cmd).await,
        Command::Topics(cmd) => commands::daily::topics(&client, cmd).await,
        Command::Personas => {
            commands::personas::run();
            Ok(())
        }
    }
}
