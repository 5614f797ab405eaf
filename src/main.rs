use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use crate::{
  app::App,
  cli::Cli,
  config::Config,
  utils::{initialize_logging, initialize_panic_handler, version},
};

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod composition;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod items;
pub mod loaders;
pub mod mode;
pub mod services;
pub mod tui;
pub mod utils;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let args = Cli::parse();
  let mut config = Config::new()?;
  if args.offline {
    config.network.offline = true;
  }
  if args.free {
    config.user.premium = false;
  }
  info!("{}", version());

  let mut app = App::new(&config, args.tick_rate, args.frame_rate)?;
  app.run().await?;

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
