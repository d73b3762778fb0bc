mod args;
mod cmd;

use crate::args::{Args, Command};
use clap::Parser;
use postcache::config::Config;
use postcache::{PostCache, Result};
use std::io;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cwd = args.cwd()?;
    let config = Config::load(args.config_path()?)?;
    log::debug!("{:?}", args);
    log::debug!("{:?}", config);

    let cache = PostCache::new(config.post_path(&cwd))?;

    match args.command {
        Command::List => cmd::list(&cache, io::stdout().lock()),
        Command::Show { id } => cmd::show(&cache, id, io::stdout().lock()),
        Command::Watch => cmd::watch(&cache, config.debounce()),
    }
}
