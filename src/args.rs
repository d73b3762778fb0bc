use clap::{Parser, Subcommand};
use postcache::{Error, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    #[clap(short, long)]
    cwd: Option<String>,

    /// Config file, relative to the working directory
    #[clap(long, default_value = "config.toml")]
    pub config: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the id and title of every post
    List,
    /// Print the body of a single post
    Show { id: usize },
    /// Keep the cache warm, refreshing as the post directory changes
    Watch,
}

impl Args {
    pub fn cwd(&self) -> Result<PathBuf> {
        let path = self.cwd.as_ref();

        if let Some(path) = path {
            Ok(PathBuf::from(path.as_str()))
        } else {
            env::current_dir().map_err(Error::Io)
        }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        Ok(self.cwd()?.join(self.config.as_str()))
    }
}
