use crate::error::{GhstatsError, Result};
use crate::forge::github::DEFAULT_API_URL;
use anyhow::Result as AnyResult;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghstats")]
#[command(about = "Yearly contribution reports and an avatar mosaic for a GitHub repository")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub access token")]
    pub token: String,

    #[arg(long, default_value = "galaxyproject", help = "Repository owner")]
    pub owner: String,

    #[arg(long, default_value = "tools-iuc", help = "Repository name")]
    pub repo: String,

    #[arg(long, default_value = DEFAULT_API_URL, help = "GitHub API base URL")]
    pub api_url: String,

    #[arg(long, default_value = ".", help = "Directory receiving data/ and images/")]
    pub out_dir: PathBuf,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(GhstatsError::Config("GitHub token is empty".to_string()));
        }
        if self.owner.is_empty() || self.repo.is_empty() {
            return Err(GhstatsError::Config("Repository owner and name are required".to_string()));
        }
        Ok(())
    }
}

#[derive(Args, Clone, Debug)]
pub struct TreeArgs {
    #[arg(long, default_value = "tools", help = "Directory holding one entry per tool")]
    pub tools_dir: String,

    #[arg(long, default_value = "data_managers", help = "Directory holding one entry per data manager")]
    pub data_managers_dir: String,
}

#[derive(Args, Clone, Debug)]
pub struct MosaicArgs {
    #[arg(long, default_value_t = 1200, value_parser = clap::value_parser!(u32).range(1..), help = "Mosaic width in pixels")]
    pub width: u32,

    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..), help = "Mosaic height in pixels")]
    pub height: u32,

    #[arg(long, help = "Seed for tile placement (random when omitted)")]
    pub seed: Option<u64>,
}

impl MosaicArgs {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GhstatsError::Config(format!(
                "Mosaic size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Commits, pull requests and issues per contribution year
    Contributions {
        #[arg(long, help = "Also print the report as JSON")]
        json: bool,
    },
    /// Tools, wrappers and data managers added and changed per contribution year
    Changes {
        #[arg(long, help = "Also print the report as JSON")]
        json: bool,

        #[clap(flatten)]
        tree: TreeArgs,
    },
    /// Mosaic of contributor avatars
    Avatars {
        #[clap(flatten)]
        mosaic: MosaicArgs,
    },
    /// Every report and the mosaic, written only once all of them succeed
    All {
        #[clap(flatten)]
        tree: TreeArgs,

        #[clap(flatten)]
        mosaic: MosaicArgs,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> AnyResult<()> {
        match self.command {
            Commands::Contributions { json } => crate::contrib::exec(self.common, json),
            Commands::Changes { json, tree } => crate::changes::exec(self.common, tree, json),
            Commands::Avatars { mosaic } => crate::avatar::exec(self.common, mosaic),
            Commands::All { tree, mosaic } => crate::all::exec(self.common, tree, mosaic),
        }
    }
}
