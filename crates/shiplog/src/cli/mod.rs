//! CLI definition and command handling

pub mod commands;

use anyhow::bail;
use clap::{Parser, Subcommand};

use commands::{GenerateCommand, TagsCommand};

/// Shiplog - GitHub changelog generator
#[derive(Debug, Parser)]
#[command(name = "shiplog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a changelog for a compare range
    Generate(GenerateCommand),

    /// List releases and tags with a suggested ref pair
    Tags(TagsCommand),
}

impl Cli {
    /// Dispatch to the selected command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.execute(self).await,
            Commands::Tags(cmd) => cmd.execute(self).await,
        }
    }
}

/// Split an `owner/repo` argument into its two parts
pub fn parse_repo(repo: &str) -> anyhow::Result<(String, String)> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => bail!("expected OWNER/REPO, got {:?}", repo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        assert_eq!(
            parse_repo("acme/widgets").unwrap(),
            ("acme".to_string(), "widgets".to_string())
        );
        assert!(parse_repo("no-slash").is_err());
        assert!(parse_repo("too/many/parts").is_err());
        assert!(parse_repo("/repo").is_err());
        assert!(parse_repo("owner/").is_err());
    }
}
