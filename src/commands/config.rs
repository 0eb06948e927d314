//! `sitesearch config` command

use sitesearch_core::error::Result;

use super::dispatch::CommandContext;
use crate::cli::OutputFormat;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ctx.config)?),
        OutputFormat::Html => print!("{}", ctx.config.to_toml()?),
    }
    Ok(())
}
