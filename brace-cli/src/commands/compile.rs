//! `brace compile`: show the compiled parts list of a template.

use anyhow::{Context, Result};
use clap::Args;

use brace_core::{compile_with, Config};

use super::TemplateSource;

/// Arguments for `brace compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub source: TemplateSource,

    /// Print the concatenation-program view and field list instead of JSON.
    #[arg(long)]
    pub program: bool,
}

impl CompileArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let template = self.source.read()?;
        let renderer =
            compile_with(&template, &config.options).context("template failed to compile")?;

        if self.program {
            println!("{}", renderer.program());
            println!("fields: {}", renderer.fields().join(", "));
            return Ok(());
        }

        println!(
            "{}",
            serde_json::to_string_pretty(&renderer).context("failed to serialize renderer")?
        );
        Ok(())
    }
}
