//! `brace check`: compile a batch of template files and report failures.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use brace_cache::RendererCache;
use brace_core::Config;

/// Arguments for `brace check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Template files to check.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl CheckArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        // Identical template bodies are compiled once.
        let cache = RendererCache::new(config.options);
        let mut failed = 0;

        for path in &self.files {
            let template = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            match cache.get_or_compile(&template) {
                Ok(renderer) => {
                    let fields = renderer.fields();
                    let detail = if fields.is_empty() {
                        "no fields".to_string()
                    } else {
                        format!("fields: {}", fields.join(", "))
                    };
                    println!("{} {} ({detail})", "OK ".green().bold(), path.display());
                }
                Err(err) => {
                    failed += 1;
                    println!("{} {}: {err}", "ERR".red().bold(), path.display());
                }
            }
        }

        let stats = cache.stats();
        tracing::debug!(hits = stats.hits, misses = stats.misses, "check finished");

        if failed > 0 {
            bail!("{failed} of {} templates failed to compile", self.files.len());
        }
        Ok(())
    }
}
