//! Subcommand implementations plus the template-source arguments they share.

pub mod check;
pub mod compile;
pub mod render;
pub mod tokens;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Where a single template comes from: a file, `--template`, or stdin.
#[derive(Args, Debug)]
pub struct TemplateSource {
    /// Template file; reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,

    /// Inline template text.
    #[arg(long, short = 't', conflicts_with = "file")]
    pub template: Option<String>,
}

impl TemplateSource {
    pub fn read(&self) -> Result<String> {
        if let Some(text) = &self.template {
            return Ok(text.clone());
        }
        match &self.file {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display())),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read template from stdin")?;
                Ok(text)
            }
        }
    }
}
