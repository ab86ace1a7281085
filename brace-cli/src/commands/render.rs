//! `brace render`: substitute data into a template.
//!
//! Context layering, lowest to highest precedence: config `defaults`, each
//! `--data` file in order, then `--set` pairs.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::Args;
use serde_json::Value;

use brace_core::{compile_with, Config, Context, MissingFieldPolicy, UnterminatedTagPolicy};

use super::TemplateSource;

/// Arguments for `brace render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: TemplateSource,

    /// JSON (.json) or YAML (.yaml/.yml) file holding a top-level object.
    #[arg(long, short = 'd', value_name = "FILE")]
    pub data: Vec<PathBuf>,

    /// Set a single field; may be repeated.
    #[arg(long, value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Override the missing-field policy from the config.
    #[arg(long, value_name = "fail|empty-string")]
    pub on_missing: Option<MissingFieldPolicy>,

    /// Treat an unclosed `{{` as an error instead of literal text.
    #[arg(long)]
    pub strict: bool,

    /// Write the result here instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let mut options = config.options;
        if let Some(policy) = self.on_missing {
            options = options.with_missing_field(policy);
        }
        if self.strict {
            options = options.with_unterminated_tag(UnterminatedTagPolicy::Error);
        }

        let template = self.source.read()?;
        let renderer = compile_with(&template, &options).context("template failed to compile")?;
        let ctx = self.build_context(config)?;
        let output = renderer.apply(&ctx).context("template failed to render")?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &output)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), bytes = output.len(), "wrote rendered output");
            }
            None => print!("{output}"),
        }
        Ok(())
    }

    fn build_context(&self, config: &Config) -> Result<Context> {
        let mut ctx: Context = config.defaults.iter().map(|(k, v)| (k.as_str(), v)).collect();
        for path in &self.data {
            ctx.merge(load_data_file(path)?);
        }
        for pair in &self.set {
            let (name, value) = parse_set(pair)?;
            ctx.insert(name, value);
        }
        Ok(ctx)
    }
}

fn load_data_file(path: &Path) -> Result<Context> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file {}", path.display()))?;
    let value: Value = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
        _ => serde_json::from_str(&contents)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
    };
    Context::from_serialize(&value).with_context(|| format!("unusable data in {}", path.display()))
}

fn parse_set(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => bail!("invalid --set '{pair}'; expected NAME=VALUE"),
    }
}
