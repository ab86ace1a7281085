//! `brace tokens`: dump the tokenizer's view of a template.

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use brace_core::{tokenize_with, Config, Token};

use super::TemplateSource;

/// Arguments for `brace tokens`.
#[derive(Args, Debug)]
pub struct TokensArgs {
    #[command(flatten)]
    pub source: TemplateSource,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "offset")]
    offset: usize,
    #[tabled(rename = "text")]
    text: String,
}

impl TokensArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let template = self.source.read()?;
        let tokens = tokenize_with(&template, config.options.on_unterminated_tag)
            .context("template failed to tokenize")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&tokens).context("failed to serialize tokens")?
            );
            return Ok(());
        }

        if tokens.is_empty() {
            println!("Empty template, no tokens.");
            return Ok(());
        }
        let mut table = Table::new(rows(&tokens));
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn rows(tokens: &[Token]) -> Vec<TokenRow> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, tok)| TokenRow {
            index,
            kind: tok.kind.to_string(),
            offset: tok.offset,
            // Debug-escape so newlines and tabs stay on one table line.
            text: format!("{:?}", tok.text),
        })
        .collect()
}
