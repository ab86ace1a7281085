//! Compiler and [`Renderer`]: the executable end of the pipeline.
//!
//! ```text
//! template ──tokenize──▶ tokens ──generate──▶ parts ──▶ Renderer::apply(ctx) ──▶ String
//! ```

use serde::{Deserialize, Serialize};

use crate::codegen::{generate, Program};
use crate::config::{MissingFieldPolicy, Options};
use crate::context::DataContext;
use crate::error::{BraceError, RenderError, TemplateError};
use crate::lexer::tokenize_with;
use crate::types::Part;

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// A compiled template.
///
/// Holds only the parts list and the missing-field policy; the source text
/// is not retained. Cheap to clone, safe to share across threads, and
/// reusable with any number of contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderer {
    parts: Vec<Part>,
    #[serde(default)]
    on_missing_field: MissingFieldPolicy,
}

impl Renderer {
    /// Build a renderer from an already generated parts list.
    pub fn from_parts(parts: Vec<Part>, on_missing_field: MissingFieldPolicy) -> Self {
        Renderer { parts, on_missing_field }
    }

    /// The compiled parts, in output order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn on_missing_field(&self) -> MissingFieldPolicy {
        self.on_missing_field
    }

    /// Field names referenced by this template, in first-use order, without
    /// duplicates.
    pub fn fields(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for part in &self.parts {
            if let Part::Field(name) = part {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }

    /// Concatenation-program view of the compiled parts.
    pub fn program(&self) -> Program<'_> {
        Program(&self.parts)
    }

    /// Substitute `ctx` into the template.
    ///
    /// All or nothing: on a missing field under [`MissingFieldPolicy::Fail`]
    /// no partial output is returned.
    pub fn apply<C: DataContext + ?Sized>(&self, ctx: &C) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.literal_len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(name) => match ctx.lookup(name.as_str()) {
                    Some(value) => out.push_str(&value),
                    None => match self.on_missing_field {
                        MissingFieldPolicy::Fail => {
                            return Err(RenderError::MissingField { name: name.to_string() });
                        }
                        MissingFieldPolicy::EmptyString => {
                            tracing::trace!(field = %name, "missing field rendered as empty");
                        }
                    },
                },
            }
        }
        Ok(out)
    }

    fn literal_len(&self) -> usize {
        self.parts
            .iter()
            .map(|p| match p {
                Part::Literal(text) => text.len(),
                Part::Field(_) => 0,
            })
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Compile / render façade
// ---------------------------------------------------------------------------

/// Compile `template` with default [`Options`].
pub fn compile(template: &str) -> Result<Renderer, TemplateError> {
    compile_with(template, &Options::default())
}

/// Compile `template` under explicit [`Options`].
pub fn compile_with(template: &str, options: &Options) -> Result<Renderer, TemplateError> {
    let tokens = tokenize_with(template, options.on_unterminated_tag)?;
    let parts = generate(&tokens)?;
    tracing::debug!(
        tokens = tokens.len(),
        fields = parts.iter().filter(|p| matches!(p, Part::Field(_))).count(),
        "compiled template"
    );
    Ok(Renderer::from_parts(parts, options.on_missing_field))
}

/// One-shot compile + apply with default [`Options`].
pub fn render<C: DataContext + ?Sized>(template: &str, ctx: &C) -> Result<String, BraceError> {
    render_with(template, ctx, &Options::default())
}

/// One-shot compile + apply under explicit [`Options`].
pub fn render_with<C: DataContext + ?Sized>(
    template: &str,
    ctx: &C,
    options: &Options,
) -> Result<String, BraceError> {
    Ok(compile_with(template, options)?.apply(ctx)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
