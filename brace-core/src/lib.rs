//! # brace-core
//!
//! A minimal `{{ name }}` interpolation engine: tokenizer → code generator →
//! compiled [`Renderer`].
//!
//! Public API surface:
//! - [`lexer`]: [`tokenize`], [`tokenize_with`]
//! - [`codegen`]: [`generate`], [`Program`]
//! - [`compiler`]: [`compile`], [`compile_with`], [`render`], [`render_with`], [`Renderer`]
//! - [`context`]: [`DataContext`], [`Displayable`], [`Context`]
//! - [`config`]: [`Options`], [`Config`], policies, YAML loading
//! - [`error`]: [`TemplateError`], [`RenderError`], [`BraceError`], [`ConfigError`]
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! let renderer = brace_core::compile("Hi, my name is {{ name }}!").unwrap();
//! let ctx = HashMap::from([("name", "graef")]);
//! assert_eq!(renderer.apply(&ctx).unwrap(), "Hi, my name is graef!");
//! ```

pub mod codegen;
pub mod compiler;
pub mod config;
pub mod context;
pub mod error;
pub mod lexer;
pub mod types;

pub use codegen::{generate, Program};
pub use compiler::{compile, compile_with, render, render_with, Renderer};
pub use config::{Config, MissingFieldPolicy, Options, UnterminatedTagPolicy};
pub use context::{Context, ContextError, DataContext, Displayable};
pub use error::{BraceError, ConfigError, RenderError, TemplateError};
pub use lexer::{tokenize, tokenize_with};
pub use types::{FieldName, Part, Token, TokenKind};
