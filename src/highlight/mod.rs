//! Syntax highlighting: rules, tokens and the lexer.

pub mod config;
mod lexer;
pub mod token;

pub use config::{ColorClass, HighlightingConfig, TokenClass};
pub use lexer::{Lexer, TokenLines};
pub use token::{Token, TokenKind};
