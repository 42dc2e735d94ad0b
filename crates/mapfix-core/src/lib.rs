//! Core infrastructure for mapfix.
//!
//! This crate provides language-agnostic infrastructure:
//! - Byte spans for locating syntax in source text
//! - Diagnostic records for analysis findings
//! - Text utilities for byte offset and line:column conversions

pub mod diagnostic;
pub mod span;
pub mod text;

pub use diagnostic::{Diagnostic, Severity};
pub use span::Span;
