//! Formatter implementations

pub mod json;
pub mod text;
pub mod xml;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use xml::XmlFormatter;

pub use crate::core::{Formatter, OutputFormat};
