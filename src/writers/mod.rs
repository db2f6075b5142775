//! Writer implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleWriter;
#[cfg(feature = "file")]
pub use file::FileWriter;
pub use memory::MemoryWriter;

pub use crate::core::{Writer, WriterRegistry, WriterSpec};
