//! Session store implementations

mod file;
mod memory;

pub use file::{default_session_dir, FileSessionStore};
pub use memory::MemorySessionStore;
