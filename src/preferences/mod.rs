//! UI preferences
//!
//! Currently only the light/dark theme.

mod errors;
mod storage;
mod theme;

pub use errors::{PreferenceError, PreferenceResult};
pub use storage::{FilePreferenceStorage, MemoryPreferenceStorage, PreferenceStorage};
pub use theme::{Theme, ThemeStore};
