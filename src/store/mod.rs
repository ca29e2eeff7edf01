//! Lazy-Laden und Cachen von Streckenmodulen.
//!
//! - `error`: Fehlertaxonomie für Nachschlagevorgänge ([`LookupError`])
//! - `source`: Woher Modulinhalte kommen (Dateisystem oder Speicher)
//! - `module_store`: Der Cache selbst, inkl. Negativ-Cache und Animationsnamen

pub mod error;
pub mod module_store;
pub mod source;

pub use error::LookupError;
pub use module_store::{ModuleStore, SignalHandle};
pub use source::{FsSource, MemorySource, ModuleSource, ReadLog};
