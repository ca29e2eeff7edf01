//! XML-Import für Zusi-3-Dateien.
//!
//! Dieses Modul wandelt den generischen Dokumentbaum aus `zusi_document` einmalig beim
//! Laden in typisierte Datensätze um. Fehlende Attribute erhalten dokumentierte
//! Standardwerte, unlesbare Zahlen machen das Modul ungültig.

pub mod landscape;
pub mod parser;

pub use landscape::parse_animation_names;
pub use parser::{module_from_document, parse_module};
