//! `zusi_document` — Dokumentbaum und Dateipfade fuer Zusi-3-Daten.
//!
//! Stellt die duennen I/O-Bausteine bereit, auf denen die Fahrstrassen-Analyse aufsetzt:
//! - XML-Dateien (`.st3`, `.ls3`) als Baum aus benannten Knoten mit String-Attributen
//! - Normalisierte, gross/klein-unabhaengige Pfade relativ zum Zusi-Datenverzeichnis
//! - Aufloesung gegen Benutzer- und offizielles Datenverzeichnis
//!
//! # Beispiel
//! ```no_run
//! use zusi_document::{parse_document, DataPath, DataRoots};
//!
//! let roots = DataRoots::from_env();
//! let path = DataPath::new(r"Routes\Deutschland\Strecke.st3");
//! if let Some(file) = roots.resolve(&path) {
//!     let root = parse_document(&std::fs::read_to_string(file)?)?;
//!     println!("{} Kinder", root.children.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod node;
pub mod paths;
pub mod reader;

pub use node::Node;
pub use paths::{DataPath, DataRoots, ENV_DATA_ROOT, ENV_OFFICIAL_ROOT};
pub use reader::parse_document;
