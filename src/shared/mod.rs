//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeitoptionen, die `app`, `analysis` und `report` gemeinsam lesen.

pub mod options;

pub use options::{AnalysisOptions, CheckMode, CONFIG_FILE_NAME, MAX_PATH_STEPS};
