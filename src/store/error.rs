//! Nachschlagefehler beim Auflösen von Modulen, Referenzpunkten und Signalen.

use crate::core::{DataPath, ElementRef};
use thiserror::Error;

/// Lokaler, behebbarer Fehler beim Auflösen eines Verweises.
///
/// `Clone + PartialEq`, damit der Negativ-Cache des [`ModuleStore`](super::ModuleStore)
/// bei jeder weiteren Anfrage exakt dasselbe Ergebnis liefern kann.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Modul {0} nicht gefunden")]
    MissingModule(DataPath),
    #[error("Modul {path} fehlerhaft: {message}")]
    MalformedModule { path: DataPath, message: String },
    #[error("Referenzpunkt {ref_nr} in {module} nicht gefunden")]
    UnresolvedReference { module: DataPath, ref_nr: u32 },
    #[error("Element {nr} in {module} nicht gefunden")]
    MissingElement { module: DataPath, nr: u32 },
    #[error("Kein Signal an {0}")]
    MissingSignal(ElementRef),
    #[error("Ungültiger Index {index} für {what} (Anzahl {len})")]
    OutOfRangeIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("Zyklischer Verweis bei {0}")]
    CyclicReference(ElementRef),
}
