//! Befunde der Analyse.
//!
//! Ein Befund ist ein Wert, kein Abbruch: die Analyse läuft nach jedem Befund mit dem
//! Rest der Fahrstraße bzw. des Moduls weiter.

use crate::core::{speed, ElementRef, PlacementRef, ReferenceKind};
use crate::store::LookupError;
use std::fmt;

/// Grobe Einordnung eines Befunds, u.a. für Filter und Farbgebung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// Start, Ziel oder Platzierung nicht auflösbar
    Reference,
    /// Fahrweg unterbrochen, zyklisch oder zu lang
    Path,
    SignalOutsideRoute,
    DistantSpeed,
    Coupling,
    LevelCrossing,
    /// Referenzpunkt-Prüfung
    Audit,
}

/// Rolle einer Platzierung innerhalb einer Fahrstraße
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRole {
    MainSignal,
    DistantSignal,
    Switch,
    Register,
}

impl PlacementRole {
    pub fn label(self) -> &'static str {
        match self {
            PlacementRole::MainSignal => "Hauptsignal",
            PlacementRole::DistantSignal => "Vorsignal",
            PlacementRole::Switch => "Weiche",
            PlacementRole::Register => "Register",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    // ── Fahrstraße ──────────────────────────────────────────────────
    UnresolvedStart(LookupError),
    UnresolvedTarget(LookupError),
    InvalidPlacement {
        role: PlacementRole,
        reference: PlacementRef,
        error: LookupError,
    },
    /// Fahrweg endet vor dem Ziel ohne weiteren Nachfolger
    PathEnded { at: ElementRef },
    /// Nachfolger ließ sich nicht auflösen
    PathInterrupted { at: ElementRef, error: LookupError },
    CyclicPath(ElementRef),
    PathTooLong(usize),

    // ── Signale ─────────────────────────────────────────────────────
    SignalOutsideRoute { signal: String, location: ElementRef },
    DistantSpeedExceeded {
        signal: String,
        shown: f32,
        limit: f32,
    },
    InvalidCoupling { signal: String, error: LookupError },
    CircularCoupling { signal: String, at: ElementRef },

    // ── Bahnübergänge ───────────────────────────────────────────────
    CrossingEventUnresolved { at: ElementRef, error: LookupError },
    CrossingMissingOpen { crossing: String },
    CrossingMissingClose { crossing: String },
    CrossingWithoutCounter { crossing: String },

    // ── Referenzpunkte ──────────────────────────────────────────────
    ReferenceWithoutElement { ref_nr: u32, element_nr: u32 },
    ReferenceWithoutSignal { ref_nr: u32, location: ElementRef },
    LabelMismatch {
        ref_nr: u32,
        label: String,
        signal: String,
    },
    SwitchWithoutBranch { ref_nr: u32, successors: usize },
    MissingLabel { ref_nr: u32, kind: ReferenceKind },
}

impl Finding {
    pub fn kind(&self) -> FindingKind {
        match self {
            Finding::UnresolvedStart(_)
            | Finding::UnresolvedTarget(_)
            | Finding::InvalidPlacement { .. } => FindingKind::Reference,
            Finding::PathEnded { .. }
            | Finding::PathInterrupted { .. }
            | Finding::CyclicPath(_)
            | Finding::PathTooLong(_) => FindingKind::Path,
            Finding::SignalOutsideRoute { .. } => FindingKind::SignalOutsideRoute,
            Finding::DistantSpeedExceeded { .. } => FindingKind::DistantSpeed,
            Finding::InvalidCoupling { .. } | Finding::CircularCoupling { .. } => {
                FindingKind::Coupling
            }
            Finding::CrossingEventUnresolved { .. }
            | Finding::CrossingMissingOpen { .. }
            | Finding::CrossingMissingClose { .. }
            | Finding::CrossingWithoutCounter { .. } => FindingKind::LevelCrossing,
            Finding::ReferenceWithoutElement { .. }
            | Finding::ReferenceWithoutSignal { .. }
            | Finding::LabelMismatch { .. }
            | Finding::SwitchWithoutBranch { .. }
            | Finding::MissingLabel { .. } => FindingKind::Audit,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::UnresolvedStart(e) => write!(f, "Start nicht auflösbar: {}", e),
            Finding::UnresolvedTarget(e) => write!(f, "Ziel nicht auflösbar: {}", e),
            Finding::InvalidPlacement {
                role,
                reference,
                error,
            } => write!(
                f,
                "Ungültige {}-Referenz {} in {}: {}",
                role.label(),
                reference.ref_nr,
                reference.module,
                error
            ),
            Finding::PathEnded { at } => write!(f, "Fahrweg endet vor dem Ziel an {}", at),
            Finding::PathInterrupted { at, error } => {
                write!(f, "Fahrweg nach {} unterbrochen: {}", at, error)
            }
            Finding::CyclicPath(at) => write!(f, "Fahrweg ist zyklisch, {} doppelt", at),
            Finding::PathTooLong(steps) => {
                write!(f, "Fahrweg nach {} Elementen abgebrochen", steps)
            }
            Finding::SignalOutsideRoute { signal, location } => {
                write!(f, "Signal {} an {} liegt nicht im Fahrweg", signal, location)
            }
            Finding::DistantSpeedExceeded {
                signal,
                shown,
                limit,
            } => write!(
                f,
                "Vorsignal {} zeigt {} km/h, Fahrstraße erlaubt {} km/h",
                signal,
                speed::format_speed(*shown),
                speed::format_speed(*limit)
            ),
            Finding::InvalidCoupling { signal, error } => {
                write!(f, "Ungültige Koppelsignal-Referenz an {}: {}", signal, error)
            }
            Finding::CircularCoupling { signal, at } => {
                write!(f, "Zirkelbezug in Koppelsignal von {} bei {}", signal, at)
            }
            Finding::CrossingEventUnresolved { at, error } => {
                write!(f, "Bahnübergangs-Ereignis an {} nicht auflösbar: {}", at, error)
            }
            Finding::CrossingMissingOpen { crossing } => {
                write!(f, "Bahnübergang {}: Ereignis zum Öffnen fehlt", crossing)
            }
            Finding::CrossingMissingClose { crossing } => {
                write!(f, "Bahnübergang {}: Ereignis zum Schließen fehlt", crossing)
            }
            Finding::CrossingWithoutCounter { crossing } => write!(
                f,
                "Bahnübergang {}: kein Signal der Koppelkette zählt",
                crossing
            ),
            Finding::ReferenceWithoutElement { ref_nr, element_nr } => write!(
                f,
                "Referenzpunkt {}: Element {} existiert nicht",
                ref_nr, element_nr
            ),
            Finding::ReferenceWithoutSignal { ref_nr, location } => {
                write!(f, "Referenzpunkt {}: kein Signal an {}", ref_nr, location)
            }
            Finding::LabelMismatch {
                ref_nr,
                label,
                signal,
            } => write!(
                f,
                "Referenzpunkt {}: Bezeichnung '{}' passt nicht zu Signal {}",
                ref_nr, label, signal
            ),
            Finding::SwitchWithoutBranch { ref_nr, successors } => write!(
                f,
                "Referenzpunkt {}: Weiche mit nur {} Nachfolger(n)",
                ref_nr, successors
            ),
            Finding::MissingLabel { ref_nr, kind } => write!(
                f,
                "Referenzpunkt {} ({}) ohne Bezeichnung",
                ref_nr,
                kind.label()
            ),
        }
    }
}
