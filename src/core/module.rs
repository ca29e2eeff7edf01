//! Ein geladenes Streckenmodul: Arena für Elemente, Signale, Referenzpunkte und Fahrstraßen.

use super::{Direction, Route, Signal, TrackElement};
use indexmap::IndexMap;
use zusi_document::DataPath;

/// Typ eines Referenzpunkts (`RefTyp`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    EntryPoint,
    ModuleBoundary,
    Register,
    Switch,
    Signal,
    Release,
    Other(u32),
}

impl ReferenceKind {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => ReferenceKind::EntryPoint,
            1 => ReferenceKind::ModuleBoundary,
            2 => ReferenceKind::Register,
            3 => ReferenceKind::Switch,
            4 => ReferenceKind::Signal,
            5 => ReferenceKind::Release,
            other => ReferenceKind::Other(other),
        }
    }

    pub fn label(self) -> String {
        match self {
            ReferenceKind::EntryPoint => "Aufgleispunkt".to_string(),
            ReferenceKind::ModuleBoundary => "Modulgrenze".to_string(),
            ReferenceKind::Register => "Register".to_string(),
            ReferenceKind::Switch => "Weiche".to_string(),
            ReferenceKind::Signal => "Signal".to_string(),
            ReferenceKind::Release => "Aufloesepunkt".to_string(),
            ReferenceKind::Other(v) => format!("RefTyp {v}"),
        }
    }
}

/// Ein `<ReferenzElemente>`-Eintrag
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub nr: u32,
    /// Element, auf das der Punkt zeigt; muss nicht existieren
    pub element_nr: u32,
    pub direction: Direction,
    pub kind: ReferenceKind,
    /// Freitext (`Info`)
    pub label: String,
}

/// Vollständig eingelesenes Modul
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub id: DataPath,
    pub elements: IndexMap<u32, TrackElement>,
    /// Signal-Arena; Elemente verweisen per Index
    pub signals: Vec<Signal>,
    pub references: IndexMap<u32, ReferencePoint>,
    pub routes: Vec<Route>,
    /// Nachbarmodule aus `<ModulDateien>`
    pub neighbors: Vec<DataPath>,
}

impl Module {
    /// Erstellt ein leeres Modul
    pub fn new(id: DataPath) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn element(&self, nr: u32) -> Option<&TrackElement> {
        self.elements.get(&nr)
    }

    pub fn reference(&self, nr: u32) -> Option<&ReferencePoint> {
        self.references.get(&nr)
    }

    /// Index des Signals an Element `nr` in Richtung `direction`
    pub fn signal_index_at(&self, nr: u32, direction: Direction) -> Option<usize> {
        self.element(nr)?.info(direction).signal
    }

    pub fn signal_at(&self, nr: u32, direction: Direction) -> Option<&Signal> {
        self.signal_index_at(nr, direction)
            .and_then(|index| self.signals.get(index))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}
