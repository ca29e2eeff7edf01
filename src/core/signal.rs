//! Signale mit Hauptsignal-Zeilen, Vorsignal-Spalten und Signalbild-Matrix.

use super::{ElementRef, Event};
use zusi_document::DataPath;

/// Signal gilt auch in Gegenrichtung
pub const FLAG_OPPOSITE_DIRECTION: u32 = 1 << 0;
/// Signal führt einen Bahnübergangs-Zähler
pub const FLAG_CROSSING_COUNTER: u32 = 1 << 3;
/// Fahrstraßentyp-Bit für Zugfahrten in `HsigBegriff@FahrstrTyp`
pub const ROUTE_TYPE_TRAIN: u32 = 1 << 2;

/// Verweis auf ein gekoppeltes Signal über einen Referenzpunkt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouplingRef {
    /// Modul des Referenzpunkts; `None` = Modul des Signals
    pub module: Option<DataPath>,
    pub ref_nr: u32,
}

/// Hauptsignal-Zeile (`<HsigBegriff>`)
#[derive(Debug, Clone, PartialEq)]
pub struct MainAspect {
    /// Geschwindigkeit in m/s, negativ = unbegrenzt
    pub speed: f32,
    /// Fahrstraßentyp-Bitmaske
    pub route_types: u32,
    /// Zeilenspezifische Kopplung, überschreibt [`Signal::coupling`]
    pub coupling: Option<CouplingRef>,
}

impl MainAspect {
    /// Zeile nimmt an Zugfahrten teil (Geschwindigkeit ≠ 0 und Zugfahrt-Bit gesetzt)
    pub fn is_train_movement(&self) -> bool {
        self.speed != 0.0 && self.route_types & ROUTE_TYPE_TRAIN != 0
    }
}

/// Vorsignal-Spalte (`<VsigBegriff>`)
#[derive(Debug, Clone, PartialEq)]
pub struct DistantAspect {
    pub speed: f32,
}

/// Zelle der Signalbild-Matrix (`<MatrixEintrag>`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixCell {
    /// Bitmaske aktiver Signalbilder
    pub picture: u64,
    pub speed: f32,
    pub events: Vec<Event>,
}

/// Ersatzsignal-Eintrag mit eigener einspaltiger Matrixzeile
#[derive(Debug, Clone, PartialEq)]
pub struct SubstituteAspect {
    pub label: String,
    pub cell: MatrixCell,
}

/// Ein Signal-Frame; liefert über seine Landschaftsdatei die Animationsnamen
#[derive(Debug, Clone, PartialEq)]
pub struct SignalFrame {
    pub file: Option<DataPath>,
    /// Anzeigename für einen unbenannten Bildbit (Dateiname ohne Endung)
    pub label: String,
}

/// Ein `<Signal>` an einem Streckenelement
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Standort (Modul, Element, Richtung)
    pub location: ElementRef,
    pub station: String,
    pub name: String,
    pub flags: u32,
    pub frames: Vec<SignalFrame>,
    pub main_aspects: Vec<MainAspect>,
    pub distant_aspects: Vec<DistantAspect>,
    /// Zeilenweise, je Zeile [`Signal::column_count`] Einträge
    pub matrix: Vec<MatrixCell>,
    pub substitutes: Vec<SubstituteAspect>,
    pub coupling: Option<CouplingRef>,
}

impl Signal {
    /// Anzahl Matrixspalten; ohne Vorsignalbegriffe gibt es genau eine
    pub fn column_count(&self) -> usize {
        self.distant_aspects.len().max(1)
    }

    /// Matrixzelle, falls Zeile und Spalte existieren
    pub fn cell(&self, row: usize, column: usize) -> Option<&MatrixCell> {
        if row >= self.main_aspects.len() || column >= self.column_count() {
            return None;
        }
        let index = row
            .checked_mul(self.column_count())?
            .checked_add(column)?;
        self.matrix.get(index)
    }

    /// Erste Spalte mit Vorsignalgeschwindigkeit 0, sonst Spalte 0
    pub fn zero_speed_column(&self) -> usize {
        self.distant_aspects
            .iter()
            .position(|d| d.speed == 0.0)
            .unwrap_or(0)
    }

    /// Gilt auch für die Gegenrichtung (Flag-Bit 0)
    pub fn valid_in_opposite_direction(&self) -> bool {
        self.flags & FLAG_OPPOSITE_DIRECTION != 0
    }

    /// Standorte, an denen das Signal gilt: eigener Standort, bei Flag-Bit 0 auch umgekehrt
    pub fn orientations(&self) -> Vec<ElementRef> {
        let mut orientations = vec![self.location.clone()];
        if self.valid_in_opposite_direction() {
            orientations.push(self.location.inverted());
        }
        orientations
    }

    /// Trägt einen Bahnübergangs-Zähler (Flag-Bit 3)
    pub fn has_crossing_counter(&self) -> bool {
        self.flags & FLAG_CROSSING_COUNTER != 0
    }

    /// Kopplung, die für die Zeile `row` gilt
    pub fn coupling_for_row(&self, row: Option<usize>) -> Option<&CouplingRef> {
        row.and_then(|r| self.main_aspects.get(r))
            .and_then(|aspect| aspect.coupling.as_ref())
            .or(self.coupling.as_ref())
    }

    /// "Betriebsstelle Signalname", leere Teile werden durch `?` ersetzt
    pub fn display_name(&self) -> String {
        let part = |s: &str| if s.is_empty() { "?".to_string() } else { s.to_string() };
        format!("{} {}", part(&self.station), part(&self.name))
    }
}
