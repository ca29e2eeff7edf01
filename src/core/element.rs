//! Streckenelemente mit Nachfolger-Slots und Richtungsinformationen.

use super::{Direction, Event};
use zusi_document::DataPath;

/// Ein Nachfolger-Eintrag: im selben Modul per Elementnummer, modulübergreifend
/// per Referenzpunkt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessorSlot {
    /// `<NachNorm Nr>` / `<NachGegen Nr>`
    IntraModule(u32),
    /// `<NachNormModul Nr>` / `<NachGegenModul Nr>`; ohne Datei gilt das eigene Modul
    InterModule {
        module: Option<DataPath>,
        ref_nr: u32,
    },
}

/// Inhalt von `<InfoNormRichtung>` bzw. `<InfoGegenRichtung>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionInfo {
    /// Ereignisse in Dateireihenfolge
    pub events: Vec<Event>,
    /// Index in [`super::Module::signals`]
    pub signal: Option<usize>,
}

/// Ein `<StrElement>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackElement {
    /// Elementnummer, eindeutig im Modul
    pub nr: u32,
    /// Bit `slot` (+8 in Gegenrichtung): Nachfolger wird in Gegenrichtung betreten
    pub anschluss: u32,
    pub successors_norm: Vec<SuccessorSlot>,
    pub successors_gegen: Vec<SuccessorSlot>,
    pub info_norm: DirectionInfo,
    pub info_gegen: DirectionInfo,
}

impl TrackElement {
    /// Nachfolger-Slots in Fahrtrichtung
    pub fn successors(&self, direction: Direction) -> &[SuccessorSlot] {
        match direction {
            Direction::Norm => &self.successors_norm,
            Direction::Gegen => &self.successors_gegen,
        }
    }

    /// Richtungsinformationen
    pub fn info(&self, direction: Direction) -> &DirectionInfo {
        match direction {
            Direction::Norm => &self.info_norm,
            Direction::Gegen => &self.info_gegen,
        }
    }

    /// Richtung, in der der Nachfolger im Slot `slot` betreten wird
    pub fn entry_direction(&self, direction: Direction, slot: usize) -> Direction {
        let bit = slot + if direction == Direction::Gegen { 8 } else { 0 };
        if bit < 32 && (self.anschluss >> bit) & 1 == 1 {
            Direction::Gegen
        } else {
            Direction::Norm
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_direction_reads_anschluss_bits() {
        let element = TrackElement {
            nr: 1,
            anschluss: 0b10 | (1 << 8),
            ..Default::default()
        };
        assert_eq!(element.entry_direction(Direction::Norm, 0), Direction::Norm);
        assert_eq!(element.entry_direction(Direction::Norm, 1), Direction::Gegen);
        assert_eq!(element.entry_direction(Direction::Gegen, 0), Direction::Gegen);
        assert_eq!(element.entry_direction(Direction::Gegen, 1), Direction::Norm);
        assert_eq!(element.entry_direction(Direction::Gegen, 40), Direction::Norm);
    }
}
