//! Fahrtrichtungen und modulübergreifende Element-Referenzen.

use std::fmt;
use zusi_document::DataPath;

/// Befahrungsrichtung eines Streckenelements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Direction {
    /// In Element-Normrichtung
    #[default]
    Norm,
    /// Entgegen der Element-Normrichtung
    Gegen,
}

impl Direction {
    /// Gegenrichtung
    pub fn inverted(self) -> Self {
        match self {
            Direction::Norm => Direction::Gegen,
            Direction::Gegen => Direction::Norm,
        }
    }

    /// `StrNorm`-Attribut eines Referenzpunkts: 1 = Norm, sonst Gegen
    pub fn from_norm_flag(flag: i64) -> Self {
        if flag == 1 {
            Direction::Norm
        } else {
            Direction::Gegen
        }
    }

    /// Bezeichnung wie in Zusi (`Norm`/`Gegen`)
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Norm => "Norm",
            Direction::Gegen => "Gegen",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ein Streckenelement in einer Richtung: Schlüssel für Pfade, Signale und Kopplungen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef {
    /// Modul, dem das Element gehört
    pub module: DataPath,
    /// Elementnummer innerhalb des Moduls
    pub nr: u32,
    /// Befahrungsrichtung
    pub direction: Direction,
}

impl ElementRef {
    /// Erstellt eine neue Referenz
    pub fn new(module: DataPath, nr: u32, direction: Direction) -> Self {
        Self {
            module,
            nr,
            direction,
        }
    }

    /// Dasselbe Element in Gegenrichtung
    pub fn inverted(&self) -> Self {
        Self {
            module: self.module.clone(),
            nr: self.nr,
            direction: self.direction.inverted(),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.module.file_name(), self.nr, self.direction)
    }
}
