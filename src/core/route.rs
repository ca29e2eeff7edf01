//! Fahrstraßen und ihre Einträge.

use zusi_document::DataPath;

/// Verweis eines Fahrstraßen-Eintrags auf einen Referenzpunkt
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementRef {
    /// Modul des Referenzpunkts (ohne `<Datei>`: Modul der Fahrstraße)
    pub module: DataPath,
    pub ref_nr: u32,
}

/// `<FahrstrSignal>`
#[derive(Debug, Clone, PartialEq)]
pub struct MainSignalPlacement {
    pub reference: PlacementRef,
    pub row: usize,
    /// Zeile bezieht sich auf die Ersatzsignal-Tabelle
    pub substitute: bool,
}

/// `<FahrstrVSignal>`
#[derive(Debug, Clone, PartialEq)]
pub struct DistantSignalPlacement {
    pub reference: PlacementRef,
    pub column: usize,
}

/// `<FahrstrWeiche>`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchPlacement {
    pub reference: PlacementRef,
    /// Nachfolger-Slot (0-basiert)
    pub slot: usize,
}

/// `<FahrstrRegister>`
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterPlacement {
    pub reference: PlacementRef,
}

/// Regel-/Gegengleis-Einstufung (`RglGgl`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackClass {
    #[default]
    Unspecified,
    Regular,
    Opposite,
    Other(u32),
}

impl TrackClass {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => TrackClass::Unspecified,
            1 => TrackClass::Regular,
            2 => TrackClass::Opposite,
            other => TrackClass::Other(other),
        }
    }

    pub fn label(self) -> String {
        match self {
            TrackClass::Unspecified => "-".to_string(),
            TrackClass::Regular => "Regelgleis".to_string(),
            TrackClass::Opposite => "Gegengleis".to_string(),
            TrackClass::Other(v) => format!("RglGgl {v}"),
        }
    }
}

/// Eine `<Fahrstrasse>`
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub name: String,
    /// Typ-Tag, z.B. `TypZug`
    pub kind: String,
    /// Länge in Metern
    pub length: f32,
    pub track_class: TrackClass,
    /// Gewicht für den Zufallsausschluss (`ZufallsWert`)
    pub random_weight: f32,
    pub start: PlacementRef,
    pub target: PlacementRef,
    pub main_signals: Vec<MainSignalPlacement>,
    pub distant_signals: Vec<DistantSignalPlacement>,
    pub switches: Vec<SwitchPlacement>,
    pub registers: Vec<RegisterPlacement>,
}
