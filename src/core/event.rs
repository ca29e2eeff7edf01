//! Ereignisse an Streckenelementen und Signalmatrix-Zellen.

/// Bahnübergang öffnen
pub const EVENT_CROSSING_OPEN: u32 = 27;
/// Bahnübergang schließen
pub const EVENT_CROSSING_CLOSE: u32 = 1_000_027;
/// Anzeigeauftrag mit Entfernungsangabe in Metern
pub const EVENT_DISPLAY_ORDER: u32 = 3001;

/// Ein `<Ereignis>`-Eintrag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    /// Ereignisnummer (`Er`)
    pub code: u32,
    /// Zahlenwert (`Wert`)
    pub value: f32,
    /// Freitext (`Beschr`)
    pub description: String,
}

impl Event {
    /// Erstellt ein Ereignis
    pub fn new(code: u32, value: f32, description: impl Into<String>) -> Self {
        Self {
            code,
            value,
            description: description.into(),
        }
    }

    /// Bahnübergangs-Ereignis (öffnen oder schließen)
    pub fn is_crossing_event(&self) -> bool {
        self.code == EVENT_CROSSING_OPEN || self.code == EVENT_CROSSING_CLOSE
    }

    /// Beschriftung eines Anzeigeauftrags, z.B. `Anzeige 500 m`
    pub fn display_order_label(&self) -> Option<String> {
        (self.code == EVENT_DISPLAY_ORDER).then(|| format!("Anzeige {:.0} m", self.value))
    }
}
