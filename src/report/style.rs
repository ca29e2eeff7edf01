//! Farben der Terminalausgabe.

use crossterm::style::{ContentStyle, Stylize};

/// Farbpalette; ohne Farbe werden Texte unverändert durchgereicht
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colored: bool,
}

impl Palette {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Palette ohne Escape-Sequenzen
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, style: ContentStyle) -> String {
        if self.colored {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    // ── Rollen ──────────────────────────────────────────────────────

    /// Fahrstraßenname, Blocküberschriften
    pub fn heading(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().bold())
    }

    /// Signalname eines Hauptsignals
    pub fn signal(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().blue().bold())
    }

    /// Name eines Vorsignals
    pub fn distant(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().cyan().bold())
    }

    /// Geschwindigkeit eines Hauptsignals
    pub fn speed(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().red().bold())
    }

    /// Geschwindigkeit eines Vorsignals
    pub fn distant_speed(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().green().bold())
    }

    /// Befunde und Warnmarken
    pub fn error(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().red().bold())
    }

    /// Nebensächliches (Modulhinweise, nicht auflösbare Einträge)
    pub fn dim(&self, text: &str) -> String {
        self.paint(text, ContentStyle::new().dark_grey())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}
