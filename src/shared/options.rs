//! Zentrale Konfiguration der Fahrstraßen-Analyse.
//!
//! `AnalysisOptions` enthält alle zur Laufzeit einstellbaren Werte. Sie werden aus einer
//! TOML-Datei gelesen und von Kommandozeilenflags überschrieben; die `const`-Werte bleiben
//! als Fallback/Default erhalten.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Fahrweg ─────────────────────────────────────────────────────────

/// Maximale Anzahl Elemente bei der Fahrweg-Rekonstruktion.
pub const MAX_PATH_STEPS: usize = 10_000;

// ── Konfigurationsdatei ─────────────────────────────────────────────

/// Dateiname der Optionen-Datei neben der Binary.
pub const CONFIG_FILE_NAME: &str = "zusi_fahrstrassen.toml";

/// Wie eine optionale Prüfung in die Ausgabe eingeht
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CheckMode {
    /// Prüfung nicht durchführen
    Ignore,
    /// Befund bei der betroffenen Zeile markieren
    #[default]
    Inline,
    /// Nur Fahrstraßen mit diesem Befund ausgeben
    OnlyOffending,
}

impl CheckMode {
    pub fn is_enabled(self) -> bool {
        self != CheckMode::Ignore
    }
}

/// Laufzeitoptionen der Analyse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    // ── Abschnitte ──────────────────────────────────────────────────
    /// Register der Fahrstraße auflisten
    pub show_registers: bool,
    /// Weichen der Fahrstraße auflisten
    pub show_switches: bool,
    /// Bahnübergänge entlang des Fahrwegs prüfen
    pub check_level_crossings: bool,

    // ── Prüfungen ───────────────────────────────────────────────────
    /// Hauptsignal liegt nicht auf dem eigenen Fahrweg
    pub signal_outside_route: CheckMode,
    /// Vorsignal zeigt mehr als die Fahrstraße erlaubt
    pub distant_speed: CheckMode,
    /// Schrittgrenze der Fahrweg-Rekonstruktion
    pub max_path_steps: usize,

    // ── Ausgabe ─────────────────────────────────────────────────────
    /// Farbige Terminalausgabe
    pub colored: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            show_registers: false,
            show_switches: false,
            check_level_crossings: false,
            signal_outside_route: CheckMode::Inline,
            distant_speed: CheckMode::Inline,
            max_path_steps: MAX_PATH_STEPS,
            colored: true,
        }
    }
}

impl AnalysisOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content).with_context(|| {
            format!("Optionen-Datei {} nicht schreibbar", path.display())
        })?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("zusi-fahrstrassen"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Liegt mindestens eine Prüfung im Modus „nur betroffene Fahrstraßen“?
    pub fn filters_routes(&self) -> bool {
        self.signal_outside_route == CheckMode::OnlyOffending
            || self.distant_speed == CheckMode::OnlyOffending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnalysisOptions::default();
        assert_eq!(options.max_path_steps, MAX_PATH_STEPS);
        assert_eq!(options.distant_speed, CheckMode::Inline);
        assert!(options.colored);
        assert!(!options.filters_routes());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options: AnalysisOptions = toml::from_str(
            "show_switches = true\nsignal_outside_route = \"only-offending\"\n",
        )
        .expect("TOML");
        assert!(options.show_switches);
        assert_eq!(options.signal_outside_route, CheckMode::OnlyOffending);
        assert_eq!(options.distant_speed, CheckMode::Inline);
        assert!(options.filters_routes());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let options = AnalysisOptions {
            check_level_crossings: true,
            distant_speed: CheckMode::Ignore,
            max_path_steps: 50,
            ..Default::default()
        };

        options.save_to_file(&path).expect("Speichern");
        assert_eq!(AnalysisOptions::load_from_file(&path), options);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kaputt.toml");
        std::fs::write(&path, "max_path_steps = \"viele\"").expect("write");

        assert_eq!(AnalysisOptions::load_from_file(&path), AnalysisOptions::default());
        assert_eq!(
            AnalysisOptions::load_from_file(&dir.path().join("fehlt.toml")),
            AnalysisOptions::default()
        );
    }
}
