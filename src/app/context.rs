//! Analyse-Kontext: besitzt Store, Optionen und das Hauptmodul.
//!
//! Jede Betriebsart der Kommandozeile ist eine Methode; die Ausgabe geht in einen
//! beliebigen [`Write`], damit Tests sie einsammeln können.

use crate::analysis::{audit_references, CombinationAnalyzer, RouteAnalyzer};
use crate::core::DataPath;
use crate::report::{self, Palette};
use crate::shared::AnalysisOptions;
use crate::store::{FsSource, ModuleStore};
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use zusi_document::DataRoots;

/// Betriebsart der Analyse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AnalysisMode {
    /// Alle Fahrstraßen des Hauptmoduls auflisten
    #[default]
    Routes,
    /// Referenzpunkte des Hauptmoduls prüfen
    ReferenceAudit,
    /// Fahrstraßenkombinationen an einem Signal
    SignalCombinations,
}

pub struct AnalysisContext {
    store: ModuleStore,
    options: AnalysisOptions,
    primary: DataPath,
    palette: Palette,
}

impl AnalysisContext {
    /// Öffnet ein Hauptmodul aus dem Dateisystem.
    ///
    /// Nachbarmodule werden bei Bedarf über `roots` nachgeladen.
    pub fn open(file: &Path, roots: DataRoots, options: AnalysisOptions) -> Result<Self> {
        let mut source = FsSource::new(roots);
        let primary = source.register_primary(file);
        Self::with_store(ModuleStore::new(source), primary, options)
    }

    /// Kontext über einem vorhandenen Store; das Hauptmodul muss sich laden lassen.
    pub fn with_store(
        store: ModuleStore,
        primary: DataPath,
        options: AnalysisOptions,
    ) -> Result<Self> {
        let module = store
            .load(&primary)
            .with_context(|| format!("Hauptmodul {} konnte nicht geladen werden", primary))?;
        log::info!(
            "Hauptmodul {}: {} Elemente, {} Fahrstrassen",
            primary,
            module.element_count(),
            module.route_count()
        );

        let palette = Palette::new(options.colored);
        Ok(Self {
            store,
            options,
            primary,
            palette,
        })
    }

    pub fn store(&self) -> &ModuleStore {
        &self.store
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn primary(&self) -> &DataPath {
        &self.primary
    }

    /// Führt die gewählte Betriebsart aus
    pub fn run<W: Write>(&self, mode: AnalysisMode, signal: Option<u32>, w: &mut W) -> Result<()> {
        match mode {
            AnalysisMode::Routes => self.run_routes(w).map(|_| ()),
            AnalysisMode::ReferenceAudit => self.run_reference_audit(w).map(|_| ()),
            AnalysisMode::SignalCombinations => {
                let Some(signal) = signal else {
                    bail!("Für die Signalkombinationen fehlt die Referenznummer des Signals");
                };
                self.run_signal_combinations(signal, w)
            }
        }
    }

    /// Listet alle Fahrstraßen; liefert die Anzahl ausgegebener Blöcke
    pub fn run_routes<W: Write>(&self, w: &mut W) -> Result<usize> {
        let reports = RouteAnalyzer::new(&self.store, &self.options)
            .analyze_module(&self.primary)
            .context("Fahrstrassen konnten nicht analysiert werden")?;
        let selected = report::select_routes(&reports, &self.options).len();
        report::write_routes(w, &reports, &self.options, &self.palette)
            .context("Ausgabe fehlgeschlagen")?;

        let findings: usize = reports.iter().map(|r| r.findings.len()).sum();
        log::info!(
            "{} Fahrstrassen analysiert, {} Befunde, {} Module geladen",
            reports.len(),
            findings,
            self.store.loaded_count()
        );
        Ok(selected)
    }

    /// Prüft die Referenzpunkte; liefert die Anzahl Befunde
    pub fn run_reference_audit<W: Write>(&self, w: &mut W) -> Result<usize> {
        let audit = audit_references(&self.store, &self.primary)
            .context("Referenzpunkte konnten nicht geprueft werden")?;
        report::write_audit(w, &audit, &self.palette).context("Ausgabe fehlgeschlagen")?;
        Ok(audit.finding_count())
    }

    /// Listet die Kombinationen am Signal mit Referenznummer `signal_ref`
    pub fn run_signal_combinations<W: Write>(&self, signal_ref: u32, w: &mut W) -> Result<()> {
        let combinations = CombinationAnalyzer::new(&self.store)
            .analyze(&self.primary, signal_ref)
            .with_context(|| format!("Signal an Referenzpunkt {} nicht gefunden", signal_ref))?;
        report::write_combinations(w, &combinations, &self.palette)
            .context("Ausgabe fehlgeschlagen")?;
        Ok(())
    }
}
