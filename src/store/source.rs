//! Quellen für Modulinhalte.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use zusi_document::{DataPath, DataRoots};

/// Liefert den Rohinhalt einer Datei anhand ihres [`DataPath`].
pub trait ModuleSource {
    /// `Ok(None)` bedeutet: Datei existiert nicht. `Err` ist ein echter Lesefehler.
    fn read(&self, path: &DataPath) -> Result<Option<String>>;
}

/// Liest aus Benutzer- und offiziellem Datenverzeichnis.
///
/// Das Hauptmodul darf außerhalb der Datenverzeichnisse liegen; es wird über
/// [`FsSource::register_primary`] mit festem Dateipfad eingetragen.
#[derive(Debug, Default)]
pub struct FsSource {
    roots: DataRoots,
    overrides: HashMap<DataPath, PathBuf>,
}

impl FsSource {
    pub fn new(roots: DataRoots) -> Self {
        Self {
            roots,
            overrides: HashMap::new(),
        }
    }

    pub fn roots(&self) -> &DataRoots {
        &self.roots
    }

    /// Trägt eine Datei als Modul ein und liefert dessen ID.
    ///
    /// Liegt die Datei unterhalb eines Datenverzeichnisses, ist die ID der relative Pfad
    /// (damit Rückverweise aus Nachbarmodulen denselben Cache-Eintrag treffen),
    /// sonst nur der Dateiname.
    pub fn register_primary(&mut self, file: &Path) -> DataPath {
        let id = self.roots.relative_path(file).unwrap_or_else(|| {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            DataPath::new(&name)
        });
        log::debug!("Hauptmodul {} -> {}", id, file.display());
        self.overrides.insert(id.clone(), file.to_path_buf());
        id
    }
}

impl ModuleSource for FsSource {
    fn read(&self, path: &DataPath) -> Result<Option<String>> {
        let file = match self.overrides.get(path) {
            Some(file) => file.clone(),
            None => match self.roots.resolve(path) {
                Some(file) => file,
                None => return Ok(None),
            },
        };

        log::debug!("Lese {}", file.display());
        let bytes = std::fs::read(&file)
            .with_context(|| format!("Datei {} konnte nicht gelesen werden", file.display()))?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

/// Zähler der Lesezugriffe einer [`MemorySource`]; bleibt nach dem Verschieben
/// der Quelle in den Store abfragbar.
#[derive(Debug, Clone, Default)]
pub struct ReadLog(Rc<RefCell<HashMap<DataPath, usize>>>);

impl ReadLog {
    pub fn count(&self, path: &DataPath) -> usize {
        self.0.borrow().get(path).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.borrow().values().sum()
    }

    fn record(&self, path: &DataPath) {
        *self.0.borrow_mut().entry(path.clone()).or_insert(0) += 1;
    }
}

/// Dateien im Speicher, für Tests und Benchmarks.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<DataPath, String>,
    reads: ReadLog,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt eine Datei hinzu (Builder-Stil)
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.files.insert(DataPath::new(path), content.into());
    }

    pub fn read_log(&self) -> ReadLog {
        self.reads.clone()
    }
}

impl ModuleSource for MemorySource {
    fn read(&self, path: &DataPath) -> Result<Option<String>> {
        self.reads.record(path);
        Ok(self.files.get(path).cloned())
    }
}
