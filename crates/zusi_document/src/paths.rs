//! Dateipfade relativ zum Zusi-Datenverzeichnis.
//!
//! Zusi referenziert Dateien mit Backslash-Pfaden relativ zum Datenverzeichnis und
//! ignoriert dabei Gross/Kleinschreibung. [`DataPath`] ist die normalisierte Form,
//! die als Cache-Schluessel taugt; [`DataRoots`] loest sie auf ein reales Dateisystem auf.

use std::fmt;
use std::path::{Path, PathBuf};

/// Umgebungsvariable fuer das Benutzer-Datenverzeichnis (wird zuerst durchsucht).
pub const ENV_DATA_ROOT: &str = "ZUSI3_DATAPATH";
/// Umgebungsvariable fuer das offizielle Datenverzeichnis (Fallback).
pub const ENV_OFFICIAL_ROOT: &str = "ZUSI3_DATAPATH_OFFICIAL";

/// Normalisierter Pfad: Grossbuchstaben, `/` als Trenner, ohne fuehrenden Trenner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DataPath(String);

impl DataPath {
    /// Normalisiert einen Rohpfad aus einer Zusi-Datei oder der Kommandozeile
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .trim()
            .split(['\\', '/'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .map(str::to_uppercase)
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized)
    }

    /// Normalisierte Darstellung
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leerer Pfad (z.B. fehlendes `Dateiname`-Attribut)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Letzte Pfadkomponente
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Dateiname ohne Endung
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(pos) if pos > 0 => &name[..pos],
            _ => name,
        }
    }

    /// Einzelne Pfadkomponenten
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Benutzer- und offizielles Datenverzeichnis in Suchreihenfolge.
#[derive(Debug, Clone, Default)]
pub struct DataRoots {
    roots: Vec<PathBuf>,
}

impl DataRoots {
    /// Erstellt die Suchliste; fehlende Verzeichnisse werden ausgelassen
    pub fn new(user: Option<PathBuf>, official: Option<PathBuf>) -> Self {
        let roots = [user, official]
            .into_iter()
            .flatten()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        Self { roots }
    }

    /// Liest beide Verzeichnisse aus der Umgebung
    pub fn from_env() -> Self {
        let user = std::env::var_os(ENV_DATA_ROOT).map(PathBuf::from);
        let official = std::env::var_os(ENV_OFFICIAL_ROOT).map(PathBuf::from);
        if user.is_none() && official.is_none() {
            log::warn!(
                "Weder {} noch {} gesetzt, Nachbarmodule koennen nicht geladen werden",
                ENV_DATA_ROOT,
                ENV_OFFICIAL_ROOT
            );
        }
        Self::new(user, official)
    }

    /// Konfigurierte Verzeichnisse in Suchreihenfolge
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Sucht die Datei zuerst im Benutzer-, dann im offiziellen Verzeichnis
    pub fn resolve(&self, path: &DataPath) -> Option<PathBuf> {
        if path.is_empty() {
            return None;
        }
        self.roots
            .iter()
            .find_map(|root| resolve_case_insensitive(root, path))
    }

    /// Bestimmt den [`DataPath`] einer Datei, die unterhalb eines Datenverzeichnisses liegt
    pub fn relative_path(&self, file: &Path) -> Option<DataPath> {
        let file = file.canonicalize().ok()?;
        self.roots.iter().find_map(|root| {
            let root = root.canonicalize().ok()?;
            let relative = file.strip_prefix(&root).ok()?;
            Some(DataPath::new(&relative.to_string_lossy()))
        })
    }
}

/// Geht den Pfad komponentenweise durch und vergleicht Verzeichniseintraege
/// ohne Beachtung der Gross/Kleinschreibung.
pub fn resolve_case_insensitive(root: &Path, path: &DataPath) -> Option<PathBuf> {
    let mut current = root.to_path_buf();
    for component in path.components() {
        let exact = current.join(component);
        if exact.exists() {
            current = exact;
            continue;
        }
        let entry = std::fs::read_dir(&current)
            .ok()?
            .filter_map(Result::ok)
            .find(|entry| entry.file_name().to_string_lossy().to_uppercase() == component)?;
        current = entry.path();
    }
    current.is_file().then_some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_data_path_normalization() {
        let a = DataPath::new(r"\Routes\Deutschland\Test\modul.st3");
        let b = DataPath::new("routes/deutschland//test/MODUL.ST3 ");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "ROUTES/DEUTSCHLAND/TEST/MODUL.ST3");
        assert_eq!(a.file_name(), "MODUL.ST3");
        assert_eq!(a.file_stem(), "MODUL");
        assert!(DataPath::new("  ").is_empty());
    }

    #[test]
    fn test_resolve_ignores_case() {
        let dir = tempfile::tempdir().expect("Tempdir");
        let module_dir = dir.path().join("Routes").join("Test");
        fs::create_dir_all(&module_dir).expect("Verzeichnis");
        fs::write(module_dir.join("Modul.st3"), "<Zusi/>").expect("Datei");

        let roots = DataRoots::new(Some(dir.path().to_path_buf()), None);
        let resolved = roots
            .resolve(&DataPath::new(r"ROUTES\test\modul.ST3"))
            .expect("Datei erwartet");
        assert!(resolved.ends_with("Routes/Test/Modul.st3"));
        assert!(roots.resolve(&DataPath::new("Routes/Test/Fehlt.st3")).is_none());
    }

    #[test]
    fn test_official_root_is_fallback() {
        let user = tempfile::tempdir().expect("Tempdir");
        let official = tempfile::tempdir().expect("Tempdir");
        fs::write(user.path().join("a.st3"), "user").expect("Datei");
        fs::write(official.path().join("a.st3"), "official").expect("Datei");
        fs::write(official.path().join("b.st3"), "official").expect("Datei");

        let roots = DataRoots::new(
            Some(user.path().to_path_buf()),
            Some(official.path().to_path_buf()),
        );
        let a = roots.resolve(&DataPath::new("A.ST3")).expect("a erwartet");
        let b = roots.resolve(&DataPath::new("B.ST3")).expect("b erwartet");
        assert_eq!(fs::read_to_string(a).unwrap(), "user");
        assert_eq!(fs::read_to_string(b).unwrap(), "official");
    }

    #[test]
    fn test_relative_path_inside_root() {
        let dir = tempfile::tempdir().expect("Tempdir");
        fs::create_dir_all(dir.path().join("Routes")).expect("Verzeichnis");
        let file = dir.path().join("Routes").join("x.st3");
        fs::write(&file, "").expect("Datei");

        let roots = DataRoots::new(Some(dir.path().to_path_buf()), None);
        assert_eq!(roots.relative_path(&file), Some(DataPath::new("Routes/x.st3")));
    }
}
