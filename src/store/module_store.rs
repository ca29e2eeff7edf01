//! Modul-Cache mit Negativ-Cache und Animationsnamen.

use super::{FsSource, LookupError, ModuleSource};
use crate::core::{DataPath, ElementRef, Module, ReferencePoint, Signal, TrackElement};
use crate::xml;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;

#[cfg(test)]
mod tests;

/// Verweis auf ein Signal innerhalb eines geladenen Moduls.
///
/// Hält das Modul per `Rc` am Leben und dereferenziert auf das [`Signal`].
#[derive(Debug, Clone)]
pub struct SignalHandle {
    module: Rc<Module>,
    index: usize,
}

impl SignalHandle {
    pub fn module(&self) -> &Rc<Module> {
        &self.module
    }
}

impl Deref for SignalHandle {
    type Target = Signal;

    fn deref(&self) -> &Signal {
        &self.module.signals[self.index]
    }
}

/// Lädt Module bei Bedarf genau einmal.
///
/// Erfolgreiche Ladevorgänge landen in `modules`, fehlgeschlagene dauerhaft in `missing`.
/// Beide Caches werden über den normalisierten [`DataPath`] adressiert. Der Store ist
/// für einen Thread gedacht; die Caches liegen in `RefCell`s.
pub struct ModuleStore {
    source: Box<dyn ModuleSource>,
    modules: RefCell<HashMap<DataPath, Rc<Module>>>,
    missing: RefCell<HashMap<DataPath, LookupError>>,
    animations: RefCell<HashMap<DataPath, Rc<[String]>>>,
}

impl Default for ModuleStore {
    fn default() -> Self {
        Self::new(FsSource::default())
    }
}

impl ModuleStore {
    pub fn new(source: impl ModuleSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            modules: RefCell::new(HashMap::new()),
            missing: RefCell::new(HashMap::new()),
            animations: RefCell::new(HashMap::new()),
        }
    }

    // ── Module ──────────────────────────────────────────────────────

    /// Lädt ein Modul oder liefert das gecachte Ergebnis.
    ///
    /// Auch ein Fehlschlag wird gecacht: jede weitere Anfrage liefert denselben
    /// Fehler, ohne die Quelle erneut zu lesen.
    pub fn load(&self, id: &DataPath) -> Result<Rc<Module>, LookupError> {
        if let Some(module) = self.modules.borrow().get(id) {
            return Ok(Rc::clone(module));
        }
        if let Some(error) = self.missing.borrow().get(id) {
            return Err(error.clone());
        }

        match self.read_module(id) {
            Ok(module) => {
                let module = Rc::new(module);
                self.modules
                    .borrow_mut()
                    .insert(id.clone(), Rc::clone(&module));
                Ok(module)
            }
            Err(error) => {
                log::warn!("{}", error);
                self.missing.borrow_mut().insert(id.clone(), error.clone());
                Err(error)
            }
        }
    }

    fn read_module(&self, id: &DataPath) -> Result<Module, LookupError> {
        if id.is_empty() {
            return Err(LookupError::MissingModule(id.clone()));
        }
        let content = match self.source.read(id) {
            Ok(Some(content)) => content,
            Ok(None) => return Err(LookupError::MissingModule(id.clone())),
            Err(e) => {
                log::warn!("{:#}", e);
                return Err(LookupError::MissingModule(id.clone()));
            }
        };
        log::debug!("Cache-Miss: lade Modul {}", id);
        xml::parse_module(id.clone(), &content).map_err(|e| LookupError::MalformedModule {
            path: id.clone(),
            message: format!("{:#}", e),
        })
    }

    /// Ist das Modul dauerhaft als nicht ladbar vermerkt?
    pub fn is_missing(&self, id: &DataPath) -> bool {
        self.missing.borrow().contains_key(id)
    }

    /// Anzahl erfolgreich geladener Module
    pub fn loaded_count(&self) -> usize {
        self.modules.borrow().len()
    }

    // ── Elemente und Referenzpunkte ─────────────────────────────────

    /// Liefert eine Kopie des Elements `nr` im Modul `module`
    pub fn element(&self, module: &DataPath, nr: u32) -> Result<TrackElement, LookupError> {
        self.load(module)?
            .element(nr)
            .cloned()
            .ok_or_else(|| LookupError::MissingElement {
                module: module.clone(),
                nr,
            })
    }

    pub fn reference_point(
        &self,
        module: &DataPath,
        nr: u32,
    ) -> Result<ReferencePoint, LookupError> {
        self.load(module)?
            .reference(nr)
            .cloned()
            .ok_or_else(|| LookupError::UnresolvedReference {
                module: module.clone(),
                ref_nr: nr,
            })
    }

    /// Löst einen Referenzpunkt auf Element und Richtung auf.
    ///
    /// Ein Referenzpunkt ohne zugehöriges Element ergibt [`LookupError::MissingElement`].
    pub fn resolve_reference(&self, module: &DataPath, nr: u32) -> Result<ElementRef, LookupError> {
        let loaded = self.load(module)?;
        let point = loaded
            .reference(nr)
            .ok_or_else(|| LookupError::UnresolvedReference {
                module: module.clone(),
                ref_nr: nr,
            })?;
        if loaded.element(point.element_nr).is_none() {
            return Err(LookupError::MissingElement {
                module: module.clone(),
                nr: point.element_nr,
            });
        }
        Ok(ElementRef::new(
            module.clone(),
            point.element_nr,
            point.direction,
        ))
    }

    // ── Signale ─────────────────────────────────────────────────────

    /// Signal an Element und Richtung
    pub fn signal_at(&self, location: &ElementRef) -> Result<SignalHandle, LookupError> {
        let module = self.load(&location.module)?;
        if module.element(location.nr).is_none() {
            return Err(LookupError::MissingElement {
                module: location.module.clone(),
                nr: location.nr,
            });
        }
        let index = module
            .signal_index_at(location.nr, location.direction)
            .ok_or_else(|| LookupError::MissingSignal(location.clone()))?;
        Ok(SignalHandle { module, index })
    }

    /// Signal, auf das ein Referenzpunkt zeigt
    pub fn signal_by_reference(
        &self,
        module: &DataPath,
        nr: u32,
    ) -> Result<SignalHandle, LookupError> {
        let location = self.resolve_reference(module, nr)?;
        self.signal_at(&location)
    }

    /// Sucht ein Signal an `location`, bei Bedarf auch in Gegenrichtung,
    /// sofern es dort laut Flag ebenfalls gilt.
    pub fn signal_near(&self, location: &ElementRef) -> Result<SignalHandle, LookupError> {
        match self.signal_at(location) {
            Err(LookupError::MissingSignal(_)) => {
                let reversed = self.signal_at(&location.inverted())?;
                if reversed.valid_in_opposite_direction() {
                    Ok(reversed)
                } else {
                    Err(LookupError::MissingSignal(location.clone()))
                }
            }
            other => other,
        }
    }

    // ── Animationen ─────────────────────────────────────────────────

    /// Animationsnamen einer Landschaftsdatei (`.ls3`), einmal gelesen und gemerkt.
    ///
    /// Fehlende oder unlesbare Dateien ergeben eine leere Liste; der Frame belegt
    /// dann genau ein unbenanntes Bit.
    pub fn animation_names(&self, file: &DataPath) -> Rc<[String]> {
        if let Some(names) = self.animations.borrow().get(file) {
            return Rc::clone(names);
        }

        let names: Rc<[String]> = match self.source.read(file) {
            Ok(Some(content)) => match xml::parse_animation_names(&content) {
                Ok(names) => names.into(),
                Err(e) => {
                    log::warn!("Animationen in {} nicht lesbar: {:#}", file, e);
                    Rc::from(Vec::new())
                }
            },
            Ok(None) => {
                log::warn!("Landschaftsdatei {} nicht gefunden", file);
                Rc::from(Vec::new())
            }
            Err(e) => {
                log::warn!("{:#}", e);
                Rc::from(Vec::new())
            }
        };

        self.animations
            .borrow_mut()
            .insert(file.clone(), Rc::clone(&names));
        names
    }
}
