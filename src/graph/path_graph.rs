//! Nachfolger- und Vorgängersuche im Gleisgraphen.

use super::BoundedWalk;
use crate::core::{ElementRef, SuccessorSlot};
use crate::store::{LookupError, ModuleStore};
use std::collections::HashMap;


/// Schrittfunktion eines Fahrweg-Laufs
pub type StepFn<'s> =
    Box<dyn FnMut(&ElementRef) -> Result<Option<ElementRef>, LookupError> + 's>;

/// Gerichteter Graph über alle Module eines [`ModuleStore`].
///
/// Knoten sind [`ElementRef`]s (Modul, Element, Richtung). Es gibt keine eigene
/// Rückwärtstabelle: der Vorgänger ist der umgekehrte Nachfolger der umgekehrten Richtung.
#[derive(Clone, Copy)]
pub struct PathGraph<'a> {
    store: &'a ModuleStore,
}

impl<'a> PathGraph<'a> {
    pub fn new(store: &'a ModuleStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a ModuleStore {
        self.store
    }

    /// Nachfolger im Slot `slot`.
    ///
    /// `Ok(None)`: Slot existiert nicht, reguläres Streckenende.
    /// `Err`: Verweis ließ sich nicht auflösen (Modul, Element oder Referenzpunkt fehlt).
    pub fn successor(
        &self,
        from: &ElementRef,
        slot: usize,
    ) -> Result<Option<ElementRef>, LookupError> {
        let module = self.store.load(&from.module)?;
        let element = module
            .element(from.nr)
            .ok_or_else(|| LookupError::MissingElement {
                module: from.module.clone(),
                nr: from.nr,
            })?;

        let Some(successor) = element.successors(from.direction).get(slot) else {
            return Ok(None);
        };

        match successor {
            SuccessorSlot::IntraModule(nr) => {
                if module.element(*nr).is_none() {
                    return Err(LookupError::MissingElement {
                        module: from.module.clone(),
                        nr: *nr,
                    });
                }
                Ok(Some(ElementRef::new(
                    from.module.clone(),
                    *nr,
                    element.entry_direction(from.direction, slot),
                )))
            }
            SuccessorSlot::InterModule {
                module: target,
                ref_nr,
            } => {
                let target = target.clone().unwrap_or_else(|| from.module.clone());
                // Der Fahrweg läuft von der Rückseite durch den Referenzpunkt
                let resolved = self.store.resolve_reference(&target, *ref_nr)?;
                Ok(Some(resolved.inverted()))
            }
        }
    }

    /// Vorgänger über Slot 0 der Gegenrichtung
    pub fn predecessor(&self, from: &ElementRef) -> Result<Option<ElementRef>, LookupError> {
        Ok(self
            .successor(&from.inverted(), 0)?
            .map(|previous| previous.inverted()))
    }

    /// Lazy Fahrweg ab `start`; an Weichen aus `switches` wird der dort gewählte Slot
    /// genommen, sonst Slot 0.
    pub fn walk<'s>(
        &'s self,
        start: ElementRef,
        limit: usize,
        switches: &'s HashMap<ElementRef, usize>,
    ) -> BoundedWalk<ElementRef, LookupError, StepFn<'s>> {
        BoundedWalk::new(
            start,
            limit,
            Box::new(move |current: &ElementRef| {
                let slot = switches.get(current).copied().unwrap_or(0);
                self.successor(current, slot)
            }),
        )
    }
}
