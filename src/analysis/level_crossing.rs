//! Bahnübergänge entlang eines Fahrwegs.
//!
//! Ereignisse 27 (öffnen) und 1000027 (schließen) verweisen über `Beschr` (Modul) und
//! `Wert` (Referenznummer) auf das Signal, das den Bahnübergang sichert. Je Signal muss
//! es mindestens ein Öffnen und ein Schließen geben, und ein Signal seiner Koppelkette
//! muss den Bahnübergangs-Zähler tragen.

use super::Finding;
use crate::aspect::coupling_chain;
use crate::core::{DataPath, ElementRef, Event, EVENT_CROSSING_CLOSE, EVENT_CROSSING_OPEN};
use crate::store::{LookupError, ModuleStore, SignalHandle};
use indexmap::IndexMap;

/// Alle Bahnübergangs-Ereignisse eines Signals
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingGroup {
    pub signal: String,
    pub location: ElementRef,
    /// Fahrweg-Elemente mit Öffnen-Ereignis
    pub opens: Vec<ElementRef>,
    /// Fahrweg-Elemente mit Schließen-Ereignis
    pub closes: Vec<ElementRef>,
    /// Signal der Koppelkette mit Bahnübergangs-Zähler
    pub counter: Option<String>,
}

impl CrossingGroup {
    pub fn is_validated(&self) -> bool {
        !self.opens.is_empty() && !self.closes.is_empty() && self.counter.is_some()
    }
}

fn crossing_signal(
    store: &ModuleStore,
    at: &ElementRef,
    event: &Event,
) -> Result<SignalHandle, LookupError> {
    let module = if event.description.trim().is_empty() {
        at.module.clone()
    } else {
        DataPath::new(&event.description)
    };
    let ref_nr = reference_number(event.value).ok_or_else(|| {
        LookupError::UnresolvedReference {
            module: module.clone(),
            ref_nr: 0,
        }
    })?;
    let location = store.resolve_reference(&module, ref_nr)?;
    store.signal_near(&location)
}

/// Referenznummer aus `Wert`; negative und nicht endliche Werte verweisen nirgendwohin
fn reference_number(value: f32) -> Option<u32> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= 0.0 && rounded <= u32::MAX as f32 {
        Some(rounded as u32)
    } else {
        None
    }
}

/// Sammelt die Bahnübergangs-Ereignisse auf `path` und prüft jede Gruppe
pub fn correlate_crossings(
    store: &ModuleStore,
    path: &[ElementRef],
) -> (Vec<CrossingGroup>, Vec<Finding>) {
    let mut groups: IndexMap<ElementRef, CrossingGroup> = IndexMap::new();
    let mut findings = Vec::new();

    for at in path {
        let Ok(element) = store.element(&at.module, at.nr) else {
            continue;
        };
        for event in element
            .info(at.direction)
            .events
            .iter()
            .filter(|e| e.is_crossing_event())
        {
            let signal = match crossing_signal(store, at, event) {
                Ok(signal) => signal,
                Err(error) => {
                    findings.push(Finding::CrossingEventUnresolved {
                        at: at.clone(),
                        error,
                    });
                    continue;
                }
            };

            let group = groups
                .entry(signal.location.clone())
                .or_insert_with(|| CrossingGroup {
                    signal: signal.display_name(),
                    location: signal.location.clone(),
                    opens: Vec::new(),
                    closes: Vec::new(),
                    counter: None,
                });
            match event.code {
                EVENT_CROSSING_OPEN => group.opens.push(at.clone()),
                EVENT_CROSSING_CLOSE => group.closes.push(at.clone()),
                _ => {}
            }
        }
    }

    for group in groups.values_mut() {
        group.counter = coupling_chain(store, group.location.clone(), None).find_map(|l| {
            store
                .signal_at(&l)
                .ok()
                .filter(|s| s.has_crossing_counter())
                .map(|s| s.display_name())
        });

        if group.opens.is_empty() {
            findings.push(Finding::CrossingMissingOpen {
                crossing: group.signal.clone(),
            });
        }
        if group.closes.is_empty() {
            findings.push(Finding::CrossingMissingClose {
                crossing: group.signal.clone(),
            });
        }
        if group.counter.is_none() {
            findings.push(Finding::CrossingWithoutCounter {
                crossing: group.signal.clone(),
            });
        }
    }

    (groups.into_values().collect(), findings)
}
