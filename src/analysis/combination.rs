//! Übergänge von Signalbegriffen zwischen aufeinanderfolgenden Fahrstraßen.
//!
//! Für ein Signal S: Fahrstraße R1 stellt S auf Zeile r, Fahrstraße R2 beginnt am Ziel
//! von R1 und stellt die Vorsignalspalte c an S. Wird R2 nachträglich eingestellt,
//! wechselt S von der Spalte mit Vorsignalgeschwindigkeit 0 auf c. Der Übergang ist
//! unstetig, wenn dabei ein gesetztes Bildbit gelöscht wird.

use super::Finding;
use crate::aspect::{Aspect, AspectResolver};
use crate::core::{speed, DataPath, ElementRef, PlacementRef, Route};
use crate::store::{LookupError, ModuleStore, SignalHandle};

/// Ausgang einer Kombination
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// R2 stellt an S keine Vorsignalspalte
    DistantNotSet,
    /// Spaltengeschwindigkeit passt nicht zur Fahrstraßengeschwindigkeit von R2;
    /// S bleibt in der Halt-erwartet-Spalte
    DifferentSpeeds { column_speed: f32, route_speed: f32 },
    /// Begriff vor und nach dem Einstellen von R2
    Aspects {
        column: usize,
        before: Aspect,
        after: Aspect,
        /// Bits, die beim Wechsel gelöscht werden
        cleared: u64,
    },
}

impl Transition {
    pub fn is_discontinuous(&self) -> bool {
        matches!(self, Transition::Aspects { cleared, .. } if *cleared != 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub incoming: String,
    pub outgoing: String,
    pub row: usize,
    pub transition: Result<Transition, LookupError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinationReport {
    pub signal: String,
    pub location: ElementRef,
    pub combinations: Vec<Combination>,
    pub findings: Vec<Finding>,
}

pub struct CombinationAnalyzer<'a> {
    store: &'a ModuleStore,
    resolver: AspectResolver<'a>,
}

impl<'a> CombinationAnalyzer<'a> {
    pub fn new(store: &'a ModuleStore) -> Self {
        Self {
            store,
            resolver: AspectResolver::new(store),
        }
    }

    fn resolve(&self, reference: &PlacementRef) -> Result<ElementRef, LookupError> {
        self.store
            .resolve_reference(&reference.module, reference.ref_nr)
    }

    fn resolve_signal(&self, reference: &PlacementRef) -> Result<SignalHandle, LookupError> {
        let location = self.resolve(reference)?;
        self.store.signal_near(&location)
    }

    fn places(&self, reference: &PlacementRef, location: &ElementRef) -> bool {
        self.resolve_signal(reference)
            .map(|s| &s.location == location)
            .unwrap_or(false)
    }

    /// Listet alle Kombinationen für das Signal am Referenzpunkt `signal_ref`
    pub fn analyze(
        &self,
        module: &DataPath,
        signal_ref: u32,
    ) -> Result<CombinationReport, LookupError> {
        let location = self.store.resolve_reference(module, signal_ref)?;
        let signal = self.store.signal_near(&location)?;
        let loaded = self.store.load(module)?;
        let routes = &loaded.routes;

        let starts: Vec<Option<ElementRef>> =
            routes.iter().map(|r| self.resolve(&r.start).ok()).collect();

        let mut report = CombinationReport {
            signal: signal.display_name(),
            location: signal.location.clone(),
            combinations: Vec::new(),
            findings: Vec::new(),
        };

        for incoming in routes {
            for placement in incoming
                .main_signals
                .iter()
                .filter(|p| !p.substitute && self.places(&p.reference, &signal.location))
            {
                let target = match self.resolve(&incoming.target) {
                    Ok(target) => target,
                    Err(error) => {
                        report.findings.push(Finding::UnresolvedTarget(error));
                        continue;
                    }
                };

                for (outgoing, _) in routes
                    .iter()
                    .zip(&starts)
                    .filter(|(_, start)| start.as_ref() == Some(&target))
                {
                    report.combinations.push(Combination {
                        incoming: incoming.name.clone(),
                        outgoing: outgoing.name.clone(),
                        row: placement.row,
                        transition: self.transition(&signal, placement.row, outgoing),
                    });
                }
            }
        }

        log::debug!(
            "{} Kombinationen fuer Signal {}",
            report.combinations.len(),
            report.signal
        );
        Ok(report)
    }

    fn transition(
        &self,
        signal: &SignalHandle,
        row: usize,
        outgoing: &Route,
    ) -> Result<Transition, LookupError> {
        let Some(placement) = outgoing
            .distant_signals
            .iter()
            .find(|p| self.places(&p.reference, &signal.location))
        else {
            return Ok(Transition::DistantNotSet);
        };

        let column = placement.column;
        let column_speed = signal
            .distant_aspects
            .get(column)
            .map(|d| d.speed)
            .ok_or(LookupError::OutOfRangeIndex {
                what: "Vorsignalspalte",
                index: column,
                len: signal.distant_aspects.len(),
            })?;
        let route_speed = self.governing_speed(outgoing);

        if !speed::same_speed(column_speed, route_speed) {
            return Ok(Transition::DifferentSpeeds {
                column_speed,
                route_speed,
            });
        }

        let before = self
            .resolver
            .cell(signal, row, signal.zero_speed_column())?;
        let after = self.resolver.cell(signal, row, column)?;
        let cleared = before.picture & !after.picture;
        Ok(Transition::Aspects {
            column,
            before,
            after,
            cleared,
        })
    }

    /// Geschwindigkeit am ersten Hauptsignal einer Fahrstraße; Ersatzsignal zählt als 0
    fn governing_speed(&self, route: &Route) -> f32 {
        let Some(first) = route.main_signals.first() else {
            return speed::UNCONSTRAINED;
        };
        if first.substitute {
            return 0.0;
        }
        self.resolve_signal(&first.reference)
            .ok()
            .and_then(|s| s.main_aspects.get(first.row).map(|a| a.speed))
            .unwrap_or(speed::UNCONSTRAINED)
    }
}
