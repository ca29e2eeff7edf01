//! Analyse einer einzelnen Fahrstraße.
//!
//! Ablauf je Fahrstraße:
//! 1. Start und Ziel auflösen
//! 2. Weichenstellungen sammeln und den Fahrweg rekonstruieren
//! 3. Hauptsignale: Begriff, Koppelkette, Mindestgeschwindigkeit, Lage zum Fahrweg
//! 4. Vorsignale: angezeigte Geschwindigkeit gegen die Mindestgeschwindigkeit
//! 5. Register und (optional) Bahnübergänge
//!
//! Scheitert ein Schritt, wird ein [`Finding`] erzeugt und mit dem nächsten weitergemacht.

use super::level_crossing::{correlate_crossings, CrossingGroup};
use super::{Finding, PlacementRole};
use crate::aspect::{coupling_chain, Aspect, AspectResolver};
use crate::core::{speed, DataPath, ElementRef, PlacementRef, Route};
use crate::graph::{PathGraph, WalkEnd};
use crate::shared::AnalysisOptions;
use crate::store::{LookupError, ModuleStore, SignalHandle};
use std::collections::HashMap;

/// Gekoppeltes Signal auf derselben Zeile
#[derive(Debug, Clone, PartialEq)]
pub struct CoupledLine {
    pub signal: String,
    pub location: ElementRef,
    /// `None`, wenn das Signal die Zeile nicht hat
    pub speed: Option<f32>,
    pub aspect: Option<Aspect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainSignalLine {
    pub reference: PlacementRef,
    pub row: usize,
    /// Bezeichnung des Ersatzsignals, falls die Platzierung eines ist
    pub substitute: Option<String>,
    pub signal: Option<String>,
    pub location: Option<ElementRef>,
    /// Geschwindigkeit der Zeile; Ersatzsignal zählt als 0
    pub speed: Option<f32>,
    pub aspect: Option<Aspect>,
    pub coupled: Vec<CoupledLine>,
    pub outside_route: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistantSignalLine {
    pub reference: PlacementRef,
    pub column: usize,
    pub signal: Option<String>,
    pub location: Option<ElementRef>,
    pub speed: Option<f32>,
    pub aspect: Option<Aspect>,
    pub exceeds_limit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchLine {
    pub reference: PlacementRef,
    pub location: Option<ElementRef>,
    pub slot: usize,
    /// Anzahl Nachfolger in Fahrtrichtung
    pub successors: usize,
}

impl SwitchLine {
    pub fn slot_valid(&self) -> bool {
        self.slot < self.successors
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterLine {
    pub reference: PlacementRef,
    pub location: Option<ElementRef>,
    pub label: String,
}

/// Ergebnis der Analyse einer Fahrstraße
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    /// Modul, in dem die Fahrstraße definiert ist
    pub module: DataPath,
    pub route: Route,
    pub start: Option<ElementRef>,
    pub target: Option<ElementRef>,
    /// Rekonstruierter Fahrweg ab Start
    pub path: Vec<ElementRef>,
    pub reached_target: bool,
    /// Kleinste Hauptsignalgeschwindigkeit, negativ = unbegrenzt
    pub min_speed: f32,
    pub main_signals: Vec<MainSignalLine>,
    pub distant_signals: Vec<DistantSignalLine>,
    pub switches: Vec<SwitchLine>,
    pub registers: Vec<RegisterLine>,
    pub crossings: Vec<CrossingGroup>,
    pub findings: Vec<Finding>,
}

impl RouteReport {
    fn new(module: DataPath, route: &Route) -> Self {
        Self {
            module,
            route: route.clone(),
            start: None,
            target: None,
            path: Vec::new(),
            reached_target: false,
            min_speed: speed::UNCONSTRAINED,
            main_signals: Vec::new(),
            distant_signals: Vec::new(),
            switches: Vec::new(),
            registers: Vec::new(),
            crossings: Vec::new(),
            findings: Vec::new(),
        }
    }

    pub fn has_finding(&self, kind: super::FindingKind) -> bool {
        self.findings.iter().any(|f| f.kind() == kind)
    }

    fn on_path(&self, location: &ElementRef) -> bool {
        self.path.contains(location)
    }
}

/// Analysiert Fahrstraßen gegen den Inhalt eines [`ModuleStore`]
pub struct RouteAnalyzer<'a> {
    store: &'a ModuleStore,
    graph: PathGraph<'a>,
    resolver: AspectResolver<'a>,
    options: &'a AnalysisOptions,
}

impl<'a> RouteAnalyzer<'a> {
    pub fn new(store: &'a ModuleStore, options: &'a AnalysisOptions) -> Self {
        Self {
            store,
            graph: PathGraph::new(store),
            resolver: AspectResolver::new(store),
            options,
        }
    }

    /// Analysiert alle Fahrstraßen eines Moduls in Dateireihenfolge
    pub fn analyze_module(&self, module: &DataPath) -> Result<Vec<RouteReport>, LookupError> {
        let loaded = self.store.load(module)?;
        Ok(loaded
            .routes
            .iter()
            .map(|route| self.analyze(module, route))
            .collect())
    }

    pub fn analyze(&self, module: &DataPath, route: &Route) -> RouteReport {
        log::debug!("Analysiere Fahrstrasse '{}'", route.name);
        let mut report = RouteReport::new(module.clone(), route);

        match self.resolve(&route.start) {
            Ok(start) => report.start = Some(start),
            Err(e) => report.findings.push(Finding::UnresolvedStart(e)),
        }
        match self.resolve(&route.target) {
            Ok(target) => report.target = Some(target),
            Err(e) => report.findings.push(Finding::UnresolvedTarget(e)),
        }

        let switch_map = self.collect_switches(route, &mut report);
        self.reconstruct_path(&switch_map, &mut report);
        self.check_main_signals(route, &mut report);
        self.check_distant_signals(route, &mut report);
        self.collect_registers(route, &mut report);

        if self.options.check_level_crossings {
            let (groups, findings) = correlate_crossings(self.store, &report.path);
            report.crossings = groups;
            report.findings.extend(findings);
        }

        report
    }

    fn resolve(&self, reference: &PlacementRef) -> Result<ElementRef, LookupError> {
        self.store
            .resolve_reference(&reference.module, reference.ref_nr)
    }

    fn resolve_signal(&self, reference: &PlacementRef) -> Result<SignalHandle, LookupError> {
        let location = self.resolve(reference)?;
        self.store.signal_near(&location)
    }

    // ── Fahrweg ─────────────────────────────────────────────────────

    fn collect_switches(
        &self,
        route: &Route,
        report: &mut RouteReport,
    ) -> HashMap<ElementRef, usize> {
        let mut switch_map = HashMap::new();
        for placement in &route.switches {
            let resolved = self.resolve(&placement.reference).and_then(|location| {
                let element = self.store.element(&location.module, location.nr)?;
                let successors = element.successors(location.direction).len();
                Ok((location, successors))
            });

            match resolved {
                Ok((location, successors)) => {
                    let line = SwitchLine {
                        reference: placement.reference.clone(),
                        location: Some(location.clone()),
                        slot: placement.slot,
                        successors,
                    };
                    if !line.slot_valid() {
                        report.findings.push(Finding::InvalidPlacement {
                            role: PlacementRole::Switch,
                            reference: placement.reference.clone(),
                            error: LookupError::OutOfRangeIndex {
                                what: "Weichenlage",
                                index: placement.slot,
                                len: successors,
                            },
                        });
                    }
                    switch_map.insert(location, placement.slot);
                    report.switches.push(line);
                }
                Err(error) => {
                    report.findings.push(Finding::InvalidPlacement {
                        role: PlacementRole::Switch,
                        reference: placement.reference.clone(),
                        error,
                    });
                    report.switches.push(SwitchLine {
                        reference: placement.reference.clone(),
                        location: None,
                        slot: placement.slot,
                        successors: 0,
                    });
                }
            }
        }
        switch_map
    }

    fn reconstruct_path(&self, switch_map: &HashMap<ElementRef, usize>, report: &mut RouteReport) {
        let (Some(start), Some(target)) = (report.start.clone(), report.target.clone()) else {
            return;
        };

        let mut walk = self
            .graph
            .walk(start, self.options.max_path_steps, switch_map);
        for location in walk.by_ref() {
            let reached = location == target;
            report.path.push(location);
            if reached {
                report.reached_target = true;
                return;
            }
        }

        let last = report.path.last().cloned().unwrap_or(target);
        let finding = match walk.end() {
            Some(WalkEnd::Cycle(at)) => Finding::CyclicPath(at.clone()),
            Some(WalkEnd::LimitReached(steps)) => Finding::PathTooLong(*steps),
            Some(WalkEnd::Failed(error)) => Finding::PathInterrupted {
                at: last,
                error: error.clone(),
            },
            Some(WalkEnd::Finished) | None => Finding::PathEnded { at: last },
        };
        log::debug!("Fahrweg unvollstaendig: {}", finding);
        report.findings.push(finding);
    }

    // ── Hauptsignale ────────────────────────────────────────────────

    fn check_main_signals(&self, route: &Route, report: &mut RouteReport) {
        for placement in &route.main_signals {
            let mut line = MainSignalLine {
                reference: placement.reference.clone(),
                row: placement.row,
                substitute: None,
                signal: None,
                location: None,
                speed: None,
                aspect: None,
                coupled: Vec::new(),
                outside_route: false,
            };

            let signal = match self.resolve_signal(&placement.reference) {
                Ok(signal) => signal,
                Err(error) => {
                    report.findings.push(Finding::InvalidPlacement {
                        role: PlacementRole::MainSignal,
                        reference: placement.reference.clone(),
                        error,
                    });
                    report.main_signals.push(line);
                    continue;
                }
            };
            line.signal = Some(signal.display_name());
            line.location = Some(signal.location.clone());

            let governing = if placement.substitute {
                line.substitute = Some(
                    signal
                        .substitutes
                        .get(placement.row)
                        .map(|s| s.label.clone())
                        .unwrap_or_default(),
                );
                Some(0.0)
            } else {
                signal.main_aspects.get(placement.row).map(|a| a.speed)
            };
            line.speed = governing;

            match self
                .resolver
                .main_row(&signal, placement.row, placement.substitute)
            {
                Ok(aspect) => line.aspect = Some(aspect),
                Err(error) => report.findings.push(Finding::InvalidPlacement {
                    role: PlacementRole::MainSignal,
                    reference: placement.reference.clone(),
                    error,
                }),
            }

            // Zeilen mit 0 ohne Ersatzsignal (z.B. Flachkreuzungen) begrenzen nicht
            if let Some(v) = governing {
                if placement.substitute || v != 0.0 {
                    report.min_speed = speed::combine_min_speed(report.min_speed, v);
                }
            }

            line.coupled = self.follow_coupling(&signal, placement.row, report);

            if self.options.signal_outside_route.is_enabled()
                && report.reached_target
                && !signal.orientations().iter().any(|o| report.on_path(o))
            {
                line.outside_route = true;
                report.findings.push(Finding::SignalOutsideRoute {
                    signal: signal.display_name(),
                    location: signal.location.clone(),
                });
            }

            report.main_signals.push(line);
        }
    }

    fn follow_coupling(
        &self,
        signal: &SignalHandle,
        row: usize,
        report: &mut RouteReport,
    ) -> Vec<CoupledLine> {
        let mut lines = Vec::new();
        let mut chain = coupling_chain(self.store, signal.location.clone(), Some(row));
        // Erstes Element ist das Signal selbst
        for location in chain.by_ref().skip(1) {
            let Ok(coupled) = self.store.signal_at(&location) else {
                continue;
            };
            lines.push(CoupledLine {
                signal: coupled.display_name(),
                location: location.clone(),
                speed: coupled.main_aspects.get(row).map(|a| a.speed),
                aspect: self.resolver.main_row(&coupled, row, false).ok(),
            });
        }

        match chain.end() {
            Some(WalkEnd::Cycle(at)) => report.findings.push(Finding::CircularCoupling {
                signal: signal.display_name(),
                at: at.clone(),
            }),
            Some(WalkEnd::Failed(error)) => report.findings.push(Finding::InvalidCoupling {
                signal: signal.display_name(),
                error: error.clone(),
            }),
            Some(WalkEnd::LimitReached(_)) => report.findings.push(Finding::InvalidCoupling {
                signal: signal.display_name(),
                error: LookupError::CyclicReference(signal.location.clone()),
            }),
            Some(WalkEnd::Finished) | None => {}
        }
        lines
    }

    // ── Vorsignale ──────────────────────────────────────────────────

    fn check_distant_signals(&self, route: &Route, report: &mut RouteReport) {
        for placement in &route.distant_signals {
            let mut line = DistantSignalLine {
                reference: placement.reference.clone(),
                column: placement.column,
                signal: None,
                location: None,
                speed: None,
                aspect: None,
                exceeds_limit: false,
            };

            let signal = match self.resolve_signal(&placement.reference) {
                Ok(signal) => signal,
                Err(error) => {
                    report.findings.push(Finding::InvalidPlacement {
                        role: PlacementRole::DistantSignal,
                        reference: placement.reference.clone(),
                        error,
                    });
                    report.distant_signals.push(line);
                    continue;
                }
            };
            line.signal = Some(signal.display_name());
            line.location = Some(signal.location.clone());

            match signal.distant_aspects.get(placement.column) {
                Some(distant) => line.speed = Some(distant.speed),
                None => report.findings.push(Finding::InvalidPlacement {
                    role: PlacementRole::DistantSignal,
                    reference: placement.reference.clone(),
                    error: LookupError::OutOfRangeIndex {
                        what: "Vorsignalspalte",
                        index: placement.column,
                        len: signal.distant_aspects.len(),
                    },
                }),
            }
            line.aspect = self.resolver.column(&signal, placement.column).ok();

            if let Some(shown) = line.speed {
                if self.options.distant_speed.is_enabled()
                    && speed::exceeds(shown, report.min_speed)
                {
                    line.exceeds_limit = true;
                    report.findings.push(Finding::DistantSpeedExceeded {
                        signal: signal.display_name(),
                        shown,
                        limit: report.min_speed,
                    });
                }
            }

            report.distant_signals.push(line);
        }
    }

    // ── Register ────────────────────────────────────────────────────

    fn collect_registers(&self, route: &Route, report: &mut RouteReport) {
        for placement in &route.registers {
            let point = self
                .store
                .reference_point(&placement.reference.module, placement.reference.ref_nr);
            let location = self.resolve(&placement.reference);
            match (point, location) {
                (Ok(point), Ok(location)) => report.registers.push(RegisterLine {
                    reference: placement.reference.clone(),
                    location: Some(location),
                    label: point.label,
                }),
                (Err(error), _) | (_, Err(error)) => {
                    report.findings.push(Finding::InvalidPlacement {
                        role: PlacementRole::Register,
                        reference: placement.reference.clone(),
                        error,
                    });
                    report.registers.push(RegisterLine {
                        reference: placement.reference.clone(),
                        location: None,
                        label: String::new(),
                    });
                }
            }
        }
    }
}
