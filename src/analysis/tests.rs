use super::*;
use crate::core::{DataPath, Direction, ElementRef};
use crate::shared::{AnalysisOptions, CheckMode};
use crate::store::{LookupError, MemorySource, ModuleStore};
use approx::assert_relative_eq;

fn store() -> ModuleStore {
    ModuleStore::new(
        MemorySource::new()
            .with_file(
                "Routes\\Test\\A.st3",
                include_str!("../../tests/fixtures/Routes/Test/A.st3"),
            )
            .with_file(
                "Routes\\Test\\B.st3",
                include_str!("../../tests/fixtures/Routes/Test/B.st3"),
            )
            .with_file(
                "Routes\\Test\\C.st3",
                include_str!("../../tests/fixtures/Routes/Test/C.st3"),
            )
            .with_file("Signals\\Hp.ls3", include_str!("../../tests/fixtures/Signals/Hp.ls3"))
            .with_file("Signals\\Zs3.ls3", include_str!("../../tests/fixtures/Signals/Zs3.ls3")),
    )
}

fn module_a() -> DataPath {
    DataPath::new("Routes/Test/A.st3")
}

fn a(nr: u32) -> ElementRef {
    ElementRef::new(module_a(), nr, Direction::Norm)
}

fn b(nr: u32) -> ElementRef {
    ElementRef::new(DataPath::new("Routes/Test/B.st3"), nr, Direction::Norm)
}

fn module_c() -> DataPath {
    DataPath::new("Routes/Test/C.st3")
}

fn c(nr: u32) -> ElementRef {
    ElementRef::new(module_c(), nr, Direction::Norm)
}

fn analyze(store: &ModuleStore, options: &AnalysisOptions, name: &str) -> RouteReport {
    analyze_in(store, options, &module_a(), name)
}

fn analyze_in(
    store: &ModuleStore,
    options: &AnalysisOptions,
    module: &DataPath,
    name: &str,
) -> RouteReport {
    let loaded = store.load(module).expect("Modul");
    let route = loaded
        .routes
        .iter()
        .find(|r| r.name == name)
        .expect("Fahrstrasse fehlt");
    RouteAnalyzer::new(store, options).analyze(module, route)
}

/// Fehler der ungültigen Platzierungen einer Rolle
fn invalid_placements(report: &RouteReport, role: PlacementRole) -> Vec<LookupError> {
    report
        .findings
        .iter()
        .filter_map(|f| match f {
            Finding::InvalidPlacement {
                role: r, error, ..
            } if *r == role => Some(error.clone()),
            _ => None,
        })
        .collect()
}

// ── Fahrstraßen ─────────────────────────────────────────────────────

#[test]
fn test_route_path_and_signals() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "A -> F");

    assert!(report.reached_target);
    assert_eq!(report.path, vec![a(1), a(2), a(3), a(4), a(6)]);
    assert_relative_eq!(report.min_speed, 16.6667, epsilon = 1e-4);

    assert_eq!(report.main_signals.len(), 2);
    let main = &report.main_signals[0];
    assert_eq!(main.signal.as_deref(), Some("Adorf A"));
    assert_eq!(
        main.aspect.as_ref().map(|a| a.label.as_str()),
        Some("Hp2 + Zs3")
    );
    assert!(!main.outside_route);

    let exit = &report.main_signals[1];
    assert_eq!(exit.coupled.len(), 1);
    assert_eq!(exit.coupled[0].signal, "Adorf F Ks");
    assert_eq!(exit.coupled[0].speed, Some(-1.0));

    let switches = &report.switches;
    assert_eq!(switches.len(), 1);
    assert!(switches[0].slot_valid());
    assert_eq!(report.registers[0].label, "Reg 6");
}

#[test]
fn test_distant_speed_exceeding_minimum_is_reported_once() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "A -> F");

    let exceeded: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.kind() == FindingKind::DistantSpeed)
        .collect();
    assert_eq!(exceeded.len(), 1);
    match exceeded[0] {
        Finding::DistantSpeedExceeded { signal, shown, limit } => {
            assert_eq!(signal, "Adorf Vf");
            assert_relative_eq!(*shown, 22.2222, epsilon = 1e-4);
            assert_relative_eq!(*limit, 16.6667, epsilon = 1e-4);
        }
        other => panic!("unerwarteter Befund {:?}", other),
    }
    assert_eq!(report.findings.len(), 1);

    assert!(report.distant_signals[0].exceeds_limit);
    assert!(!report.distant_signals[1].exceeds_limit);
    assert_eq!(
        report.distant_signals[1].aspect.as_ref().map(|a| a.label.as_str()),
        Some("Vr1")
    );
}

#[test]
fn test_distant_speed_check_can_be_disabled() {
    let store = store();
    let options = AnalysisOptions {
        distant_speed: CheckMode::Ignore,
        ..Default::default()
    };
    let report = analyze(&store, &options, "A -> F");
    assert!(report.findings.is_empty());
}

#[test]
fn test_unresolved_target_still_reports_placements() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "A -> Sperr");

    let unresolved = report
        .findings
        .iter()
        .filter(|f| matches!(f, Finding::UnresolvedTarget(_)))
        .count();
    assert_eq!(unresolved, 1);
    assert!(report.path.is_empty());
    assert!(report.start.is_some());

    assert_eq!(report.main_signals.len(), 2);
    assert!(report.main_signals.iter().all(|m| m.signal.is_some()));
    assert_eq!(report.distant_signals.len(), 1);
    assert_eq!(report.distant_signals[0].signal.as_deref(), Some("Adorf Vf"));
    assert!(report.has_finding(FindingKind::DistantSpeed));
}

#[test]
fn test_dead_end_before_target() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "A -> F ueber Gleis 5");

    assert!(!report.reached_target);
    assert_eq!(report.path.last(), Some(&a(5)));
    assert_eq!(report.findings, vec![Finding::PathEnded { at: a(5) }]);
}

#[test]
fn test_cyclic_path_is_reported() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "Kreis");

    assert_eq!(report.path, vec![a(8), a(9)]);
    assert_eq!(report.findings, vec![Finding::CyclicPath(a(8))]);
}

#[test]
fn test_path_step_limit() {
    let store = store();
    let options = AnalysisOptions {
        max_path_steps: 2,
        ..Default::default()
    };
    let report = analyze(&store, &options, "A -> F mit Sperr");

    assert_eq!(report.path.len(), 2);
    assert!(report.findings.contains(&Finding::PathTooLong(2)));
}

#[test]
fn test_signal_outside_route() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "A -> F mit Sperr");

    assert!(report.reached_target);
    assert!(!report.main_signals[0].outside_route);
    assert!(report.main_signals[1].outside_route);
    assert_eq!(
        report.findings,
        vec![Finding::SignalOutsideRoute {
            signal: "Adorf Sperr".to_string(),
            location: a(5),
        }]
    );
}

#[test]
fn test_route_across_module_boundary() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "F -> E");

    assert_eq!(report.path, vec![a(6), b(1), b(2)]);
    assert!(report.reached_target);
    assert_eq!(report.main_signals[1].signal.as_deref(), Some("Bdorf E"));
    assert!(report.min_speed < 0.0);
    assert!(report.findings.is_empty());
}

#[test]
fn test_circular_coupling_is_a_finding() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "G1 -> G2");

    assert_eq!(report.main_signals[0].coupled.len(), 1);
    assert_eq!(report.main_signals[0].coupled[0].signal, "Adorf G2");
    assert_eq!(
        report.findings,
        vec![Finding::CircularCoupling {
            signal: "Adorf G1".to_string(),
            at: a(10),
        }]
    );
    // Zeile mit Geschwindigkeit 0 ohne Ersatzsignal begrenzt nicht
    assert!(report.min_speed < 0.0);
}

#[test]
fn test_analyze_module_keeps_file_order() {
    let store = store();
    let options = AnalysisOptions::default();
    let reports = RouteAnalyzer::new(&store, &options)
        .analyze_module(&module_a())
        .expect("Modul A");

    assert_eq!(reports.len(), 8);
    assert_eq!(reports[0].route.name, "A -> F");
    assert_eq!(reports[7].route.name, "F -> E langsam");
}

// ── Bahnübergänge ───────────────────────────────────────────────────

#[test]
fn test_level_crossing_validated() {
    let store = store();
    let options = AnalysisOptions {
        check_level_crossings: true,
        ..Default::default()
    };
    let report = analyze(&store, &options, "A -> F");

    assert_eq!(report.crossings.len(), 1);
    let crossing = &report.crossings[0];
    assert_eq!(crossing.signal, "Adorf F");
    assert_eq!(crossing.opens, vec![a(2)]);
    assert_eq!(crossing.closes, vec![a(4)]);
    assert_eq!(crossing.counter.as_deref(), Some("Adorf F Ks"));
    assert!(crossing.is_validated());
    assert!(!report.has_finding(FindingKind::LevelCrossing));
}

#[test]
fn test_level_crossing_without_close_event() {
    let store = store();
    let options = AnalysisOptions {
        check_level_crossings: true,
        ..Default::default()
    };
    let report = analyze(&store, &options, "F -> E");

    assert_eq!(report.crossings.len(), 1);
    assert!(!report.crossings[0].is_validated());
    assert!(report.findings.contains(&Finding::CrossingMissingClose {
        crossing: "Bdorf E".to_string()
    }));
    assert!(report.findings.contains(&Finding::CrossingWithoutCounter {
        crossing: "Bdorf E".to_string()
    }));
    assert!(!report
        .findings
        .iter()
        .any(|f| matches!(f, Finding::CrossingMissingOpen { .. })));
}

#[test]
fn test_level_crossings_skipped_by_default() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze(&store, &options, "F -> E");
    assert!(report.crossings.is_empty());
}

// ── Signalkombinationen ─────────────────────────────────────────────

#[test]
fn test_signal_combinations() {
    let store = store();
    let report = CombinationAnalyzer::new(&store)
        .analyze(&module_a(), 1)
        .expect("Signal A");

    assert_eq!(report.signal, "Adorf A");
    assert_eq!(report.combinations.len(), 6);
    assert_eq!(report.findings.len(), 1);

    let first = &report.combinations[0];
    assert_eq!((first.incoming.as_str(), first.outgoing.as_str()), ("A -> F", "F -> E"));
    assert!(matches!(
        first.transition,
        Ok(Transition::DifferentSpeeds { .. })
    ));

    let second = &report.combinations[1];
    assert_eq!(second.outgoing, "F -> E langsam");
    match &second.transition {
        Ok(transition @ Transition::Aspects { before, after, cleared, column }) => {
            assert_eq!(*column, 1);
            assert_eq!(before.label, "Hp2 + Vr0 + Zs3");
            assert_eq!(after.label, "Hp2 + Vr2 + Zs3");
            assert_eq!(*cleared, 8);
            assert!(transition.is_discontinuous());
        }
        other => panic!("unerwarteter Übergang {:?}", other),
    }
}

#[test]
fn test_combination_distant_not_set() {
    let store = store();
    // F wird von "A -> F" gestellt, die Folgefahrstraßen stellen an F kein Vorsignal
    let report = CombinationAnalyzer::new(&store)
        .analyze(&module_a(), 4)
        .expect("Signal F");
    assert_eq!(report.combinations.len(), 2);
    assert!(report
        .combinations
        .iter()
        .all(|c| c.transition == Ok(Transition::DistantNotSet)));

    let report = CombinationAnalyzer::new(&store)
        .analyze(&module_a(), 15)
        .expect("Signal G1");
    assert!(report.combinations.is_empty());
}

#[test]
fn test_combination_for_missing_signal_fails() {
    let store = store();
    assert!(CombinationAnalyzer::new(&store).analyze(&module_a(), 13).is_err());
}

#[test]
fn test_combination_with_out_of_range_row_is_an_error() {
    let store = store();
    let report = CombinationAnalyzer::new(&store)
        .analyze(&module_c(), 1)
        .expect("Signal S");

    assert_eq!(report.signal, "Cdorf S");
    // Die Ersatzsignal-Platzierung zählt nicht
    let rows: Vec<usize> = report.combinations.iter().map(|c| c.row).collect();
    assert_eq!(rows, vec![5, 9_223_372_036_854_775_808]);
    assert!(report.combinations.iter().all(|c| c.outgoing == "Z -> E"));

    assert_eq!(
        report.combinations[0].transition,
        Err(LookupError::OutOfRangeIndex {
            what: "Hauptsignalzeile",
            index: 5,
            len: 2
        })
    );
    assert!(matches!(
        report.combinations[1].transition,
        Err(LookupError::OutOfRangeIndex {
            what: "Hauptsignalzeile",
            len: 2,
            ..
        })
    ));
}

// ── Ungültige Indizes ───────────────────────────────────────────────

#[test]
fn test_out_of_range_signal_indices_are_findings() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze_in(&store, &options, &module_c(), "S -> Z");

    assert!(report.reached_target);
    assert_eq!(report.path, vec![c(1), c(2), c(3)]);

    assert_eq!(
        invalid_placements(&report, PlacementRole::MainSignal),
        vec![
            LookupError::OutOfRangeIndex {
                what: "Hauptsignalzeile",
                index: 5,
                len: 2
            },
            LookupError::OutOfRangeIndex {
                what: "Ersatzsignal",
                index: 3,
                len: 1
            },
        ]
    );
    assert_eq!(
        invalid_placements(&report, PlacementRole::DistantSignal),
        vec![LookupError::OutOfRangeIndex {
            what: "Vorsignalspalte",
            index: 7,
            len: 2
        }]
    );

    // Alle Platzierungen bleiben in der Ausgabe, gültige mit Begriff
    assert_eq!(report.main_signals.len(), 3);
    assert_eq!(report.main_signals[0].signal.as_deref(), Some("Cdorf S"));
    assert!(report.main_signals[0].aspect.is_none());
    assert_eq!(report.main_signals[0].speed, None);
    assert!(report.main_signals[1].aspect.is_none());
    let exit = &report.main_signals[2];
    assert_eq!(exit.signal.as_deref(), Some("Cdorf Z"));
    assert!(exit.aspect.is_some());
    assert_eq!(exit.speed, Some(16.6667));

    assert_eq!(report.distant_signals.len(), 2);
    assert_eq!(report.distant_signals[0].speed, None);
    assert_eq!(report.distant_signals[1].speed, Some(16.6667));
    assert!(report.distant_signals[1].aspect.is_some());
}

#[test]
fn test_out_of_range_switch_position_is_a_finding() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze_in(&store, &options, &module_c(), "S -> Z Weiche");

    assert_eq!(
        invalid_placements(&report, PlacementRole::Switch),
        vec![LookupError::OutOfRangeIndex {
            what: "Weichenlage",
            index: 3,
            len: 2
        }]
    );
    assert_eq!(report.switches.len(), 1);
    assert!(!report.switches[0].slot_valid());

    // Ohne gültige Lage endet der Fahrweg an der Weiche
    assert!(!report.reached_target);
    assert!(report
        .findings
        .contains(&Finding::PathEnded { at: c(2) }));

    // Das Hauptsignal wird trotzdem ausgewertet
    assert_eq!(report.main_signals.len(), 1);
    assert!(report.main_signals[0].aspect.is_some());
    assert_eq!(report.main_signals[0].speed, Some(16.6667));
}

#[test]
fn test_huge_signal_row_does_not_overflow() {
    let store = store();
    let options = AnalysisOptions::default();
    let report = analyze_in(&store, &options, &module_c(), "S riesig");

    assert!(report.reached_target);
    assert_eq!(report.main_signals.len(), 1);
    assert!(report.main_signals[0].aspect.is_none());
    assert_eq!(
        invalid_placements(&report, PlacementRole::MainSignal).len(),
        1
    );
}

// ── Referenzpunkte ──────────────────────────────────────────────────

#[test]
fn test_reference_audit() {
    let store = store();
    let report = audit_references(&store, &module_a()).expect("Modul A");

    assert_eq!(report.entries.len(), 15);
    assert_eq!(report.finding_count(), 5);

    let findings_for = |nr: u32| {
        report
            .entries
            .iter()
            .find(|e| e.point.nr == nr)
            .map(|e| e.findings.clone())
            .unwrap_or_default()
    };

    assert!(findings_for(1).is_empty());
    assert_eq!(
        findings_for(11),
        vec![
            Finding::MissingLabel {
                ref_nr: 11,
                kind: crate::core::ReferenceKind::Switch
            },
            Finding::SwitchWithoutBranch {
                ref_nr: 11,
                successors: 1
            },
        ]
    );
    assert_eq!(
        findings_for(12),
        vec![Finding::ReferenceWithoutElement {
            ref_nr: 12,
            element_nr: 99
        }]
    );
    assert_eq!(
        findings_for(13),
        vec![Finding::ReferenceWithoutSignal {
            ref_nr: 13,
            location: a(4)
        }]
    );
    assert_eq!(
        findings_for(16),
        vec![Finding::LabelMismatch {
            ref_nr: 16,
            label: "Zs 12".to_string(),
            signal: "Adorf A".to_string()
        }]
    );
}
