use super::*;
use crate::core::DataPath;
use crate::shared::{AnalysisOptions, CheckMode};
use crate::store::{MemorySource, ModuleStore};

fn source() -> MemorySource {
    MemorySource::new()
        .with_file(
            "Routes\\Test\\A.st3",
            include_str!("../../tests/fixtures/Routes/Test/A.st3"),
        )
        .with_file(
            "Routes\\Test\\B.st3",
            include_str!("../../tests/fixtures/Routes/Test/B.st3"),
        )
        .with_file("Signals\\Hp.ls3", include_str!("../../tests/fixtures/Signals/Hp.ls3"))
        .with_file("Signals\\Zs3.ls3", include_str!("../../tests/fixtures/Signals/Zs3.ls3"))
}

fn plain() -> AnalysisOptions {
    AnalysisOptions {
        colored: false,
        ..Default::default()
    }
}

fn context(options: AnalysisOptions) -> AnalysisContext {
    AnalysisContext::with_store(
        ModuleStore::new(source()),
        DataPath::new("Routes/Test/A.st3"),
        options,
    )
    .expect("Hauptmodul")
}

#[test]
fn test_routes_mode_writes_every_route() {
    let ctx = context(plain());
    let mut out = Vec::new();
    let written = ctx.run_routes(&mut out).expect("Analyse");
    let text = String::from_utf8(out).expect("UTF-8");

    assert_eq!(written, 8);
    assert_eq!(
        text.lines().filter(|l| l.starts_with("Fahrstraße ")).count(),
        8
    );
    // B wurde über die Modulgrenze nachgeladen
    assert_eq!(ctx.store().loaded_count(), 2);
}

#[test]
fn test_routes_mode_only_offending() {
    let ctx = context(AnalysisOptions {
        signal_outside_route: CheckMode::OnlyOffending,
        ..plain()
    });
    let mut out = Vec::new();
    assert_eq!(ctx.run_routes(&mut out).expect("Analyse"), 1);
    let text = String::from_utf8(out).expect("UTF-8");
    assert!(text.contains("A -> F mit Sperr"));
}

#[test]
fn test_reference_audit_mode() {
    let ctx = context(plain());
    let mut out = Vec::new();
    assert_eq!(ctx.run_reference_audit(&mut out).expect("Prüfung"), 5);
}

#[test]
fn test_signal_combinations_need_a_signal() {
    let ctx = context(plain());
    let mut out = Vec::new();
    assert!(ctx
        .run(AnalysisMode::SignalCombinations, None, &mut out)
        .is_err());
    assert!(ctx
        .run(AnalysisMode::SignalCombinations, Some(1), &mut out)
        .is_ok());
    assert!(ctx
        .run(AnalysisMode::SignalCombinations, Some(13), &mut out)
        .is_err());
}

#[test]
fn test_malformed_primary_is_fatal() {
    let store = ModuleStore::new(MemorySource::new().with_file("kaputt.st3", "<Zusi><Info/></Zusi>"));
    let result = AnalysisContext::with_store(store, DataPath::new("kaputt.st3"), plain());
    let message = format!("{:#}", result.err().expect("Fehler erwartet"));
    assert!(message.contains("Hauptmodul KAPUTT.ST3"));
}

#[test]
fn test_missing_primary_is_fatal() {
    let store = ModuleStore::new(MemorySource::new());
    assert!(AnalysisContext::with_store(store, DataPath::new("fehlt.st3"), plain()).is_err());
}
