use super::*;
use crate::store::MemorySource;

const MODULE_A: &str = r#"
<Zusi><Strecke>
    <StrElement Nr="1">
        <NachNorm Nr="2"/>
        <InfoNormRichtung>
            <Signal NameBetriebsstelle="Adorf" Signalname="A" SignalFlags="1"/>
        </InfoNormRichtung>
    </StrElement>
    <StrElement Nr="2"/>
    <ReferenzElemente ReferenzNr="1" StrElement="1" StrNorm="1" RefTyp="4"/>
    <ReferenzElemente ReferenzNr="2" StrElement="42" StrNorm="0" RefTyp="1"/>
</Strecke></Zusi>
"#;

const LANDSCAPE: &str = r#"
<Zusi><Landschaft>
    <Animation AniBeschreibung="Hp0"/>
    <Animation AniBeschreibung="Hp1"/>
</Landschaft></Zusi>
"#;

fn store_with_log() -> (ModuleStore, crate::store::ReadLog) {
    let source = MemorySource::new()
        .with_file("Routes\\A.st3", MODULE_A)
        .with_file("Routes\\Kaputt.st3", "<Zusi><Strecke><StrElement Nr=\"x\"/></Strecke></Zusi>")
        .with_file("Signals\\Hp.ls3", LANDSCAPE);
    let log = source.read_log();
    (ModuleStore::new(source), log)
}

fn a() -> DataPath {
    DataPath::new("Routes/A.st3")
}

#[test]
fn test_load_is_cached() {
    let (store, log) = store_with_log();

    let first = store.load(&a()).expect("Modul A fehlt");
    let second = store.load(&DataPath::new("routes\\a.ST3")).expect("Modul A fehlt");

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(log.count(&a()), 1);
    assert_eq!(store.loaded_count(), 1);
}

#[test]
fn test_missing_module_is_negatively_cached() {
    let (store, log) = store_with_log();
    let missing = DataPath::new("Routes/Fehlt.st3");

    let first = store.load(&missing).expect_err("Modul sollte fehlen");
    let second = store.load(&missing).expect_err("Modul sollte fehlen");

    assert_eq!(first, LookupError::MissingModule(missing.clone()));
    assert_eq!(first, second);
    assert_eq!(log.count(&missing), 1);
    assert!(store.is_missing(&missing));

    let element = store.element(&missing, 1).expect_err("Element sollte fehlen");
    assert_eq!(element, LookupError::MissingModule(missing.clone()));
    assert_eq!(log.count(&missing), 1);
}

#[test]
fn test_malformed_module_is_cached_as_malformed() {
    let (store, log) = store_with_log();
    let broken = DataPath::new("Routes/Kaputt.st3");

    let error = store.load(&broken).expect_err("Modul ist fehlerhaft");
    assert!(matches!(error, LookupError::MalformedModule { .. }));
    assert_eq!(store.load(&broken).expect_err("erneut fehlerhaft"), error);
    assert_eq!(log.count(&broken), 1);
}

#[test]
fn test_element_lookup() {
    let (store, _) = store_with_log();
    assert_eq!(store.element(&a(), 2).expect("Element 2").nr, 2);
    assert_eq!(
        store.element(&a(), 9).expect_err("Element 9 existiert nicht"),
        LookupError::MissingElement { module: a(), nr: 9 }
    );
}

#[test]
fn test_resolve_reference() {
    let (store, _) = store_with_log();

    let location = store.resolve_reference(&a(), 1).expect("Referenz 1");
    assert_eq!(location, ElementRef::new(a(), 1, crate::core::Direction::Norm));

    assert_eq!(
        store.resolve_reference(&a(), 2).expect_err("Element 42 fehlt"),
        LookupError::MissingElement { module: a(), nr: 42 }
    );
    assert_eq!(
        store.resolve_reference(&a(), 3).expect_err("Referenz 3 fehlt"),
        LookupError::UnresolvedReference { module: a(), ref_nr: 3 }
    );
}

#[test]
fn test_signal_lookup() {
    let (store, _) = store_with_log();

    let signal = store.signal_by_reference(&a(), 1).expect("Signal an Referenz 1");
    assert_eq!(signal.display_name(), "Adorf A");

    let gegen = ElementRef::new(a(), 1, crate::core::Direction::Gegen);
    assert_eq!(
        store.signal_at(&gegen).expect_err("kein Signal in Gegenrichtung"),
        LookupError::MissingSignal(gegen.clone())
    );
    let near = store.signal_near(&gegen).expect("Signal gilt auch in Gegenrichtung");
    assert_eq!(near.name, "A");

    let other = ElementRef::new(a(), 2, crate::core::Direction::Norm);
    assert!(matches!(
        store.signal_near(&other),
        Err(LookupError::MissingSignal(_))
    ));
}

#[test]
fn test_animation_names_are_memoized() {
    let (store, log) = store_with_log();
    let file = DataPath::new("Signals/Hp.ls3");

    let names = store.animation_names(&file);
    assert_eq!(&names[..], &["Hp0".to_string(), "Hp1".to_string()]);
    let again = store.animation_names(&file);
    assert!(Rc::ptr_eq(&names, &again));
    assert_eq!(log.count(&file), 1);

    let missing = DataPath::new("Signals/Fehlt.ls3");
    assert!(store.animation_names(&missing).is_empty());
    assert!(store.animation_names(&missing).is_empty());
    assert_eq!(log.count(&missing), 1);
}
