use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write;
use std::hint::black_box;
use zusi_fahrstrassen::{
    parse_module, AnalysisOptions, DataPath, MemorySource, ModuleStore, RouteAnalyzer,
};

const FIXTURE_A: &str = include_str!("../tests/fixtures/Routes/Test/A.st3");
const FIXTURE_B: &str = include_str!("../tests/fixtures/Routes/Test/B.st3");
const HP: &str = include_str!("../tests/fixtures/Signals/Hp.ls3");
const ZS3: &str = include_str!("../tests/fixtures/Signals/Zs3.ls3");

fn bench_module_parsing(c: &mut Criterion) {
    c.bench_function("parse_fixture_module", |b| {
        b.iter(|| {
            let module = parse_module(DataPath::new("A.st3"), black_box(FIXTURE_A))
                .expect("Modul fehlerhaft");
            black_box(module.route_count())
        })
    });
}

fn bench_fixture_routes(c: &mut Criterion) {
    let options = AnalysisOptions {
        check_level_crossings: true,
        ..Default::default()
    };
    let store = ModuleStore::new(
        MemorySource::new()
            .with_file("Routes\\Test\\A.st3", FIXTURE_A)
            .with_file("Routes\\Test\\B.st3", FIXTURE_B)
            .with_file("Signals\\Hp.ls3", HP)
            .with_file("Signals\\Zs3.ls3", ZS3),
    );
    let module = DataPath::new("Routes\\Test\\A.st3");

    c.bench_function("analyze_fixture_routes", |b| {
        b.iter(|| {
            let reports = RouteAnalyzer::new(&store, &options)
                .analyze_module(black_box(&module))
                .expect("Modul A");
            black_box(reports.len())
        })
    });
}

/// Gerade Strecke mit `length` Elementen und einer Fahrstraße über die ganze Länge
fn build_line_module(length: u32) -> String {
    let mut xml = String::from("<Zusi><Strecke>");
    for nr in 1..=length {
        if nr < length {
            let _ = write!(xml, r#"<StrElement Nr="{}"><NachNorm Nr="{}"/></StrElement>"#, nr, nr + 1);
        } else {
            let _ = write!(xml, r#"<StrElement Nr="{}"/>"#, nr);
        }
    }
    let _ = write!(
        xml,
        r#"<ReferenzElemente ReferenzNr="1" StrElement="1" StrNorm="1" RefTyp="0"/>
           <ReferenzElemente ReferenzNr="2" StrElement="{}" StrNorm="1" RefTyp="0"/>
           <Fahrstrasse FahrstrName="Lang" FahrstrTyp="TypZug">
               <FahrstrStart Ref="1"/><FahrstrZiel Ref="2"/>
           </Fahrstrasse>
           </Strecke></Zusi>"#,
        length
    );
    xml
}

fn bench_path_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_reconstruction");
    let options = AnalysisOptions {
        max_path_steps: 1_000_000,
        ..Default::default()
    };

    for &length in &[1_000u32, 10_000u32] {
        let store = ModuleStore::new(MemorySource::new().with_file("lang.st3", build_line_module(length)));
        let module = DataPath::new("lang.st3");
        let loaded = store.load(&module).expect("Modul fehlerhaft");
        let route = loaded.routes[0].clone();

        group.bench_with_input(BenchmarkId::new("line", length), &route, |b, route| {
            b.iter(|| {
                let report = RouteAnalyzer::new(&store, &options).analyze(&module, black_box(route));
                black_box(report.path.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    core_benches,
    bench_module_parsing,
    bench_fixture_routes,
    bench_path_reconstruction
);
criterion_main!(core_benches);
