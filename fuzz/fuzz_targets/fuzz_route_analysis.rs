#![no_main]

use libfuzzer_sys::fuzz_target;
use zusi_fahrstrassen::{AnalysisOptions, DataPath, MemorySource, ModuleStore, RouteAnalyzer};

// Beliebige Module dürfen nie zu Panics oder Endlosschleifen führen
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let store = ModuleStore::new(MemorySource::new().with_file("fuzz.st3", text.into_owned()));
    let options = AnalysisOptions {
        max_path_steps: 1_000,
        ..Default::default()
    };
    let _ = RouteAnalyzer::new(&store, &options).analyze_module(&DataPath::new("fuzz.st3"));
});
