//! Zusi 3 Fahrstraßen-Prüfung.
//! Analyse als Library exportiert für Tests, Benchmarks und Wiederverwendung.

pub mod analysis;
pub mod app;
pub mod aspect;
pub mod core;
pub mod graph;
pub mod report;
pub mod shared;
pub mod store;
pub mod xml;

pub use analysis::{
    audit_references, CombinationAnalyzer, CombinationReport, Finding, FindingKind,
    RouteAnalyzer, RouteReport,
};
pub use app::{AnalysisContext, AnalysisMode};
pub use aspect::{Aspect, AspectResolver};
pub use core::{DataPath, Direction, ElementRef, Module, Route, Signal};
pub use graph::PathGraph;
pub use report::Palette;
pub use shared::{AnalysisOptions, CheckMode};
pub use store::{FsSource, LookupError, MemorySource, ModuleSource, ModuleStore};
pub use xml::parse_module;
