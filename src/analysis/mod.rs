//! Konsistenzprüfungen auf Basis von Graph und Signalbegriffen.
//!
//! - `route`: Fahrstraßen-Analyse ([`RouteAnalyzer`])
//! - `level_crossing`: Bahnübergangs-Ereignisse entlang des Fahrwegs
//! - `combination`: Begriffsübergänge zwischen aufeinanderfolgenden Fahrstraßen
//! - `reference_audit`: Prüfung der Referenzpunkte eines Moduls
//! - `finding`: Befunde als Werte

pub mod combination;
pub mod finding;
pub mod level_crossing;
pub mod reference_audit;
pub mod route;

#[cfg(test)]
mod tests;

pub use combination::{Combination, CombinationAnalyzer, CombinationReport, Transition};
pub use finding::{Finding, FindingKind, PlacementRole};
pub use level_crossing::{correlate_crossings, CrossingGroup};
pub use reference_audit::{audit_references, AuditEntry, AuditReport};
pub use route::{
    CoupledLine, DistantSignalLine, MainSignalLine, RegisterLine, RouteAnalyzer, RouteReport,
    SwitchLine,
};
