//! Application-Layer: ein Analyse-Kontext je Programmlauf.

pub mod context;

#[cfg(test)]
mod tests;

pub use context::{AnalysisContext, AnalysisMode};
