//! Ausgabe der Referenzpunkt-Prüfung.

use super::Palette;
use crate::analysis::AuditReport;
use std::io::{self, Write};

/// Schreibt nur Referenzpunkte mit Befunden, danach eine Zusammenfassung
pub fn write_audit<W: Write>(w: &mut W, report: &AuditReport, palette: &Palette) -> io::Result<()> {
    writeln!(w, "Referenzpunkte in {}", palette.heading(&report.module.to_string()))?;

    for entry in report.entries.iter().filter(|e| !e.findings.is_empty()) {
        let point = &entry.point;
        writeln!(
            w,
            " - {} {} an Element {} {} \"{}\"",
            point.nr,
            point.kind.label(),
            point.element_nr,
            point.direction,
            point.label
        )?;
        for finding in &entry.findings {
            writeln!(w, "   {} {}", palette.error("!"), finding)?;
        }
    }

    writeln!(
        w,
        " = {} Befunde bei {} Referenzpunkten",
        report.finding_count(),
        report.entries.len()
    )
}
