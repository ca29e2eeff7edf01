//! Ausgabe der Signalkombinationen.

use super::Palette;
use crate::analysis::{CombinationReport, Transition};
use crate::core::speed;
use std::io::{self, Write};

pub fn write_combinations<W: Write>(
    w: &mut W,
    report: &CombinationReport,
    palette: &Palette,
) -> io::Result<()> {
    writeln!(
        w,
        "Signal {} an Element {}",
        palette.heading(&report.signal),
        report.location
    )?;
    if report.combinations.is_empty() {
        writeln!(w, " {}", palette.dim("keine Fahrstraßenkombinationen"))?;
    }

    for combination in &report.combinations {
        let outcome = match &combination.transition {
            Ok(Transition::DistantNotSet) => palette.dim("Vorsignalbegriff nicht gestellt"),
            Ok(Transition::DifferentSpeeds {
                column_speed,
                route_speed,
            }) => format!(
                "bleibt wegen abweichender Geschwindigkeit ({} / {}) auf Halt erwarten",
                speed::format_speed(*column_speed),
                speed::format_speed(*route_speed)
            ),
            Ok(transition @ Transition::Aspects {
                column,
                before,
                after,
                ..
            }) => format!(
                "Spalte {}: {} -> {}{}",
                column,
                before.display(),
                after.display(),
                if transition.is_discontinuous() {
                    format!(" {}", palette.error("unstetig"))
                } else {
                    String::new()
                }
            ),
            Err(error) => palette.error(&error.to_string()),
        };
        writeln!(
            w,
            " - {} => {} (Zeile {}): {}",
            combination.incoming, combination.outgoing, combination.row, outcome
        )?;
    }

    for finding in &report.findings {
        writeln!(w, " {} {}", palette.error("!"), finding)?;
    }
    Ok(())
}
