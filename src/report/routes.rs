//! Ausgabe der Fahrstraßen-Analyse, ein Block je Fahrstraße.

use super::Palette;
use crate::analysis::{
    CrossingGroup, DistantSignalLine, FindingKind, MainSignalLine, RegisterLine, RouteReport,
    SwitchLine,
};
use crate::core::{speed, ElementRef, PlacementRef};
use crate::shared::{AnalysisOptions, CheckMode};
use std::io::{self, Write};

/// Wählt die auszugebenden Fahrstraßen.
///
/// Steht eine Prüfung auf [`CheckMode::OnlyOffending`], bleiben nur Fahrstraßen mit einem
/// Befund dieser Art übrig; stehen beide darauf, genügt einer der beiden.
pub fn select_routes<'r>(reports: &'r [RouteReport], options: &AnalysisOptions) -> Vec<&'r RouteReport> {
    let mut offending = Vec::new();
    if options.signal_outside_route == CheckMode::OnlyOffending {
        offending.push(FindingKind::SignalOutsideRoute);
    }
    if options.distant_speed == CheckMode::OnlyOffending {
        offending.push(FindingKind::DistantSpeed);
    }

    reports
        .iter()
        .filter(|r| offending.is_empty() || offending.iter().any(|k| r.has_finding(*k)))
        .collect()
}

/// Schreibt alle ausgewählten Fahrstraßen
pub fn write_routes<W: Write>(
    w: &mut W,
    reports: &[RouteReport],
    options: &AnalysisOptions,
    palette: &Palette,
) -> io::Result<()> {
    let selected = select_routes(reports, options);
    for report in &selected {
        write_route(w, report, options, palette)?;
    }
    log::debug!("{} von {} Fahrstrassen ausgegeben", selected.len(), reports.len());
    Ok(())
}

/// Schreibt den Block einer Fahrstraße
pub fn write_route<W: Write>(
    w: &mut W,
    report: &RouteReport,
    options: &AnalysisOptions,
    palette: &Palette,
) -> io::Result<()> {
    let route = &report.route;
    writeln!(w)?;
    writeln!(
        w,
        "Fahrstraße {} {} ({} m, {}, Zufallswert {})",
        if route.kind.is_empty() { "?" } else { &route.kind },
        palette.heading(&route.name),
        route.length.round(),
        route.track_class.label(),
        route.random_weight,
    )?;

    for line in &report.main_signals {
        write_main_signal(w, report, line, palette)?;
    }
    for line in &report.distant_signals {
        write_distant_signal(w, report, line, palette)?;
    }
    if options.show_switches {
        for line in &report.switches {
            write_switch(w, line, palette)?;
        }
    }
    if options.show_registers {
        for line in &report.registers {
            write_register(w, line, palette)?;
        }
    }
    for group in &report.crossings {
        write_crossing(w, report, group, palette)?;
    }

    writeln!(
        w,
        " = Fahrweg {} Elemente, Mindestgeschwindigkeit {}",
        report.path.len(),
        speed::format_speed(report.min_speed)
    )?;
    for finding in &report.findings {
        writeln!(w, " {} {}", palette.error("!"), finding)?;
    }
    Ok(())
}

// ── Zeilen ──────────────────────────────────────────────────────────

/// Element samt Modul, falls es nicht im Modul der Fahrstraße liegt
fn location_label(report: &RouteReport, location: &ElementRef) -> String {
    if location.module == report.module {
        format!("{} {}", location.nr, location.direction)
    } else {
        format!(
            "{} {} in {}",
            location.nr,
            location.direction,
            location.module.file_name()
        )
    }
}

fn unresolved_label(reference: &PlacementRef) -> String {
    format!("Ref {} in {}", reference.ref_nr, reference.module.file_name())
}

fn write_main_signal<W: Write>(
    w: &mut W,
    report: &RouteReport,
    line: &MainSignalLine,
    palette: &Palette,
) -> io::Result<()> {
    let (Some(name), Some(location)) = (&line.signal, &line.location) else {
        return writeln!(
            w,
            " - Hauptsignal {}",
            palette.dim(&unresolved_label(&line.reference))
        );
    };

    let row = match &line.substitute {
        Some(label) => format!("Ersatzsignalzeile {} ({})", line.row, label),
        None => format!("Zeile {}", line.row),
    };
    let shown = line.speed.map(speed::format_speed).unwrap_or_else(|| "?".to_string());
    let aspect = line
        .aspect
        .as_ref()
        .map(|a| a.display())
        .unwrap_or_else(|| "?".to_string());
    writeln!(
        w,
        " - Hauptsignal {} an Element {} auf {} ({}) [{}]{}",
        palette.signal(name),
        location_label(report, location),
        row,
        palette.speed(&shown),
        aspect,
        if line.outside_route {
            format!(" {}", palette.error("außerhalb des Fahrwegs"))
        } else {
            String::new()
        }
    )?;

    for (depth, coupled) in line.coupled.iter().enumerate() {
        let indent = " ".repeat(2 * (depth + 1));
        writeln!(
            w,
            "{} - Koppelsignal {} an Element {} auf Zeile {} ({}) [{}]",
            indent,
            palette.signal(&coupled.signal),
            location_label(report, &coupled.location),
            line.row,
            palette.speed(
                &coupled
                    .speed
                    .map(speed::format_speed)
                    .unwrap_or_else(|| "?".to_string())
            ),
            coupled
                .aspect
                .as_ref()
                .map(|a| a.display())
                .unwrap_or_else(|| "?".to_string()),
        )?;
    }
    Ok(())
}

fn write_distant_signal<W: Write>(
    w: &mut W,
    report: &RouteReport,
    line: &DistantSignalLine,
    palette: &Palette,
) -> io::Result<()> {
    let (Some(name), Some(location)) = (&line.signal, &line.location) else {
        return writeln!(
            w,
            " - Vorsignal {}",
            palette.dim(&unresolved_label(&line.reference))
        );
    };

    let shown = line.speed.map(speed::format_speed).unwrap_or_else(|| "?".to_string());
    writeln!(
        w,
        " - Vorsignal {} an Element {} auf Spalte {} ({}) [{}]{}",
        palette.distant(name),
        location_label(report, location),
        line.column,
        palette.distant_speed(&shown),
        line.aspect
            .as_ref()
            .map(|a| a.display())
            .unwrap_or_else(|| "?".to_string()),
        if line.exceeds_limit {
            format!(" {}", palette.error("!!!!"))
        } else {
            String::new()
        }
    )
}

fn write_switch<W: Write>(w: &mut W, line: &SwitchLine, palette: &Palette) -> io::Result<()> {
    let Some(location) = &line.location else {
        return writeln!(w, " - Weiche {}", palette.dim(&unresolved_label(&line.reference)));
    };
    let validity = if line.slot_valid() {
        String::new()
    } else {
        format!(" {}", palette.error("ungültig"))
    };
    writeln!(
        w,
        " - Weiche an Element {} {} Lage {} von {}{}",
        location.nr,
        location.direction,
        line.slot + 1,
        line.successors,
        validity
    )
}

fn write_register<W: Write>(w: &mut W, line: &RegisterLine, palette: &Palette) -> io::Result<()> {
    match &line.location {
        Some(location) => writeln!(
            w,
            " - Register {} an Element {} {}",
            if line.label.is_empty() { "?" } else { &line.label },
            location.nr,
            location.direction
        ),
        None => writeln!(w, " - Register {}", palette.dim(&unresolved_label(&line.reference))),
    }
}

fn write_crossing<W: Write>(
    w: &mut W,
    report: &RouteReport,
    group: &CrossingGroup,
    palette: &Palette,
) -> io::Result<()> {
    let join = |locations: &[ElementRef]| {
        if locations.is_empty() {
            palette.error("fehlt")
        } else {
            locations
                .iter()
                .map(|l| location_label(report, l))
                .collect::<Vec<_>>()
                .join(", ")
        }
    };
    writeln!(
        w,
        " - Bahnübergang {}: öffnen an {}, schließen an {}, Zähler {}{}",
        group.signal,
        join(&group.opens),
        join(&group.closes),
        group
            .counter
            .clone()
            .unwrap_or_else(|| palette.error("fehlt")),
        if group.is_validated() { " (ok)" } else { "" }
    )
}
