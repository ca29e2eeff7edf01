//! Signal-Parsing: Begriffe, Matrix, Ersatzsignale, Frames, Kopplung.

use super::{elements::parse_event, file_reference, raw_file_stem};
use crate::core::{
    CouplingRef, DistantAspect, ElementRef, MainAspect, MatrixCell, Signal, SignalFrame,
    SubstituteAspect,
};
use anyhow::Result;
use zusi_document::Node;

/// Liest ein `<Signal>` am Standort `location`
pub(super) fn parse_signal(node: &Node, location: ElementRef) -> Result<Signal> {
    let mut signal = Signal {
        location,
        station: node.attr_str("NameBetriebsstelle").to_string(),
        name: node.attr_str("Signalname").to_string(),
        flags: node.attr_or("SignalFlags", 0i64)? as u32,
        frames: Vec::new(),
        main_aspects: Vec::new(),
        distant_aspects: Vec::new(),
        matrix: Vec::new(),
        substitutes: Vec::new(),
        coupling: None,
    };

    for child in &node.children {
        match child.name.as_str() {
            "SignalFrame" => signal.frames.push(parse_frame(child)),
            "HsigBegriff" => signal.main_aspects.push(MainAspect {
                speed: child.attr_or("HsigGeschw", 0.0f32)?,
                route_types: child.attr_or("FahrstrTyp", 0i64)? as u32,
                coupling: child.child("KoppelSignal").map(parse_coupling).transpose()?,
            }),
            "VsigBegriff" => signal.distant_aspects.push(DistantAspect {
                speed: child.attr_or("VsigGeschw", 0.0f32)?,
            }),
            "MatrixEintrag" => signal.matrix.push(parse_cell(child)?),
            "Ersatzsignal" => signal.substitutes.push(SubstituteAspect {
                label: child.attr_str("ErsatzsigBezeichnung").to_string(),
                cell: child
                    .child("MatrixEintrag")
                    .map(parse_cell)
                    .transpose()?
                    .unwrap_or_default(),
            }),
            "KoppelSignal" => signal.coupling = Some(parse_coupling(child)?),
            _ => {}
        }
    }

    let expected = signal.main_aspects.len() * signal.column_count();
    if signal.matrix.len() != expected {
        log::warn!(
            "Signal {} an {}: {} Matrixeintraege, erwartet {}",
            signal.display_name(),
            signal.location,
            signal.matrix.len(),
            expected
        );
    }

    Ok(signal)
}

fn parse_frame(node: &Node) -> SignalFrame {
    let raw = node.child("Datei").map(|d| d.attr_str("Dateiname")).unwrap_or("");
    let label = raw_file_stem(raw);
    SignalFrame {
        file: file_reference(node),
        label: if label.is_empty() { "?".to_string() } else { label },
    }
}

fn parse_cell(node: &Node) -> Result<MatrixCell> {
    Ok(MatrixCell {
        picture: node.attr_or("Signalbild", 0i64)? as u64,
        speed: node.attr_or("MatrixGeschw", 0.0f32)?,
        events: node
            .children_named("Ereignis")
            .map(parse_event)
            .collect::<Result<Vec<_>>>()?,
    })
}

fn parse_coupling(node: &Node) -> Result<CouplingRef> {
    Ok(CouplingRef {
        module: file_reference(node),
        ref_nr: node.attr_or("ReferenzNr", 0u32)?,
    })
}
