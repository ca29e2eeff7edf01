//! Fahrstraßen-Parsing.

use super::file_reference;
use crate::core::{
    DistantSignalPlacement, MainSignalPlacement, PlacementRef, RegisterPlacement, Route,
    SwitchPlacement, TrackClass,
};
use anyhow::Result;
use zusi_document::{DataPath, Node};

/// Liest eine `<Fahrstrasse>` des Moduls `module`
pub(super) fn parse_route(module: &DataPath, node: &Node) -> Result<Route> {
    let default_ref = PlacementRef {
        module: module.clone(),
        ref_nr: 0,
    };

    let mut route = Route {
        name: node.attr_str("FahrstrName").to_string(),
        kind: node.attr_str("FahrstrTyp").to_string(),
        length: node.attr_or("Laenge", 0.0f32)?,
        track_class: TrackClass::from_raw(node.attr_or("RglGgl", 0u32)?),
        random_weight: node.attr_or("ZufallsWert", 0.0f32)?,
        start: default_ref.clone(),
        target: default_ref,
        main_signals: Vec::new(),
        distant_signals: Vec::new(),
        switches: Vec::new(),
        registers: Vec::new(),
    };

    for child in &node.children {
        match child.name.as_str() {
            "FahrstrStart" => route.start = placement_ref(module, child)?,
            "FahrstrZiel" => route.target = placement_ref(module, child)?,
            "FahrstrSignal" => route.main_signals.push(MainSignalPlacement {
                reference: placement_ref(module, child)?,
                row: child.attr_or("FahrstrSignalZeile", 0usize)?,
                substitute: child.attr_or("FahrstrSignalErsatzsignal", 0i64)? == 1,
            }),
            "FahrstrVSignal" => route.distant_signals.push(DistantSignalPlacement {
                reference: placement_ref(module, child)?,
                column: child.attr_or("FahrstrSignalSpalte", 0usize)?,
            }),
            "FahrstrWeiche" => {
                // Weichenlage ist 1-basiert
                let position = child.attr_or("FahrstrWeichenlage", 0usize)?;
                route.switches.push(SwitchPlacement {
                    reference: placement_ref(module, child)?,
                    slot: position.max(1) - 1,
                });
            }
            "FahrstrRegister" => route.registers.push(RegisterPlacement {
                reference: placement_ref(module, child)?,
            }),
            _ => {}
        }
    }

    Ok(route)
}

fn placement_ref(module: &DataPath, node: &Node) -> Result<PlacementRef> {
    Ok(PlacementRef {
        module: file_reference(node).unwrap_or_else(|| module.clone()),
        ref_nr: node.attr_or("Ref", 0u32)?,
    })
}
