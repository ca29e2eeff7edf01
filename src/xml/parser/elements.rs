//! Element-Parsing: Nachfolger-Slots, Richtungsinformationen, Ereignisse.

use super::{file_reference, signals};
use crate::core::{Direction, DirectionInfo, ElementRef, Event, Signal, SuccessorSlot, TrackElement};
use anyhow::Result;
use zusi_document::{DataPath, Node};

/// Liest ein `<StrElement>`. Signale landen in der Arena `signals`, das Element
/// merkt sich nur deren Index.
pub(super) fn parse_element(
    module: &DataPath,
    node: &Node,
    signals: &mut Vec<Signal>,
) -> Result<TrackElement> {
    let nr = node.attr_or("Nr", 0u32)?;
    // Anschluss ist ein Bitfeld; negative Werte zaehlen als Bitmuster
    let anschluss = node.attr_or("Anschluss", 0i64)? as u32;

    let mut element = TrackElement {
        nr,
        anschluss,
        ..Default::default()
    };

    for child in &node.children {
        match child.name.as_str() {
            "NachNorm" => element
                .successors_norm
                .push(SuccessorSlot::IntraModule(child.attr_or("Nr", 0u32)?)),
            "NachGegen" => element
                .successors_gegen
                .push(SuccessorSlot::IntraModule(child.attr_or("Nr", 0u32)?)),
            "NachNormModul" => element.successors_norm.push(inter_module_slot(child)?),
            "NachGegenModul" => element.successors_gegen.push(inter_module_slot(child)?),
            "InfoNormRichtung" => {
                let location = ElementRef::new(module.clone(), nr, Direction::Norm);
                element.info_norm = parse_direction_info(child, location, signals)?;
            }
            "InfoGegenRichtung" => {
                let location = ElementRef::new(module.clone(), nr, Direction::Gegen);
                element.info_gegen = parse_direction_info(child, location, signals)?;
            }
            _ => {}
        }
    }

    Ok(element)
}

fn inter_module_slot(node: &Node) -> Result<SuccessorSlot> {
    Ok(SuccessorSlot::InterModule {
        module: file_reference(node),
        ref_nr: node.attr_or("Nr", 0u32)?,
    })
}

fn parse_direction_info(
    node: &Node,
    location: ElementRef,
    signals: &mut Vec<Signal>,
) -> Result<DirectionInfo> {
    let events = node
        .children_named("Ereignis")
        .map(parse_event)
        .collect::<Result<Vec<_>>>()?;

    let signal = match node.child("Signal") {
        Some(signal_node) => {
            signals.push(signals::parse_signal(signal_node, location)?);
            Some(signals.len() - 1)
        }
        None => None,
    };

    Ok(DirectionInfo { events, signal })
}

/// Liest ein `<Ereignis>`
pub(super) fn parse_event(node: &Node) -> Result<Event> {
    Ok(Event {
        code: node.attr_or("Er", 0u32)?,
        value: node.attr_or("Wert", 0.0f32)?,
        description: node.attr_str("Beschr").to_string(),
    })
}
