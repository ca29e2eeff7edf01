//! Parser für Zusi-3-Streckenmodule (`.st3`).

mod elements;
mod routes;
mod signals;


use crate::core::{Direction, Module, ReferenceKind, ReferencePoint};
use anyhow::{Context, Result};
use zusi_document::{parse_document, DataPath, Node};

/// Parst ein Streckenmodul aus einem XML-String
pub fn parse_module(id: DataPath, xml_content: &str) -> Result<Module> {
    let root = parse_document(xml_content)
        .with_context(|| format!("Modul {} ist kein gueltiges XML", id))?;
    module_from_document(id, &root)
}

/// Baut ein [`Module`] aus einem bereits dekodierten Dokumentbaum
pub fn module_from_document(id: DataPath, root: &Node) -> Result<Module> {
    let strecke = root
        .child("Strecke")
        .with_context(|| format!("Kein <Strecke>-Element in {}", id))?;

    let mut module = Module::new(id.clone());

    module.neighbors = strecke
        .find_all("ModulDateien/Datei")
        .into_iter()
        .map(|d| DataPath::new(d.attr_str("Dateiname")))
        .filter(|p| !p.is_empty())
        .collect();

    for node in strecke.children_named("StrElement") {
        let nr = node.attr_or("Nr", 0u32)?;
        if module.elements.contains_key(&nr) {
            log::warn!("Doppelte Elementnummer {} in {}, erster Eintrag gilt", nr, id);
            continue;
        }
        let element = elements::parse_element(&id, node, &mut module.signals)
            .with_context(|| format!("Fehler in Element {}", nr))?;
        module.elements.insert(nr, element);
    }

    for node in strecke.children_named("ReferenzElemente") {
        let point = parse_reference_point(node)?;
        if module.references.contains_key(&point.nr) {
            log::warn!(
                "Doppelter Referenzpunkt {} in {}, erster Eintrag gilt",
                point.nr,
                id
            );
            continue;
        }
        module.references.insert(point.nr, point);
    }

    for node in strecke.children_named("Fahrstrasse") {
        let route = routes::parse_route(&id, node).with_context(|| {
            format!("Fehler in Fahrstrasse '{}'", node.attr_str("FahrstrName"))
        })?;
        module.routes.push(route);
    }

    log::debug!(
        "Modul {} geladen: {} Elemente, {} Signale, {} Referenzpunkte, {} Fahrstrassen",
        id,
        module.element_count(),
        module.signals.len(),
        module.references.len(),
        module.route_count()
    );

    Ok(module)
}

fn parse_reference_point(node: &Node) -> Result<ReferencePoint> {
    Ok(ReferencePoint {
        nr: node.attr_or("ReferenzNr", 0u32)?,
        element_nr: node.attr_or("StrElement", 0u32)?,
        direction: Direction::from_norm_flag(node.attr_or("StrNorm", 0i64)?),
        kind: ReferenceKind::from_raw(node.attr_or("RefTyp", 0u32)?),
        label: node.attr_str("Info").to_string(),
    })
}

/// Modulverweis aus einem `<Datei Dateiname>`-Kind; leer oder fehlend ergibt `None`
pub(crate) fn file_reference(node: &Node) -> Option<DataPath> {
    node.child("Datei")
        .map(|d| DataPath::new(d.attr_str("Dateiname")))
        .filter(|p| !p.is_empty())
}

/// Dateiname ohne Verzeichnis und Endung in Originalschreibweise
pub(crate) fn raw_file_stem(raw: &str) -> String {
    let name = raw.rsplit(['\\', '/']).next().unwrap_or(raw).trim();
    match name.rfind('.') {
        Some(pos) if pos > 0 => name[..pos].to_string(),
        _ => name.to_string(),
    }
}
