//! Animationsnamen aus Landschaftsdateien (`.ls3`).
//!
//! Ein Signal-Frame verweist auf eine Landschaftsdatei; deren `<Animation>`-Einträge
//! bestimmen, wie viele Bits der Frame im Signalbild belegt und wie sie heißen.

use anyhow::{Context, Result};
use zusi_document::parse_document;

/// Liest die Animationsnamen in Dateireihenfolge. Einträge ohne Beschreibung
/// erhalten einen Platzhalter, damit die Bitpositionen erhalten bleiben.
pub fn parse_animation_names(xml_content: &str) -> Result<Vec<String>> {
    let root = parse_document(xml_content)?;
    let landscape = root
        .child("Landschaft")
        .context("Kein <Landschaft>-Element gefunden")?;

    Ok(landscape
        .children_named("Animation")
        .enumerate()
        .map(|(index, animation)| {
            let name = animation.attr_str("AniBeschreibung").trim();
            if name.is_empty() {
                format!("Animation {}", index + 1)
            } else {
                name.to_string()
            }
        })
        .collect())
}
