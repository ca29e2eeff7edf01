//! XML-Leser: baut aus einem Zusi-XML-String einen [`Node`]-Baum.

use crate::node::Node;
use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parst ein XML-Dokument in einen Knotenbaum und gibt das Wurzelelement zurueck.
///
/// Ein fuehrendes BOM wird entfernt. Texte, Kommentare und Verarbeitungsanweisungen
/// werden uebersprungen.
pub fn parse_document(xml_content: &str) -> Result<Node> {
    let content = xml_content.strip_prefix('\u{feff}').unwrap_or(xml_content);
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let node = node_from_tag(&reader, e)?;
                stack.push(node);
            }
            Ok(Event::Empty(ref e)) => {
                let node = node_from_tag(&reader, e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .context("End-Tag ohne zugehoeriges Start-Tag")?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                let position = reader.buffer_position();
                return Err(err)
                    .with_context(|| format!("Fehler beim Parsen des XML an Position {position}"));
            }
            _ => {}
        }

        buffer.clear();
    }

    if !stack.is_empty() {
        bail!("Dokument endet mit {} offenen Elementen", stack.len());
    }

    root.context("Dokument enthaelt kein Wurzelelement")
}

fn node_from_tag(reader: &Reader<&[u8]>, tag: &BytesStart) -> Result<Node> {
    let name = tag.name();
    let mut node = Node::new(reader.decoder().decode(name.as_ref())?.into_owned());

    for attr in tag.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr
            .unescape_value()
            .with_context(|| format!("Attribut {}@{} nicht lesbar", node.name, key))?
            .into_owned();
        node.push_attr(key, value);
    }

    Ok(node)
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        bail!("Mehr als ein Wurzelelement (<{}>)", node.name);
    }
    Ok(())
}
