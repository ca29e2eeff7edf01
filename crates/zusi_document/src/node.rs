//! Generischer Dokumentknoten: Name, Attribute in Dateireihenfolge, Kindknoten.

use anyhow::{Context, Result};
use std::str::FromStr;

/// Ein Element des XML-Baums.
///
/// Textinhalte werden nicht gespeichert; Zusi-Dateien tragen ihre Daten
/// ausschliesslich in Attributen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Tag-Name
    pub name: String,
    attributes: Vec<(String, String)>,
    /// Kindknoten in Dokumentreihenfolge
    pub children: Vec<Node>,
}

impl Node {
    /// Erstellt einen leeren Knoten
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: haengt ein Attribut an
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attr(key, value);
        self
    }

    /// Builder: haengt einen Kindknoten an
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Setzt ein Attribut. Doppelte Schluessel: der erste Wert gewinnt.
    pub fn push_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.attr(&key).is_some() {
            log::debug!("Doppeltes Attribut '{}' an <{}> ignoriert", key, self.name);
            return;
        }
        self.attributes.push((key, value.into()));
    }

    /// Rohwert eines Attributs
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Alle Attribute in Dateireihenfolge
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Liest ein Attribut typisiert. Fehlt es, ist das Ergebnis `None`;
    /// ein vorhandener, aber unlesbarer Wert ist ein Fehler.
    pub fn parse_attr<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(raw) = self.attr(key) else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Attribut {}@{}: Wert '{}' ungueltig", self.name, key, trimmed))
    }

    /// Wie [`Node::parse_attr`], mit Standardwert fuer fehlende Attribute
    pub fn attr_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        Ok(self.parse_attr(key)?.unwrap_or(default))
    }

    /// Text-Attribut mit leerem String als Standard
    pub fn attr_str(&self, key: &str) -> &str {
        self.attr(key).unwrap_or("")
    }

    /// Erstes Kind mit dem angegebenen Namen
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Alle Kinder mit dem angegebenen Namen
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Folgt einem `/`-getrennten Pfad ueber jeweils das erste passende Kind
    pub fn find(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Alle Knoten am Ende eines `/`-getrennten Pfads (alle Zweige)
    pub fn find_all<'a>(&'a self, path: &str) -> Vec<&'a Node> {
        let mut current = vec![self];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(|c| c.name == segment))
                .collect();
        }
        current
    }
}
