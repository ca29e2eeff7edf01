//! Auflösung von Signalbild-Bitmasken in lesbare Begriffe.

use crate::core::{Event, MatrixCell, Signal};
use crate::store::{LookupError, ModuleStore};
use indexmap::IndexSet;

/// Ein angezeigter Signalbegriff
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aspect {
    /// Signalbild-Bitmaske, 0 = nicht bestimmbar
    pub picture: u64,
    /// Dekodierte Animationsnamen, `?` wenn keiner gesetzt ist
    pub label: String,
    /// Zusätze wie `Anzeige 500 m` oder `+ 27`
    pub annotations: Vec<String>,
}

impl Aspect {
    /// Begriff, der sich nicht bestimmen lässt
    pub fn undetermined() -> Self {
        Self {
            picture: 0,
            label: "?".to_string(),
            annotations: Vec::new(),
        }
    }

    /// Label samt Zusätzen in einer Zeile
    pub fn display(&self) -> String {
        if self.annotations.is_empty() {
            self.label.clone()
        } else {
            format!("{} {}", self.label, self.annotations.join(" "))
        }
    }
}

/// Benennt gesetzte Bits: Bit `i` trägt den Namen `names[i]`.
///
/// Namen werden mit ` + ` verbunden; ist kein benanntes Bit gesetzt, ergibt sich `?`.
pub fn decode_bits(names: &[String], picture: u64) -> String {
    let included: Vec<&str> = names
        .iter()
        .take(u64::BITS as usize)
        .enumerate()
        .filter(|(bit, _)| (picture >> bit) & 1 == 1)
        .map(|(_, name)| name.as_str())
        .collect();
    if included.is_empty() {
        "?".to_string()
    } else {
        included.join(" + ")
    }
}

/// Berechnet Signalbegriffe; Animationsnamen kommen aus dem [`ModuleStore`].
#[derive(Clone, Copy)]
pub struct AspectResolver<'a> {
    store: &'a ModuleStore,
}

impl<'a> AspectResolver<'a> {
    pub fn new(store: &'a ModuleStore) -> Self {
        Self { store }
    }

    /// Namen aller Bildbits eines Signals in Bitreihenfolge.
    ///
    /// Jeder Frame belegt ein Bit je Animation seiner Landschaftsdatei, oder genau ein
    /// Bit (benannt nach der Datei), wenn die Datei keine Animationen liefert.
    pub fn bit_names(&self, signal: &Signal) -> Vec<String> {
        let mut names = Vec::new();
        for frame in &signal.frames {
            let animations = frame
                .file
                .as_ref()
                .map(|file| self.store.animation_names(file));
            match animations {
                Some(animations) if !animations.is_empty() => {
                    names.extend(animations.iter().cloned());
                }
                _ => names.push(frame.label.clone()),
            }
        }
        names
    }

    pub fn decode_picture(&self, signal: &Signal, picture: u64) -> String {
        decode_bits(&self.bit_names(signal), picture)
    }

    /// Begriff des Hauptsignals in Zeile `row`.
    ///
    /// Ersatzsignal: `row` indiziert die Ersatzsignal-Tabelle.
    /// Sonst: UND über alle Spalten der Zeile, Anzeige-Ereignis aus der Spalte mit
    /// Vorsignalgeschwindigkeit 0.
    pub fn main_row(
        &self,
        signal: &Signal,
        row: usize,
        substitute: bool,
    ) -> Result<Aspect, LookupError> {
        if substitute {
            let entry = signal
                .substitutes
                .get(row)
                .ok_or(LookupError::OutOfRangeIndex {
                    what: "Ersatzsignal",
                    index: row,
                    len: signal.substitutes.len(),
                })?;
            return Ok(self.aspect(
                signal,
                entry.cell.picture,
                display_orders(&entry.cell.events),
            ));
        }

        if row >= signal.main_aspects.len() {
            return Err(LookupError::OutOfRangeIndex {
                what: "Hauptsignalzeile",
                index: row,
                len: signal.main_aspects.len(),
            });
        }

        let mut picture = u64::MAX;
        for column in 0..signal.column_count() {
            picture &= matrix_cell(signal, row, column)?.picture;
        }
        let zero_column = matrix_cell(signal, row, signal.zero_speed_column())?;
        Ok(self.aspect(signal, picture, display_orders(&zero_column.events)))
    }

    /// Begriff des Vorsignals in Spalte `column`.
    ///
    /// Nur Zugfahrt-Zeilen (Geschwindigkeit ≠ 0, Fahrstraßentyp-Bit 2) zählen. Ohne
    /// solche Zeilen ist der Begriff nicht bestimmbar. Ereigniscodes werden über alle
    /// beteiligten Zellen geschnitten.
    pub fn column(&self, signal: &Signal, column: usize) -> Result<Aspect, LookupError> {
        if column >= signal.column_count() {
            return Err(LookupError::OutOfRangeIndex {
                what: "Vorsignalspalte",
                index: column,
                len: signal.column_count(),
            });
        }

        let mut picture = u64::MAX;
        let mut codes: Option<IndexSet<u32>> = None;
        for (row, _) in signal
            .main_aspects
            .iter()
            .enumerate()
            .filter(|(_, aspect)| aspect.is_train_movement())
        {
            let cell = matrix_cell(signal, row, column)?;
            picture &= cell.picture;
            let cell_codes: IndexSet<u32> = cell.events.iter().map(|e| e.code).collect();
            codes = Some(match codes {
                Some(mut previous) => {
                    previous.retain(|code| cell_codes.contains(code));
                    previous
                }
                None => cell_codes,
            });
        }

        let Some(codes) = codes else {
            return Ok(Aspect::undetermined());
        };
        let annotations = codes.iter().map(|code| format!("+ {}", code)).collect();
        Ok(self.aspect(signal, picture, annotations))
    }

    /// Begriff einer einzelnen Matrixzelle
    pub fn cell(&self, signal: &Signal, row: usize, column: usize) -> Result<Aspect, LookupError> {
        let cell = matrix_cell(signal, row, column)?;
        Ok(self.aspect(signal, cell.picture, display_orders(&cell.events)))
    }

    fn aspect(&self, signal: &Signal, picture: u64, annotations: Vec<String>) -> Aspect {
        Aspect {
            picture,
            label: self.decode_picture(signal, picture),
            annotations,
        }
    }
}

fn matrix_cell(signal: &Signal, row: usize, column: usize) -> Result<&MatrixCell, LookupError> {
    if row >= signal.main_aspects.len() {
        return Err(LookupError::OutOfRangeIndex {
            what: "Hauptsignalzeile",
            index: row,
            len: signal.main_aspects.len(),
        });
    }
    if column >= signal.column_count() {
        return Err(LookupError::OutOfRangeIndex {
            what: "Vorsignalspalte",
            index: column,
            len: signal.column_count(),
        });
    }
    // Zeile und Spalte sind gültig, es fehlen nur Matrixeinträge
    signal.cell(row, column).ok_or(LookupError::OutOfRangeIndex {
        what: "Matrixeintrag",
        index: row
            .saturating_mul(signal.column_count())
            .saturating_add(column),
        len: signal.matrix.len(),
    })
}

fn display_orders(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(Event::display_order_label)
        .collect()
}
