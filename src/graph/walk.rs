//! Begrenzter Lauf über eine Nachfolgerfunktion.
//!
//! Fahrweg-Rekonstruktion und Koppelketten sind beide „gehe zum Nächsten, bis nichts mehr
//! kommt“. [`BoundedWalk`] kapselt die gemeinsame Abbruchlogik: Schrittgrenze, erneut
//! besuchter Schlüssel, Ende der Folge oder Fehler der Schrittfunktion.

use std::collections::HashSet;
use std::hash::Hash;

/// Grund, aus dem ein [`BoundedWalk`] endete
#[derive(Debug, Clone, PartialEq)]
pub enum WalkEnd<K, E> {
    /// Schrittfunktion lieferte kein weiteres Element
    Finished,
    /// Schlüssel wurde ein zweites Mal erreicht
    Cycle(K),
    /// Schrittgrenze erreicht
    LimitReached(usize),
    /// Schrittfunktion schlug fehl
    Failed(E),
}

/// Endliche, lazy Folge von Schlüsseln ab `start`.
///
/// Der Nachfolger wird erst berechnet, wenn das nächste Element angefordert wird;
/// bricht der Aufrufer ab (z.B. am Ziel), wird nichts darüber hinaus aufgelöst.
pub struct BoundedWalk<K, E, F> {
    start: Option<K>,
    last: Option<K>,
    step: F,
    seen: HashSet<K>,
    limit: usize,
    taken: usize,
    end: Option<WalkEnd<K, E>>,
}

impl<K, E, F> BoundedWalk<K, E, F>
where
    K: Clone + Eq + Hash,
    F: FnMut(&K) -> Result<Option<K>, E>,
{
    pub fn new(start: K, limit: usize, step: F) -> Self {
        Self {
            start: Some(start),
            last: None,
            step,
            seen: HashSet::new(),
            limit,
            taken: 0,
            end: None,
        }
    }

    /// Abbruchgrund; `None`, solange die Folge nicht erschöpft ist
    pub fn end(&self) -> Option<&WalkEnd<K, E>> {
        self.end.as_ref()
    }

    /// Anzahl bisher gelieferter Schlüssel
    pub fn taken(&self) -> usize {
        self.taken
    }

    /// Erschöpft die Folge und liefert alle Schlüssel samt Abbruchgrund
    pub fn run(mut self) -> (Vec<K>, WalkEnd<K, E>) {
        let visited: Vec<K> = self.by_ref().collect();
        let end = self.end.take().unwrap_or(WalkEnd::Finished);
        (visited, end)
    }

    fn finish(&mut self, end: WalkEnd<K, E>) -> Option<K> {
        self.end = Some(end);
        None
    }
}

impl<K, E, F> Iterator for BoundedWalk<K, E, F>
where
    K: Clone + Eq + Hash,
    F: FnMut(&K) -> Result<Option<K>, E>,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.end.is_some() {
            return None;
        }

        let candidate = match (self.start.take(), self.last.take()) {
            (Some(start), _) => start,
            (None, Some(last)) => match (self.step)(&last) {
                Ok(Some(next)) => next,
                Ok(None) => return self.finish(WalkEnd::Finished),
                Err(e) => return self.finish(WalkEnd::Failed(e)),
            },
            (None, None) => return self.finish(WalkEnd::Finished),
        };

        if self.taken >= self.limit {
            return self.finish(WalkEnd::LimitReached(self.taken));
        }
        if !self.seen.insert(candidate.clone()) {
            return self.finish(WalkEnd::Cycle(candidate));
        }

        self.taken += 1;
        self.last = Some(candidate.clone());
        Some(candidate)
    }
}
