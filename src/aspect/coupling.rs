//! Ketten gekoppelter Signale.

use crate::core::ElementRef;
use crate::graph::BoundedWalk;
use crate::store::{LookupError, ModuleStore};

/// Obergrenze für die Länge einer Koppelkette
pub const MAX_COUPLING_DEPTH: usize = 64;

/// Schrittfunktion einer Koppelkette
pub type CouplingStep<'a> =
    Box<dyn FnMut(&ElementRef) -> Result<Option<ElementRef>, LookupError> + 'a>;

/// Lazy Folge der Signalstandorte ab `start`, dem gekoppelten Signal folgend.
///
/// Das erste Element ist `start` selbst. Für eine Hauptsignalzeile `row` gilt eine
/// zeilenspezifische Kopplung vor der des Signals. Ein erneut erreichter Standort beendet
/// die Folge mit [`WalkEnd::Cycle`](crate::graph::WalkEnd::Cycle); ein ungültiger Verweis
/// mit [`WalkEnd::Failed`](crate::graph::WalkEnd::Failed).
pub fn coupling_chain<'a>(
    store: &'a ModuleStore,
    start: ElementRef,
    row: Option<usize>,
) -> BoundedWalk<ElementRef, LookupError, CouplingStep<'a>> {
    BoundedWalk::new(
        start,
        MAX_COUPLING_DEPTH,
        Box::new(move |location: &ElementRef| {
            let signal = store.signal_at(location)?;
            let Some(coupling) = signal.coupling_for_row(row) else {
                return Ok(None);
            };
            let module = coupling
                .module
                .clone()
                .unwrap_or_else(|| location.module.clone());
            let target = store.resolve_reference(&module, coupling.ref_nr)?;
            let coupled = store.signal_near(&target)?;
            Ok(Some(coupled.location.clone()))
        }),
    )
}
