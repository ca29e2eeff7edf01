//! Core-Domänentypen: Streckenelemente, Referenzpunkte, Signale, Fahrstrassen, Module.

pub mod element;
pub mod event;
pub mod module;
pub mod refs;
pub mod route;
pub mod signal;
pub mod speed;

pub use element::{DirectionInfo, SuccessorSlot, TrackElement};
pub use event::{Event, EVENT_CROSSING_CLOSE, EVENT_CROSSING_OPEN, EVENT_DISPLAY_ORDER};
pub use module::{Module, ReferenceKind, ReferencePoint};
pub use refs::{Direction, ElementRef};
pub use route::{
    DistantSignalPlacement, MainSignalPlacement, PlacementRef, RegisterPlacement, Route,
    SwitchPlacement, TrackClass,
};
pub use signal::{
    CouplingRef, DistantAspect, MainAspect, MatrixCell, Signal, SignalFrame, SubstituteAspect,
};
pub use zusi_document::DataPath;
