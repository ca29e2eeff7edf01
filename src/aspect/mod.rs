//! Signalbegriffe: Bitmasken der Signalbild-Matrix und ihre Animationsnamen.
//!
//! - `resolver`: Begriff für Hauptsignalzeile, Vorsignalspalte oder Einzelzelle
//! - `coupling`: Ketten gekoppelter Signale

pub mod coupling;
pub mod resolver;


pub use coupling::{coupling_chain, CouplingStep, MAX_COUPLING_DEPTH};
pub use resolver::{decode_bits, Aspect, AspectResolver};
