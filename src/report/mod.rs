//! Textausgabe der Analyseergebnisse.
//!
//! - `style`: Farbpalette (farbig oder schlicht)
//! - `routes`: Fahrstraßen-Blöcke und Auswahl betroffener Fahrstraßen
//! - `combinations`: Signalkombinationen
//! - `audit`: Referenzpunkt-Prüfung
//!
//! Alle Funktionen schreiben zeilenweise in einen [`std::io::Write`].

pub mod audit;
pub mod combinations;
pub mod routes;
pub mod style;


pub use audit::write_audit;
pub use combinations::write_combinations;
pub use routes::{select_routes, write_route, write_routes};
pub use style::Palette;
