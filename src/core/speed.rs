//! Geschwindigkeiten in m/s.
//!
//! Negative Werte stehen für "unbegrenzt"; der exakte Wert [`DARK`] markiert eine
//! dunkle Vorsignal-Spalte.

/// Unbegrenzte Geschwindigkeit (Startwert der Mindestgeschwindigkeit)
pub const UNCONSTRAINED: f32 = -1.0;
/// Vorsignal dunkel
pub const DARK: f32 = -2.0;

/// Kombiniert zwei Geschwindigkeiten zur kleineren; unbegrenzt verliert gegen jeden Wert.
pub fn combine_min_speed(v1: f32, v2: f32) -> f32 {
    match (v1 < 0.0, v2 < 0.0) {
        (true, true) => v1.max(v2),
        (true, false) => v2,
        (false, true) => v1,
        (false, false) => v1.min(v2),
    }
}

/// `true`, wenn `speed` eine echte Geschwindigkeitsangabe ist (weder unbegrenzt noch dunkel)
pub fn is_limit(speed: f32) -> bool {
    speed >= 0.0
}

/// `true`, wenn die Spalte dunkel geschaltet ist
pub fn is_dark(speed: f32) -> bool {
    speed == DARK
}

/// `true`, wenn die angezeigte Geschwindigkeit `speed` die Grenze `limit` überschreitet.
///
/// Nur echte Angaben zählen; eine unbegrenzte Grenze kann nie überschritten werden.
pub fn exceeds(speed: f32, limit: f32) -> bool {
    is_limit(speed) && is_limit(limit) && speed > limit
}

/// Gleichheit mit Toleranz für in m/s gespeicherte km/h-Werte
pub fn same_speed(v1: f32, v2: f32) -> bool {
    if v1 < 0.0 || v2 < 0.0 {
        return v1 < 0.0 && v2 < 0.0 && is_dark(v1) == is_dark(v2);
    }
    (v1 - v2).abs() < 0.01
}

/// Darstellung in km/h
pub fn format_speed(speed: f32) -> String {
    if is_dark(speed) {
        "dunkel".to_string()
    } else if speed < 0.0 {
        "oo".to_string()
    } else {
        format!("{:.0}", speed * 3.6)
    }
}
