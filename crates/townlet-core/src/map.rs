//! Static town layout and destination marker scanning.
//!
//! The game map is a fixed rectangular grid of ASCII tiles. A handful of
//! marker characters denote named locations the player can be sent to;
//! [`scan_markers`] extracts their coordinates. Destinations are derived,
//! never stored: every query re-scans the layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The static town layout the browser renders.
///
/// Rows are equal length; `#` is a wall, `P` the player start, digits are
/// NPC spawn points. The marker characters recognized by the scanner are
/// listed in [`MARKERS`].
pub const MAP_LAYOUT: [&str; 10] = [
    "####################",
    "#P   1   W   2     #",
    "#                  #",
    "#    B   h   M   C #",
    "#                  #",
    "# 3   4       5    #",
    "#                  #",
    "#                  #",
    "# 5           6    #",
    "####################",
];

/// Marker character to destination name table.
///
/// The names are part of the wire contract with the browser and the tool
/// surface, so they stay as-is.
const MARKERS: [(char, &str); 5] = [
    ('h', "casa"),
    ('W', "trabalho"),
    ('M', "mercado"),
    ('B', "banco"),
    ('C', "loja_carros"),
];

/// A position on the town grid.
///
/// `x` is the column index, `y` the row index, both zero-based from the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

/// Scan a layout for destination markers.
///
/// The scan is row-major, top-to-bottom then left-to-right. If a marker
/// character appears more than once, the first occurrence wins; later
/// occurrences are ignored. An absent marker simply yields an absent key,
/// there is no error path.
pub fn scan_markers(layout: &[&str]) -> BTreeMap<String, GridPos> {
    let mut found = BTreeMap::new();
    for (y, row) in layout.iter().enumerate() {
        for (x, tile) in row.chars().enumerate() {
            if let Some((_, name)) = MARKERS.iter().find(|(marker, _)| *marker == tile) {
                found.entry((*name).to_owned()).or_insert(GridPos { x, y });
            }
        }
    }
    found
}

/// Destination coordinates derived from [`MAP_LAYOUT`].
pub fn destinations() -> BTreeMap<String, GridPos> {
    scan_markers(&MAP_LAYOUT)
}

/// Resolve a destination name (case-insensitive) to its coordinates.
pub fn resolve(name: &str) -> Option<GridPos> {
    destinations().get(&name.to_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn markers_found_at_expected_coordinates() {
        let found = destinations();
        assert_eq!(found.get("casa"), Some(&GridPos { x: 9, y: 3 }));
        assert_eq!(found.get("trabalho"), Some(&GridPos { x: 9, y: 1 }));
        assert_eq!(found.get("mercado"), Some(&GridPos { x: 13, y: 3 }));
        assert_eq!(found.get("banco"), Some(&GridPos { x: 5, y: 3 }));
        assert_eq!(found.get("loja_carros"), Some(&GridPos { x: 17, y: 3 }));
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn duplicate_marker_first_occurrence_wins() {
        let layout = ["....", ".h..", "...h"];
        let found = scan_markers(&layout);
        assert_eq!(found.get("casa"), Some(&GridPos { x: 1, y: 1 }));
    }

    #[test]
    fn absent_marker_yields_absent_key() {
        let layout = ["....", ".W.."];
        let found = scan_markers(&layout);
        assert_eq!(found.get("trabalho"), Some(&GridPos { x: 1, y: 1 }));
        assert!(!found.contains_key("casa"));
    }

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(resolve("CASA"), resolve("casa"));
        assert!(resolve("casa").is_some());
        assert!(resolve("nowhere").is_none());
    }

    #[test]
    fn grid_pos_serializes_as_xy_object() {
        let json = serde_json::to_value(GridPos { x: 9, y: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"x": 9, "y": 3}));
    }
}
