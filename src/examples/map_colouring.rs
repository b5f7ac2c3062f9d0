//! The classic Australia map-colouring problem: adjacent regions must not
//! share a colour.

use crate::{error::Result, solver::store::ConstraintStore};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Colour {
    Red,
    Green,
    Blue,
}

/// Adjacent mainland regions of Australia (Tasmania is unconstrained).
pub const ADJACENCIES: [(&str, &str); 9] = [
    ("wa", "nt"),
    ("wa", "sa"),
    ("nt", "sa"),
    ("nt", "q"),
    ("sa", "q"),
    ("sa", "nsw"),
    ("sa", "v"),
    ("q", "nsw"),
    ("nsw", "v"),
];

/// Builds the Australia map-colouring store with three colours per region.
pub fn australia() -> Result<ConstraintStore<&'static str, Colour>> {
    let variables = vec!["wa", "nt", "sa", "q", "nsw", "v", "t"];
    let palette = im::hashset! {Colour::Red, Colour::Green, Colour::Blue};
    let domains = variables
        .iter()
        .map(|region| (*region, palette.clone()))
        .collect();

    ConstraintStore::new(variables, domains, &ADJACENCIES)
}
