//! Text processing shared by the flipotron engine: the two-layout mapping table,
//! script-aware case helpers and the case-toggle transform.

pub mod text;

pub use text::{
    case::{CharCase, case_of, to_lower, to_upper, toggle_case},
    mapping::{Conversion, DEFAULT_PAIRS, Direction, MappingTable},
};
