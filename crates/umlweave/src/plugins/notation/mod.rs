//! Diagram notation
//!
//! Ground-truth diagrams are written in a Mermaid-style class notation. This
//! plugin parses it and converts it into a [`Model`](crate::core::Model).

mod chumsky_parser;
mod converter;

pub use chumsky_parser::{Arrow, NotationParser, ParsedClass, ParsedRelationship, Statement};
pub use converter::{model_from_notation, parse_cardinality, NotationConverter};
