//! Core abstractions for fragment extraction and assembly
//!
//! This module defines the model types every stage shares, the boundary
//! traits for the external collaborators (parser, classifier, coreference),
//! and the ambient error and logging layers.

pub(crate) mod chumsky_utils;
mod comparison;
mod coreference;
mod detector;
mod error;
mod fragment;
mod graph;
pub mod logging;
mod model;
mod parser;
mod text;

pub use comparison::*;
pub use coreference::*;
pub use detector::*;
pub use error::*;
pub use fragment::*;
pub use graph::*;
pub use logging::*;
pub use model::*;
pub use parser::*;
pub use text::*;
