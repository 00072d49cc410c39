//! Fragment assembly
//!
//! Merges per-sentence fragments into one model per document.

pub mod assembler;
pub mod grouping;

pub use assembler::{assemble, Assembler, AssemblyStats, ClassId};
pub use grouping::{assemble_documents, group_by_document};
