//! Function queries: per-document values computed from index data, usable for scoring, sorting
//! and filtering.
//!
//! A [ValueSource][function::ValueSource] describes a computation; binding it to a segment gives a
//! [DocValues][function::DocValues] cursor. Sources can be sorted by through the two-phase
//! [ValueSourceExt::get_sort_field][function::ValueSourceExt::get_sort_field] /
//! [SortField::rewrite][search::SortField::rewrite] protocol, and filtered with a
//! [ValueSourceScorer][function::ValueSourceScorer].

#![warn(clippy::all)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

mod error;
mod id;

/// Value sources, their per-segment values and the queries built on them.
pub mod function;

/// Segment reader types.
pub mod index;

/// Lucene search types.
pub mod search;

pub use {error::*, id::*};
