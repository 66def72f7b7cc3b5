mod index_reader;
mod leaf_reader;
mod memory_leaf_reader;
mod sorted_doc_values;

pub use {index_reader::*, leaf_reader::*, memory_leaf_reader::*, sorted_doc_values::*};

/// A segment-local document number.
///
/// Document ids run from `0` to `max_doc - 1` within a segment. `-1` means an iterator has not been
/// positioned yet; [NO_MORE_DOCS][crate::search::NO_MORE_DOCS] marks exhaustion.
pub type DocId = i32;
