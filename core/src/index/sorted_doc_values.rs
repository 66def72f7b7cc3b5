use {
    crate::index::DocId,
    std::{
        fmt::Debug,
        io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult},
        sync::Arc,
    },
};

/// Per-segment term ordinal table for a single-valued field.
///
/// The distinct values of the field in the segment are sorted by their bytes (which, for UTF-8
/// text, is code point order) and numbered from `0`. Each document maps to the ordinal of its
/// value, or `-1` if it has none.
///
/// Ordinals are only meaningful within the segment snapshot that produced them.
pub trait SortedDocValues: Debug {
    /// Returns the ordinal for `doc`, or `-1` if the document has no value.
    fn ord(&self, doc: DocId) -> IoResult<i32>;

    /// Retrieves the value for the specified ordinal.
    ///
    /// # Errors
    /// Returns an [IoError] of kind [IoErrorKind::InvalidInput] if `ord` is out of range.
    fn lookup_ord(&self, ord: i32) -> IoResult<Vec<u8>>;

    /// Returns the number of unique values.
    fn value_count(&self) -> usize;
}

/// Returns the [SortedDocValues] for `field`, or [EmptySorted] if the segment has none.
pub fn get_sorted<LR>(reader: &LR, field: &str) -> IoResult<Arc<dyn SortedDocValues>>
where
    LR: crate::index::LeafReader + ?Sized,
{
    match reader.get_sorted_doc_values(field)? {
        None => Ok(Arc::new(EmptySorted)),
        Some(dv) => Ok(dv),
    }
}

/// An empty [SortedDocValues]: no values, every document maps to `-1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySorted;

impl SortedDocValues for EmptySorted {
    fn ord(&self, _doc: DocId) -> IoResult<i32> {
        Ok(-1)
    }

    fn lookup_ord(&self, ord: i32) -> IoResult<Vec<u8>> {
        Err(IoError::new(IoErrorKind::InvalidInput, format!("ord {ord} is out of range for an empty field")))
    }

    fn value_count(&self) -> usize {
        0
    }
}
