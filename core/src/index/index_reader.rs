use {
    crate::index::{leaf_reader::LeafReader, DocId},
    std::sync::Arc,
};

/// A segment of a composite [IndexReader], together with its position in the parent.
#[derive(Clone, Debug)]
pub struct LeafReaderContext {
    /// The reader's ord in the top-level's leaves array
    pub ord: usize,

    /// The reader's absolute doc base
    pub doc_base: DocId,

    reader: Arc<dyn LeafReader>,
}

impl LeafReaderContext {
    /// Creates a context for a reader that is not part of any composite reader.
    pub fn top_level(reader: Arc<dyn LeafReader>) -> Self {
        Self {
            ord: 0,
            doc_base: 0,
            reader,
        }
    }

    /// Returns the segment reader.
    #[inline]
    pub fn reader(&self) -> &Arc<dyn LeafReader> {
        &self.reader
    }
}

/// A point-in-time view over an ordered list of segments.
///
/// Segment `i` covers the global document ids `doc_base(i) .. doc_base(i) + max_doc(i)`.
#[derive(Clone, Debug)]
pub struct IndexReader {
    leaves: Vec<LeafReaderContext>,
    max_doc: DocId,
}

impl IndexReader {
    /// Creates a reader over the given segments, in order.
    pub fn new(readers: Vec<Arc<dyn LeafReader>>) -> Self {
        let mut leaves = Vec::with_capacity(readers.len());
        let mut doc_base = 0;

        for (ord, reader) in readers.into_iter().enumerate() {
            let max_doc = reader.max_doc();
            leaves.push(LeafReaderContext {
                ord,
                doc_base,
                reader,
            });
            doc_base += max_doc;
        }

        Self {
            leaves,
            max_doc: doc_base,
        }
    }

    /// Returns the segments of this reader.
    #[inline]
    pub fn leaves(&self) -> &[LeafReaderContext] {
        &self.leaves
    }

    /// Returns one greater than the largest global document number.
    #[inline]
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Returns the number of live documents across all segments.
    pub fn num_docs(&self) -> DocId {
        self.leaves.iter().map(|leaf| leaf.reader.num_docs()).sum()
    }
}

impl From<Arc<dyn LeafReader>> for IndexReader {
    fn from(reader: Arc<dyn LeafReader>) -> Self {
        Self::new(vec![reader])
    }
}

#[cfg(test)]
mod tests {
    use {
        super::IndexReader,
        crate::index::{LeafReader, MemoryLeafReader},
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    #[test]
    fn test_doc_bases() {
        let first: Arc<dyn LeafReader> =
            Arc::new(MemoryLeafReader::builder().add_document([("a", "1")]).add_document([("a", "2")]).build());
        let second: Arc<dyn LeafReader> =
            Arc::new(MemoryLeafReader::builder().add_document([("a", "3")]).delete_document(0).build());

        let reader = IndexReader::new(vec![first, second]);
        assert_eq!(reader.max_doc(), 3);
        assert_eq!(reader.num_docs(), 2);
        let bases: Vec<_> = reader.leaves().iter().map(|leaf| (leaf.ord, leaf.doc_base)).collect();
        assert_eq!(bases, vec![(0, 0), (1, 2)]);
    }
}
