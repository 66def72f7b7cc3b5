use {
    crate::index::{leaf_reader::LeafReader, sorted_doc_values::SortedDocValues, DocId},
    bitvec::vec::BitVec,
    std::{
        collections::{BTreeSet, HashMap},
        io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult},
        sync::Arc,
    },
};

/// An immutable, in-memory segment of documents with single-valued string fields.
///
/// The term ordinal table of every field is computed once, when the segment is built.
///
/// ```
/// use lucene_function::index::{LeafReader, MemoryLeafReader, SortedDocValues};
///
/// let reader = MemoryLeafReader::builder()
///     .add_document([("fruit", "pear")])
///     .add_document([("fruit", "apple")])
///     .add_document(Vec::<(&str, &str)>::new())
///     .build();
/// assert_eq!(reader.max_doc(), 3);
/// let ords = reader.get_sorted_doc_values("fruit").unwrap().unwrap();
/// assert_eq!(ords.ord(0).unwrap(), 1);
/// assert_eq!(ords.ord(2).unwrap(), -1);
/// ```
#[derive(Debug)]
pub struct MemoryLeafReader {
    max_doc: DocId,
    deleted: BitVec,
    sorted: HashMap<String, Arc<MemorySortedDocValues>>,
}

impl MemoryLeafReader {
    /// Returns a builder for a new segment.
    pub fn builder() -> MemoryLeafReaderBuilder {
        MemoryLeafReaderBuilder::default()
    }
}

impl LeafReader for MemoryLeafReader {
    #[inline]
    fn max_doc(&self) -> DocId {
        self.max_doc
    }

    fn num_docs(&self) -> DocId {
        self.max_doc - self.deleted.count_ones() as DocId
    }

    fn has_deletions(&self) -> bool {
        self.deleted.any()
    }

    fn is_deleted(&self, doc: DocId) -> bool {
        usize::try_from(doc).ok().and_then(|doc| self.deleted.get(doc).map(|bit| *bit)).unwrap_or(false)
    }

    fn get_sorted_doc_values(&self, field: &str) -> IoResult<Option<Arc<dyn SortedDocValues>>> {
        Ok(self.sorted.get(field).map(|dv| {
            let dv: Arc<dyn SortedDocValues> = dv.clone();
            dv
        }))
    }
}

/// Builder for [MemoryLeafReader].
#[derive(Debug, Default)]
pub struct MemoryLeafReaderBuilder {
    docs: Vec<HashMap<String, String>>,
    deleted: Vec<DocId>,
}

impl MemoryLeafReaderBuilder {
    /// Appends a document; it receives the next document id.
    pub fn add_document<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.docs.push(fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Marks a previously added document as deleted.
    pub fn delete_document(mut self, doc: DocId) -> Self {
        self.deleted.push(doc);
        self
    }

    /// Builds the segment, computing the term ordinal table of every field.
    ///
    /// Deletions of document ids that were never added are ignored.
    pub fn build(self) -> MemoryLeafReader {
        let max_doc = self.docs.len();
        let mut deleted = BitVec::repeat(false, max_doc);
        for doc in self.deleted {
            if let Ok(doc) = usize::try_from(doc) {
                if doc < max_doc {
                    deleted.set(doc, true);
                }
            }
        }

        let mut terms: HashMap<&str, BTreeSet<&[u8]>> = HashMap::new();
        for doc in &self.docs {
            for (field, value) in doc {
                terms.entry(field.as_str()).or_default().insert(value.as_bytes());
            }
        }

        let mut sorted = HashMap::with_capacity(terms.len());
        for (field, values) in terms {
            let values: Vec<Vec<u8>> = values.into_iter().map(<[u8]>::to_vec).collect();
            let ords = self
                .docs
                .iter()
                .map(|doc| match doc.get(field) {
                    None => -1,
                    Some(value) => {
                        values.binary_search_by(|v| v.as_slice().cmp(value.as_bytes())).map(|ord| ord as i32).unwrap_or(-1)
                    }
                })
                .collect();

            sorted.insert(
                field.to_string(),
                Arc::new(MemorySortedDocValues {
                    values,
                    ords,
                }),
            );
        }

        MemoryLeafReader {
            max_doc: max_doc as DocId,
            deleted,
            sorted,
        }
    }
}

/// The term ordinal table of one field of a [MemoryLeafReader].
#[derive(Debug)]
pub struct MemorySortedDocValues {
    values: Vec<Vec<u8>>,
    ords: Vec<i32>,
}

impl SortedDocValues for MemorySortedDocValues {
    fn ord(&self, doc: DocId) -> IoResult<i32> {
        usize::try_from(doc).ok().and_then(|doc| self.ords.get(doc).copied()).ok_or_else(|| {
            IoError::new(
                IoErrorKind::InvalidInput,
                format!("doc {doc} is out of range for a segment with {} docs", self.ords.len()),
            )
        })
    }

    fn lookup_ord(&self, ord: i32) -> IoResult<Vec<u8>> {
        usize::try_from(ord)
            .ok()
            .and_then(|ord| self.values.get(ord).cloned())
            .ok_or_else(|| IoError::new(IoErrorKind::InvalidInput, format!("ord {ord} is out of range")))
    }

    fn value_count(&self) -> usize {
        self.values.len()
    }
}
