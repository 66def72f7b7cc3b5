use {
    crate::{
        error::{FunctionError, FunctionResult},
        function::{context::Context, doc_values::DocValues, value_source::ValueSource},
        id::SourceId,
        index::{get_sorted, DocId, LeafReader, SortedDocValues},
    },
    std::{any::Any, hash::Hasher, sync::Arc},
};

/// Obtains the ordinal of the field value from the sorted doc values of the segment.
///
/// The native lucene index order is used to assign an ordinal value for each field value.
/// Field values (terms) are lexicographically ordered by unicode value, and numbered starting at
/// 1. Example:
///
/// If there were only three field values: "apple","banana","pear" then ord("apple")=1,
/// ord("banana")=2, ord("pear")=3.
///
/// Documents without a value for the field get ordinal 0.
///
/// Ordinals are local to a segment: the same term can have different ordinals in different
/// segments, and the ordinals of a segment are only comparable to each other.
#[derive(Debug)]
pub struct OrdFieldSource {
    id: SourceId,
    field: String,
}

impl OrdFieldSource {
    /// Creates the source for the ordinals of `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            id: SourceId::random_id(),
            field: field.into(),
        }
    }

    /// The field whose ordinals are returned.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl ValueSource for OrdFieldSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn description(&self) -> String {
        format!("ord({})", self.field)
    }

    fn get_values(&self, _context: &Context, reader: &Arc<dyn LeafReader>) -> FunctionResult<Box<dyn DocValues>> {
        let sorted = get_sorted(reader.as_ref(), &self.field)?;
        Ok(Box::new(OrdDocValues {
            description: self.description(),
            sorted,
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other.as_any().downcast_ref::<Self>().map_or(false, |other| self.field == other.field)
    }

    fn source_hash(&self, state: &mut dyn Hasher) {
        state.write(b"ord");
        state.write(self.field.as_bytes());
    }
}

#[derive(Debug)]
struct OrdDocValues {
    description: String,
    sorted: Arc<dyn SortedDocValues>,
}

impl OrdDocValues {
    fn ord_val(&self, doc: DocId) -> FunctionResult<i32> {
        // -1 for missing becomes 0
        match self.sorted.ord(doc) {
            Ok(ord) => Ok(ord + 1),
            Err(e) => Err(FunctionError::evaluation(self.description.clone(), doc, e)),
        }
    }
}

impl DocValues for OrdDocValues {
    fn float_val(&mut self, doc: DocId) -> FunctionResult<f32> {
        Ok(self.ord_val(doc)? as f32)
    }

    fn int_val(&mut self, doc: DocId) -> FunctionResult<i32> {
        self.ord_val(doc)
    }

    fn long_val(&mut self, doc: DocId) -> FunctionResult<i64> {
        Ok(self.ord_val(doc)? as i64)
    }

    fn double_val(&mut self, doc: DocId) -> FunctionResult<f64> {
        Ok(self.ord_val(doc)? as f64)
    }

    fn str_val(&mut self, doc: DocId) -> FunctionResult<String> {
        Ok(self.ord_val(doc)?.to_string())
    }

    fn to_string(&mut self, doc: DocId) -> FunctionResult<String> {
        Ok(format!("{}={}", self.description, self.ord_val(doc)?))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::OrdFieldSource,
        crate::{
            error::FunctionError,
            function::{Context, ValueSource},
            index::{LeafReader, MemoryLeafReader},
        },
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    #[test]
    fn test_ordinals() {
        let reader: Arc<dyn LeafReader> = Arc::new(
            MemoryLeafReader::builder()
                .add_document([("fruit", "pear")])
                .add_document([("fruit", "apple")])
                .add_document([("fruit", "banana")])
                .add_document([("color", "red")])
                .build(),
        );
        let source = OrdFieldSource::new("fruit");
        assert_eq!(source.description(), "ord(fruit)");

        let mut values = source.get_values(&Context::new(), &reader).unwrap();
        let ords: Vec<i32> = (0..4).map(|doc| values.int_val(doc).unwrap()).collect();
        assert_eq!(ords, vec![3, 1, 2, 0]);
        assert_eq!(values.float_val(0).unwrap(), 3.0);
        assert_eq!(values.double_val(2).unwrap(), 2.0);
        assert_eq!(values.str_val(1).unwrap(), "1");
        assert_eq!(values.to_string(3).unwrap(), "ord(fruit)=0");
        assert_eq!(values.explain(0).unwrap().summary(), "3 = ord(fruit)=3");
    }

    #[test]
    fn test_missing_field() {
        let reader: Arc<dyn LeafReader> = Arc::new(MemoryLeafReader::builder().add_document([("a", "x")]).build());
        let mut values = OrdFieldSource::new("nope").get_values(&Context::new(), &reader).unwrap();
        assert_eq!(values.int_val(0).unwrap(), 0);
    }

    #[test]
    fn test_out_of_range_doc_is_evaluation_error() {
        let reader: Arc<dyn LeafReader> = Arc::new(MemoryLeafReader::builder().add_document([("f", "x")]).build());
        let mut values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        match values.int_val(5) {
            Err(FunctionError::Evaluation {
                description,
                doc,
                ..
            }) => {
                assert_eq!(description, "ord(f)");
                assert_eq!(doc, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_equality() {
        let a = OrdFieldSource::new("f");
        assert!(a.source_eq(&OrdFieldSource::new("f")));
        assert!(!a.source_eq(&OrdFieldSource::new("g")));
    }
}
