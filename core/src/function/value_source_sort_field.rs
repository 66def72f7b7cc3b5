use {
    crate::{
        error::{FunctionError, FunctionResult},
        function::{context::Context, doc_values::DocValues, value_source::ValueSource},
        index::{DocId, LeafReaderContext},
        search::{compare_doubles, FieldComparator, FieldComparatorSource, FieldValue, IndexSearcher, SortField},
    },
    log::debug,
    once_cell::sync::Lazy,
    std::{cmp::Ordering, sync::Arc},
};

/// Comparator source handed out by sort fields that were never weighted.
pub static UNWEIGHTED_COMPARATOR_SOURCE: Lazy<Arc<dyn FieldComparatorSource + Send + Sync>> =
    Lazy::new(|| Arc::new(UnweightedComparatorSource));

/// A sort field that sorts by the value of a [ValueSource].
///
/// This is the placeholder returned by
/// [ValueSourceExt::get_sort_field][crate::function::ValueSourceExt::get_sort_field]. Call
/// [ValueSourceSortField::weight] (usually through [SortField::rewrite]) to obtain the sort field
/// that actually compares documents.
#[derive(Clone, Debug)]
pub struct ValueSourceSortField {
    source: Arc<dyn ValueSource>,
    reverse: bool,
}

impl ValueSourceSortField {
    /// Creates the placeholder for sorting by `source`.
    pub fn new(source: Arc<dyn ValueSource>, reverse: bool) -> Self {
        Self {
            source,
            reverse,
        }
    }

    /// The description of the value source, which names the sort field.
    pub fn description(&self) -> String {
        self.source.description()
    }

    /// Whether the sort is reversed.
    #[inline]
    pub fn get_reverse(&self) -> bool {
        self.reverse
    }

    /// The value source sorted by.
    #[inline]
    pub fn source(&self) -> &Arc<dyn ValueSource> {
        &self.source
    }

    /// Weights the value source against `searcher` and returns a sort field bound to the
    /// resulting [Context]. The context belongs to the returned field only; weighting the same
    /// placeholder twice gives two independent fields.
    pub fn weight(&self, searcher: &IndexSearcher) -> FunctionResult<SortField> {
        let mut context = Context::new();
        self.source.create_weight(&mut context, searcher)?;
        debug!("Weighted sort field {} ({} weights)", self.description(), context.len());

        let comparator_source = ValueSourceComparatorSource {
            source: self.source.clone(),
            context: Arc::new(context),
        };

        Ok(SortField::custom(self.description(), Arc::new(comparator_source), self.reverse))
    }
}

impl PartialEq for ValueSourceSortField {
    fn eq(&self, other: &Self) -> bool {
        self.reverse == other.reverse && *self.source == *other.source
    }
}

#[derive(Debug)]
struct UnweightedComparatorSource;

impl FieldComparatorSource for UnweightedComparatorSource {
    fn new_comparator(
        &self,
        field_name: &str,
        _num_hits: usize,
        _sort_pos: usize,
        _reversed: bool,
    ) -> FunctionResult<Box<dyn FieldComparator>> {
        Ok(Box::new(UnweightedComparator {
            description: field_name.to_string(),
        }))
    }
}

/// Fails every comparison: the sort field it came from has not been weighted.
#[derive(Debug)]
struct UnweightedComparator {
    description: String,
}

impl UnweightedComparator {
    fn fail<T>(&self) -> FunctionResult<T> {
        Err(FunctionError::UnweightedSortField(self.description.clone()))
    }
}

impl FieldComparator for UnweightedComparator {
    fn compare(&self, _slot1: usize, _slot2: usize) -> FunctionResult<Ordering> {
        self.fail()
    }

    fn set_bottom(&mut self, _slot: usize) -> FunctionResult<()> {
        self.fail()
    }

    fn compare_bottom(&mut self, _doc: DocId) -> FunctionResult<Ordering> {
        self.fail()
    }

    fn copy(&mut self, _slot: usize, _doc: DocId) -> FunctionResult<()> {
        self.fail()
    }

    fn set_next_reader(&mut self, _leaf: &LeafReaderContext) -> FunctionResult<()> {
        Ok(())
    }

    fn value(&self, _slot: usize) -> FieldValue {
        FieldValue::Double(f64::NAN)
    }
}

/// Creates [ValueSourceComparator]s bound to a weighted [Context].
#[derive(Debug)]
pub struct ValueSourceComparatorSource {
    source: Arc<dyn ValueSource>,
    context: Arc<Context>,
}

impl ValueSourceComparatorSource {
    /// The context the comparators read their weights from.
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }
}

impl FieldComparatorSource for ValueSourceComparatorSource {
    fn new_comparator(
        &self,
        _field_name: &str,
        num_hits: usize,
        _sort_pos: usize,
        _reversed: bool,
    ) -> FunctionResult<Box<dyn FieldComparator>> {
        Ok(Box::new(ValueSourceComparator::new(self.source.clone(), self.context.clone(), num_hits)))
    }
}

/// Compares documents by the double value of a [ValueSource].
#[derive(Debug)]
pub struct ValueSourceComparator {
    source: Arc<dyn ValueSource>,
    context: Arc<Context>,
    values: Vec<f64>,
    doc_values: Option<Box<dyn DocValues>>,
    bottom: f64,
}

impl ValueSourceComparator {
    fn new(source: Arc<dyn ValueSource>, context: Arc<Context>, num_hits: usize) -> Self {
        Self {
            source,
            context,
            values: vec![0.0; num_hits],
            doc_values: None,
            bottom: 0.0,
        }
    }

    fn value_of(&mut self, doc: DocId) -> FunctionResult<f64> {
        match self.doc_values.as_mut() {
            Some(doc_values) => doc_values.double_val(doc),
            None => Err(FunctionError::IllegalState(format!(
                "comparator for {} used before set_next_reader",
                self.source.description()
            ))),
        }
    }
}

impl FieldComparator for ValueSourceComparator {
    fn compare(&self, slot1: usize, slot2: usize) -> FunctionResult<Ordering> {
        Ok(compare_doubles(self.values[slot1], self.values[slot2]))
    }

    fn set_bottom(&mut self, slot: usize) -> FunctionResult<()> {
        self.bottom = self.values[slot];
        Ok(())
    }

    fn compare_bottom(&mut self, doc: DocId) -> FunctionResult<Ordering> {
        let value = self.value_of(doc)?;
        Ok(compare_doubles(self.bottom, value))
    }

    fn copy(&mut self, slot: usize, doc: DocId) -> FunctionResult<()> {
        self.values[slot] = self.value_of(doc)?;
        Ok(())
    }

    fn set_next_reader(&mut self, leaf: &LeafReaderContext) -> FunctionResult<()> {
        self.doc_values = Some(self.source.get_values(&self.context, leaf.reader())?);
        Ok(())
    }

    fn value(&self, slot: usize) -> FieldValue {
        FieldValue::Double(self.values[slot])
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{ValueSourceSortField, UNWEIGHTED_COMPARATOR_SOURCE},
        crate::{
            error::FunctionError,
            function::{ConstValueSource, OrdFieldSource, ValueSource, ValueSourceExt},
            index::{IndexReader, LeafReader, LeafReaderContext, MemoryLeafReader},
            search::{FieldComparator, FieldComparatorSource, FieldValue, IndexSearcher, SortFieldType},
        },
        pretty_assertions::assert_eq,
        std::{cmp::Ordering, sync::Arc},
        test_log::test,
    };

    fn fruit_reader() -> Arc<dyn LeafReader> {
        Arc::new(
            MemoryLeafReader::builder()
                .add_document([("fruit", "pear")])
                .add_document([("fruit", "apple")])
                .add_document([("color", "red")])
                .add_document([("fruit", "banana")])
                .build(),
        )
    }

    #[test]
    fn test_placeholder_fails_until_weighted() {
        let source: Arc<dyn ValueSource> = Arc::new(OrdFieldSource::new("fruit"));
        let placeholder = source.get_sort_field(false);
        assert!(placeholder.is_rewriteable());
        assert_eq!(placeholder.get_field(), Some("ord(fruit)"));

        let reader = fruit_reader();
        let leaf = LeafReaderContext::top_level(reader.clone());
        let mut comparator = placeholder.get_comparator(2, 0).unwrap();
        comparator.set_next_reader(&leaf).unwrap();
        match comparator.copy(0, 0) {
            Err(FunctionError::UnweightedSortField(description)) => assert_eq!(description, "ord(fruit)"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(comparator.compare(0, 1).is_err());
        assert!(comparator.set_bottom(0).is_err());
        assert!(comparator.compare_bottom(1).is_err());

        let rewritten = placeholder.rewrite(&IndexSearcher::for_leaf(reader)).unwrap();
        assert!(!rewritten.is_rewriteable());
        assert!(matches!(rewritten.get_type(), SortFieldType::Custom(_)));
        assert_eq!(rewritten.get_field(), Some("ord(fruit)"));
        assert!(!rewritten.get_reverse());
    }

    #[test]
    fn test_weighted_comparator() {
        let reader = fruit_reader();
        let searcher = IndexSearcher::new(IndexReader::from(reader.clone()));
        let source: Arc<dyn ValueSource> = Arc::new(OrdFieldSource::new("fruit"));
        let field = ValueSourceSortField::new(source, true).weight(&searcher).unwrap();
        assert!(field.get_reverse());

        let mut comparator = field.get_comparator(3, 0).unwrap();
        assert!(comparator.copy(0, 0).is_err());

        comparator.set_next_reader(&searcher.get_index_reader().leaves()[0]).unwrap();
        comparator.copy(0, 0).unwrap(); // pear = 3
        comparator.copy(1, 1).unwrap(); // apple = 1
        comparator.copy(2, 2).unwrap(); // missing = 0
        assert_eq!(comparator.compare(0, 1).unwrap(), Ordering::Greater);
        assert_eq!(comparator.compare(2, 1).unwrap(), Ordering::Less);
        assert_eq!(comparator.compare(1, 1).unwrap(), Ordering::Equal);

        comparator.set_bottom(0).unwrap();
        assert_eq!(comparator.compare_bottom(3).unwrap(), Ordering::Greater); // banana = 2
        assert_eq!(comparator.value(1), FieldValue::Double(1.0));
    }

    #[test]
    fn test_placeholder_equality() {
        let a: Arc<dyn ValueSource> = Arc::new(ConstValueSource::new(1.0));
        let b: Arc<dyn ValueSource> = Arc::new(ConstValueSource::new(1.0));
        assert_eq!(ValueSourceSortField::new(a.clone(), false), ValueSourceSortField::new(b, false));
        assert_ne!(ValueSourceSortField::new(a.clone(), false), ValueSourceSortField::new(a.clone(), true));
        assert_eq!(a.get_sort_field(true), a.get_sort_field(true));
    }

    #[test]
    fn test_unweighted_value_is_nan() {
        let comparator = UNWEIGHTED_COMPARATOR_SOURCE.new_comparator("x", 1, 0, false).unwrap();
        match comparator.value(0) {
            FieldValue::Double(v) => assert!(v.is_nan()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
