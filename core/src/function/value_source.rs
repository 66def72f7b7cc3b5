use {
    crate::{
        error::FunctionResult,
        function::{context::Context, doc_values::DocValues, value_source_sort_field::ValueSourceSortField},
        id::SourceId,
        index::LeafReader,
        search::{IndexSearcher, SortField},
    },
    std::{
        any::Any,
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        hash::{Hash, Hasher},
        sync::Arc,
    },
};

/// Instantiates [DocValues] for a particular segment.
///
/// A `ValueSource` is an immutable description of a per-document computation ("the ordinal of
/// field `title`", "the score of query `body:rust`", "the sum of these two"). It never holds
/// reader or document state: [ValueSource::get_values] binds it to one segment, and any per-query
/// state it needs is prepared by [ValueSource::create_weight] and stored in a [Context].
///
/// Value sources have two notions of identity:
/// * value equality ([ValueSource::source_eq], [ValueSource::source_hash]) over everything that
///   affects the output, used to recognise identical sub-expressions;
/// * instance identity ([ValueSource::id]), which keys the per-query [Context].
pub trait ValueSource: Debug {
    /// Returns the identity token of this instance.
    fn id(&self) -> SourceId;

    /// Description of the computation, used in explanations and as the name of sort fields.
    /// Reflects every parameter that takes part in [ValueSource::source_eq].
    fn description(&self) -> String;

    /// Gets the values for `reader` using the weights previously stored in `context` by
    /// [ValueSource::create_weight]. Sources that find no weight in `context` (because it was
    /// built for another query, or never weighted) build what they need on the spot.
    fn get_values(&self, context: &Context, reader: &Arc<dyn LeafReader>) -> FunctionResult<Box<dyn DocValues>>;

    /// Prepares per-query state and stores it in `context`. Composite sources must propagate the
    /// call to every child source.
    fn create_weight(&self, _context: &mut Context, _searcher: &IndexSearcher) -> FunctionResult<()> {
        Ok(())
    }

    /// Returns `self` as [Any] so implementations can downcast in [ValueSource::source_eq].
    fn as_any(&self) -> &dyn Any;

    /// Value equality with another source.
    fn source_eq(&self, other: &dyn ValueSource) -> bool;

    /// Feeds the fields that take part in [ValueSource::source_eq] to `state`.
    fn source_hash(&self, state: &mut dyn Hasher);
}

impl PartialEq for dyn ValueSource {
    fn eq(&self, other: &Self) -> bool {
        self.source_eq(other)
    }
}

impl Eq for dyn ValueSource {}

impl Hash for dyn ValueSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source_hash(state)
    }
}

impl Display for dyn ValueSource {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.description())
    }
}

/// Sorting by function.
pub trait ValueSourceExt {
    /// Get the [SortField] for this value source.
    ///
    /// The returned field is an unweighted placeholder: it can be compared and displayed, but it
    /// has to be weighted with [SortField::rewrite] (or [ValueSourceSortField::weight]) before it
    /// sorts anything. Comparators taken from the placeholder fail with
    /// [FunctionError::UnweightedSortField][crate::FunctionError::UnweightedSortField].
    ///
    /// # Parameters
    /// * `reverse`: true if this is a reverse sort.
    fn get_sort_field(&self, reverse: bool) -> SortField;
}

impl ValueSourceExt for Arc<dyn ValueSource> {
    fn get_sort_field(&self, reverse: bool) -> SortField {
        ValueSourceSortField::new(self.clone(), reverse).into()
    }
}
