use {
    crate::{
        error::FunctionResult,
        function::{ValueSourceSortField, UNWEIGHTED_COMPARATOR_SOURCE},
        search::{
            field_comparator::{DocComparator, FieldComparator, RelevanceComparator},
            field_comparator_source::FieldComparatorSource,
            index_searcher::IndexSearcher,
        },
    },
    log::debug,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        sync::Arc,
    },
};

/// Specifies the type of the values to be sorted.
#[derive(Clone, Debug)]
pub enum SortFieldType {
    /// Sort by document score (relevance). Higher values are at the front.
    Score,

    /// Sort by document number (index order). Lower values are at the front.
    Doc,

    /// Sort using a custom comparator.
    Custom(Arc<dyn FieldComparatorSource>),

    /// Placeholder that must be rewritten with [SortField::rewrite] before it can be used for
    /// sorting. Comparators obtained from it fail on their first comparison.
    Rewriteable(ValueSourceSortField),
}

/// Stores information about how to sort documents by one criterion.
#[derive(Clone, Debug)]
pub struct SortField {
    field: Option<String>,
    r#type: SortFieldType,
    reverse: bool,
}

impl SortField {
    /// Represents sorting by document score (relevance).
    pub fn score() -> Self {
        Self {
            field: None,
            r#type: SortFieldType::Score,
            reverse: false,
        }
    }

    /// Represents sorting by document number (index order).
    pub fn doc() -> Self {
        Self {
            field: None,
            r#type: SortFieldType::Doc,
            reverse: false,
        }
    }

    /// Creates a sort on `field` using comparators from `comparator_source`.
    pub fn custom(field: impl Into<String>, comparator_source: Arc<dyn FieldComparatorSource>, reverse: bool) -> Self {
        Self {
            field: Some(field.into()),
            r#type: SortFieldType::Custom(comparator_source),
            reverse,
        }
    }

    /// Returns this field with the given sort direction.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Returns the name of the field. Returns `None` if the sort is by score or doc.
    #[inline]
    pub fn get_field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the type of contents in the field.
    #[inline]
    pub fn get_type(&self) -> &SortFieldType {
        &self.r#type
    }

    /// Returns whether the sort should be reversed.
    #[inline]
    pub fn get_reverse(&self) -> bool {
        self.reverse
    }

    /// Whether the relevance score is needed to sort documents.
    pub fn needs_scores(&self) -> bool {
        matches!(self.r#type, SortFieldType::Score)
    }

    /// Whether this field must be rewritten before it can be used for sorting.
    pub fn is_rewriteable(&self) -> bool {
        matches!(self.r#type, SortFieldType::Rewriteable(_))
    }

    /// Rewrites this SortField against `searcher`. Fields that need no rewriting are returned as
    /// they are; placeholders built from a value source are weighted.
    pub fn rewrite(&self, searcher: &IndexSearcher) -> FunctionResult<SortField> {
        match &self.r#type {
            SortFieldType::Rewriteable(vs_field) => {
                debug!("Rewriting sort field {self}");
                vs_field.weight(searcher)
            }
            _ => Ok(self.clone()),
        }
    }

    /// Returns the comparator to use for sorting by this field.
    ///
    /// # Parameters
    /// * `num_hits`: number of top hits the queue will store
    /// * `sort_pos`: position of this SortField within the [Sort][crate::search::Sort]
    pub fn get_comparator(&self, num_hits: usize, sort_pos: usize) -> FunctionResult<Box<dyn FieldComparator>> {
        let field = self.field.as_deref().unwrap_or_default();
        match &self.r#type {
            SortFieldType::Score => Ok(Box::new(RelevanceComparator::new(num_hits))),
            SortFieldType::Doc => Ok(Box::new(DocComparator::new(num_hits))),
            SortFieldType::Custom(source) => source.new_comparator(field, num_hits, sort_pos, self.reverse),
            SortFieldType::Rewriteable(_) => {
                UNWEIGHTED_COMPARATOR_SOURCE.new_comparator(field, num_hits, sort_pos, self.reverse)
            }
        }
    }
}

impl From<ValueSourceSortField> for SortField {
    fn from(vs_field: ValueSourceSortField) -> Self {
        Self {
            field: Some(vs_field.description()),
            reverse: vs_field.get_reverse(),
            r#type: SortFieldType::Rewriteable(vs_field),
        }
    }
}

impl PartialEq for SortField {
    fn eq(&self, other: &Self) -> bool {
        if self.field != other.field || self.reverse != other.reverse {
            return false;
        }

        match (&self.r#type, &other.r#type) {
            (SortFieldType::Score, SortFieldType::Score) | (SortFieldType::Doc, SortFieldType::Doc) => true,
            (SortFieldType::Custom(a), SortFieldType::Custom(b)) => Arc::ptr_eq(a, b),
            (SortFieldType::Rewriteable(a), SortFieldType::Rewriteable(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match &self.r#type {
            SortFieldType::Score => write!(f, "<score>")?,
            SortFieldType::Doc => write!(f, "<doc>")?,
            SortFieldType::Custom(source) => {
                write!(f, "<custom:{:?}: {source:?}>", self.field.as_deref().unwrap_or_default())?
            }
            SortFieldType::Rewriteable(_) => {
                write!(f, "<rewriteable:{:?}>", self.field.as_deref().unwrap_or_default())?
            }
        }

        if self.reverse {
            write!(f, "!")?;
        }

        Ok(())
    }
}
