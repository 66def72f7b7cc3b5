use {
    crate::{
        error::FunctionResult,
        search::{index_searcher::IndexSearcher, sort_field::SortField},
    },
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Encapsulates sort criteria for returned hits.
///
/// The first [SortField] is checked first, but if it produces a tie, then the second one is used
/// to break the tie, etc. Finally, if there is still a tie after all SortFields are checked, the
/// document id is used to break it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sort {
    fields: Vec<SortField>,
}

impl Sort {
    /// Sets the sort to the given criteria in succession.
    ///
    /// # Panics
    /// Panics if `fields` is empty.
    pub fn new(fields: Vec<SortField>) -> Self {
        if fields.is_empty() {
            panic!("Sort must contain at least one field")
        }

        Self {
            fields,
        }
    }

    /// Represents sorting by computed relevance.
    pub fn relevance() -> Self {
        Self::new(vec![SortField::score()])
    }

    /// Represents sorting by index order.
    pub fn index_order() -> Self {
        Self::new(vec![SortField::doc()])
    }

    /// Returns the sort criteria.
    pub fn get_sort(&self) -> &[SortField] {
        &self.fields
    }

    /// Whether any field needs relevance scores.
    pub fn needs_scores(&self) -> bool {
        self.fields.iter().any(SortField::needs_scores)
    }

    /// Rewrites the SortFields in this Sort, weighting any that were built from a value source.
    ///
    /// # Parameters
    /// `searcher`: [IndexSearcher] to use in the rewriting
    pub fn rewrite(&self, searcher: &IndexSearcher) -> FunctionResult<Sort> {
        let mut rewritten_sort_fields = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            rewritten_sort_fields.push(field.rewrite(searcher)?);
        }

        Ok(Sort::new(rewritten_sort_fields))
    }
}

impl From<SortField> for Sort {
    fn from(field: SortField) -> Self {
        Self::new(vec![field])
    }
}

impl Display for Sort {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
