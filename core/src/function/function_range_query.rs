use {
    crate::{
        function::{
            context::Context,
            doc_values::format_float,
            value_source::ValueSource,
            value_source_scorer::{RangeFilter, ValueSourceScorer},
        },
        index::{DocId, LeafReader},
        search::{Explanation, IndexSearcher, Query, Scorer, Weight},
    },
    log::debug,
    std::{
        any::Any,
        fmt::{Display, Formatter, Result as FmtResult},
        hash::Hasher,
        io::Result as IoResult,
        sync::Arc,
    },
};

/// Matches the documents whose [ValueSource] value falls in a range. Each bound is optional and
/// either inclusive or exclusive.
///
/// The score of a match is its value.
#[derive(Debug)]
pub struct FunctionRangeQuery {
    source: Arc<dyn ValueSource>,
    range: RangeFilter,
}

impl FunctionRangeQuery {
    /// Creates the query. `None` leaves that side of the range open.
    pub fn new(
        source: Arc<dyn ValueSource>,
        lower: Option<f32>,
        upper: Option<f32>,
        include_lower: bool,
        include_upper: bool,
    ) -> Self {
        Self {
            source,
            range: RangeFilter {
                lower,
                upper,
                include_lower,
                include_upper,
            },
        }
    }

    /// The source whose values are filtered.
    #[inline]
    pub fn get_value_source(&self) -> &Arc<dyn ValueSource> {
        &self.source
    }

    /// The accepted range.
    #[inline]
    pub fn get_range(&self) -> &RangeFilter {
        &self.range
    }
}

fn format_bound(bound: Option<f32>) -> String {
    bound.map_or_else(|| "*".to_string(), format_float)
}

impl Display for FunctionRangeQuery {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "frange({}):{}{} TO {}{}",
            self.source.description(),
            if self.range.include_lower {
                '['
            } else {
                '{'
            },
            format_bound(self.range.lower),
            format_bound(self.range.upper),
            if self.range.include_upper {
                ']'
            } else {
                '}'
            },
        )
    }
}

impl Query for FunctionRangeQuery {
    fn create_weight(&self, searcher: &IndexSearcher) -> IoResult<Box<dyn Weight>> {
        let mut context = Context::new();
        self.source.create_weight(&mut context, searcher)?;
        debug!("Created weight for {self}");

        Ok(Box::new(FunctionRangeWeight {
            source: self.source.clone(),
            range: self.range,
            context,
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn query_eq(&self, other: &dyn Query) -> bool {
        other.as_any().downcast_ref::<Self>().map_or(false, |other| {
            let bits = |range: &RangeFilter| {
                (
                    range.lower.map(f32::to_bits),
                    range.upper.map(f32::to_bits),
                    range.include_lower,
                    range.include_upper,
                )
            };
            bits(&self.range) == bits(&other.range) && *self.source == *other.source
        })
    }

    fn query_hash(&self, state: &mut dyn Hasher) {
        state.write(b"frange");
        self.source.source_hash(state);
        state.write_u32(self.range.lower.map_or(0, f32::to_bits));
        state.write_u32(self.range.upper.map_or(0, f32::to_bits));
        state.write_u8(self.range.include_lower as u8);
        state.write_u8(self.range.include_upper as u8);
    }
}

#[derive(Debug)]
struct FunctionRangeWeight {
    source: Arc<dyn ValueSource>,
    range: RangeFilter,
    context: Context,
}

impl Weight for FunctionRangeWeight {
    fn scorer(&self, reader: &Arc<dyn LeafReader>) -> IoResult<Option<Box<dyn Scorer>>> {
        let values = self.source.get_values(&self.context, reader)?;
        Ok(Some(Box::new(ValueSourceScorer::range(reader.clone(), values, self.range))))
    }

    fn explain(&self, reader: &Arc<dyn LeafReader>, doc: DocId) -> IoResult<Explanation> {
        let values = self.source.get_values(&self.context, reader)?;
        let mut scorer = ValueSourceScorer::range(reader.clone(), values, self.range);
        if scorer.matches(doc)? {
            Ok(scorer.explain(doc)?)
        } else {
            Ok(Explanation::no_match(format!("value of {} not in range", self.source.description()), vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::FunctionRangeQuery,
        crate::{
            function::{OrdFieldSource, ValueSource},
            index::{LeafReader, MemoryLeafReader},
            search::{DocIdSetIterator, IndexSearcher, Query, Scorer, NO_MORE_DOCS},
        },
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    fn ord() -> Arc<dyn ValueSource> {
        Arc::new(OrdFieldSource::new("f"))
    }

    #[test]
    fn test_display() {
        let q = FunctionRangeQuery::new(ord(), Some(1.0), None, true, false);
        assert_eq!(q.to_string(), "frange(ord(f)):[1.0 TO *}");

        let q = FunctionRangeQuery::new(ord(), None, Some(2.5), false, true);
        assert_eq!(q.to_string(), "frange(ord(f)):{* TO 2.5]");
    }

    #[test]
    fn test_matches_range() {
        // ords: a=1 b=2 c=3
        let reader: Arc<dyn LeafReader> = Arc::new(
            MemoryLeafReader::builder()
                .add_document([("f", "c")])
                .add_document([("f", "a")])
                .add_document([("f", "b")])
                .add_document([("f", "b")])
                .delete_document(3)
                .build(),
        );
        let query = FunctionRangeQuery::new(ord(), Some(2.0), Some(3.0), true, true);
        let weight = IndexSearcher::for_leaf(reader.clone()).create_normalized_weight(&query).unwrap();
        let mut scorer = weight.scorer(&reader).unwrap().unwrap();

        let mut hits = vec![];
        while scorer.next_doc().unwrap() != NO_MORE_DOCS {
            hits.push((scorer.doc_id(), scorer.score().unwrap()));
        }
        assert_eq!(hits, vec![(0, 3.0), (2, 2.0)]);

        assert_eq!(weight.explain(&reader, 0).unwrap().summary(), "3 = ord(f)=3");
        assert!(!weight.explain(&reader, 1).unwrap().is_match());
        assert!(!weight.explain(&reader, 3).unwrap().is_match());
    }

    #[test]
    fn test_equality() {
        let a = FunctionRangeQuery::new(ord(), Some(1.0), None, true, false);
        assert!(a.query_eq(&FunctionRangeQuery::new(ord(), Some(1.0), None, true, false)));
        assert!(!a.query_eq(&FunctionRangeQuery::new(ord(), Some(1.0), None, false, false)));
    }
}
