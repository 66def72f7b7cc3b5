use {
    crate::{function::value_source::ValueSource, id::SourceId, search::Weight},
    std::{collections::HashMap, sync::Arc},
};

/// Per-query store of the weights prepared by [ValueSource::create_weight].
///
/// Entries are keyed by the [SourceId] of the value source *instance*, never by value equality:
/// two equal sources in the same expression each get their own weight. A context is created for
/// one query evaluation and dropped with it; it is mutated only while weighting.
#[derive(Debug, Default)]
pub struct Context {
    weights: HashMap<SourceId, Arc<dyn Weight>>,
}

impl Context {
    /// Returns a new, empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the weight of `source`, replacing any previous one.
    pub fn put_weight(&mut self, source: &dyn ValueSource, weight: Arc<dyn Weight>) {
        self.weights.insert(source.id(), weight);
    }

    /// Returns the weight stored for `source`.
    pub fn get_weight(&self, source: &dyn ValueSource) -> Option<&Arc<dyn Weight>> {
        self.weights.get(&source.id())
    }

    /// The number of stored weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no weights are stored.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
