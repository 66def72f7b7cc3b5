use {
    crate::{
        error::{FunctionError, FunctionResult},
        index::{DocId, LeafReaderContext},
        search::{field_comparator::FieldComparator, field_value::FieldValue, sort::Sort},
    },
    log::trace,
    std::cmp::Ordering,
};

/// A hit returned by a sorted search.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDoc {
    /// The global document id.
    pub doc: DocId,

    /// The score of the hit, or NaN if the sort did not need scores.
    pub score: f32,

    /// The sort values of the hit, one per [SortField][crate::search::SortField].
    pub fields: Vec<FieldValue>,
}

/// The result of a sorted search.
#[derive(Clone, Debug, PartialEq)]
pub struct TopFieldDocs {
    /// The number of documents that matched the query.
    pub total_hits: usize,

    /// The top hits, best first.
    pub score_docs: Vec<FieldDoc>,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    slot: usize,
    doc: DocId,
    score: f32,
}

/// Collects the top `num_hits` documents according to a [Sort].
///
/// The collector is the consumer of the [FieldComparator] protocol: it binds every comparator to
/// each segment with [FieldComparator::set_next_reader], fills the slots with
/// [FieldComparator::copy] until the queue is full, and from then on only admits documents that
/// [FieldComparator::compare_bottom] finds competitive, replacing the bottom slot and announcing
/// the new bottom with [FieldComparator::set_bottom]. Ties on every sort field are broken by
/// document id, the earlier document winning.
#[derive(Debug)]
pub struct TopFieldCollector {
    comparators: Vec<Box<dyn FieldComparator>>,
    reverse_mul: Vec<i8>,
    num_hits: usize,

    /// Entries ordered best first; the last one is the bottom once the queue is full.
    queue: Vec<Entry>,
    total_hits: usize,
    doc_base: Option<DocId>,
}

impl TopFieldCollector {
    /// Creates a collector keeping `num_hits` hits sorted by `sort`, which must already be
    /// rewritten.
    ///
    /// # Errors
    /// * [FunctionError::InvalidArgument] if `num_hits` is zero.
    /// * Any error from [SortField::get_comparator][crate::search::SortField::get_comparator].
    pub fn create(sort: &Sort, num_hits: usize) -> FunctionResult<Self> {
        if num_hits == 0 {
            return Err(FunctionError::InvalidArgument("num_hits must be > 0".to_string()));
        }

        let mut comparators = Vec::with_capacity(sort.get_sort().len());
        let mut reverse_mul = Vec::with_capacity(sort.get_sort().len());
        for (sort_pos, field) in sort.get_sort().iter().enumerate() {
            comparators.push(field.get_comparator(num_hits, sort_pos)?);
            reverse_mul.push(if field.get_reverse() {
                -1
            } else {
                1
            });
        }

        Ok(Self {
            comparators,
            reverse_mul,
            num_hits,
            queue: Vec::with_capacity(num_hits),
            total_hits: 0,
            doc_base: None,
        })
    }

    /// Whether [TopFieldCollector::collect] needs real scores.
    pub fn needs_scores(&self) -> bool {
        self.comparators.iter().any(|c| c.needs_scores())
    }

    /// Switches to the next segment.
    pub fn set_next_reader(&mut self, leaf: &LeafReaderContext) -> FunctionResult<()> {
        for comparator in self.comparators.iter_mut() {
            comparator.set_next_reader(leaf)?;
        }
        self.doc_base = Some(leaf.doc_base);
        Ok(())
    }

    /// Offers a segment-local document to the collector. Documents of a segment must be collected
    /// in increasing order.
    pub fn collect(&mut self, doc: DocId, score: f32) -> FunctionResult<()> {
        let doc_base = self
            .doc_base
            .ok_or_else(|| FunctionError::IllegalState("collect called before set_next_reader".to_string()))?;
        self.total_hits += 1;

        for comparator in self.comparators.iter_mut() {
            comparator.set_score(score);
        }

        let slot = if self.queue.len() == self.num_hits {
            if !self.is_competitive(doc)? {
                return Ok(());
            }

            match self.queue.pop() {
                Some(bottom) => bottom.slot,
                None => return Ok(()),
            }
        } else {
            self.queue.len()
        };

        trace!("Competitive hit: doc={} slot={slot}", doc_base + doc);
        for comparator in self.comparators.iter_mut() {
            comparator.copy(slot, doc)?;
        }

        let entry = Entry {
            slot,
            doc: doc_base + doc,
            score,
        };
        let pos = self.insertion_point(&entry)?;
        self.queue.insert(pos, entry);

        if self.queue.len() == self.num_hits {
            if let Some(bottom) = self.queue.last() {
                let bottom_slot = bottom.slot;
                for comparator in self.comparators.iter_mut() {
                    comparator.set_bottom(bottom_slot)?;
                }
            }
        }

        Ok(())
    }

    /// Returns the collected hits, best first.
    pub fn top_docs(&self) -> TopFieldDocs {
        let score_docs = self
            .queue
            .iter()
            .map(|entry| FieldDoc {
                doc: entry.doc,
                score: entry.score,
                fields: self.comparators.iter().map(|c| c.value(entry.slot)).collect(),
            })
            .collect();

        TopFieldDocs {
            total_hits: self.total_hits,
            score_docs,
        }
    }

    fn is_competitive(&mut self, doc: DocId) -> FunctionResult<bool> {
        for (comparator, reverse_mul) in self.comparators.iter_mut().zip(&self.reverse_mul) {
            match apply_reverse(comparator.compare_bottom(doc)?, *reverse_mul) {
                Ordering::Less => return Ok(false),
                Ordering::Greater => return Ok(true),
                Ordering::Equal => (),
            }
        }

        // Equal on every field: the bottom document came first and wins.
        Ok(false)
    }

    fn compare_entries(&self, first: &Entry, second: &Entry) -> FunctionResult<Ordering> {
        for (comparator, reverse_mul) in self.comparators.iter().zip(&self.reverse_mul) {
            let c = apply_reverse(comparator.compare(first.slot, second.slot)?, *reverse_mul);
            if c != Ordering::Equal {
                return Ok(c);
            }
        }

        Ok(first.doc.cmp(&second.doc))
    }

    fn insertion_point(&self, entry: &Entry) -> FunctionResult<usize> {
        let mut low = 0;
        let mut high = self.queue.len();

        while low < high {
            let mid = (low + high) / 2;
            if self.compare_entries(&self.queue[mid], entry)? == Ordering::Greater {
                high = mid;
            } else {
                low = mid + 1;
            }
        }

        Ok(low)
    }
}

#[inline]
fn apply_reverse(ordering: Ordering, reverse_mul: i8) -> Ordering {
    if reverse_mul < 0 {
        ordering.reverse()
    } else {
        ordering
    }
}
