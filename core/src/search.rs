mod doc_id_set_iterator;
mod explanation;
mod field_comparator;
mod field_comparator_source;
mod field_value;
mod index_searcher;
mod match_all_docs_query;
mod query;
mod scorer;
mod sort;
mod sort_field;
mod top_field_collector;
mod weight;

pub use {
    doc_id_set_iterator::*, explanation::*, field_comparator::*, field_comparator_source::*, field_value::*,
    index_searcher::*, match_all_docs_query::*, query::*, scorer::*, sort::*, sort_field::*, top_field_collector::*,
    weight::*,
};
