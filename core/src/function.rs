mod const_value_source;
mod context;
mod doc_values;
mod function_query;
mod function_range_query;
mod multi_float_function;
mod ord_field_source;
mod query_value_source;
mod value_source;
mod value_source_scorer;
mod value_source_sort_field;

pub use {
    const_value_source::*, context::*, doc_values::*, function_query::*, function_range_query::*,
    multi_float_function::*, ord_field_source::*, query_value_source::*, value_source::*, value_source_scorer::*,
    value_source_sort_field::*,
};
