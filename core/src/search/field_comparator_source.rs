use {
    crate::{error::FunctionResult, search::field_comparator::FieldComparator},
    std::fmt::Debug,
};

/// Provides a [FieldComparator] for custom field sorting.
pub trait FieldComparatorSource: Debug {
    /// Creates a comparator for the field.
    ///
    /// # Parameters
    /// * `field_name`: the name of the sort field
    /// * `num_hits`: the number of slots the comparator needs
    /// * `sort_pos`: the position of the field within the [Sort][crate::search::Sort]
    /// * `reversed`: whether the field is sorted in reverse
    fn new_comparator(
        &self,
        field_name: &str,
        num_hits: usize,
        sort_pos: usize,
        reversed: bool,
    ) -> FunctionResult<Box<dyn FieldComparator>>;
}
