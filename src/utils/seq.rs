// ============================================================================
// Sequence Helpers
// Predicate-driven selection over slices
// ============================================================================

/// Elements matching `predicate`, in order.
pub fn filter<T, P>(source: &[T], mut predicate: P) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    source.iter().filter(|item| predicate(item)).cloned().collect()
}

/// Indices of elements matching `predicate`, ascending.
pub fn filter_index<T, P>(source: &[T], mut predicate: P) -> Vec<usize>
where
    P: FnMut(&T) -> bool,
{
    source
        .iter()
        .enumerate()
        .filter_map(|(i, item)| predicate(item).then_some(i))
        .collect()
}

/// Conjunction of predicates; an empty list accepts everything.
pub fn all_of<'a, T: 'a>(
    predicates: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
) -> impl Fn(&T) -> bool + 'a {
    move |item| predicates.iter().all(|p| p(item))
}

/// First element matching `predicate`, or `None` when nothing does.
pub fn first_match<'a, T, P>(source: &'a [T], mut predicate: P) -> Option<&'a T>
where
    P: FnMut(&T) -> bool,
{
    source.iter().find(|item| predicate(item))
}

/// Whether any element equals `target`.
pub fn contains<T: PartialEq>(source: &[T], target: &T) -> bool {
    source.iter().any(|item| item == target)
}
