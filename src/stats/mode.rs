use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// The most frequent value of a column and how often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
}

/// Mode over an ordered domain. Ties go to the smallest value.
pub fn mode_ascending<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<Mode<T>> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut best: Option<Mode<T>> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|b| count > b.count) {
            best = Some(Mode { value, count });
        }
    }
    best
}

/// Mode over a categorical domain. Ties go to the value seen first.
pub fn mode_first_seen<T: Eq + Hash + Clone>(
    values: impl IntoIterator<Item = T>,
) -> Option<Mode<T>> {
    let counts = value_counts(values);
    counts
        .into_iter()
        .next()
        .map(|(value, count)| Mode { value, count })
}

/// Frequency of every distinct value, most frequent first; equal counts keep first-seen order.
pub fn value_counts<T: Eq + Hash + Clone>(values: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut slots: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for v in values {
        match slots.get(&v) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(v.clone(), counts.len());
                counts.push((v, 1));
            }
        }
    }
    // stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ascending_picks_most_frequent() {
        let mode = mode_ascending([3, 1, 3, 2, 3, 1]).unwrap();
        assert_eq!(mode, Mode { value: 3, count: 3 });
    }

    #[test]
    fn test_mode_ascending_tie_goes_to_smallest() {
        let mode = mode_ascending([17, 8, 17, 8, 12]).unwrap();
        assert_eq!(mode, Mode { value: 8, count: 2 });
    }

    #[test]
    fn test_mode_single_distinct_value() {
        let mode = mode_ascending(vec![6u32; 4]).unwrap();
        assert_eq!(mode, Mode { value: 6, count: 4 });

        let mode = mode_first_seen(vec!["Subscriber"; 5]).unwrap();
        assert_eq!(mode.count, 5);
    }

    #[test]
    fn test_mode_empty_is_none() {
        assert!(mode_ascending(Vec::<u32>::new()).is_none());
        assert!(mode_first_seen(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_mode_first_seen_tie_goes_to_earliest() {
        let mode = mode_first_seen(["B - Y", "A - X", "A - X", "B - Y", "C - Z"]).unwrap();
        assert_eq!(mode, Mode { value: "B - Y", count: 2 });
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts([
            "Customer",
            "Subscriber",
            "Subscriber",
            "Dependent",
            "Customer",
            "Subscriber",
        ]);
        assert_eq!(
            counts,
            vec![("Subscriber", 3), ("Customer", 2), ("Dependent", 1)]
        );
    }

    #[test]
    fn test_value_counts_ties_keep_first_seen() {
        let counts = value_counts(["Male", "Female", "Female", "Male"]);
        assert_eq!(counts, vec![("Male", 2), ("Female", 2)]);
    }
}
