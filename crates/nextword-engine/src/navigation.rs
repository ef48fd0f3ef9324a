//! Cyclic index movement over the ranked suggestion list.
//!
//! Both functions return `None` for an empty list instead of dividing by zero.
//! The engine only navigates while browsing, where the list is never empty.

/// Index after `selected`, wrapping from the last entry to the first.
pub fn next(selected: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (selected + 1) % len)
}

/// Index before `selected`, wrapping from the first entry to the last.
pub fn previous(selected: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (selected % len + len - 1) % len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_to_start() {
        assert_eq!(next(0, 3), Some(1));
        assert_eq!(next(2, 3), Some(0));
    }

    #[test]
    fn previous_wraps_to_end() {
        assert_eq!(previous(1, 3), Some(0));
        assert_eq!(previous(0, 3), Some(2));
    }

    #[test]
    fn single_entry_stays_put() {
        assert_eq!(next(0, 1), Some(0));
        assert_eq!(previous(0, 1), Some(0));
    }

    #[test]
    fn empty_list_has_no_index() {
        assert_eq!(next(0, 0), None);
        assert_eq!(previous(0, 0), None);
    }
}
