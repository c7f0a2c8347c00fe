/// Move a selection cursor one item up, wrapping from the first item to the last.
pub fn select_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    (selected % item_count + item_count - 1) % item_count
}

/// Move a selection cursor one item down, wrapping from the last item to the first.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    (selected % item_count + 1) % item_count
}
