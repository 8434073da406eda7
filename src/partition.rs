//! Splits the resolved file list into groups for the download units.

/// Partitions `items` into contiguous groups.
///
/// * `count == 0`: every item becomes its own group.
/// * `count > 0`: exactly `count` groups of `len / count` items each, with any
///   remainder appended to the last group. When `count` exceeds the number of
///   items, the leading groups are empty and the last group holds everything.
///
/// Concatenating the groups in order always reproduces `items`.
///
/// # Examples
/// ```
/// use repohash::partition::partition;
///
/// assert_eq!(partition(&[1, 2, 3, 4, 5], 2), vec![vec![1, 2], vec![3, 4, 5]]);
/// assert_eq!(partition(&[1, 2], 0), vec![vec![1], vec![2]]);
/// ```
pub fn partition<T: Clone>(items: &[T], count: usize) -> Vec<Vec<T>> {
    if count == 0 {
        return items.iter().map(|item| vec![item.clone()]).collect();
    }

    let size = items.len() / count;
    let mut groups: Vec<Vec<T>> = (0..count)
        .map(|i| items[i * size..(i + 1) * size].to_vec())
        .collect();

    let used = size * count;
    if used < items.len() {
        groups[count - 1].extend_from_slice(&items[used..]);
    }
    groups
}
