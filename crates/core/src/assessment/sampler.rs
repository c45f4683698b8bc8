use rand::Rng;

/// Draws `count` distinct items uniformly at random using a partial
/// Fisher-Yates shuffle over indices.
///
/// Every `count`-permutation of `items` is equally likely. Asking for more
/// items than exist returns all of them in random order.
pub fn sample_without_replacement<'a, T, R>(items: &'a [T], count: usize, rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    let n = items.len();
    let take = count.min(n);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..take {
        let j = rng.random_range(i..n);
        indices.swap(i, j);
    }
    indices.truncate(take);
    indices.into_iter().map(|i| &items[i]).collect()
}
