//! Lazy enumeration of goal visiting orders.
//!
//! Orderings are produced in lexicographic order of goal indices, one at a time, so a
//! search over `k!` orderings never holds more than one of them in memory.

/// `n!`, or `None` when it does not fit in a `usize`
pub fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

/// Lexicographic iterator over the orderings of `0..n`
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Permutations {
            current: (0..n).collect(),
            done: false,
        }
    }

    /// Start the enumeration at an arbitrary ordering
    pub fn starting_at(ordering: Vec<usize>) -> Self {
        Permutations {
            current: ordering,
            done: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let item = self.current.clone();
        self.done = !advance(&mut self.current);
        Some(item)
    }
}

/// Step to the next lexicographic ordering in place; false once the last one is reached
fn advance(items: &mut [usize]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    // Longest non-increasing suffix starts right after the pivot
    let mut pivot = n - 1;
    while pivot > 0 && items[pivot - 1] >= items[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }

    let mut successor = n - 1;
    while items[successor] <= items[pivot - 1] {
        successor -= 1;
    }
    items.swap(pivot - 1, successor);
    items[pivot..].reverse();
    true
}

/// The `index`-th lexicographic ordering of `0..n` (factorial number system)
///
/// Indices past `n! - 1` wrap, so callers should stay below `factorial(n)`.
pub fn nth_permutation(n: usize, index: usize) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut ordering = Vec::with_capacity(n);
    let mut rest = index;

    for remaining in (1..=n).rev() {
        let block = factorial(remaining - 1).unwrap_or(usize::MAX);
        let pick = (rest / block) % remaining;
        rest %= block;
        ordering.push(pool.remove(pick));
    }
    ordering
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_items_in_lexicographic_order() {
        let all: Vec<Vec<usize>> = Permutations::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn empty_and_single_yield_one_ordering() {
        assert_eq!(Permutations::new(0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Permutations::new(1).collect::<Vec<_>>(), vec![vec![0]]);
    }

    #[test]
    fn count_matches_factorial() {
        for n in 0..=6 {
            assert_eq!(Some(Permutations::new(n).count()), factorial(n));
        }
    }

    #[test]
    fn nth_matches_iteration_order() {
        for (index, ordering) in Permutations::new(5).enumerate() {
            assert_eq!(nth_permutation(5, index), ordering);
        }
    }

    #[test]
    fn resume_from_nth() {
        let tail: Vec<Vec<usize>> = Permutations::starting_at(nth_permutation(4, 20)).collect();
        assert_eq!(tail.len(), 4);
        assert_eq!(tail[0], vec![3, 1, 0, 2]);
        assert_eq!(tail[3], vec![3, 2, 1, 0]);
    }

    #[test]
    fn factorial_overflow_is_none() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(10), Some(3_628_800));
        assert_eq!(factorial(40), None);
    }
}
