//! Weighted sampling without replacement
//!
//! Each draw picks one remaining item with probability proportional to its
//! weight ("roulette wheel"), then removes it from the pool. The pool keeps
//! the caller's order, so ties on a floating-point boundary go to the
//! earlier item.

use rand::Rng;

fn sanitize(weight: Option<&f64>) -> f64 {
    match weight {
        Some(w) if w.is_finite() => w.max(0.0),
        _ => 0.0,
    }
}

/// Index into `pool` chosen by walking the cumulative weights.
///
/// `threshold` must be in `[0, total)`. Zero-weight entries are never
/// chosen; if rounding leaves the threshold positive after the walk, the last
/// positive-weight entry wins.
fn roulette_index(pool: &[(usize, f64)], mut threshold: f64) -> usize {
    let mut last_positive = 0;
    for (position, (_, weight)) in pool.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        last_positive = position;
        threshold -= weight;
        if threshold <= 0.0 {
            return position;
        }
    }
    last_positive
}

/// Draw `count` distinct items, each draw weighted by `weights`.
///
/// Returns `min(count, items.len())` items in draw order. Weights that are
/// negative, non-finite or missing count as zero. When every remaining
/// weight is zero the first remaining item is taken, so degenerate weights
/// still fill the requested count.
pub fn weighted_random_sample<T: Clone, R: Rng>(
    items: &[T],
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Vec<T> {
    let mut pool: Vec<(usize, f64)> = (0..items.len())
        .map(|index| (index, sanitize(weights.get(index))))
        .collect();

    let picks = count.min(pool.len());
    let mut result = Vec::with_capacity(picks);

    for _ in 0..picks {
        let total: f64 = pool.iter().map(|(_, weight)| weight).sum();

        let position = if total > 0.0 && total.is_finite() {
            let threshold = rng.gen::<f64>() * total;
            roulette_index(&pool, threshold)
        } else {
            0
        };

        let (index, _) = pool.remove(position);
        result.push(items[index].clone());
    }

    result
}
