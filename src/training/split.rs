//! Exact greedy split search.
//!
//! Every feature is scanned over the raw values of the rows at a node.
//! Numeric features try a midpoint threshold between each pair of adjacent
//! distinct values. Categorical features try one-vs-rest splits when few
//! categories are present, and otherwise scan a partition of the categories
//! sorted by `G / H`.
//!
//! The best split is the one with the highest gain. Ties keep the earliest
//! candidate within a feature and the lowest feature index across features.

use ndarray::ArrayView2;

use crate::utils::Parallelism;

use super::gain::GainParams;
use super::gradients::Gradients;

/// How a split routes values.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitKind {
    /// `value < threshold` goes left.
    Numeric { threshold: f32 },
    /// Codes in `right` (sorted) go right; all other codes go left.
    Categorical { right: Vec<u32> },
}

/// Best split found for a node.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitInfo {
    pub feature: u32,
    pub kind: SplitKind,
    pub gain: f64,
    pub grad_left: f64,
    pub hess_left: f64,
    pub count_left: u32,
    pub grad_right: f64,
    pub hess_right: f64,
    pub count_right: u32,
}

impl SplitInfo {
    /// Whether a row with feature value `value` goes left.
    ///
    /// Matches tree traversal at inference time.
    #[inline]
    pub fn goes_left(&self, value: f32) -> bool {
        match &self.kind {
            SplitKind::Numeric { threshold } => value.is_nan() || value < *threshold,
            SplitKind::Categorical { right } => {
                match crate::repr::float_to_category(value) {
                    Some(code) => right.binary_search(&code).is_err(),
                    None => true,
                }
            }
        }
    }
}

/// Per-node statistics passed to the splitter.
#[derive(Clone, Copy, Debug)]
pub struct NodeStats {
    pub grad_sum: f64,
    pub hess_sum: f64,
    pub count: u32,
}

/// Exhaustive split finder.
#[derive(Clone, Debug)]
pub struct GreedySplitter {
    gain: GainParams,
    max_onehot_cats: u32,
}

impl GreedySplitter {
    pub fn new(gain: GainParams, max_onehot_cats: u32) -> Self {
        Self {
            gain,
            max_onehot_cats,
        }
    }

    #[inline]
    pub fn gain_params(&self) -> &GainParams {
        &self.gain
    }

    /// Leaf weight for a node with the given sums.
    #[inline]
    pub fn compute_leaf_weight(&self, grad_sum: f64, hess_sum: f64) -> f32 {
        self.gain.compute_leaf_weight(grad_sum, hess_sum)
    }

    /// Find the best split over all features for the rows of a node.
    ///
    /// `categorical[f]` marks categorical features. Returns `None` when no
    /// split clears the gain and child constraints.
    pub fn find_split(
        &self,
        features: ArrayView2<'_, f32>,
        gradients: &Gradients,
        rows: &[u32],
        parent: NodeStats,
        categorical: &[bool],
        parallelism: Parallelism,
    ) -> Option<SplitInfo> {
        if rows.len() < 2 {
            return None;
        }

        let candidates = parallelism.maybe_par_map(0..features.ncols(), |feature| {
            let column: Vec<(f32, f32, f32)> = rows
                .iter()
                .map(|&row| {
                    let (g, h) = gradients.get(row as usize);
                    (features[[row as usize, feature]], g, h)
                })
                .collect();
            if categorical.get(feature).copied().unwrap_or(false) {
                self.best_categorical(feature as u32, &column, parent)
            } else {
                self.best_numeric(feature as u32, column, parent)
            }
        });

        // Reduce in feature order; strict comparison keeps the lowest index.
        candidates
            .into_iter()
            .flatten()
            .fold(None, |best: Option<SplitInfo>, split| match best {
                Some(b) if split.gain <= b.gain => Some(b),
                _ => Some(split),
            })
    }

    fn best_numeric(
        &self,
        feature: u32,
        mut column: Vec<(f32, f32, f32)>,
        parent: NodeStats,
    ) -> Option<SplitInfo> {
        // Missing values always go left.
        let (mut grad_left, mut hess_left, mut n_missing) = (0.0f64, 0.0f64, 0u32);
        column.retain(|&(value, g, h)| {
            if value.is_nan() {
                grad_left += g as f64;
                hess_left += h as f64;
                n_missing += 1;
                false
            } else {
                true
            }
        });
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut best: Option<SplitInfo> = None;
        for i in 0..column.len().saturating_sub(1) {
            let (value, g, h) = column[i];
            grad_left += g as f64;
            hess_left += h as f64;

            let next = column[i + 1].0;
            if next <= value {
                continue;
            }

            let count_left = n_missing + (i + 1) as u32;
            let Some(gain) = self.evaluate(parent, grad_left, hess_left, count_left) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(self.make_split(
                    feature,
                    SplitKind::Numeric {
                        threshold: midpoint(value, next),
                    },
                    gain,
                    parent,
                    (grad_left, hess_left, count_left),
                ));
            }
        }

        best
    }

    fn best_categorical(
        &self,
        feature: u32,
        column: &[(f32, f32, f32)],
        parent: NodeStats,
    ) -> Option<SplitInfo> {
        // (code, grad, hess, count) per category present at the node, ascending by code.
        let mut stats: Vec<(u32, f64, f64, u32)> = Vec::new();
        let mut codes: Vec<(u32, f32, f32)> = column
            .iter()
            .filter_map(|&(v, g, h)| crate::repr::float_to_category(v).map(|c| (c, g, h)))
            .collect();
        codes.sort_by_key(|&(c, _, _)| c);
        for (code, g, h) in codes {
            match stats.last_mut() {
                Some(last) if last.0 == code => {
                    last.1 += g as f64;
                    last.2 += h as f64;
                    last.3 += 1;
                }
                _ => stats.push((code, g as f64, h as f64, 1)),
            }
        }

        if stats.len() < 2 {
            return None;
        }

        let mut best: Option<SplitInfo> = None;

        if stats.len() as u32 <= self.max_onehot_cats {
            // One-vs-rest: a single category goes right.
            for &(code, g, h, count) in &stats {
                let grad_left = parent.grad_sum - g;
                let hess_left = parent.hess_sum - h;
                let count_left = parent.count - count;
                let Some(gain) = self.evaluate(parent, grad_left, hess_left, count_left) else {
                    continue;
                };
                if best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(self.make_split(
                        feature,
                        SplitKind::Categorical { right: vec![code] },
                        gain,
                        parent,
                        (grad_left, hess_left, count_left),
                    ));
                }
            }
            return best;
        }

        // Partition scan: sort by G/H, a growing prefix goes right.
        stats.sort_by(|a, b| {
            let ra = a.1 / a.2.max(f64::MIN_POSITIVE);
            let rb = b.1 / b.2.max(f64::MIN_POSITIVE);
            ra.total_cmp(&rb).then(a.0.cmp(&b.0))
        });

        let (mut grad_right, mut hess_right, mut count_right) = (0.0f64, 0.0f64, 0u32);
        for i in 0..stats.len() - 1 {
            let (_, g, h, count) = stats[i];
            grad_right += g;
            hess_right += h;
            count_right += count;

            let grad_left = parent.grad_sum - grad_right;
            let hess_left = parent.hess_sum - hess_right;
            let count_left = parent.count - count_right;
            let Some(gain) = self.evaluate(parent, grad_left, hess_left, count_left) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| gain > b.gain) {
                let mut right: Vec<u32> = stats[..=i].iter().map(|s| s.0).collect();
                right.sort_unstable();
                best = Some(self.make_split(
                    feature,
                    SplitKind::Categorical { right },
                    gain,
                    parent,
                    (grad_left, hess_left, count_left),
                ));
            }
        }

        best
    }

    /// Gain of a candidate, or `None` if it violates a constraint.
    fn evaluate(&self, parent: NodeStats, grad_left: f64, hess_left: f64, count_left: u32) -> Option<f64> {
        let grad_right = parent.grad_sum - grad_left;
        let hess_right = parent.hess_sum - hess_left;
        let count_right = parent.count.checked_sub(count_left)?;

        if !self
            .gain
            .is_valid_split(hess_left, hess_right, count_left, count_right)
        {
            return None;
        }

        let gain = self.gain.compute_gain(
            (grad_left, hess_left),
            (grad_right, hess_right),
            (parent.grad_sum, parent.hess_sum),
        );
        self.gain.accepts_gain(gain).then_some(gain)
    }

    fn make_split(
        &self,
        feature: u32,
        kind: SplitKind,
        gain: f64,
        parent: NodeStats,
        (grad_left, hess_left, count_left): (f64, f64, u32),
    ) -> SplitInfo {
        SplitInfo {
            feature,
            kind,
            gain,
            grad_left,
            hess_left,
            count_left,
            grad_right: parent.grad_sum - grad_left,
            hess_right: parent.hess_sum - hess_left,
            count_right: parent.count - count_left,
        }
    }
}

/// Threshold strictly above `lo` and at most `hi`.
#[inline]
fn midpoint(lo: f32, hi: f32) -> f32 {
    let mid = lo + (hi - lo) / 2.0;
    if mid > lo && mid <= hi {
        mid
    } else {
        hi
    }
}
