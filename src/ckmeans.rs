//! Optimal 1-D clustering (natural breaks).
//!
//! Implements the Wang & Song dynamic program for univariate k-means with a
//! guaranteed global optimum: the partition of a sorted sample into `k`
//! contiguous clusters minimizing the total within-cluster sum of squared
//! deviations. Unlike iterative k-means there is no seeding and no
//! randomness, so the result is fully determined by the sample multiset and
//! the cluster count.
//!
//! The divide-and-conquer column fill keeps the complexity at O(k·n log n);
//! values are shifted by the sample median before the prefix sums are built
//! to keep the running sums numerically stable.

use crate::error::BreaksError;

// =============================================================================
// ClusterPartition
// =============================================================================

/// A partition of a sorted sample into ordered, contiguous clusters.
///
/// Owns a sorted copy of the caller's sample plus the start offset of each
/// cluster. Clusters are non-empty, ascending, and cover the sample exactly:
/// cluster `i` is `values[starts[i]..starts[i + 1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPartition {
    values: Vec<f64>,
    starts: Vec<usize>,
}

impl ClusterPartition {
    /// Number of clusters in the partition.
    pub fn n_clusters(&self) -> usize {
        self.starts.len()
    }

    /// Total number of values across all clusters.
    pub fn n_values(&self) -> usize {
        self.values.len()
    }

    /// The full sample, sorted ascending.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The values of cluster `i`, sorted ascending.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_clusters()`.
    pub fn cluster(&self, i: usize) -> &[f64] {
        let end = self
            .starts
            .get(i + 1)
            .copied()
            .unwrap_or(self.values.len());
        &self.values[self.starts[i]..end]
    }

    /// Smallest value in cluster `i`.
    pub fn cluster_min(&self, i: usize) -> f64 {
        self.values[self.starts[i]]
    }

    /// Largest value in cluster `i`.
    pub fn cluster_max(&self, i: usize) -> f64 {
        let end = self
            .starts
            .get(i + 1)
            .copied()
            .unwrap_or(self.values.len());
        self.values[end - 1]
    }

    /// Iterate over the clusters in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_clusters()).map(move |i| self.cluster(i))
    }
}

// =============================================================================
// ckmeans
// =============================================================================

/// Cluster `sample` into exactly `n_clusters` optimal contiguous clusters.
///
/// The input need not be sorted; a private sorted copy is taken and the
/// caller's slice is never mutated. Duplicate values are allowed — a value
/// repeated across a would-be boundary collapses into one cluster when that
/// lowers the within-cluster variance, and otherwise yields adjacent
/// clusters with equal boundary values (a zero gap, which downstream
/// threshold rounding handles explicitly).
///
/// Constant samples still produce `n_clusters` clusters (splitting the run
/// of equal values) so that callers relying on the cluster count, such as
/// the threshold engine, keep their count invariant.
///
/// # Errors
///
/// Returns [`BreaksError`] if the sample is empty, `n_clusters` is zero,
/// `n_clusters` exceeds the sample length, or any value is NaN/infinite.
pub fn ckmeans(sample: &[f64], n_clusters: usize) -> Result<ClusterPartition, BreaksError> {
    if sample.is_empty() {
        return Err(BreaksError::EmptySample);
    }
    if n_clusters < 1 {
        return Err(BreaksError::InvalidClassCount(n_clusters));
    }
    if n_clusters > sample.len() {
        return Err(BreaksError::TooManyClasses {
            class_count: n_clusters,
            sample_len: sample.len(),
        });
    }
    if let Some(index) = sample.iter().position(|v| !v.is_finite()) {
        return Err(BreaksError::NonFiniteSample { index });
    }

    let mut values = sample.to_vec();
    values.sort_unstable_by(f64::total_cmp);

    let n = values.len();
    let mut tables = DpTables::new(&values, n_clusters);
    for cluster in 1..n_clusters {
        // The leftmost column a row can own is its own index, except the
        // last row which only ever answers for the full sample.
        let imin = if cluster < n_clusters - 1 { cluster } else { n - 1 };
        tables.fill_column(imin, n - 1, cluster);
    }

    let mut starts = vec![0usize; n_clusters];
    let mut right = n - 1;
    for cluster in (0..n_clusters).rev() {
        let left = tables.backtrack[cluster * n + right];
        starts[cluster] = left;
        if cluster > 0 {
            right = left - 1;
        }
    }

    Ok(ClusterPartition { values, starts })
}

// =============================================================================
// Dynamic programming tables
// =============================================================================

/// Cost/backtrack matrices and shifted prefix sums for the dynamic program.
///
/// `cost[c * n + i]` is the minimal within-cluster dissimilarity of
/// `values[0..=i]` split into `c + 1` clusters; `backtrack` records the
/// start index of the last cluster in that optimum.
struct DpTables {
    n: usize,
    cost: Vec<f64>,
    backtrack: Vec<usize>,
    sums: Vec<f64>,
    sums_sq: Vec<f64>,
}

impl DpTables {
    fn new(sorted: &[f64], n_clusters: usize) -> Self {
        let n = sorted.len();
        let shift = sorted[n / 2];

        let mut sums = Vec::with_capacity(n);
        let mut sums_sq = Vec::with_capacity(n);
        let mut cost = vec![0.0; n_clusters * n];
        let backtrack = vec![0usize; n_clusters * n];

        for (i, &v) in sorted.iter().enumerate() {
            let sv = v - shift;
            if i == 0 {
                sums.push(sv);
                sums_sq.push(sv * sv);
            } else {
                sums.push(sums[i - 1] + sv);
                sums_sq.push(sums_sq[i - 1] + sv * sv);
            }
            cost[i] = dissimilarity(0, i, &sums, &sums_sq);
        }

        Self {
            n,
            cost,
            backtrack,
            sums,
            sums_sq,
        }
    }

    /// Fill `cost`/`backtrack` for row `cluster` over columns
    /// `imin..=imax`, exploiting the monotonicity of the optimal split
    /// points by solving the middle column first.
    fn fill_column(&mut self, imin: usize, imax: usize, cluster: usize) {
        if imin > imax {
            return;
        }
        let n = self.n;
        let i = (imin + imax) / 2;

        self.cost[cluster * n + i] = self.cost[(cluster - 1) * n + (i - 1)];
        self.backtrack[cluster * n + i] = i;

        let mut jlow = cluster;
        if imin > cluster {
            jlow = jlow.max(self.backtrack[cluster * n + (imin - 1)]);
        }
        jlow = jlow.max(self.backtrack[(cluster - 1) * n + i]);

        let mut jhigh = i - 1;
        if imax < n - 1 {
            jhigh = jhigh.min(self.backtrack[cluster * n + (imax + 1)]);
        }

        for j in (jlow..=jhigh).rev() {
            let sji = dissimilarity(j, i, &self.sums, &self.sums_sq);
            if sji + self.cost[(cluster - 1) * n + (jlow - 1)] >= self.cost[cluster * n + i] {
                break;
            }

            let sjlow = dissimilarity(jlow, i, &self.sums, &self.sums_sq);
            let cost_jlow = sjlow + self.cost[(cluster - 1) * n + (jlow - 1)];
            if cost_jlow < self.cost[cluster * n + i] {
                self.cost[cluster * n + i] = cost_jlow;
                self.backtrack[cluster * n + i] = jlow;
            }
            jlow += 1;

            let cost_j = sji + self.cost[(cluster - 1) * n + (j - 1)];
            if cost_j < self.cost[cluster * n + i] {
                self.cost[cluster * n + i] = cost_j;
                self.backtrack[cluster * n + i] = j;
            }
        }

        self.fill_column(imin, i - 1, cluster);
        self.fill_column(i + 1, imax, cluster);
    }
}

/// Within-cluster sum of squared deviations for `values[j..=i]`, from the
/// shifted prefix sums. Clamped at zero: cancellation can push the result
/// to a tiny negative.
fn dissimilarity(j: usize, i: usize, sums: &[f64], sums_sq: &[f64]) -> f64 {
    let sji = if j > 0 {
        let count = (i - j + 1) as f64;
        let mean = (sums[i] - sums[j - 1]) / count;
        sums_sq[i] - sums_sq[j - 1] - count * mean * mean
    } else {
        sums_sq[i] - sums[i] * sums[i] / (i + 1) as f64
    };
    sji.max(0.0)
}

// =============================================================================
// Tests
// =============================================================================
