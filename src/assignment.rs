/// Hard cluster membership of every point, stored as a row-major `N×K` indicator matrix
/// = [<row0>,<row1>,<row2>,...], where `row[k]` is **true** if the point belongs to cluster `k`.
///
/// After an assignment step, every row contains exactly one **true** entry.
/// The all-zero matrix ([`Assignment::empty`]) is the state before the first epoch.
///
/// Two assignments compare equal if and only if all entries are identical. This is the
/// convergence criterion of the Lloyd iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    sample_cnt: usize,
    k: usize,
    memberships: Vec<bool>
}
impl Assignment {
    /// Create the all-zero assignment of `sample_cnt` points onto `k` clusters.
    pub fn empty(sample_cnt: usize, k: usize) -> Self {
        Self { sample_cnt, k, memberships: vec![false; sample_cnt * k] }
    }

    /// Build an assignment from a per-point cluster index (`None` leaves the row empty).
    ///
    /// ## Panics
    /// If a cluster index is `>= k`.
    pub fn from_labels(labels: &[Option<usize>], k: usize) -> Self {
        let mut res = Self::empty(labels.len(), k);
        labels.iter().enumerate()
            .filter_map(|(n, label)| label.map(|l| (n, l)))
            .for_each(|(n, l)| res.assign(n, l));
        res
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn k(&self) -> usize { self.k }

    /// Indicator row of point `n`.
    pub fn row(&self, n: usize) -> &[bool] {
        &self.memberships[n * self.k..(n + 1) * self.k]
    }

    /// Amount of clusters point `n` is a member of.
    pub fn row_sum(&self, n: usize) -> usize {
        self.row(n).iter().filter(|m| **m).count()
    }

    /// The cluster point `n` belongs to, or `None` if its row is empty.
    pub fn cluster_of(&self, n: usize) -> Option<usize> {
        self.row(n).iter().position(|m| *m)
    }

    /// Make point `n` a member of cluster `k` only.
    pub fn assign(&mut self, n: usize, k: usize) {
        assert!(k < self.k, "cluster index {} out of range (k = {})", k, self.k);
        let k_total = self.k;
        let row = &mut self.memberships[n * k_total..(n + 1) * k_total];
        row.iter_mut().for_each(|m| *m = false);
        row[k] = true;
    }

    /// Iterate the cluster index of every point, in point order.
    pub fn labels(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        (0..self.sample_cnt).map(move |n| self.cluster_of(n))
    }

    /// Amount of points per cluster.
    pub fn cluster_frequencies(&self) -> Vec<usize> {
        let mut frequency = vec![0usize; self.k];
        self.labels().flatten().for_each(|k| frequency[k] += 1);
        frequency
    }
}
