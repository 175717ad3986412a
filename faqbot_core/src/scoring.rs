/// Sparse term-weight vector: `(term index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from arbitrary pairs. Duplicate indices are summed, zero weights dropped.
    #[must_use]
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_unstable_by_key(|(index, _)| *index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, weight) in entries {
            match merged.last_mut() {
                Some((last, total)) if *last == index => *total += weight,
                _ => merged.push((index, weight)),
            }
        }
        merged.retain(|(_, weight)| *weight != 0.0);

        Self { entries: merged }
    }

    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, w)| w * w)
            .sum::<f64>()
            .sqrt()
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0_f64;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        dot
    }

    /// Scale to unit length. A zero vector stays zero.
    #[must_use]
    pub fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm >= f64::EPSILON {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
        self
    }
}

/// Compute cosine similarity between two sparse vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
#[must_use]
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        return 0.0;
    }

    a.dot(b) / denom
}
