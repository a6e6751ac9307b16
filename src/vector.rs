//! Sparse feature vectors.
//!
//! TF-IDF rows are mostly zeros: a product description touches a handful of
//! terms out of a vocabulary of thousands. [`SparseVector`] stores only the
//! non-zero entries, with indices strictly increasing.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaxoclassError};

/// A fixed-dimension sparse vector of `f64` weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SparseVectorData", into = "SparseVectorData")]
pub struct SparseVector {
    dimension: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct SparseVectorData {
    dimension: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl TryFrom<SparseVectorData> for SparseVector {
    type Error = TaxoclassError;

    fn try_from(data: SparseVectorData) -> Result<Self> {
        if data.indices.len() != data.values.len() {
            return Err(TaxoclassError::model(format!(
                "sparse vector has {} indices but {} values",
                data.indices.len(),
                data.values.len()
            )));
        }
        if data.indices.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TaxoclassError::model(
                "sparse vector indices are not strictly increasing",
            ));
        }
        if let Some(&last) = data.indices.last() {
            if last >= data.dimension {
                return Err(TaxoclassError::model(format!(
                    "sparse vector index {last} out of range for dimension {}",
                    data.dimension
                )));
            }
        }

        Ok(Self {
            dimension: data.dimension,
            indices: data.indices,
            values: data.values,
        })
    }
}

impl From<SparseVector> for SparseVectorData {
    fn from(vector: SparseVector) -> Self {
        SparseVectorData {
            dimension: vector.dimension,
            indices: vector.indices,
            values: vector.values,
        }
    }
}

impl SparseVector {
    /// Create an all-zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a vector from `(index, value)` entries.
    ///
    /// Entries are sorted by index; duplicate indices are summed and explicit
    /// zeros are dropped. Indices outside `dimension` are rejected.
    pub fn from_entries<I>(dimension: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut entries: Vec<(usize, f64)> = entries.into_iter().collect();
        entries.sort_by_key(|&(index, _)| index);

        let mut indices = Vec::with_capacity(entries.len());
        let mut values: Vec<f64> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            if index >= dimension {
                return Err(TaxoclassError::other(format!(
                    "Vector index {index} out of range for dimension {dimension}"
                )));
            }
            if indices.last() == Some(&index) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(index);
                values.push(value);
            }
        }

        let mut vector = Self {
            dimension,
            indices,
            values,
        };
        vector.prune_zeros();
        Ok(vector)
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().all(|v| *v != 0.0) {
            return;
        }
        let (indices, values) = self
            .indices
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (*i, *v))
            .unzip();
        self.indices = indices;
        self.values = values;
    }

    /// Get the dimensionality of this vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// True if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at `index`, zero when absent.
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Iterate over non-zero `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Calculate the L2 norm (magnitude) of this vector.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Normalize this vector to unit length. Zero vectors stay zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }

    /// Dot product with another sparse vector (merge over both index lists).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut total = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    total += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        total
    }

    /// Dot product with a dense weight row.
    ///
    /// Callers pass a row of length `dimension`; entries beyond the end of
    /// `dense` count as zero.
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(index, value)| dense.get(index).map(|weight| value * weight))
            .sum()
    }

    /// Cosine similarity. Zero vectors have similarity 0 with everything.
    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            self.dot(other) / (norm_a * norm_b)
        }
    }
}
