//! Sparse term-weight vectors and the dense all-pairs similarity matrix.
//!
//! The matrix is N×N `f64`, row-major, computed once at build time. Memory is
//! quadratic in catalog size; fine for thousands of movies, not for millions.

use catalog::RowId;
use rayon::prelude::*;

/// A sparse vector: `(term index, weight)` pairs sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from entries; they are sorted by index here
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(index, _)| index);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length in place. Zero vectors are left alone.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product by merging the two sorted entry lists.
    ///
    /// Both operands are walked in index order, so `a.dot(b)` and `b.dot(a)`
    /// add the same products in the same order and agree bit for bit.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            if a_idx == b_idx {
                sum += a_w * b_w;
                i += 1;
                j += 1;
            } else if a_idx < b_idx {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    /// Cosine similarity; 0.0 when either side is a zero vector
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

/// Square, symmetric matrix of pairwise cosine similarities
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute every pair from unit-length vectors.
    ///
    /// Rows are filled in parallel. The diagonal is pinned to 1.0 and every
    /// other entry is clamped into [0, 1].
    pub fn from_unit_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0; size * size];
        if size == 0 {
            return Self { size, values };
        }

        values
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(i, row)| {
                for (j, slot) in row.iter_mut().enumerate() {
                    *slot = if i == j {
                        1.0
                    } else {
                        vectors[i].dot(&vectors[j]).clamp(0.0, 1.0)
                    };
                }
            });

        Self { size, values }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, a: RowId, b: RowId) -> Option<f64> {
        if a < self.size && b < self.size {
            Some(self.values[a * self.size + b])
        } else {
            None
        }
    }

    /// Similarity of `row` against every movie, indexed by row id
    pub fn row(&self, row: RowId) -> &[f64] {
        if row >= self.size {
            return &[];
        }
        &self.values[row * self.size..(row + 1) * self.size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(entries: Vec<(usize, f64)>) -> SparseVector {
        let mut v = SparseVector::new(entries);
        v.normalize();
        v
    }

    #[test]
    fn test_dot_merges_sorted_entries() {
        let a = SparseVector::new(vec![(3, 2.0), (0, 1.0)]);
        let b = SparseVector::new(vec![(0, 4.0), (2, 5.0), (3, 1.0)]);
        assert_eq!(a.dot(&b), 6.0);
        assert_eq!(b.dot(&a), 6.0);
    }

    #[test]
    fn test_cosine_of_zero_vector() {
        let a = SparseVector::default();
        let b = SparseVector::new(vec![(1, 1.0)]);
        assert_eq!(a.cosine(&b), 0.0);
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let vectors = vec![
            unit(vec![(0, 1.0), (1, 2.0)]),
            unit(vec![(1, 1.0), (2, 3.0)]),
            unit(vec![(0, 0.5), (2, 0.5), (3, 1.0)]),
            SparseVector::default(),
        ];
        let matrix = SimilarityMatrix::from_unit_vectors(&vectors);

        assert_eq!(matrix.size(), 4);
        for i in 0..4 {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..4 {
                let s = matrix.get(i, j).unwrap();
                assert_eq!(s, matrix.get(j, i).unwrap());
                assert!((0.0..=1.0).contains(&s));
            }
        }
        assert_eq!(matrix.get(3, 0), Some(0.0));
    }

    #[test]
    fn test_out_of_range() {
        let matrix = SimilarityMatrix::from_unit_vectors(&[unit(vec![(0, 1.0)])]);
        assert_eq!(matrix.get(0, 1), None);
        assert!(matrix.row(5).is_empty());
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SimilarityMatrix::from_unit_vectors(&[]);
        assert_eq!(matrix.size(), 0);
        assert!(matrix.row(0).is_empty());
    }
}
