//! Page sequences and the book-order transform.
//!
//! A [`PageSequence`] is an ordered list of zero-based page indices that
//! describes the page order of an output document in terms of a source
//! document. Everything in this module is pure index arithmetic; applying a
//! sequence to a real document is done by [`crate::pages::PageEditor`].
//!
//! # Examples
//!
//! ```
//! use pdfops::sequence::book_order;
//!
//! let order = book_order(8).unwrap();
//! assert_eq!(order.as_slice(), &[0, 7, 1, 6, 2, 5, 3, 4]);
//! ```

use serde::Serialize;

use crate::error::{PdfOpsError, Result};

/// Zero-based position of a page in a source document.
pub type PageIndex = usize;

/// Ordered sequence of page indices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PageSequence(Vec<PageIndex>);

impl PageSequence {
    /// Wrap an explicit list of indices.
    pub fn new(indices: Vec<PageIndex>) -> Self {
        Self(indices)
    }

    /// The sequence `0, 1, …, n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the sequence has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the indices.
    pub fn as_slice(&self) -> &[PageIndex] {
        &self.0
    }

    /// Iterate over the indices in order.
    pub fn iter(&self) -> impl Iterator<Item = PageIndex> + '_ {
        self.0.iter().copied()
    }

    /// Check that this sequence is a permutation of `0..n`.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.0.len() != n {
            return false;
        }

        let mut seen = vec![false; n];
        for &index in &self.0 {
            if index >= n || seen[index] {
                return false;
            }
            seen[index] = true;
        }

        true
    }

    /// Select the 1-based inclusive page range `start..=stop`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidPageRange`] unless
    /// `1 <= start <= stop <= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfops::sequence::PageSequence;
    ///
    /// let pages = PageSequence::identity(5);
    /// assert_eq!(pages.slice(1, 3).unwrap().as_slice(), &[0, 1, 2]);
    /// ```
    pub fn slice(&self, start: u32, stop: u32) -> Result<Self> {
        let total_pages = self.0.len();
        if start == 0 || start > stop || stop as usize > total_pages {
            return Err(PdfOpsError::InvalidPageRange {
                start,
                stop,
                total_pages,
            });
        }

        let from = (start - 1) as usize;
        let to = stop as usize;
        Ok(Self(self.0[from..to].to_vec()))
    }

    /// Drop the first `count` entries. Dropping more than the length yields
    /// an empty sequence.
    pub fn skip_front(&self, count: usize) -> Self {
        Self(self.0.iter().skip(count).copied().collect())
    }

    /// Inverse permutation: `inverse[self[i]] == i`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is not a permutation of
    /// `0..self.len()`.
    pub fn inverse(&self) -> Result<Self> {
        if !self.is_permutation_of(self.0.len()) {
            return Err(PdfOpsError::other(
                "Only a permutation of all pages can be inverted",
            ));
        }

        let mut inverse = vec![0; self.0.len()];
        for (position, &index) in self.0.iter().enumerate() {
            inverse[index] = position;
        }

        Ok(Self(inverse))
    }

    /// Rearrange `items` so that output position `i` holds `items[self[i]]`.
    ///
    /// Indices past the end of `items` are skipped.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.0
            .iter()
            .filter_map(|&index| items.get(index).cloned())
            .collect()
    }
}

impl From<Vec<PageIndex>> for PageSequence {
    fn from(indices: Vec<PageIndex>) -> Self {
        Self(indices)
    }
}

/// Interleave the front half forward with the back half reversed.
///
/// For `n` pages scanned as all fronts in order followed by all backs in
/// reverse, this yields the logical reading order: even output positions take
/// `0, 1, …, n/2 - 1` and odd output positions take `n-1, n-2, …, n/2`.
///
/// # Errors
///
/// Returns [`PdfOpsError::OddPageCount`] if `n` is odd.
pub fn book_order(n: usize) -> Result<PageSequence> {
    if n % 2 != 0 {
        return Err(PdfOpsError::OddPageCount { page_count: n });
    }

    let half = n / 2;
    let fronts = 0..half;
    let backs = (half..n).rev();

    let order = fronts
        .zip(backs)
        .flat_map(|(front, back)| [front, back])
        .collect();

    Ok(PageSequence(order))
}
