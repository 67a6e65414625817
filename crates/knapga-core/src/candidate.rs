use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A proposed subset of a catalog, encoded as one bit per item index.
///
/// Bit `i` set means item `i` of the catalog is packed. The length of a
/// candidate always equals the length of the catalog it was created for;
/// none of the operations here change it.
///
/// Candidates are plain values. Breeding builds new candidates and mutation
/// flips bits in place, but no candidate ever refers to another one.
///
/// # Example
///
/// ```
/// use knapga_core::Candidate;
///
/// let candidate = Candidate::from_bits(&[1, 0, 1, 1]);
/// assert_eq!(candidate.count_selected(), 3);
/// assert_eq!(candidate.selected_indices().collect::<Vec<_>>(), vec![0, 2, 3]);
/// assert_eq!(candidate.to_string(), "[1, 0, 1, 1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    genes: Vec<bool>,
}

impl Candidate {
    #[must_use]
    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// Builds a candidate from `0`/`1` values. Any non-zero value counts as `1`.
    #[must_use]
    pub fn from_bits(bits: &[u8]) -> Self {
        Self::from_genes(bits.iter().map(|&b| b != 0).collect())
    }

    /// A candidate that packs nothing.
    #[must_use]
    pub fn empty(len: usize) -> Self {
        Self::from_genes(vec![false; len])
    }

    /// A candidate that packs everything.
    #[must_use]
    pub fn full(len: usize) -> Self {
        Self::from_genes(vec![true; len])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    #[must_use]
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Mutable access to the bits. The slice cannot grow or shrink.
    pub fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.genes
    }

    /// Returns whether item `index` is packed. Out-of-range indices are not.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.genes.get(index).copied().unwrap_or(false)
    }

    /// Flips bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn flip(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }

    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &gene)| gene.then_some(i))
    }

    #[must_use]
    pub fn count_selected(&self) -> usize {
        self.genes.iter().filter(|&&gene| gene).count()
    }

    #[must_use]
    pub fn to_bits(&self) -> Vec<u8> {
        self.genes.iter().map(|&gene| u8::from(gene)).collect()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, &gene) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", u8::from(gene))?;
        }
        f.write_str("]")
    }
}

/// Serialized as a list of `0`/`1` numbers.
impl Serialize for Candidate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.genes.iter().map(|&gene| u8::from(gene)))
    }
}

impl<'de> Deserialize<'de> for Candidate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = Vec::<u8>::deserialize(deserializer)?;
        if let Some(bad) = bits.iter().find(|&&b| b > 1) {
            return Err(serde::de::Error::custom(format!(
                "invalid candidate bit: expected 0 or 1, got {bad}"
            )));
        }
        Ok(Self::from_bits(&bits))
    }
}
