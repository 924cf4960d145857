//! Structure bitmask
//!
//! Bit `i` stands for the structure at position `i` of the topological
//! order. Backed by 64-bit words, so there is no upper bound on the number
//! of structures.

use serde::{Serialize, Serializer};

const WORD_BITS: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StructureMask {
    words: Vec<u64>,
}

impl StructureMask {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mask with bits `0..len` set
    pub fn all(len: usize) -> Self {
        let mut mask = Self::empty();
        for bit in 0..len {
            mask.insert(bit);
        }
        mask
    }

    /// Mask from the low 64 bits
    pub fn from_bits(bits: u64) -> Self {
        let mut mask = Self { words: vec![bits] };
        mask.normalize();
        mask
    }

    pub fn from_indices<I: IntoIterator<Item = usize>>(bits: I) -> Self {
        let mut mask = Self::empty();
        for bit in bits {
            mask.insert(bit);
        }
        mask
    }

    pub fn insert(&mut self, bit: usize) {
        let word = bit / WORD_BITS;
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (bit % WORD_BITS);
    }

    pub fn contains(&self, bit: usize) -> bool {
        self.words
            .get(bit / WORD_BITS)
            .map(|word| word & (1u64 << (bit % WORD_BITS)) != 0)
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Set bits, ascending
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            (0..WORD_BITS)
                .filter(move |&b| word & (1u64 << b) != 0)
                .map(move |b| w * WORD_BITS + b)
        })
    }

    /// Keep only bits below `len`
    pub fn truncated(&self, len: usize) -> Self {
        Self::from_indices(self.iter().take_while(|&bit| bit < len))
    }

    /// True when every bit of `self` is also in `other`
    pub fn is_subset(&self, other: &StructureMask) -> bool {
        self.iter().all(|bit| other.contains(bit))
    }

    // Trailing zero words would make equal masks compare unequal
    fn normalize(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl Serialize for StructureMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits() {
        let mask = StructureMask::from_bits(0b101);
        assert!(mask.contains(0));
        assert!(!mask.contains(1));
        assert!(mask.contains(2));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(StructureMask::from_bits(0), StructureMask::empty());
    }

    #[test]
    fn test_beyond_one_word() {
        let mut mask = StructureMask::from_indices([3, 70]);
        mask.insert(130);
        assert!(mask.contains(130));
        assert!(!mask.contains(200));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![3, 70, 130]);
        assert_eq!(mask.truncated(100).iter().collect::<Vec<_>>(), vec![3, 70]);
    }

    #[test]
    fn test_all_and_subset() {
        let all = StructureMask::all(65);
        assert_eq!(all.iter().count(), 65);
        assert!(StructureMask::from_bits(0b11).is_subset(&all));
        assert!(!StructureMask::from_indices([66]).is_subset(&all));
        assert!(StructureMask::all(0).is_empty());
    }
}
