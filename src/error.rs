use core::fmt;

/// Errors reported by the fallible operations of [`OSRBTreeMap`](crate::OSRBTreeMap).
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A rank outside `0..len` was requested.
    RankOutOfBounds {
        /// The requested zero-based rank.
        rank: usize,
        /// The number of entries in the map at the time of the request.
        len: usize,
    },
    /// A source passed to a sorted-input constructor was not strictly
    /// ascending under the map's comparator.
    UnsortedInput {
        /// Zero-based position of the first element that is not greater than
        /// its predecessor.
        position: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RankOutOfBounds { rank, len } => {
                write!(f, "rank {rank} is out of bounds for a map of length {len}")
            }
            Error::UnsortedInput { position } => {
                write!(f, "sorted input is not strictly ascending at position {position}")
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_index() {
        assert_eq!(
            Error::RankOutOfBounds { rank: 7, len: 3 }.to_string(),
            "rank 7 is out of bounds for a map of length 3"
        );
        assert_eq!(
            Error::UnsortedInput { position: 4 }.to_string(),
            "sorted input is not strictly ascending at position 4"
        );
    }
}
