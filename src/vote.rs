//! A single vote of a labeling function.
use serde::{Serialize, Deserialize};
use std::fmt;


/// The vote a labeling function casts on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vote {
    /// `-1`
    Negative,
    /// `0`
    Abstain,
    /// `+1`
    Positive,
}


/// The two polarities an abstention can be extended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Extend to `-1`.
    Negative,
    /// Extend to `+1`.
    Positive,
}


impl Vote {
    /// Convert an integer vote into `Vote`.
    /// Returns `None` if `value` is not in `{-1, 0, 1}`.
    #[inline]
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            -1 => Some(Self::Negative),
            0 => Some(Self::Abstain),
            1 => Some(Self::Positive),
            _ => None,
        }
    }


    /// Returns the integer representation `-1`, `0`, or `1`.
    #[inline]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Negative => -1,
            Self::Abstain => 0,
            Self::Positive => 1,
        }
    }


    /// Returns `true` if `self` is `Vote::Abstain`.
    #[inline]
    pub fn is_abstain(self) -> bool {
        self == Self::Abstain
    }


    /// Returns the polarity of a non-abstaining vote.
    #[inline]
    pub fn polarity(self) -> Option<Polarity> {
        match self {
            Self::Negative => Some(Polarity::Negative),
            Self::Abstain => None,
            Self::Positive => Some(Polarity::Positive),
        }
    }
}


impl From<Polarity> for Vote {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Negative => Self::Negative,
            Polarity::Positive => Self::Positive,
        }
    }
}


impl From<Vote> for i64 {
    fn from(vote: Vote) -> Self {
        vote.as_i64()
    }
}


impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}
