use serde::{Deserialize, Serialize};

/// Number of samples (IA-01 .. IA-10) in a calibration report
pub const SAMPLE_COUNT: u32 = 10;

/// 1-based sample number. Report records always carry 1..=`SAMPLE_COUNT`;
/// sample files may number beyond that.
pub type SampleNumber = u32;

/// Peer classification under which a report lists its statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Peer,
    Instrument,
    Method,
    Reagent,
}

impl GroupKind {
    /// Header substring that opens a section of this group kind
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::Peer => "Peer Group",
            Self::Instrument => "Instrument Groups",
            Self::Method => "Method Groups",
            Self::Reagent => "Reagent Groups",
        }
    }

    /// All group kinds, in the order their headers are tested
    #[must_use]
    pub fn all() -> [Self; 4] {
        [Self::Peer, Self::Instrument, Self::Method, Self::Reagent]
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Peer => write!(f, "Peer Group"),
            Self::Instrument => write!(f, "Instrument Group"),
            Self::Method => write!(f, "Method Group"),
            Self::Reagent => write!(f, "Reagent Group"),
        }
    }
}
