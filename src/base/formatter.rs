//! Unicode normalisation and segmentation strategy.

use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;

/// How raw text is split into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentationMode {
    /// Combining marks and modifier letters attach to the preceding head.
    #[default]
    Default,
    /// Every character is its own segment unless a longer key matches.
    Naive,
}

/// Text normalisation applied before segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatterMode {
    /// No normalisation, naive segmentation
    None,
    /// NFD normalisation with diacritic-aware segmentation
    #[default]
    Intelligent,
    /// NFD normalisation, naive segmentation
    Decomposition,
    /// NFC normalisation, naive segmentation
    Composition,
}

impl FormatterMode {
    /// Normalise a string according to this mode.
    pub fn normalize(&self, text: &str) -> String {
        match self {
            Self::None => text.to_string(),
            Self::Intelligent | Self::Decomposition => text.nfd().collect(),
            Self::Composition => text.nfc().collect(),
        }
    }

    /// The segmentation strategy paired with this mode.
    pub fn segmentation(&self) -> SegmentationMode {
        match self {
            Self::Intelligent => SegmentationMode::Default,
            Self::None | Self::Decomposition | Self::Composition => SegmentationMode::Naive,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Intelligent => "INTELLIGENT",
            Self::Decomposition => "DECOMPOSITION",
            Self::Composition => "COMPOSITION",
        }
    }
}

impl fmt::Display for FormatterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "INTELLIGENT" => Ok(Self::Intelligent),
            "DECOMPOSITION" => Ok(Self::Decomposition),
            "COMPOSITION" => Ok(Self::Composition),
            other => Err(format!("unknown formatter mode '{other}'")),
        }
    }
}
