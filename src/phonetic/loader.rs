//! Plain-text feature model format.
//!
//! ```text
//! % comment
//! FEATURES
//! consonantal con binary
//! height      hgt numeric(0,3)
//! SYMBOLS
//! p	+	0
//! MODIFIERS
//! ʰ		2
//! ```
//!
//! Rows are tab separated. An empty cell is a wildcard in `SYMBOLS` and a
//! masking value in `MODIFIERS`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use super::features::FeatureType;
use super::model::{FeatureModel, FeatureModelBuilder};
use crate::base::FormatterMode;
use crate::base::constants::{MASKING_VALUE, UNDEFINED_VALUE};
use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Preamble,
    Features,
    Symbols,
    Modifiers,
    Ignored,
}

impl Zone {
    fn from_header(line: &str) -> Option<Zone> {
        match line {
            "FEATURES" => Some(Zone::Features),
            "SYMBOLS" => Some(Zone::Symbols),
            "MODIFIERS" | "DIACRITICS" => Some(Zone::Modifiers),
            "ALIASES" | "CONSTRAINTS" | "WEIGHTS" => Some(Zone::Ignored),
            _ => None,
        }
    }
}

impl FeatureModel {
    /// Read a model from a file
    pub fn load(path: impl AsRef<Path>, mode: FormatterMode) -> Result<Arc<FeatureModel>, ModelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading feature model");
        Self::parse(&text, mode)
    }

    /// Parse a model from its text form. Symbols and modifiers are normalised with `mode`.
    pub fn parse(text: &str, mode: FormatterMode) -> Result<Arc<FeatureModel>, ModelError> {
        let mut builder = FeatureModel::builder();
        let mut zone = Zone::Preamble;

        for (number, raw) in text.lines().enumerate() {
            let line = strip_comment(raw);
            if line.trim().is_empty() {
                continue;
            }
            if let Some(next) = Zone::from_header(line.trim()) {
                zone = next;
                continue;
            }
            match zone {
                Zone::Features if builder.has_rows() => {
                    return Err(ModelError::LateFeature {
                        line: number + 1,
                        text: line.trim().to_string(),
                    });
                }
                Zone::Features => parse_feature(&mut builder, line, number + 1)?,
                Zone::Symbols => {
                    let (symbol, values) = parse_row(line, builder.feature_count(), UNDEFINED_VALUE, mode)?;
                    builder.add_symbol(&symbol, values)?;
                }
                Zone::Modifiers => {
                    let (symbol, values) = parse_row(line, builder.feature_count(), MASKING_VALUE, mode)?;
                    builder.add_diacritic(&symbol, values)?;
                }
                Zone::Preamble | Zone::Ignored => {
                    warn!(line = number + 1, text = line.trim(), "ignoring line outside a known zone");
                }
            }
        }

        let model = builder.build();
        debug!(
            features = model.feature_count(),
            symbols = model.symbols().count(),
            diacritics = model.diacritics().count(),
            "feature model ready"
        );
        Ok(model)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('%') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_feature(builder: &mut FeatureModelBuilder, line: &str, number: usize) -> Result<(), ModelError> {
    let malformed = || ModelError::FeatureDefinition {
        line: number,
        text: line.trim().to_string(),
    };
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (name, alias, kind) = match parts.as_slice() {
        [name, kind] => (*name, None, *kind),
        [name, alias, kind] => (*name, Some(*alias), *kind),
        _ => return Err(malformed()),
    };
    let kind = parse_type(kind).ok_or_else(malformed)?;
    builder.add_feature(name, alias, kind);
    Ok(())
}

fn parse_type(text: &str) -> Option<FeatureType> {
    match text.to_ascii_lowercase().as_str() {
        "binary" => Some(FeatureType::Binary),
        "ternary" => Some(FeatureType::Ternary),
        "unary" => Some(FeatureType::Unary),
        other => {
            let range = other.strip_prefix("numeric(")?.strip_suffix(')')?;
            let (min, max) = range.split_once(',')?;
            let min = min.trim().parse::<f64>().ok()?;
            let max = max.trim().parse::<f64>().ok()?;
            (min <= max).then_some(FeatureType::Numeric { min, max })
        }
    }
}

fn parse_row(
    line: &str,
    width: usize,
    empty: f64,
    mode: FormatterMode,
) -> Result<(String, Vec<f64>), ModelError> {
    let mut cells = line.split('\t');
    let symbol = mode.normalize(cells.next().unwrap_or_default().trim());
    let cells: Vec<&str> = cells.collect();
    if cells.len() != width {
        return Err(ModelError::RowWidth {
            symbol,
            found: cells.len(),
            expected: width,
        });
    }

    let mut values = Vec::with_capacity(width);
    for cell in cells {
        let cell = cell.trim();
        let value = match cell {
            "" => empty,
            "+" => 1.0,
            "-" => -1.0,
            number => number.parse::<f64>().map_err(|_| ModelError::Value {
                symbol: symbol.clone(),
                value: number.to_string(),
            })?,
        };
        values.push(value);
    }
    Ok((symbol, values))
}
