//! Feature model and factory fixtures.

use std::sync::Arc;

use once_cell::sync::Lazy;
use soundchange::{FeatureModel, FormatterMode, SequenceFactory, VariableStore};

/// Eleven binary features, sixteen symbols, three modifiers.
///
/// Columns: con son cnt voi lab cor dor hgh rel asp lng. A `.` cell is left empty.
const SYMBOLS: &[(&str, &str)] = &[
    ("p", "+ - - - + - - . - - -"),
    ("b", "+ - - + + - - . - - -"),
    ("t", "+ - - - - + - . - - -"),
    ("d", "+ - - + - + - . - - -"),
    ("k", "+ - - - - - + + - - -"),
    ("g", "+ - - + - - + + - - -"),
    ("ts", "+ - - - - + - . + - -"),
    ("s", "+ - + - - + - . + - -"),
    ("z", "+ - + + - + - . + - -"),
    ("m", "+ + - + + - - . - - -"),
    ("n", "+ + - + - + - . - - -"),
    ("r", "+ + + + - + - . - - -"),
    ("i", "- + + + - - - + - - -"),
    ("e", "- + + + - - - - - - -"),
    ("a", "- + + + - - + - - - -"),
    ("u", "- + + + + - + + - - -"),
];

const MODIFIERS: &[(&str, &str)] = &[
    ("ʰ", ". . . . . . . . . + ."),
    ("ː", ". . . . . . . . . . +"),
    ("ʷ", ". . . . + . . . . . ."),
];

const FEATURES: &str = "\
FEATURES
consonantal con binary
sonorant    son binary
continuant  cnt binary
voice       voi binary
labial      lab binary
coronal     cor binary
dorsal      dor binary
high        hgh binary
release     rel binary
aspirated   asp binary
long        lng binary
";

fn row(symbol: &str, cells: &str) -> String {
    let cells: Vec<&str> = cells
        .split(' ')
        .map(|c| if c == "." { "" } else { c })
        .collect();
    format!("{symbol}\t{}", cells.join("\t"))
}

/// The model in its text form
pub fn model_text() -> String {
    let mut text = String::from("% consonants and vowels for tests\n");
    text.push_str(FEATURES);
    text.push_str("\nSYMBOLS\n");
    for (symbol, cells) in SYMBOLS {
        text.push_str(&row(symbol, cells));
        text.push('\n');
    }
    text.push_str("\nMODIFIERS\n");
    for (symbol, cells) in MODIFIERS {
        text.push_str(&row(symbol, cells));
        text.push('\n');
    }
    text
}

pub static MODEL: Lazy<Arc<FeatureModel>> =
    Lazy::new(|| FeatureModel::parse(&model_text(), FormatterMode::Intelligent).unwrap());

/// A factory over [`MODEL`] with no variables
pub fn feature_factory() -> SequenceFactory {
    SequenceFactory::new(Arc::clone(&MODEL), VariableStore::new(), FormatterMode::Intelligent)
}

/// A factory over the empty model with the given declarations
pub fn empty_factory(declarations: &[&str]) -> SequenceFactory {
    let mut variables = VariableStore::new();
    for declaration in declarations {
        variables.add(declaration).unwrap();
    }
    SequenceFactory::new(FeatureModel::empty(), variables, FormatterMode::Intelligent)
}
