//! Tests for sequences built through a factory

use rstest::rstest;
use soundchange::{FeatureModel, FormatterMode, SequenceFactory, VariableStore};

use crate::helpers::fixtures::{MODEL, empty_factory, feature_factory};

#[test]
fn test_model_symbols_segment_whole() {
    let factory = feature_factory();
    let word = factory.sequence("tsatʰa");
    let symbols: Vec<&str> = word.iter().map(|s| s.symbol()).collect();
    assert_eq!(symbols, vec!["ts", "a", "tʰ", "a"]);
}

#[test]
fn test_diacritics_overlay_features() {
    let factory = feature_factory();
    let aspirated = factory.segment("tʰ").unwrap();
    let plain = MODEL.value("t").unwrap();
    assert_eq!(aspirated.features()[9], 1.0);
    assert_eq!(&aspirated.features()[..7], &plain[..7]);
}

#[test]
fn test_feature_matching_in_sequences() {
    let factory = feature_factory();
    let word = factory.sequence("apatʰa");
    let spec = MODEL.parse_spec("[+asp]").unwrap();
    let pattern = FeatureModel::underspecified(&MODEL, &spec);
    assert_eq!(word.index_of_segment(&pattern), Some(3));
    assert!(!word.contains(&factory.sequence("ta")));
    assert!(word.contains(&factory.sequence("pa")));
}

#[rstest]
#[case("ababab", "ab", vec![0, 2, 4])]
#[case("pʰapʰ", "pʰ", vec![0, 2])]
#[case("pʰap", "p", vec![2])]
fn test_indices_of(#[case] word: &str, #[case] pattern: &str, #[case] expected: Vec<usize>) {
    let factory = empty_factory(&[]);
    let word = factory.sequence(word);
    assert_eq!(word.indices_of(&factory.sequence(pattern)), expected);
}

#[test]
fn test_replace_all_with_factory_sequences() {
    let factory = empty_factory(&[]);
    let mut word = factory.sequence("h₁eh₁");
    word.replace_all(&factory.sequence("h₁"), &factory.sequence("ʔ"));
    assert_eq!(word, factory.sequence("ʔeʔ"));
}

#[test]
fn test_variables_in_factory() {
    let factory = empty_factory(&["C = p t k", "V = a i", "CV = C V"]);
    assert_eq!(factory.variable("CV").unwrap().len(), 5);
    assert!(factory.has_variable("C"));
    assert!(!factory.has_variable("N"));
    assert_eq!(factory.tokens("CVa"), vec!["CV", "a"]);
}

#[test]
fn test_none_mode_keeps_text() {
    let factory = SequenceFactory::new(FeatureModel::empty(), VariableStore::new(), FormatterMode::None);
    let word = factory.sequence("pʰá");
    assert_eq!(word.len(), 3);
    assert_eq!(word.to_string(), "pʰá");
}
