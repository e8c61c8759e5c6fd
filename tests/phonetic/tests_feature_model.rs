//! Tests for feature models, bracket specs and best-symbol search

use std::io::Write;
use std::sync::Arc;

use rstest::rstest;
use soundchange::phonetic::{FeatureType, difference};
use soundchange::{ErrorCode, FeatureModel, FormatterMode, ModelError};

use crate::helpers::fixtures::{MODEL, feature_factory, model_text};

#[test]
fn test_model_shape() {
    assert_eq!(MODEL.feature_count(), 11);
    assert_eq!(MODEL.symbols().count(), 16);
    assert_eq!(MODEL.diacritics().count(), 3);
    assert_eq!(MODEL.feature_index("voice"), Some(3));
    assert_eq!(MODEL.feature_index("voi"), Some(3));
    assert_eq!(MODEL.features()[0].kind, FeatureType::Binary);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(model_text().as_bytes()).unwrap();

    let loaded = FeatureModel::load(file.path(), FormatterMode::Intelligent).unwrap();
    assert_eq!(*loaded, **MODEL);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = FeatureModel::load(dir.path().join("absent.model"), FormatterMode::None).unwrap_err();
    assert!(matches!(err, ModelError::Io(_)));
}

#[rstest]
#[case(1.0, 1.0, 0.0)]
#[case(1.0, -1.0, 2.0)]
#[case(f64::NAN, f64::NAN, 0.0)]
#[case(f64::NAN, -1.0, -1.0)]
#[case(3.0, f64::NAN, 3.0)]
fn test_difference(#[case] a: f64, #[case] b: f64, #[case] expected: f64) {
    assert_eq!(difference(a, b), expected);
}

#[rstest]
#[case("p")]
#[case("g")]
#[case("ts")]
#[case("r")]
#[case("u")]
fn test_best_symbol_round_trips(#[case] symbol: &str) {
    let features = MODEL.value(symbol).unwrap();
    assert_eq!(MODEL.best_symbol(features), symbol);
}

#[rstest]
#[case("gʰ", "gʰ")]
#[case("pʰ", "pʰ")]
#[case("aː", "aː")]
#[case("kʷʰ", "kʰʷ")]
#[case("kːʷʰ", "kʰːʷ")]
fn test_best_symbol_with_diacritics(#[case] text: &str, #[case] expected: &str) {
    let segment = feature_factory().segment(text).unwrap();
    assert_eq!(MODEL.best_symbol(segment.features()), expected);
}

#[test]
fn test_best_symbol_approximates() {
    // t with coronal swapped for dorsal, high left open
    let mut features = MODEL.value("t").unwrap().to_vec();
    features[5] = -1.0;
    features[6] = 1.0;
    assert_eq!(MODEL.best_symbol(&features), "k");
}

#[test]
fn test_best_symbol_of_empty_model() {
    assert_eq!(FeatureModel::empty().best_symbol(&[]), "");
}

#[test]
fn test_unknown_symbol_is_wildcard() {
    let x = feature_factory().segment("x").unwrap();
    assert!(x.features().iter().all(|v| v.is_nan()));
    let p = feature_factory().segment("p").unwrap();
    assert!(p.matches(&x));
    assert!(!x.matches(&p));
}

#[rstest]
#[case("[+con, -son, -cnt]", &["p", "b", "t", "d", "k", "g", "ts"])]
#[case("[+voi, -son]", &["b", "d", "g", "z"])]
#[case("[-con, +hgh]", &["i", "u"])]
#[case("[labial, -con]", &["u"])]
fn test_matching_symbols(#[case] spec: &str, #[case] expected: &[&str]) {
    let spec = MODEL.parse_spec(spec).unwrap();
    let pattern = FeatureModel::underspecified(&MODEL, &spec);
    assert_eq!(MODEL.matching_symbols(&pattern), expected);
}

#[rstest]
#[case("[+foo]", ErrorCode::E0301)]
#[case("[hgh:2]", ErrorCode::E0302)]
#[case("[+con,,-son]", ErrorCode::E0303)]
#[case("[hgh:high]", ErrorCode::E0303)]
#[case("+con", ErrorCode::E0303)]
fn test_spec_errors(#[case] text: &str, #[case] code: ErrorCode) {
    assert_eq!(MODEL.parse_spec(text).unwrap_err().code, code);
}

#[test]
fn test_relational_spec() {
    let spec = MODEL.parse_spec("[hgh>0, con=1]").unwrap();
    assert!(spec.is_relational());
    let factory = feature_factory();
    assert!(spec.matches(&factory.segment("k").unwrap()));
    assert!(!spec.matches(&factory.segment("t").unwrap()));
    assert!(!spec.matches(&factory.segment("i").unwrap()));
}

#[test]
fn test_numeric_feature_range() {
    let model: Arc<FeatureModel> = FeatureModel::builder()
        .feature("height", Some("hgt"), FeatureType::Numeric { min: 0.0, max: 3.0 })
        .symbol("a", vec![0.0])
        .symbol("i", vec![3.0])
        .build();
    assert!(model.parse_spec("[hgt:2.5]").is_ok());
    assert_eq!(model.parse_spec("[hgt:4]").unwrap_err().code, ErrorCode::E0302);
    assert!(model.parse_spec("[hgt<4]").is_ok());
}

#[test]
#[should_panic(expected = "row for 'b' has 1 values, expected 2")]
fn test_builder_rejects_short_symbol() {
    let _ = FeatureModel::builder()
        .feature("con", None, FeatureType::Binary)
        .feature("voi", None, FeatureType::Binary)
        .symbol("p", vec![1.0, -1.0])
        .symbol("b", vec![1.0]);
}

#[test]
#[should_panic(expected = "row for 'ʰ' has 3 values, expected 2")]
fn test_builder_rejects_long_diacritic() {
    let _ = FeatureModel::builder()
        .feature("con", None, FeatureType::Binary)
        .feature("asp", None, FeatureType::Binary)
        .diacritic("ʰ", vec![f64::NEG_INFINITY, 1.0, 1.0]);
}

#[test]
#[should_panic(expected = "feature 'voi' added after symbols or diacritics")]
fn test_builder_rejects_feature_after_symbols() {
    let _ = FeatureModel::builder()
        .feature("con", None, FeatureType::Binary)
        .symbol("p", vec![1.0])
        .feature("voi", None, FeatureType::Binary);
}

#[test]
fn test_loader_rejects_features_after_symbols() {
    let text = "FEATURES\ncon binary\nSYMBOLS\np\t+\nFEATURES\nvoi binary\nSYMBOLS\nb\t+\t+\n";
    let err = FeatureModel::parse(text, FormatterMode::None).unwrap_err();
    assert!(matches!(err, ModelError::LateFeature { line: 6, .. }), "{err}");
}
