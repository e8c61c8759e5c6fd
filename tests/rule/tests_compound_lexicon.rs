//! Tests for compound rules and lexicons

use soundchange::{CompoundRule, Lexicon, Rule, SoundChange};

use crate::helpers::fixtures::empty_factory;

#[test]
fn test_compound_interleaves_by_position() {
    let factory = empty_factory(&[]);
    let compound = CompoundRule::parse("b > c\na > b / _c", &factory).unwrap();
    assert_eq!(compound.len(), 2);

    let word = factory.sequence("ab");
    assert_eq!(compound.apply(&word).to_string(), "ac");

    let sequential = compound
        .rules()
        .iter()
        .fold(word, |word, rule| rule.apply(&word));
    assert_eq!(sequential.to_string(), "bc");
}

#[test]
fn test_compound_later_rule_sees_earlier_output() {
    let factory = empty_factory(&[]);
    let compound = CompoundRule::new(vec![
        Rule::new("p > f", &factory).unwrap(),
        Rule::new("f > h / #_", &factory).unwrap(),
    ]);
    assert_eq!(compound.apply(&factory.sequence("papa")).to_string(), "hafa");
}

#[test]
fn test_compound_skips_blank_lines_and_displays_rules() {
    let factory = empty_factory(&[]);
    let compound = CompoundRule::parse("\n  a > e  \n\nk > g\n", &factory).unwrap();
    assert_eq!(compound.to_string(), "a > e\nk > g");
    assert!(!compound.is_empty());
}

#[test]
fn test_compound_reports_first_bad_line() {
    let factory = empty_factory(&[]);
    let err = CompoundRule::parse("a > e\nk g", &factory).unwrap_err();
    assert_eq!(err.code, soundchange::ErrorCode::E0501);
}

#[test]
fn test_lexicon_parse_and_apply() {
    let factory = empty_factory(&[]);
    let mut lexicon = Lexicon::parse("proto", "pata\tkata\n\nbaka\n", &factory);
    assert_eq!(lexicon.name(), "proto");
    assert_eq!(lexicon.len(), 2);
    assert_eq!(lexicon.words().count(), 3);

    let rule = Rule::new("a > e", &factory).unwrap();
    lexicon.apply(&rule);
    assert_eq!(lexicon.to_string(), "pete\tkete\nbeke");
}

#[test]
fn test_lexicon_apply_all_keeps_order() {
    let factory = empty_factory(&[]);
    let forward = vec![
        Rule::new("p > f", &factory).unwrap(),
        Rule::new("f > h", &factory).unwrap(),
    ];
    let mut lexicon = Lexicon::parse("words", "pata", &factory);
    lexicon.apply_all(&forward);
    assert_eq!(lexicon.to_string(), "hata");

    let backward: Vec<Rule> = forward.into_iter().rev().collect();
    let mut lexicon = Lexicon::parse("words", "pata", &factory);
    lexicon.apply_all(&backward);
    assert_eq!(lexicon.to_string(), "fata");
}

#[test]
fn test_lexicon_accepts_compound_rules() {
    let factory = empty_factory(&["V = a e"]);
    let compound = CompoundRule::parse("t > d / V_V\nd > ð / V_V", &factory).unwrap();
    let mut lexicon = Lexicon::new("words");
    lexicon.push_row(vec![factory.sequence("ata"), factory.sequence("ada")]);
    lexicon.apply(&compound);
    assert_eq!(lexicon.to_string(), "aða\taða");
}
