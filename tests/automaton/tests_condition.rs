//! Tests for conditions: each case is (condition, word, index, expected)

use once_cell::sync::Lazy;
use rstest::rstest;
use soundchange::{Condition, ErrorCode, SequenceFactory};

use crate::helpers::fixtures::empty_factory;

static FACTORY: Lazy<SequenceFactory> = Lazy::new(|| {
    empty_factory(&[
        "C = p t k b d g pʰ tʰ kʰ",
        "V = ai o",
    ])
});

fn check(condition: &str, word: &str, index: usize) -> bool {
    let condition = Condition::new(condition, &FACTORY).unwrap();
    condition.is_match_at(&FACTORY.sequence(word), index)
}

#[rstest]
#[case("_a+b", "xab", true)]
#[case("_a+b", "xaab", true)]
#[case("_a+b", "xaaab", true)]
#[case("_a+b", "xb", false)]
#[case("_a+b", "xaa", false)]
#[case("_a+b", "xcb", false)]
#[case("_(ab)*(cd)(ef)", "xabcdef", true)]
#[case("_(ab)*(cd)(ef)", "xababcdef", true)]
#[case("_(ab)*(cd)(ef)", "xcdef", true)]
#[case("_(ab)*(cd)(ef)", "xabef", false)]
#[case("_(ab)*(cd)(ef)", "xabcd", false)]
#[case("_(ab)*(cd)(ef)", "xabbcdef", false)]
#[case("_(ab)*(cd)(ef)", "xacdef", false)]
#[case("_a?(b?c?)d?b", "xb", true)]
#[case("_a?(b?c?)d?b", "xab", true)]
#[case("_a?(b?c?)d?b", "xabcdb", true)]
#[case("_a?(b?c?)d?b", "xdb", true)]
#[case("_a?(b?c?)d?b", "xacb", true)]
#[case("_a?(b?c?)d?b", "xd", false)]
#[case("_a?(b?c?)d?b", "x", false)]
#[case("_a(l(hamb)?ra)?#", "xa", true)]
#[case("_a(l(hamb)?ra)?#", "xalra", true)]
#[case("_a(l(hamb)?ra)?#", "xalhambra", true)]
#[case("_a(l(hamb)?ra)?#", "xal", false)]
#[case("_a(l(hamb)?ra)?#", "xalham", false)]
#[case("_a(l(hamb)?ra)?#", "xalhambr", false)]
#[case("_d(eo*)*b", "xdb", true)]
#[case("_d(eo*)*b", "xdeb", true)]
#[case("_d(eo*)*b", "xdeoeoob", true)]
#[case("_d(eo*)*b", "xdoob", false)]
#[case("_(ab)*#", "x", true)]
#[case("_(ab)*#", "xab", true)]
#[case("_(ab)*#", "xabab", true)]
#[case("_(ab)*#", "xa", false)]
#[case("_(ab)*#", "xaba", false)]
#[case("_(a+l(ham+b)+ra)*", "xaalhammbra", true)]
#[case("_(a+l(ham+b)+ra)*", "x", true)]
#[case("_c+#", "xccc", true)]
#[case("_c+#", "xcca", false)]
fn test_post_conditions(#[case] condition: &str, #[case] word: &str, #[case] expected: bool) {
    assert_eq!(check(condition, word, 0), expected, "{condition} on {word}");
}

#[rstest]
#[case("_{a b c}ds", "xads", true)]
#[case("_{a b c}ds", "xbds", true)]
#[case("_{a b c}ds", "xcds", true)]
#[case("_{a b c}ds", "xds", false)]
#[case("_{a b c}ds", "xeds", false)]
#[case("_{ab cd ef}tr", "xabtr", true)]
#[case("_{ab cd ef}tr", "xcdtr", true)]
#[case("_{ab cd ef}tr", "xeftr", true)]
#[case("_{ab cd ef}tr", "xabcdtr", false)]
#[case("_{ab cd ef}tr", "xtr", false)]
#[case("_{ab* cd+ ef}tr", "xatr", true)]
#[case("_{ab* cd+ ef}tr", "xabbtr", true)]
#[case("_{ab* cd+ ef}tr", "xcddtr", true)]
#[case("_{ab* cd+ ef}tr", "xeftr", true)]
#[case("_{ab* cd+ ef}tr", "xctr", false)]
#[case("_{ab* cd+ ef}tr", "xebtr", false)]
#[case("_{ab* (cd?)+ ((ae)*f)+}tr", "xabbtr", true)]
#[case("_{ab* (cd?)+ ((ae)*f)+}tr", "xcctr", true)]
#[case("_{ab* (cd?)+ ((ae)*f)+}tr", "xcdcdtr", true)]
#[case("_{ab* (cd?)+ ((ae)*f)+}tr", "xftr", true)]
#[case("_{ab* (cd?)+ ((ae)*f)+}tr", "xaefftr", true)]
#[case("_{ab* (cd?)+ ((ae)*f)+}tr", "xaetr", false)]
#[case("_{ab {cd xy} ef}tr", "xabtr", true)]
#[case("_{ab {cd xy} ef}tr", "xcdtr", true)]
#[case("_{ab {cd xy} ef}tr", "xxytr", true)]
#[case("_{ab {cd xy} ef}tr", "xeftr", true)]
#[case("_{ab {cd xy} ef}tr", "xcytr", false)]
#[case("_{ x ɣ }", "pxi", true)]
#[case("_{ x ɣ }", "pɣi", true)]
#[case("_{ x ɣ }", "paxi", false)]
fn test_sets(#[case] condition: &str, #[case] word: &str, #[case] expected: bool) {
    assert_eq!(check(condition, word, 0), expected, "{condition} on {word}");
}

#[rstest]
#[case("pʰāḱʰus", true)]
#[case("pʰrāinkʰus", true)]
#[case("pʰāus", false)]
#[case("pʰɛḱʰus", false)]
fn test_complex_set_chain(#[case] word: &str, #[case] expected: bool) {
    let condition = "_{r l}?{a e o ā ē ō}{i u}?{n m l r}?{pʰ tʰ kʰ ḱʰ}";
    assert_eq!(check(condition, word, 0), expected);
}

#[rstest]
#[case("_c+#", "abaccc", 2, true)]
#[case("_#", "abad", 3, true)]
#[case("_#", "abad", 2, false)]
#[case("_C+#", "abaptk", 2, true)]
#[case("_C+#", "abaptk", 3, true)]
#[case("_C+#", "abatʰkʰ", 0, false)]
#[case("_C+#", "abatʰkʰ", 1, false)]
#[case("_C+#", "abatʰkʰ", 2, true)]
fn test_indexed_matches(#[case] condition: &str, #[case] word: &str, #[case] index: usize, #[case] expected: bool) {
    assert_eq!(check(condition, word, index), expected);
}

#[rstest]
#[case("_!a#", "zb", true)]
#[case("_!a#", "za", false)]
#[case("_!(abc)#", "zabc", false)]
#[case("_!(abc)#", "zxyz", true)]
#[case("_!{a b c}#", "za", false)]
#[case("_!{a b c}#", "zb", false)]
#[case("_!{a b c}#", "zc", false)]
#[case("_!{a b c}#", "zx", true)]
fn test_negation(#[case] condition: &str, #[case] word: &str, #[case] expected: bool) {
    assert_eq!(check(condition, word, 0), expected);
}

#[rstest]
#[case("a_", "ab", 1, true)]
#[case("a_", "bb", 1, false)]
#[case("#_", "ab", 0, true)]
#[case("#_", "ab", 1, false)]
#[case("(ab)+_", "ababx", 4, true)]
#[case("(ab)+_", "bx", 1, false)]
#[case("ab_", "abx", 2, true)]
#[case("ab_", "bax", 2, false)]
#[case("C_", "tʰa", 1, true)]
#[case("V_", "aix", 2, true)]
#[case("V_", "oix", 2, false)]
#[case("V_", "ox", 1, true)]
#[case("#ab?_", "ax", 1, true)]
fn test_pre_conditions(#[case] condition: &str, #[case] word: &str, #[case] index: usize, #[case] expected: bool) {
    assert_eq!(check(condition, word, index), expected);
}

#[rstest]
#[case("efxabcdef", 2, true)]
#[case("x", 0, true)]
fn test_optional_both_sides(#[case] word: &str, #[case] index: usize, #[case] expected: bool) {
    let condition = "(ab)?(cd)?(ef)?_(ab)?(cd)?(ef)?";
    assert_eq!(check(condition, word, index), expected);
}

#[test]
fn test_span_match() {
    let condition = Condition::new("a_c", &FACTORY).unwrap();
    let word = FACTORY.sequence("abbc");
    assert!(condition.is_match(&word, 1, 3));
    assert!(!condition.is_match(&word, 1, 2));
    assert!(!condition.is_match(&word, 3, 5));
    assert!(!condition.is_match(&word, 3, 2));
}

#[test]
fn test_bare_underscore_always_matches() {
    let condition = Condition::new("_", &FACTORY).unwrap();
    assert!(condition.is_match_at(&FACTORY.sequence("abc"), 1));
    assert!(Condition::unconditional().is_match_at(&FACTORY.sequence("abc"), 2));
}

#[test]
fn test_cleanup_normalises_text() {
    let condition = Condition::new("  a   _ { x  y } ", &FACTORY).unwrap();
    assert_eq!(condition.to_string(), "a _{x y}");
}

#[rstest]
#[case("a_b_c", ErrorCode::E0505)]
#[case("ab", ErrorCode::E0504)]
#[case("", ErrorCode::E0504)]
#[case("_(a", ErrorCode::E0201)]
#[case("{a_", ErrorCode::E0202)]
#[case("_*a", ErrorCode::E0204)]
fn test_condition_errors(#[case] condition: &str, #[case] code: ErrorCode) {
    let err = Condition::new(condition, &FACTORY).unwrap_err();
    assert_eq!(err.code, code);
}
