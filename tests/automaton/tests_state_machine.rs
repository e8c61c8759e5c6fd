//! Tests for compiled machines used directly

use soundchange::automaton::Label;
use soundchange::{ParseDirection, StateMachine};

use crate::helpers::fixtures::{empty_factory, feature_factory};

#[test]
fn test_class_alternatives_all_reachable() {
    let factory = empty_factory(&["V = a ai"]);
    let machine = StateMachine::parse("M", "V", &factory, ParseDirection::Forward).unwrap();
    assert_eq!(machine.match_ends(&factory.sequence("aix"), 0), vec![1, 2]);
}

#[test]
fn test_feature_labels() {
    let factory = feature_factory();
    let machine =
        StateMachine::parse("M", "[+con, -son]+[-con]", &factory, ParseDirection::Forward).unwrap();
    assert_eq!(machine.match_ends(&factory.sequence("ptsai"), 0), vec![3]);
    assert!(!machine.is_match(&factory.sequence("mai"), 0));

    let root = machine.machine(machine.root());
    assert!(matches!(
        root.states[root.start].transitions[0].label,
        Label::Features(_)
    ));
}

#[test]
fn test_backward_machine_reads_reversed_words() {
    let factory = empty_factory(&[]);
    let machine = StateMachine::parse("M", "#abc", &factory, ParseDirection::Backward).unwrap();
    let reversed = factory.sequence("abcx").reversed();
    assert!(machine.is_match(&reversed, 1));
    assert!(!machine.is_match(&reversed, 0));
}

#[test]
fn test_gml_export_covers_all_machines() {
    let factory = empty_factory(&[]);
    let machine =
        StateMachine::parse("post", "{a (bc)*}!d", &factory, ParseDirection::Forward).unwrap();
    let gml = machine.to_gml();
    assert_eq!(gml.matches("node [").count(), machine.state_count());
    assert!(gml.contains("{m1 m2}"));
    assert!(gml.contains("!m4/1"));
}
