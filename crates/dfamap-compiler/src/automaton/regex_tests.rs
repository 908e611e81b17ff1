use super::{Automaton, RegexAutomaton, RegexOptions, SourceError};

fn walk<A: Automaton>(automaton: &A, input: &[u8]) -> Option<A::State> {
    let mut state = automaton.start_state();
    for &byte in input {
        state = automaton
            .transitions_of(state)
            .into_iter()
            .find(|&(symbol, _)| symbol == byte)
            .map(|(_, next)| next)?;
    }
    Some(state)
}

#[test]
fn accepts_alternatives() {
    let re = RegexAutomaton::new("(dog)|(cat)").unwrap();

    let dog = walk(&re, b"dog").unwrap();
    let cat = walk(&re, b"cat").unwrap();
    assert!(re.is_accepting(dog));
    assert!(re.is_accepting(cat));
    assert!(!re.is_accepting(re.start_state()));
}

#[test]
fn prefixes_are_not_accepting() {
    let re = RegexAutomaton::new("(dog)|(cat)").unwrap();

    let d = walk(&re, b"d").unwrap();
    let d_o = walk(&re, b"do").unwrap();
    assert!(!re.is_accepting(d));
    assert!(!re.is_accepting(d_o));
}

#[test]
fn missing_transitions_mean_no_match() {
    let re = RegexAutomaton::new("(dog)|(cat)").unwrap();

    assert!(walk(&re, b"dot").is_none());
    assert!(walk(&re, b"x").is_none());
    assert!(walk(&re, b"dogs").is_none());
}

#[test]
fn start_state_symbols() {
    let re = RegexAutomaton::new("(dog)|(cat)").unwrap();

    let symbols: Vec<u8> = re
        .transitions_of(re.start_state())
        .into_iter()
        .map(|(symbol, _)| symbol)
        .collect();
    assert_eq!(symbols, vec![b'c', b'd']);
}

#[test]
fn transitions_are_deterministic() {
    let re = RegexAutomaton::new("a+b*").unwrap();

    let a = walk(&re, b"a").unwrap();
    let transitions = re.transitions_of(a);
    let mut symbols: Vec<u8> = transitions.iter().map(|&(s, _)| s).collect();
    symbols.dedup();
    assert_eq!(symbols.len(), transitions.len());
    assert!(re.is_accepting(a));
    assert!(re.is_accepting(walk(&re, b"aaabb").unwrap()));
}

#[test]
fn unminimized_walks_the_same() {
    let options = RegexOptions {
        anchored: true,
        minimize: false,
    };
    let re = RegexAutomaton::with_options("(dog)|(cat)", options).unwrap();

    assert!(re.is_accepting(walk(&re, b"dog").unwrap()));
    assert!(walk(&re, b"dot").is_none());
}

#[test]
fn unanchored_start_consumes_any_byte() {
    let options = RegexOptions {
        anchored: false,
        minimize: true,
    };
    let re = RegexAutomaton::with_options("dog", options).unwrap();

    assert_eq!(re.transitions_of(re.start_state()).len(), 256);
    assert!(re.is_accepting(walk(&re, b"hotdog").unwrap()));
}

#[test]
fn keeps_pattern_text() {
    let re = RegexAutomaton::new("ab|cd").unwrap();
    assert_eq!(re.pattern(), "ab|cd");
}

#[test]
fn default_options() {
    let options = RegexOptions::default();
    assert!(options.anchored);
    assert!(options.minimize);
}

#[test]
fn invalid_pattern() {
    let err = RegexAutomaton::new("(").unwrap_err();
    assert!(matches!(err, SourceError::Regex { ref pattern, .. } if pattern == "("));
    assert!(err.to_string().starts_with("failed to compile pattern `(`: "));
}

#[test]
fn describe_names_the_dfa_state() {
    let re = RegexAutomaton::new("dog").unwrap();
    let start = re.start_state();

    assert_eq!(re.describe(start), format!("dfa state {}", start.as_usize()));
}
