use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};
use thompson_nfa::{StateId, Transitions, NFA};

/// Decides whether `nfa` accepts all of `haystack` by tracking the set of
/// live states.
pub fn is_match(nfa: &NFA, haystack: &str) -> bool {
    let mut current = epsilon_closure(nfa, vec![nfa.start()]);
    for ch in haystack.chars() {
        let moved = current
            .iter()
            .filter_map(|&id| nfa.state(id).transitions().next(ch))
            .collect();
        current = epsilon_closure(nfa, moved);
        if current.is_empty() {
            return false;
        }
    }
    current.iter().any(|&id| nfa.is_accepting(id))
}

fn epsilon_closure(nfa: &NFA, mut stack: Vec<StateId>) -> BTreeSet<StateId> {
    let mut closure = BTreeSet::new();
    while let Some(id) = stack.pop() {
        if closure.insert(id) {
            stack.extend_from_slice(nfa.state(id).transitions().epsilons());
        }
    }
    closure
}

/// Panics unless every reachable state obeys the Thompson invariants.
pub fn assert_well_formed(nfa: &NFA) {
    for id in nfa.reachable() {
        let state = nfa.state(id);
        match *state.transitions() {
            Transitions::None => assert_eq!(id, nfa.end(), "dead end at {}", id),
            Transitions::Symbol(ref map) => assert!(!map.is_empty()),
            Transitions::Epsilon(ref targets) => {
                assert!((1..=2).contains(&targets.len()), "{:?}", nfa)
            }
        }
        assert_eq!(state.is_accepting(), id == nfa.end(), "{:?}", nfa);
    }
}

/// Converts an infix expression with explicit `.` markers to postfix using
/// the shunting-yard algorithm.
pub fn to_postfix(infix: &str) -> String {
    fn precedence(op: char) -> u8 {
        match op {
            '.' => 2,
            '|' => 1,
            _ => 0,
        }
    }

    let mut output = String::new();
    let mut operators: Vec<char> = vec![];
    for ch in infix.chars() {
        match ch {
            '(' => operators.push(ch),
            ')' => {
                while let Some(op) = operators.pop() {
                    if op == '(' {
                        break;
                    }
                    output.push(op);
                }
            }
            '*' => output.push(ch),
            '.' | '|' => {
                while let Some(&top) = operators.last() {
                    if top == '(' || precedence(top) < precedence(ch) {
                        break;
                    }
                    output.push(top);
                    operators.pop();
                }
                operators.push(ch);
            }
            _ => output.push(ch),
        }
    }
    while let Some(op) = operators.pop() {
        output.push(op);
    }
    output
}

/// A regular expression over a tiny alphabet, for generating test inputs.
#[derive(Clone, Debug)]
pub enum Regex {
    Symbol(char),
    Concat(Box<Regex>, Box<Regex>),
    Union(Box<Regex>, Box<Regex>),
    Star(Box<Regex>),
}

const ALPHABET: &[char] = &['a', 'b', 'c'];

impl Regex {
    pub fn postfix(&self) -> String {
        match *self {
            Regex::Symbol(ch) => ch.to_string(),
            Regex::Concat(ref l, ref r) => format!("{}{}.", l.postfix(), r.postfix()),
            Regex::Union(ref l, ref r) => format!("{}{}|", l.postfix(), r.postfix()),
            Regex::Star(ref r) => format!("{}*", r.postfix()),
        }
    }

    /// Fully parenthesized infix form without concatenation markers.
    pub fn infix(&self) -> String {
        match *self {
            Regex::Symbol(ch) => ch.to_string(),
            Regex::Concat(ref l, ref r) => format!("({})({})", l.infix(), r.infix()),
            Regex::Union(ref l, ref r) => format!("({}|{})", l.infix(), r.infix()),
            Regex::Star(ref r) => format!("({})*", r.infix()),
        }
    }

    /// The same language as an anchored regex-automata pattern.
    pub fn oracle(&self) -> regex_automata::meta::Regex {
        let pattern = format!("^(?:{})$", self.infix());
        regex_automata::meta::Regex::new(&pattern).unwrap()
    }

    fn generate(g: &mut Gen, depth: usize) -> Regex {
        let symbol = Regex::Symbol(*g.choose(ALPHABET).unwrap());
        if depth == 0 {
            return symbol;
        }
        match *g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => symbol,
            1 => Regex::Concat(
                Box::new(Regex::generate(g, depth - 1)),
                Box::new(Regex::generate(g, depth - 1)),
            ),
            2 => Regex::Union(
                Box::new(Regex::generate(g, depth - 1)),
                Box::new(Regex::generate(g, depth - 1)),
            ),
            _ => Regex::Star(Box::new(Regex::generate(g, depth - 1))),
        }
    }
}

impl Arbitrary for Regex {
    fn arbitrary(g: &mut Gen) -> Regex {
        Regex::generate(g, 4)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Regex>> {
        match *self {
            Regex::Symbol(_) => quickcheck::empty_shrinker(),
            Regex::Concat(ref l, ref r) | Regex::Union(ref l, ref r) => {
                Box::new(vec![(**l).clone(), (**r).clone()].into_iter())
            }
            Regex::Star(ref r) => quickcheck::single_shrinker((**r).clone()),
        }
    }
}

/// A short string over the same alphabet as `Regex`.
#[derive(Clone, Debug)]
pub struct Haystack(pub String);

impl Arbitrary for Haystack {
    fn arbitrary(g: &mut Gen) -> Haystack {
        let len = usize::arbitrary(g) % 8;
        Haystack((0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Haystack>> {
        Box::new(self.0.shrink().map(Haystack))
    }
}

#[test]
fn shunting_yard() {
    assert_eq!(to_postfix("a.b"), "ab.");
    assert_eq!(to_postfix("a|b.c"), "abc.|");
    assert_eq!(to_postfix("(a|b).c"), "ab|c.");
    assert_eq!(to_postfix("(a.b)*"), "ab.*");
    assert_eq!(to_postfix("a|b|c"), "ab|c|");
}
