use std::collections::BTreeMap;

use crate::nfa::{Fragment, State, StateId, Transitions, NFA};

/// A mutable arena of states from which Thompson fragments are assembled.
///
/// Fragments refer to states by ID, so composing fragments only ever adds
/// edges between existing states or allocates fresh wrapper states. Nothing
/// is copied and nothing is freed until the whole arena is dropped.
///
/// The three state primitives panic when used in a way Thompson's
/// construction never needs: an epsilon edge out of a symbol state (or the
/// reverse), a third epsilon edge, or a second edge for the same symbol. Such
/// a panic always indicates a bug in the caller.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    states: Vec<State>,
}

impl Builder {
    /// Create a new builder with an empty arena.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// The number of states allocated so far.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state with the given ID.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// Allocate a new state without any outgoing edges.
    pub fn create_state(&mut self, accepting: bool) -> StateId {
        let id = self.states.len();
        self.states.push(State::new(accepting));
        id
    }

    /// Add an unlabeled edge from `from` to `to`.
    pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) {
        let state = &mut self.states[from];
        match state.transitions {
            Transitions::None => {
                state.transitions = Transitions::Epsilon(vec![to]);
            }
            Transitions::Epsilon(ref mut targets) => {
                assert!(
                    targets.len() < 2,
                    "state {} already has two epsilon transitions",
                    from,
                );
                targets.push(to);
            }
            Transitions::Symbol(_) => panic!(
                "state {} has symbol transitions, cannot add an epsilon transition",
                from,
            ),
        }
    }

    /// Add an edge from `from` to `to` labeled with `symbol`.
    pub fn add_transition(&mut self, from: StateId, to: StateId, symbol: char) {
        let state = &mut self.states[from];
        match state.transitions {
            Transitions::None => {
                state.transitions = Transitions::Symbol(BTreeMap::from([(symbol, to)]));
            }
            Transitions::Symbol(ref mut map) => {
                assert!(
                    !map.contains_key(&symbol),
                    "state {} already has a transition on {:?}",
                    from,
                    symbol,
                );
                map.insert(symbol, to);
            }
            Transitions::Epsilon(_) => panic!(
                "state {} has epsilon transitions, cannot add a transition on {:?}",
                from, symbol,
            ),
        }
    }

    /// Build a fragment that recognizes only the empty string.
    pub fn from_epsilon(&mut self) -> Fragment {
        let start = self.create_state(false);
        let end = self.create_state(true);
        self.add_epsilon_transition(start, end);
        Fragment { start, end }
    }

    /// Build a fragment that recognizes only the one character string
    /// `symbol`. Operator characters are not special here.
    pub fn from_symbol(&mut self, symbol: char) -> Fragment {
        let start = self.create_state(false);
        let end = self.create_state(true);
        self.add_transition(start, end, symbol);
        Fragment { start, end }
    }

    /// Build a fragment recognizing `first` followed by `second`.
    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.add_epsilon_transition(first.end, second.start);
        self.states[first.end].accepting = false;
        Fragment { start: first.start, end: second.end }
    }

    /// Build a fragment recognizing either `first` or `second`.
    ///
    /// The entry state prefers `first`. This only matters to simulators that
    /// explore edges in priority order.
    pub fn union(&mut self, first: Fragment, second: Fragment) -> Fragment {
        let start = self.create_state(false);
        self.add_epsilon_transition(start, first.start);
        self.add_epsilon_transition(start, second.start);

        let end = self.create_state(true);
        self.add_epsilon_transition(first.end, end);
        self.states[first.end].accepting = false;
        self.add_epsilon_transition(second.end, end);
        self.states[second.end].accepting = false;

        Fragment { start, end }
    }

    /// Build a fragment recognizing zero or more repetitions of `first`.
    pub fn closure(&mut self, first: Fragment) -> Fragment {
        let start = self.create_state(false);
        let end = self.create_state(true);

        // Edge order: skip, enter, exit, loop.
        self.add_epsilon_transition(start, end);
        self.add_epsilon_transition(start, first.start);
        self.add_epsilon_transition(first.end, end);
        self.add_epsilon_transition(first.end, first.start);
        self.states[first.end].accepting = false;

        Fragment { start, end }
    }

    /// Freeze the arena into an NFA whose entry and exit are those of
    /// `fragment`.
    ///
    /// States not reachable from `fragment` stay in the arena but play no
    /// part in the automaton.
    pub fn finish(self, fragment: Fragment) -> NFA {
        let nfa = NFA::new(self.states, fragment.start, fragment.end);
        debug_assert!(nfa.is_well_formed(), "malformed Thompson NFA: {:?}", nfa);
        nfa
    }
}
