use std::collections::BTreeMap;
use std::fmt;

/// A state ID in the NFA. IDs index into the arena that owns the states.
pub type StateId = usize;

/// The outgoing edges of a state.
///
/// A Thompson state either consumes a symbol or follows unlabeled edges, never
/// both, so the two kinds live in separate variants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Transitions {
    /// No outgoing edges. Only the accepting exit of an automaton looks like
    /// this.
    #[default]
    None,
    /// Labeled edges, at most one target per symbol.
    Symbol(BTreeMap<char, StateId>),
    /// Unlabeled edges in priority order. Never more than two.
    Epsilon(Vec<StateId>),
}

impl Transitions {
    /// Returns true if there are no outgoing edges.
    pub fn is_empty(&self) -> bool {
        matches!(*self, Transitions::None)
    }

    /// Returns the target reached by consuming `symbol`, if any.
    pub fn next(&self, symbol: char) -> Option<StateId> {
        match *self {
            Transitions::Symbol(ref map) => map.get(&symbol).copied(),
            _ => None,
        }
    }

    /// Returns the epsilon targets in priority order. Empty for symbol states.
    pub fn epsilons(&self) -> &[StateId] {
        match *self {
            Transitions::Epsilon(ref targets) => targets,
            _ => &[],
        }
    }

    /// Returns every target of this state, labeled or not, in edge order.
    pub fn targets(&self) -> Vec<StateId> {
        match *self {
            Transitions::None => vec![],
            Transitions::Symbol(ref map) => map.values().copied().collect(),
            Transitions::Epsilon(ref targets) => targets.clone(),
        }
    }
}

/// A single state of a Thompson NFA.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct State {
    pub(crate) accepting: bool,
    pub(crate) transitions: Transitions,
}

impl State {
    pub(crate) fn new(accepting: bool) -> State {
        State { accepting, transitions: Transitions::None }
    }

    /// Returns true if this state is a terminal state of its fragment.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// The outgoing edges of this state.
    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transitions {
            Transitions::None if self.accepting => write!(f, "MATCH"),
            Transitions::None => write!(f, "DEAD"),
            Transitions::Symbol(ref map) => {
                for (i, (symbol, target)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?} => {}", symbol, target)?;
                }
                Ok(())
            }
            Transitions::Epsilon(ref targets) => {
                write!(f, "ε => ")?;
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", target)?;
                }
                Ok(())
            }
        }
    }
}

/// A partially built automaton with exactly one entry and one exit.
///
/// Fragments are deliberately neither `Copy` nor `Clone`: composing a fragment
/// into a larger one consumes it, since its exit is no longer accepting
/// afterwards.
#[derive(Debug, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub end: StateId,
}

/// A Thompson NFA with epsilon transitions.
///
/// The automaton has a single entry state and a single accepting exit state.
/// It exposes its graph read-only so that an execution engine can compute
/// epsilon closures and follow symbol transitions.
#[derive(Clone, PartialEq, Eq)]
pub struct NFA {
    states: Vec<State>,
    start: StateId,
    end: StateId,
}

impl NFA {
    pub(crate) fn new(states: Vec<State>, start: StateId, end: StateId) -> NFA {
        NFA { states, start, end }
    }

    /// The entry state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The sole accepting exit state.
    pub fn end(&self) -> StateId {
        self.end
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a state of this NFA.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// All states of the arena, indexed by ID.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The number of states in the arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false for a compiled NFA, which has at least its entry and exit.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_accepting(&self, id: StateId) -> bool {
        self.states[id].accepting
    }

    /// Returns the IDs of every state reachable from the entry state, in
    /// depth first order following edges in priority order.
    pub fn reachable(&self) -> Vec<StateId> {
        let mut seen = vec![false; self.states.len()];
        let mut order = vec![];
        let mut stack = vec![self.start];
        while let Some(id) = stack.pop() {
            if seen[id] {
                continue;
            }
            seen[id] = true;
            order.push(id);
            // Reversed so the highest priority edge is visited first.
            for target in self.states[id].transitions.targets().into_iter().rev() {
                if !seen[target] {
                    stack.push(target);
                }
            }
        }
        order
    }

    /// Checks the structural invariants of every reachable state.
    pub(crate) fn is_well_formed(&self) -> bool {
        let exit = &self.states[self.end];
        if !exit.accepting || !exit.transitions.is_empty() {
            return false;
        }
        self.reachable().into_iter().all(|id| {
            let state = &self.states[id];
            let edges_ok = match state.transitions {
                Transitions::None => id == self.end,
                Transitions::Symbol(ref map) => !map.is_empty(),
                Transitions::Epsilon(ref targets) => {
                    !targets.is_empty() && targets.len() <= 2
                }
            };
            edges_ok && state.accepting == (id == self.end)
        })
    }
}

impl fmt::Debug for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "thompson::NFA(")?;
        for (id, state) in self.states.iter().enumerate() {
            let status = if id == self.start {
                '>'
            } else if state.accepting {
                '*'
            } else {
                ' '
            };
            writeln!(f, "{}{:06}: {:?}", status, id, state)?;
        }
        write!(f, ")")
    }
}
