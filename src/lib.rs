/*!
Thompson's construction for classical regular expressions.

This crate turns a regular expression into a nondeterministic finite automaton
with epsilon transitions. It covers two steps of a regex pipeline:

* [`insert_concat_markers`] rewrites an infix expression so that implicit
  concatenation is written out as an explicit `.` operator. A later
  infix-to-postfix conversion can then treat concatenation like any other
  binary operator.
* [`Compiler`] (or the [`compile`] shorthand) evaluates a postfix expression
  over an operand stack of [`Fragment`]s and produces an [`NFA`] with exactly
  one entry state and one accepting exit state.

Converting infix to postfix and executing the resulting automaton are left to
the caller. The [`NFA`] exposes its graph read-only for that purpose.

# Syntax

Postfix expressions use three operators: `*` (zero or more), `|`
(alternation) and `.` (concatenation). Every other character is a literal,
and there is no escaping.

# Example

```
use thompson_nfa::{compile, insert_concat_markers};

assert_eq!(insert_concat_markers("a(b|c)*"), "a.(b|c)*");

// The postfix form of a(b|c)*.
let nfa = compile("abc|*.")?;
assert!(nfa.is_accepting(nfa.end()));
assert!(!nfa.is_accepting(nfa.start()));
assert_eq!(nfa.len(), 10);
# Ok::<(), thompson_nfa::Error>(())
```

# Crate features

* **std** - Enabled by default. Currently required.
* **logging** - Emits compilation traces through the [`log`](https://docs.rs/log)
  crate.
*/

#![deny(missing_debug_implementations)]

#[macro_use]
mod macros;

pub mod builder;
pub mod compiler;
mod error;
pub mod nfa;
mod preprocess;

pub use builder::Builder;
pub use compiler::{Compiler, Config, Token};
pub use error::{Error, Result};
pub use nfa::{Fragment, State, StateId, Transitions, NFA};
pub use preprocess::insert_concat_markers;

/// Compile a postfix expression with the default configuration.
///
/// This is a convenience routine for `Compiler::new().compile(postfix)`.
pub fn compile(postfix: &str) -> Result<NFA> {
    Compiler::new().compile(postfix)
}
