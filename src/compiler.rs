use crate::{
    builder::Builder,
    nfa::{Fragment, NFA},
    Error, Result,
};

/// A single token of a postfix regular expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Zero or more repetitions of the preceding operand (`*`).
    Closure,
    /// Alternation of the two preceding operands (`|`).
    Union,
    /// Concatenation of the two preceding operands (`.`).
    Concat,
    /// A literal character.
    Symbol(char),
}

impl Token {
    pub const CLOSURE: char = '*';
    pub const UNION: char = '|';
    pub const CONCAT: char = '.';

    /// Classify a character. There is no escaping: every character that is
    /// not an operator is a literal.
    pub fn from_char(ch: char) -> Token {
        match ch {
            Token::CLOSURE => Token::Closure,
            Token::UNION => Token::Union,
            Token::CONCAT => Token::Concat,
            _ => Token::Symbol(ch),
        }
    }

    /// The character this token is written as.
    pub fn as_char(self) -> char {
        match self {
            Token::Closure => Token::CLOSURE,
            Token::Union => Token::UNION,
            Token::Concat => Token::CONCAT,
            Token::Symbol(ch) => ch,
        }
    }

    /// The number of operands this token pops off the stack.
    pub fn arity(self) -> usize {
        match self {
            Token::Symbol(_) => 0,
            Token::Closure => 1,
            Token::Union | Token::Concat => 2,
        }
    }
}

impl From<char> for Token {
    fn from(ch: char) -> Token {
        Token::from_char(ch)
    }
}

/// The configuration used for a compiler.
#[derive(Clone, Debug, Default)]
pub struct Config {
    nfa_size_limit: Option<usize>,
}

impl Config {
    /// Return a new default compiler configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Set a limit on the number of states a compiled NFA may have.
    ///
    /// When the limit is exceeded, compilation fails with
    /// [`Error::TooBig`]. There is no limit by default.
    pub fn nfa_size_limit(mut self, limit: Option<usize>) -> Config {
        self.nfa_size_limit = limit;
        self
    }

    /// Returns the configured state limit, if any.
    pub fn get_nfa_size_limit(&self) -> Option<usize> {
        self.nfa_size_limit
    }
}

/// Compiles postfix regular expressions into Thompson NFAs.
///
/// Compilation is a single left to right pass with an operand stack of
/// fragments. Each call builds its automaton in a fresh arena, so automata
/// produced by different calls never share states.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: Config,
}

impl Compiler {
    /// Create a new compiler with the default configuration.
    pub fn new() -> Compiler {
        Compiler::default()
    }

    /// Apply the given configuration to this compiler.
    pub fn configure(&mut self, config: Config) -> &mut Compiler {
        self.config = config;
        self
    }

    /// Compile a postfix expression written as a string, one token per
    /// character.
    ///
    /// The empty string compiles to an automaton accepting only the empty
    /// string.
    pub fn compile(&self, postfix: &str) -> Result<NFA> {
        self.compile_tokens(postfix.chars().map(Token::from_char))
    }

    /// Compile a sequence of postfix tokens.
    pub fn compile_tokens<I>(&self, tokens: I) -> Result<NFA>
    where
        I: IntoIterator<Item = Token>,
    {
        debug!("compiling postfix expression into a Thompson NFA");
        let mut builder = Builder::new();
        let mut stack: Vec<Fragment> = vec![];
        let mut count = 0;

        for (position, token) in tokens.into_iter().enumerate() {
            count += 1;
            let fragment = match token {
                Token::Symbol(symbol) => builder.from_symbol(symbol),
                Token::Closure => {
                    let operand = stack
                        .pop()
                        .ok_or_else(|| missing_operand(token, position, 0))?;
                    builder.closure(operand)
                }
                Token::Union | Token::Concat => {
                    let (right, left) = match (stack.pop(), stack.pop()) {
                        (Some(right), Some(left)) => (right, left),
                        (right, _) => {
                            let found = usize::from(right.is_some());
                            return Err(missing_operand(token, position, found));
                        }
                    };
                    if token == Token::Union {
                        builder.union(left, right)
                    } else {
                        builder.concat(left, right)
                    }
                }
            };
            trace!(
                "applied {:?} at position {}, NFA has {} states",
                token,
                position,
                builder.len(),
            );
            stack.push(fragment);
            self.check_size(&builder)?;
        }

        if count == 0 {
            let fragment = builder.from_epsilon();
            self.check_size(&builder)?;
            return Ok(builder.finish(fragment));
        }
        let [fragment]: [Fragment; 1] = stack
            .try_into()
            .map_err(|rest: Vec<Fragment>| Error::DanglingOperands {
                remaining: rest.len(),
            })?;
        let nfa = builder.finish(fragment);
        debug!("compiled {} tokens into an NFA with {} states", count, nfa.len());
        Ok(nfa)
    }

    fn check_size(&self, builder: &Builder) -> Result<()> {
        match self.config.get_nfa_size_limit() {
            Some(limit) if builder.len() > limit => Err(Error::TooBig { limit }),
            _ => Ok(()),
        }
    }
}

fn missing_operand(token: Token, position: usize, found: usize) -> Error {
    Error::MissingOperand {
        operator: token.as_char(),
        position,
        needed: token.arity(),
        found,
    }
}
