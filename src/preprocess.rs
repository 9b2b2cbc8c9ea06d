use crate::compiler::Token;

const GROUP_OPEN: char = '(';
const GROUP_CLOSE: char = ')';

/// Make implicit concatenation in an infix expression explicit.
///
/// A [`Token::CONCAT`] marker is inserted between two adjacent characters
/// unless the first one opens a group or is an alternation, or the second
/// one is a closure, an alternation or closes a group. The rewrite only looks
/// one character ahead. Parentheses and operators are not validated, so
/// malformed input comes out just as malformed.
///
/// ```
/// use thompson_nfa::insert_concat_markers;
///
/// assert_eq!(insert_concat_markers("ab"), "a.b");
/// assert_eq!(insert_concat_markers("a*b"), "a*.b");
/// assert_eq!(insert_concat_markers("(a|b)c"), "(a|b).c");
/// ```
pub fn insert_concat_markers(infix: &str) -> String {
    let mut output = String::with_capacity(infix.len() * 2);
    let mut chars = infix.chars().peekable();
    while let Some(ch) = chars.next() {
        output.push(ch);
        if ch == GROUP_OPEN || ch == Token::UNION {
            continue;
        }
        match chars.peek() {
            None | Some(&Token::CLOSURE) | Some(&Token::UNION) | Some(&GROUP_CLOSE) => {}
            Some(_) => output.push(Token::CONCAT),
        }
    }
    output
}
