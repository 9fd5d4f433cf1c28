use crate::error::Error;
use crate::token::{Op, Token};
use crate::util::FUNCTIONS;
use std::iter::Peekable;
use std::str::Chars;

#[must_use]
/// Check if `ident` is a valid variable name
///
/// # Examples
///
/// ```
/// # use amath::is_variable;
///
/// assert_eq!(is_variable("__abc3"), true);
/// assert_eq!(is_variable("34zb"), false);
/// ```
pub fn is_variable(ident: &str) -> bool {
    let mut chars = ident.chars();
    // Check first char
    if !chars.next().map_or(false, is_variable_start) {
        return false;
    }
    // Check all others
    chars.all(is_variable_part)
}

fn is_function(name: &str) -> bool {
    FUNCTIONS.contains_key(name)
}

/// An helper struct for lexing the input and reordering it into reverse
/// polish notation.
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(string: &'a str) -> Lexer<'a> {
        Lexer {
            input: string.chars().peekable(),
        }
    }

    /// Run the shunting-yard algorithm over the input. The returned tokens
    /// are in reverse polish notation.
    pub fn parse(&mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        let mut operators: Vec<Token> = Vec::new();
        // true when the next token has to start an operand
        let mut expect_operand = true;
        // true right after a function name, which must be followed by `(`
        let mut expect_call = false;

        'tokens: while let Some(token) = self.next_token()? {
            if expect_call && token != Token::LParen {
                return Err(Error::ParseError(
                    "expected '(' after function name".into(),
                ));
            }
            expect_call = false;

            match token {
                Token::Number(ref value) | Token::Name(ref value) if !expect_operand => {
                    return Err(Error::ParseError(format!(
                        "missing operator before {}",
                        value
                    )));
                }
                Token::Name(ref name) if is_function(name) => {
                    operators.push(token);
                    expect_call = true;
                }
                Token::Number(_) | Token::Name(_) => {
                    output.push(token);
                    expect_operand = false;
                }
                Token::Op(Op::Plus) if expect_operand => {}
                Token::Op(Op::Minus) if expect_operand => operators.push(Token::Op(Op::Neg)),
                Token::Op(_) if expect_operand => {
                    return Err(Error::ParseError("missing operand before operator".into()));
                }
                Token::Op(o1) => {
                    'operators: while let Some(&Token::Op(o2)) = operators.last() {
                        let pop_me =
                            o1.is_left_associative() && o1.precedence() <= o2.precedence();
                        let pop_me = pop_me
                            || o1.is_right_associative() && o1.precedence() < o2.precedence();
                        if pop_me {
                            operators.pop();
                            output.push(Token::Op(o2));
                        } else {
                            break 'operators;
                        }
                    }
                    operators.push(token);
                    expect_operand = true;
                }
                Token::LParen if !expect_operand => {
                    return Err(Error::ParseError("missing operator before '('".into()));
                }
                Token::LParen => operators.push(token),
                Token::RParen if expect_operand => {
                    return Err(Error::ParseError("missing operand before ')'".into()));
                }
                Token::RParen => {
                    while let Some(token) = operators.pop() {
                        match token {
                            Token::LParen => {
                                let next_is_fn = matches!(
                                    operators.last(),
                                    Some(Token::Name(name)) if is_function(name)
                                );
                                if next_is_fn {
                                    if let Some(func) = operators.pop() {
                                        output.push(func);
                                    }
                                }
                                continue 'tokens;
                            }
                            Token::Op(_) => output.push(token),
                            other => {
                                return Err(Error::ParseError(format!(
                                    "unexpected {:?} in operators stack",
                                    other
                                )))
                            }
                        }
                    }
                    return Err(Error::ParseError("mismatched parenthesis".into()));
                }
            }
        }

        if expect_call {
            return Err(Error::ParseError(
                "expected '(' after function name".into(),
            ));
        }
        if expect_operand {
            return if output.is_empty() && operators.is_empty() {
                Err(Error::ParseError("empty expression".into()))
            } else {
                Err(Error::ParseError("unexpected end of expression".into()))
            };
        }

        while let Some(token) = operators.pop() {
            match token {
                Token::LParen => return Err(Error::ParseError("mismatched parenthesis".into())),
                Token::Op(_) => output.push(token),
                other => {
                    return Err(Error::ParseError(format!(
                        "unexpected {:?} in operators stack",
                        other
                    )))
                }
            }
        }
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while let Some(&c) = self.input.peek() {
            if c.is_whitespace() {
                self.input.next();
            } else {
                break;
            }
        }

        let c = match self.input.next() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            c if is_number_start(c) => Token::Number(self.number(c)),
            c if is_variable_start(c) => {
                let mut ident = String::new();
                ident.push(c);
                while let Some(&c) = self.input.peek() {
                    if is_variable_part(c) {
                        self.input.next();
                        ident.push(c);
                    } else {
                        break;
                    }
                }
                Token::Name(ident)
            }
            '+' => Token::Op(Op::Plus),
            '-' => Token::Op(Op::Minus),
            '*' => Token::Op(Op::Mul),
            '/' => Token::Op(Op::Div),
            '%' => Token::Op(Op::Rem),
            '^' => Token::Op(Op::Exp),
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(Error::ParseError(format!(
                    "unexpected character in input: {}",
                    other
                )));
            }
        };
        Ok(Some(token))
    }

    /// Read the rest of a numeric literal starting with `first`
    fn number(&mut self, first: char) -> String {
        let mut literal = String::new();
        literal.push(first);
        while let Some(&c) = self.input.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.input.next();
                literal.push(c);
            } else {
                break;
            }
        }

        // Exponent, only when digits follow: `2e3`, `2e-3`, but `2e` stays
        // a number followed by a name.
        if let Some(&e) = self.input.peek() {
            if e == 'e' || e == 'E' {
                let mut lookahead = self.input.clone();
                lookahead.next();
                let mut exponent = String::new();
                exponent.push(e);
                if let Some(&sign) = lookahead.peek() {
                    if sign == '+' || sign == '-' {
                        exponent.push(sign);
                        lookahead.next();
                    }
                }
                if lookahead.peek().map_or(false, char::is_ascii_digit) {
                    while let Some(&c) = lookahead.peek() {
                        if c.is_ascii_digit() {
                            exponent.push(c);
                            lookahead.next();
                        } else {
                            break;
                        }
                    }
                    literal.push_str(&exponent);
                    self.input = lookahead;
                }
            }
        }
        literal
    }
}

/// Check if `c` can appear at the first character of a number
fn is_number_start(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// Check if `c` can appear at the first character of a variable
fn is_variable_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Check if `c` can appear inside a variable
fn is_variable_part(c: char) -> bool {
    c == '.' || c == '_' || c == '[' || c == ']' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Op, Token};
    use test_case::test_case;

    fn num(value: &str) -> Token {
        Token::Number(value.to_string())
    }

    #[test_case("2 + 2" => Ok(vec![num("2"), num("2"), Token::Op(Op::Plus)]) ; "addition is parsed properly")]
    #[test_case("2+2" => Ok(vec![num("2"), num("2"), Token::Op(Op::Plus)]) ; "no spaces around operator")]
    #[test_case("2+3*4" => Ok(vec![num("2"), num("3"), num("4"), Token::Op(Op::Mul), Token::Op(Op::Plus)]) ; "precedence")]
    #[test_case("2-3" => Ok(vec![num("2"), num("3"), Token::Op(Op::Minus)]) ; "binary minus")]
    #[test_case("-2^2" => Ok(vec![num("2"), num("2"), Token::Op(Op::Exp), Token::Op(Op::Neg)]) ; "power binds tighter than negation")]
    #[test_case("2^-3" => Ok(vec![num("2"), num("3"), Token::Op(Op::Neg), Token::Op(Op::Exp)]) ; "negative exponent")]
    #[test_case("2^3^2" => Ok(vec![num("2"), num("3"), num("2"), Token::Op(Op::Exp), Token::Op(Op::Exp)]) ; "power is right associative")]
    #[test_case("1.5e-3 % 2" => Ok(vec![num("1.5e-3"), num("2"), Token::Op(Op::Rem)]) ; "exponent literal")]
    #[test_case("+4" => Ok(vec![num("4")]) ; "unary plus is dropped")]
    #[test_case("sqrt(9)" => Ok(vec![num("9"), Token::Name("sqrt".into())]) ; "function call")]
    fn parse(equation: &str) -> Result<Vec<Token>, Error> {
        Lexer::new(equation).parse()
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("2 +" ; "trailing operator")]
    #[test_case("* 2" ; "leading binary operator")]
    #[test_case("(2 + 3" ; "unclosed parenthesis")]
    #[test_case("2 + 3)" ; "unopened parenthesis")]
    #[test_case("()" ; "empty parenthesis")]
    #[test_case("2 3" ; "missing operator")]
    #[test_case("2(3)" ; "implicit multiplication")]
    #[test_case("sqrt 9" ; "function without call")]
    #[test_case("sqrt" ; "bare function")]
    #[test_case("2 $ 3" ; "unknown character")]
    #[test_case("not an expr (" ; "words")]
    fn invalid(equation: &str) {
        assert!(Lexer::new(equation).parse().is_err());
    }

    #[test]
    fn exponent_needs_digits() {
        let tokens = Lexer::new("2e").parse();
        assert!(tokens.is_err());

        let tokens = Lexer::new("2e+").parse();
        assert!(tokens.is_err());

        let tokens = Lexer::new("2 * e").parse().unwrap();
        assert_eq!(
            tokens,
            vec![num("2"), Token::Name("e".into()), Token::Op(Op::Mul)]
        );
    }

    #[test]
    fn idents() {
        let variable_starts = ['c', 'Z', '_', 'f'];
        for c in &variable_starts {
            assert!(is_variable_start(*c));
        }

        let non_variable_starts = ['3', 'à', '@', ']', '[', '.'];
        for c in &non_variable_starts {
            assert!(!is_variable_start(*c));
        }

        let variable_parts = ['c', 'Z', '_', 'f', '3', '[', ']', '.'];
        for c in &variable_parts {
            assert!(is_variable_part(*c));
        }

        let non_variable_parts = ['à', '@', '{', '}', '(', ')', '?', '&', '$'];
        for c in &non_variable_parts {
            assert!(!is_variable_part(*c));
        }

        let variables = ["_______", "abc", "ab.gd_hc", "abc[2as]", "abc[90]", "a__45__bc"];
        for v in &variables {
            assert!(is_variable(v));
        }

        let non_variables = ["a-bc", "@bc", "6bc", ""];
        for nv in &non_variables {
            assert!(!is_variable(nv));
        }
    }
}
