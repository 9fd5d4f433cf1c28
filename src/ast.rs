use crate::error::Error;
use crate::lexer::is_variable;
use crate::token::{Op, Token};
use crate::util::{CONSTANTS, FUNCTIONS};

/// Ast nodes for the expressions
#[derive(Debug, Clone)]
pub enum Ast {
    /// A variable, to be resolved later
    Variable(String),
    /// A constant value
    Value(f64),
    /// -<arg>
    Neg(Box<Ast>),
    /// <left> + <right>
    Add(Box<Ast>, Box<Ast>),
    /// <left> - <right>
    Sub(Box<Ast>, Box<Ast>),
    /// <left> * <right>
    Mul(Box<Ast>, Box<Ast>),
    /// <left> / <right>
    Div(Box<Ast>, Box<Ast>),
    /// <left> % <right>, with the sign of the divisor
    Rem(Box<Ast>, Box<Ast>),
    /// <left> ^ <right>
    Exp(Box<Ast>, Box<Ast>),
    /// name(<arg>)
    Function {
        /// Function name, as registered in the function table
        name: &'static str,
        /// Function implementation
        func: fn(f64) -> f64,
        /// Single argument
        arg: Box<Ast>,
    },
}

impl PartialEq<Self> for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ast::Variable(str), Ast::Variable(str2)) => str == str2,
            (Ast::Value(v), Ast::Value(v2)) => v.to_le_bytes() == v2.to_le_bytes(),
            (Ast::Neg(a), Ast::Neg(a2)) => a == a2,
            (Ast::Add(a, b), Ast::Add(a2, b2))
            | (Ast::Sub(a, b), Ast::Sub(a2, b2))
            | (Ast::Mul(a, b), Ast::Mul(a2, b2))
            | (Ast::Div(a, b), Ast::Div(a2, b2))
            | (Ast::Rem(a, b), Ast::Rem(a2, b2))
            | (Ast::Exp(a, b), Ast::Exp(a2, b2)) => a == a2 && b == b2,
            (
                Ast::Function { name, arg, .. },
                Ast::Function {
                    name: name2,
                    arg: arg2,
                    ..
                },
            ) => name == name2 && arg == arg2,
            _ => false,
        }
    }
}
impl Eq for Ast {}

/// Floored remainder: the result takes the sign of the divisor, and a zero
/// divisor leaves the dividend untouched.
pub(crate) fn modulo(left: f64, right: f64) -> f64 {
    if right == 0.0 {
        left
    } else {
        left - right * (left / right).floor()
    }
}

impl Ast {
    /// Construct the AST for a vector of tokens in reverse polish notation.
    /// This function eats the tokens as it uses them
    pub fn from_tokens(tokens: &mut Vec<Token>, context: &str) -> Result<Self, Error> {
        Self::from_tokens_internal(tokens, context).map(Self::optimize)
    }

    fn from_tokens_internal(tokens: &mut Vec<Token>, context: &str) -> Result<Self, Error> {
        let token = tokens
            .pop()
            .ok_or_else(|| Error::ParseError(format!("empty expression{}", context)))?;
        match token {
            Token::Number(literal) => literal
                .parse()
                .map(Self::Value)
                .map_err(|_| Error::ParseError(format!("invalid number {}", literal))),
            Token::Name(name) => {
                if let Some((&name, &func)) = FUNCTIONS.get_key_value(name.as_str()) {
                    let arg = Box::new(Self::from_tokens_internal(tokens, " in function call")?);
                    Ok(Self::Function { name, func, arg })
                } else if let Some(&value) = CONSTANTS.get(name.as_str()) {
                    Ok(Self::Value(value))
                } else if is_variable(&name) {
                    Ok(Self::Variable(name))
                } else {
                    Err(Error::ParseError(format!("invalid name {}", name)))
                }
            }
            Token::Op(op) if op.is_unary() => {
                let arg = Self::from_tokens_internal(tokens, " after negation")?;
                Ok(Self::Neg(Box::new(arg)))
            }
            Token::Op(op) => {
                let right = Box::new(Self::from_tokens_internal(tokens, " after operator")?);
                let left = Box::new(Self::from_tokens_internal(tokens, " before operator")?);
                Ok(match op {
                    Op::Plus => Self::Add(left, right),
                    Op::Minus => Self::Sub(left, right),
                    Op::Mul => Self::Mul(left, right),
                    Op::Div => Self::Div(left, right),
                    Op::Rem => Self::Rem(left, right),
                    Op::Exp => Self::Exp(left, right),
                    Op::Neg => unreachable!("unary operators are handled above"),
                })
            }
            other => Err(Error::ParseError(format!(
                "unexpected {:?} after shunting yard",
                other
            ))),
        }
    }

    /// If the AST node correspond to a constant, get `Some(constant)`. Else,
    /// get `None`
    pub fn value(&self) -> Option<f64> {
        if let Self::Value(value) = *self {
            Some(value)
        } else {
            None
        }
    }

    /// Optimize the AST by doing constants propagation
    pub fn optimize(self) -> Self {
        match self {
            Self::Variable(_) | Self::Value(_) => self,
            Self::Neg(arg) => {
                let arg = arg.optimize();
                match arg.value() {
                    Some(value) => Self::Value(-value),
                    None => Self::Neg(Box::new(arg)),
                }
            }
            Self::Function { name, func, arg } => {
                let arg = arg.optimize();
                if let Some(arg) = arg.value() {
                    return Self::Value(func(arg));
                }
                return Self::Function {
                    name,
                    func,
                    arg: Box::new(arg),
                };
            }
            Self::Add(left, right) => Self::fold(*left, *right, Self::Add, |l, r| l + r),
            Self::Sub(left, right) => Self::fold(*left, *right, Self::Sub, |l, r| l - r),
            Self::Mul(left, right) => Self::fold(*left, *right, Self::Mul, |l, r| l * r),
            Self::Div(left, right) => Self::fold(*left, *right, Self::Div, |l, r| l / r),
            Self::Rem(left, right) => Self::fold(*left, *right, Self::Rem, modulo),
            Self::Exp(left, right) => Self::fold(*left, *right, Self::Exp, f64::powf),
        }
    }

    fn fold(
        left: Self,
        right: Self,
        node: fn(Box<Self>, Box<Self>) -> Self,
        apply: fn(f64, f64) -> f64,
    ) -> Self {
        let left = left.optimize();
        let right = right.optimize();
        if let (Some(l), Some(r)) = (left.value(), right.value()) {
            return Self::Value(apply(l, r));
        }
        return node(Box::new(left), Box::new(right));
    }
}

#[cfg(test)]
mod tests {
    use super::{modulo, Ast};
    use crate::lexer::Lexer;

    fn build(input: &str) -> Ast {
        let mut lexer = Lexer::new(input);
        Ast::from_tokens(&mut lexer.parse().unwrap(), "").unwrap()
    }

    #[test]
    // Verifies that we have reduced the input to a single value token when possible
    fn optimize() {
        assert_eq!(build("3 + 5").value(), Some(8.0));
        assert_eq!(build("(3 + 5^2)*45").value(), Some(1260.0));
        assert_eq!(build("sqrt(9)").value(), Some(3.0));
        assert_eq!(build("-2^2").value(), Some(-4.0));
        assert_eq!(build("2 * pi").value(), Some(2.0 * std::f64::consts::PI));
    }

    #[test]
    fn keeps_variables() {
        let ast = build("2 * a + 1");
        assert_eq!(ast.value(), None);
        assert_eq!(
            ast,
            Ast::Add(
                Box::new(Ast::Mul(
                    Box::new(Ast::Value(2.0)),
                    Box::new(Ast::Variable("a".into()))
                )),
                Box::new(Ast::Value(1.0))
            )
        );

        assert_eq!(build("-x"), Ast::Neg(Box::new(Ast::Variable("x".into()))));
    }

    #[test]
    fn invalid_number() {
        let mut lexer = Lexer::new("1.2.3 + 1");
        assert!(Ast::from_tokens(&mut lexer.parse().unwrap(), "").is_err());
    }

    #[test]
    fn floored_modulo() {
        assert_eq!(modulo(7.0, 3.0), 1.0);
        assert_eq!(modulo(-5.0, 3.0), 1.0);
        assert_eq!(modulo(5.0, -3.0), -1.0);
        assert_eq!(modulo(5.0, 0.0), 5.0);
    }
}
