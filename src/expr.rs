use crate::ast::{modulo, Ast};
use crate::format::format_number;
use crate::lexer::Lexer;
use crate::Error;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Text shown in place of a result when an expression cannot be evaluated.
pub const EVALUATION_ERROR: &str = "Error";

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use std::collections::HashMap;
/// # use amath::{eval};
///
/// assert_eq!(eval("45 - 2^3", &HashMap::new()), Ok(37.0));
///
/// let mut context :HashMap<String,f64> = HashMap::new();
/// context.insert("a".into(), -5.0);
/// assert_eq!(eval("3 * a", &context), Ok(-15.0));
/// ```
pub fn eval<'a, C>(input: &str, context: C) -> Result<f64, Error>
where
    C: Into<&'a HashMap<String, f64>>,
{
    Expr::parse(input).and_then(|expr| expr.eval(context))
}

/// Evaluate `expression` without any variable, rendering the result as text.
///
/// Failures never escape: any parse or evaluation error is rendered as
/// [`EVALUATION_ERROR`].
///
/// # Example
///
/// ```
/// assert_eq!(amath::evaluate("2+3*4"), "14");
/// assert_eq!(amath::evaluate("1/0"), "Infinity");
/// assert_eq!(amath::evaluate("not an expr ("), "Error");
/// ```
#[must_use]
pub fn evaluate(expression: &str) -> String {
    match eval(expression, &HashMap::<String, f64>::new()) {
        Ok(value) => format_number(value),
        Err(err) => {
            debug!(%expression, error = %err, "expression evaluation failed");
            EVALUATION_ERROR.into()
        }
    }
}

/// A parsed and optimized mathematical expression.
///
/// # Examples
/// ```
/// # use amath::{Expr};
/// # use std::collections::HashMap;
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(&HashMap::new()), Ok(13.0));
///
/// let mut context :HashMap<String,f64> = HashMap::new();
/// context.insert("a".into(), 42.0);
/// let expr = Expr::parse("-2 * a").unwrap();
/// assert_eq!(expr.eval(&context), Ok(-84.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use amath::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff + 5 * 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let mut tokens = Lexer::new(expression).parse()?;
        let ast = Ast::from_tokens(&mut tokens, "")?;
        if !tokens.is_empty() {
            return Err(Error::ParseError("unused values in expression".into()));
        }
        Ok(Self { ast })
    }

    /// Evaluate the expression in a given optional `context`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use amath::{Expr};
    /// # use std::collections::HashMap;
    /// let expr = Expr::parse("3 + a").unwrap();
    ///
    /// let mut context :HashMap<String,f64> = HashMap::new();
    /// context.insert("a".into(), -5.0);
    /// assert_eq!(expr.eval(&context), Ok(-2.0));
    /// context.insert("a".into(), 2.0);
    /// assert_eq!(expr.eval(&context), Ok(5.0));
    /// ```
    pub fn eval<'a, C>(&self, context: C) -> Result<f64, Error>
    where
        C: Into<&'a HashMap<String, f64>>,
    {
        Self::inner_eval(&self.ast, context.into())
    }

    fn inner_eval(ast: &Ast, context: &HashMap<String, f64>) -> Result<f64, Error> {
        match *ast {
            // if the context has a value for the variable name, use the value.
            // Otherwise, we return an error
            Ast::Variable(ref name) => context
                .get(name)
                .copied()
                .ok_or_else(|| Error::NameError(format!("name '{}' is not defined", name))),
            Ast::Value(number) => Ok(number),
            Ast::Neg(ref arg) => Ok(-Self::inner_eval(arg, context)?),
            Ast::Add(ref left, ref right) => {
                Ok(Self::inner_eval(left, context)? + Self::inner_eval(right, context)?)
            }
            Ast::Sub(ref left, ref right) => {
                Ok(Self::inner_eval(left, context)? - Self::inner_eval(right, context)?)
            }
            Ast::Mul(ref left, ref right) => {
                Ok(Self::inner_eval(left, context)? * Self::inner_eval(right, context)?)
            }
            Ast::Div(ref left, ref right) => {
                Ok(Self::inner_eval(left, context)? / Self::inner_eval(right, context)?)
            }
            Ast::Rem(ref left, ref right) => Ok(modulo(
                Self::inner_eval(left, context)?,
                Self::inner_eval(right, context)?,
            )),
            Ast::Exp(ref left, ref right) => {
                Ok(Self::inner_eval(left, context)?.powf(Self::inner_eval(right, context)?))
            }
            Ast::Function { func, ref arg, .. } => Ok(func(Self::inner_eval(arg, context)?)),
        }
    }

    /// Get the names of the free variables of the expression.
    ///
    /// # Examples
    /// ```
    /// # use amath::{Expr};
    /// # use std::collections::HashSet;
    /// let expr = Expr::parse("3 + 5 * 2").unwrap();
    /// assert_eq!(expr.variables(), HashSet::new());
    ///
    /// let expr = Expr::parse("3 + a").unwrap();
    /// assert_eq!(expr.variables(), HashSet::from(["a"]));
    /// ```
    #[must_use]
    pub fn variables(&self) -> HashSet<&str> {
        let mut variables = HashSet::new();
        Self::inner_variables(&self.ast, &mut variables);
        variables
    }

    /// Get the optimized syntax tree
    #[must_use]
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    fn inner_variables<'a>(ast: &'a Ast, variables: &mut HashSet<&'a str>) {
        match *ast {
            Ast::Variable(ref name) => {
                variables.insert(name);
            }
            Ast::Value(_) => {}
            Ast::Neg(ref arg) | Ast::Function { ref arg, .. } => {
                Self::inner_variables(arg, variables);
            }
            Ast::Add(ref left, ref right)
            | Ast::Sub(ref left, ref right)
            | Ast::Mul(ref left, ref right)
            | Ast::Div(ref left, ref right)
            | Ast::Rem(ref left, ref right)
            | Ast::Exp(ref left, ref right) => {
                Self::inner_variables(left, variables);
                Self::inner_variables(right, variables);
            }
        }
    }
}
