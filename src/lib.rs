#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::module_name_repetitions
)]

//! amath, a small toolbox for school mathematics.
//!
//! This crate provides three independent tools: an expression calculator, an
//! arithmetic/geometric sequence generator, and a word problem solver that
//! recognizes a single kind of problem. All of them are pure functions; a
//! front end keeps its own state and calls them on each user action, see the
//! [`app`] module.
//!
//! The calculator renders its result as text, and reports any failure as
//! `"Error"`:
//!
//! ```
//! assert_eq!(amath::evaluate("2+3*4"), "14");
//! assert_eq!(amath::evaluate("not an expr ("), "Error");
//! ```
//!
//! The typed [`eval`](fn.eval.html) function and [`Expr`](struct.Expr.html)
//! type give access to the numeric result and to variables:
//!
//! ```
//! use std::collections::HashMap;
//! use amath::Expr;
//!
//! let expr = Expr::parse("3 / c + b").unwrap();
//! let mut context :HashMap<String,f64> = HashMap::new();
//! context.insert("c".into(), 1.0);
//! context.insert("b".into(), 5.0);
//! assert_eq!(expr.eval(&context), Ok(8.0));
//!
//! context.insert("b".into(), 10.0);
//! assert_eq!(expr.eval(&context), Ok(13.0));
//! ```
//!
//! Sequences are generated from a first term, a common difference or ratio,
//! and a number of terms:
//!
//! ```
//! assert_eq!(amath::arithmetic(1.0, 2.0, 5).to_string(), "1, 3, 5, 7, 9");
//! assert_eq!(amath::geometric(1.0, 2.0, 5).to_string(), "1, 2, 4, 8, 16");
//! ```
//!
//! The word problem solver reads the first three numbers of a text asking
//! for the sum of the first terms of an arithmetic sequence:
//!
//! ```
//! let answer = amath::solve("Sum of first terms of an arithmetic sequence, a = 1, d = 2, n = 10");
//! assert_eq!(answer.to_string(), "100");
//! assert_eq!(amath::solve("hello world").to_string(), "Cannot solve this problem yet");
//! ```
//!
//! # Language definition
//!
//! The calculator accepts the following elements:
//!
//! - float literal values: `12.456`, `.5`, `0.0045e78`, ...;
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction,
//!   `*` for multiplication, `/` for division, `%` for the floored modulo and
//!   `^` for exponentiation (`std::f64::powf`, right associative);
//! - prefix `+` and `-`. Negation binds less tightly than `^`, so `-2^2` is
//!   `-4`;
//! - the constants `pi`, `e`, `tau` and `phi`;
//! - variables. Variables names are ASCII only, and can start by a letter or
//!   `_`, and can contain letters, digits, `.`, `_`, `[` or `]`.
//! - function call: `sin(a)`, `atan(22.0)`. The following function are
//!   accessible, with the same meaning as the corresponding `std::f64`
//!   function: `sqrt`, `cbrt`, `sin`, `cos`, `tan`, `asin`, `acos`, `atan`,
//!   `sinh`, `cosh`, `tanh`, `asinh`, `acosh`, `atanh`, `floor`, `ceil`,
//!   `round`, `abs`, `exp`, `ln`, `log2`, `log10`, plus `log` (natural
//!   logarithm) and `sign`.
//!
//! Any other symbol is forbidden in the input.
//!
//! # Technical details
//!
//! The calculator is an AST interpreter, using a Shunting-Yard algorithm for
//! parsing the expressions. It works only with `f64` data, and performs a
//! simple constant propagation to optimize the expressions.

#[macro_use]
extern crate lazy_static;

pub mod app;
mod ast;
mod error;
mod expr;
pub mod format;
mod lexer;
pub mod sequence;
mod token;
mod util;
pub mod word_problem;

pub use ast::Ast;
pub use error::{Error, Result};
pub use expr::{eval, evaluate, Expr, EVALUATION_ERROR};
pub use format::format_number;
pub use lexer::is_variable;
pub use sequence::{
    arithmetic, coerce_count, coerce_number, geometric, Point, Sequence, SequenceKind,
    SequenceRequest, DEFAULT_MAX_TERMS,
};
pub use util::{CONSTANTS, FUNCTIONS};
pub use word_problem::{solve, Solver, SolverResult, UNRECOGNIZED};
