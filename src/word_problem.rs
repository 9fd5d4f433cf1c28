//! Keyword driven word problem solver.
//!
//! Recognition is plain pattern matching over the case-folded text, there is
//! no parsing into a structured model. Each supported problem type is a
//! [`Pattern`]: an id, a recognition rule, an extraction rule producing the
//! operands, and a closed-form formula over those operands. The [`Solver`]
//! tries its patterns in registration order.
//!
//! Only one pattern ships: the sum of the first `n` terms of an arithmetic
//! sequence, reading the first three numbers of the text as `a`, `d` and `n`.

use crate::error::{Error, Result};
use crate::format::format_number;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// Text shown when no pattern recognizes a problem.
pub const UNRECOGNIZED: &str = "Cannot solve this problem yet";

/// Text shown when solving a recognized problem failed.
pub const SOLVER_ERROR: &str = "Error";

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new("[0-9]+").expect("valid digit run pattern");
}

/// Outcome of solving a word problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverResult {
    /// The computed answer, unrounded
    Solved(f64),
    /// No pattern applies to the text
    Unrecognized,
    /// A pattern applied but failed
    Error,
}

impl SolverResult {
    /// Get the answer, if any
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        if let Self::Solved(value) = *self {
            Some(value)
        } else {
            None
        }
    }
}

impl Display for SolverResult {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Solved(value) => write!(fmt, "{}", format_number(value)),
            Self::Unrecognized => write!(fmt, "{}", UNRECOGNIZED),
            Self::Error => write!(fmt, "{}", SOLVER_ERROR),
        }
    }
}

/// Every maximal run of ASCII digits in `text`, left to right, as numbers.
///
/// ```
/// use amath::word_problem::numbers;
///
/// assert_eq!(numbers("a=1, d=23 and 4.5").unwrap(), vec![1.0, 23.0, 4.0, 5.0]);
/// ```
pub fn numbers(text: &str) -> Result<Vec<f64>> {
    DIGIT_RUN
        .find_iter(text)
        .map(|run| {
            run.as_str()
                .parse::<f64>()
                .map_err(|err| Error::ParseError(format!("digit run {}: {}", run.as_str(), err)))
        })
        .collect()
}

/// A recognizable kind of word problem
pub trait Pattern {
    /// Stable identifier, used in logs
    fn id(&self) -> &'static str;

    /// Check if the case-folded `text` looks like this kind of problem
    fn recognizes(&self, text: &str) -> bool;

    /// Pull the operands out of the case-folded `text`. `Ok(None)` means the
    /// text does not carry enough information.
    fn extract(&self, text: &str) -> Result<Option<Vec<f64>>>;

    /// Compute the answer from the extracted operands
    fn compute(&self, operands: &[f64]) -> f64;
}

/// Sum of the first `n` terms of an arithmetic sequence with first term `a`
/// and common difference `d`: `n/2 * (2a + (n - 1)d)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticSeriesSum;

impl ArithmeticSeriesSum {
    /// Closed form of the partial sum
    #[must_use]
    pub fn partial_sum(a: f64, d: f64, n: f64) -> f64 {
        n / 2.0 * (2.0 * a + (n - 1.0) * d)
    }
}

impl Pattern for ArithmeticSeriesSum {
    fn id(&self) -> &'static str {
        "arithmetic-series-sum"
    }

    fn recognizes(&self, text: &str) -> bool {
        text.contains("sum of first") && text.contains("arithmetic")
    }

    fn extract(&self, text: &str) -> Result<Option<Vec<f64>>> {
        let mut operands = numbers(text)?;
        if operands.len() < 3 {
            return Ok(None);
        }
        operands.truncate(3);
        Ok(Some(operands))
    }

    /// Fewer than three operands give `NaN`.
    fn compute(&self, operands: &[f64]) -> f64 {
        match *operands {
            [a, d, n, ..] => Self::partial_sum(a, d, n),
            _ => f64::NAN,
        }
    }
}

/// An ordered set of patterns
pub struct Solver {
    patterns: Vec<Box<dyn Pattern + Send + Sync>>,
}

impl Default for Solver {
    fn default() -> Self {
        let mut solver = Self::empty();
        solver.register(ArithmeticSeriesSum);
        solver
    }
}

impl Solver {
    /// A solver with the built-in patterns
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A solver that recognizes nothing
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Add a pattern, tried after the already registered ones
    pub fn register<P: Pattern + Send + Sync + 'static>(&mut self, pattern: P) {
        self.patterns.push(Box::new(pattern));
    }

    /// Ids of the registered patterns, in matching order
    pub fn pattern_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patterns.iter().map(|pattern| pattern.id())
    }

    /// Solve a free-text problem.
    ///
    /// The first pattern that recognizes the text and manages to extract
    /// its operands wins. A pattern that recognizes the text without enough
    /// operands gives way to the next one, and finally to
    /// [`SolverResult::Unrecognized`].
    #[must_use]
    pub fn solve(&self, text: &str) -> SolverResult {
        let text = text.to_lowercase();
        for pattern in &self.patterns {
            if !pattern.recognizes(&text) {
                continue;
            }
            match pattern.extract(&text) {
                Ok(Some(operands)) => {
                    let answer = pattern.compute(&operands);
                    debug!(pattern = pattern.id(), ?operands, answer, "word problem solved");
                    return SolverResult::Solved(answer);
                }
                Ok(None) => {
                    debug!(pattern = pattern.id(), "keywords matched without enough numbers");
                }
                Err(err) => {
                    debug!(pattern = pattern.id(), error = %err, "operand extraction failed");
                    return SolverResult::Error;
                }
            }
        }
        SolverResult::Unrecognized
    }
}

lazy_static! {
    static ref DEFAULT_SOLVER: Solver = Solver::default();
}

/// Solve `text` with the built-in patterns.
///
/// ```
/// use amath::{solve, SolverResult};
///
/// let answer = solve("Sum of first terms of an arithmetic sequence: a = 1, d = 2, n = 10");
/// assert_eq!(answer, SolverResult::Solved(100.0));
/// assert_eq!(solve("hello world").to_string(), "Cannot solve this problem yet");
/// ```
#[must_use]
pub fn solve(text: &str) -> SolverResult {
    DEFAULT_SOLVER.solve(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Sum of first terms of an arithmetic sequence: a = 1, d = 2, n = 10" => SolverResult::Solved(100.0) ; "operands in order")]
    #[test_case("Find the sum of first 10 terms of an arithmetic sequence with a=1, d=2" => SolverResult::Solved(21.0) ; "operands taken by position")]
    #[test_case("SUM OF FIRST 3 5 4 ARITHMETIC" => SolverResult::Solved(42.0) ; "case folded")]
    #[test_case("arithmetic: sum of first 2, 3, 5, 7" => SolverResult::Solved(40.0) ; "extra numbers ignored")]
    #[test_case("sum of first 5 0 1 terms, arithmetic" => SolverResult::Solved(5.0) ; "single term")]
    #[test_case("hello world" => SolverResult::Unrecognized ; "no keywords")]
    #[test_case("sum of first arithmetic" => SolverResult::Unrecognized ; "keywords without numbers")]
    #[test_case("sum of first 1 2 arithmetic" => SolverResult::Unrecognized ; "two numbers only")]
    #[test_case("sum of the first 1 2 3 arithmetic" => SolverResult::Unrecognized ; "phrase must be contiguous")]
    #[test_case("sum of first 1 2 3 geometric" => SolverResult::Unrecognized ; "wrong progression")]
    fn built_in(text: &str) -> SolverResult {
        solve(text)
    }

    #[test]
    fn partial_sum() {
        assert_eq!(ArithmeticSeriesSum::partial_sum(1.0, 2.0, 10.0), 100.0);
        assert_eq!(ArithmeticSeriesSum::partial_sum(5.0, 0.0, 4.0), 20.0);
        assert_eq!(ArithmeticSeriesSum::partial_sum(1.0, 1.0, 0.0), 0.0);
        // odd n keeps the fractional half
        assert_eq!(ArithmeticSeriesSum::partial_sum(1.0, 1.0, 3.0), 6.0);
    }

    #[test]
    fn compute_needs_three_operands() {
        assert!(ArithmeticSeriesSum.compute(&[]).is_nan());
        assert!(ArithmeticSeriesSum.compute(&[1.0, 2.0]).is_nan());
        assert_eq!(ArithmeticSeriesSum.compute(&[1.0, 2.0, 10.0]), 100.0);
    }

    #[test]
    fn digit_runs() {
        assert_eq!(numbers("no digits").unwrap(), Vec::<f64>::new());
        assert_eq!(numbers("007 and 12").unwrap(), vec![7.0, 12.0]);
        // only ASCII digits count
        assert_eq!(numbers("١٢٣ 4").unwrap(), vec![4.0]);
    }

    #[test]
    fn display() {
        assert_eq!(SolverResult::Solved(2.5).to_string(), "2.5");
        assert_eq!(SolverResult::Solved(100.0).to_string(), "100");
        assert_eq!(SolverResult::Unrecognized.to_string(), UNRECOGNIZED);
        assert_eq!(SolverResult::Error.to_string(), SOLVER_ERROR);
        assert_eq!(SolverResult::Solved(3.0).value(), Some(3.0));
        assert_eq!(SolverResult::Error.value(), None);
    }

    struct Doubling;

    impl Pattern for Doubling {
        fn id(&self) -> &'static str {
            "doubling"
        }

        fn recognizes(&self, text: &str) -> bool {
            text.contains("double")
        }

        fn extract(&self, text: &str) -> Result<Option<Vec<f64>>> {
            Ok(numbers(text)?.first().map(|&n| vec![n]))
        }

        fn compute(&self, operands: &[f64]) -> f64 {
            operands[0] * 2.0
        }
    }

    struct Broken;

    impl Pattern for Broken {
        fn id(&self) -> &'static str {
            "broken"
        }

        fn recognizes(&self, _: &str) -> bool {
            true
        }

        fn extract(&self, _: &str) -> Result<Option<Vec<f64>>> {
            Err(Error::ParseError("cannot extract".into()))
        }

        fn compute(&self, _: &[f64]) -> f64 {
            0.0
        }
    }

    #[test]
    fn registry() {
        let mut solver = Solver::new();
        solver.register(Doubling);
        assert_eq!(
            solver.pattern_ids().collect::<Vec<_>>(),
            vec!["arithmetic-series-sum", "doubling"]
        );

        assert_eq!(solver.solve("Double 21"), SolverResult::Solved(42.0));
        // the arithmetic pattern lacks numbers and gives way
        assert_eq!(
            solver.solve("double the sum of first 4 arithmetic"),
            SolverResult::Solved(8.0)
        );
        assert_eq!(solver.solve("double nothing"), SolverResult::Unrecognized);

        assert_eq!(Solver::empty().solve("sum of first 1 2 3 arithmetic"), SolverResult::Unrecognized);
    }

    #[test]
    fn extraction_failure() {
        let mut solver = Solver::empty();
        solver.register(Broken);
        assert_eq!(solver.solve("anything"), SolverResult::Error);
    }
}
