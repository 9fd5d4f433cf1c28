//! Arithmetic and geometric sequence generation.
//!
//! A [`SequenceRequest`] carries the three raw parameters (first term, common
//! difference or ratio, number of terms). Requests are built from user input
//! with [`SequenceRequest::coerce`], which never fails, or with
//! [`SequenceRequest::parse_strict`], which rejects anything that is not a
//! proper number.

use crate::error::{Error, Result};
use crate::format;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use tracing::debug;

/// Largest number of terms generated for a request when the caller sets no
/// limit of its own.
pub const DEFAULT_MAX_TERMS: usize = 10_000;

/// The two supported progressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    /// Constant difference between consecutive terms
    Arithmetic,
    /// Constant ratio between consecutive terms
    Geometric,
}

impl SequenceKind {
    /// Value of the term at 0-based `index`.
    #[must_use]
    pub fn term(self, first_term: f64, step: f64, index: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let i = index as f64;
        match self {
            Self::Arithmetic => first_term + i * step,
            Self::Geometric => first_term * step.powf(i),
        }
    }
}

impl Display for SequenceKind {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Arithmetic => write!(fmt, "arithmetic"),
            Self::Geometric => write!(fmt, "geometric"),
        }
    }
}

/// Convert a raw input value to a number.
///
/// Blank input is zero. Decimal literals (optional sign, fraction and
/// exponent), `Infinity` with an optional sign and `0x`/`0o`/`0b` integers
/// are accepted; anything else is `NaN`.
///
/// ```
/// use amath::coerce_number;
///
/// assert_eq!(coerce_number(" 2.5 "), 2.5);
/// assert_eq!(coerce_number(""), 0.0);
/// assert_eq!(coerce_number("0x10"), 16.0);
/// assert!(coerce_number("two").is_nan());
/// ```
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
            return f64::NAN;
        }
        #[allow(clippy::cast_precision_loss)]
        return u128::from_str_radix(digits, radix).map_or(f64::NAN, |value| value as f64);
    }

    let is_decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_decimal {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Convert a raw input value to a number of terms.
///
/// Invalid, zero and negative values give 0, fractional values are truncated.
///
/// ```
/// use amath::coerce_count;
///
/// assert_eq!(coerce_count("5"), 5);
/// assert_eq!(coerce_count("4.9"), 4);
/// assert_eq!(coerce_count("-3"), 0);
/// assert_eq!(coerce_count("many"), 0);
/// ```
#[must_use]
pub fn coerce_count(raw: &str) -> usize {
    let count = coerce_number(raw);
    if count.is_nan() || count <= 0.0 {
        return 0;
    }
    // saturating conversion, `inf` becomes usize::MAX
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count.trunc() as usize;
    count
}

/// The parameters of a sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceRequest {
    /// First term of the sequence
    pub first_term: f64,
    /// Common difference (arithmetic) or ratio (geometric)
    pub step: f64,
    /// Number of terms to generate
    pub count: usize,
}

impl SequenceRequest {
    /// Create a request from already numeric values
    #[must_use]
    pub fn new(first_term: f64, step: f64, count: usize) -> Self {
        Self {
            first_term,
            step,
            count,
        }
    }

    /// Build a request from raw text inputs, coercing invalid values instead
    /// of failing: `NaN` for the first term and step, 0 for the count.
    #[must_use]
    pub fn coerce(first_term: &str, step: &str, count: &str) -> Self {
        Self::new(
            coerce_number(first_term),
            coerce_number(step),
            coerce_count(count),
        )
    }

    /// Build a request from raw text inputs, rejecting anything that is not a
    /// finite number, or a count that is not a non-negative integer.
    pub fn parse_strict(first_term: &str, step: &str, count: &str) -> Result<Self> {
        let first_term = strict_number("first_term", first_term)?;
        let step = strict_number("step", step)?;

        let raw_count = count;
        let count = strict_number("count", raw_count)?;
        if count < 0.0 || count.fract() != 0.0 || count > usize::MAX as f64 {
            return Err(Error::InvalidInput {
                field: "count",
                value: raw_count.into(),
                expected: "non-negative integer",
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = count as usize;

        Ok(Self::new(first_term, step, count))
    }

    /// Reject requests for more than `limit` terms.
    pub fn check_limit(&self, limit: usize) -> Result<()> {
        if self.count > limit {
            return Err(Error::TooManyTerms {
                requested: self.count,
                limit,
            });
        }
        Ok(())
    }

    /// Generate the sequence of the given `kind`
    #[must_use]
    pub fn generate(&self, kind: SequenceKind) -> Sequence {
        debug!(%kind, first_term = self.first_term, step = self.step, count = self.count, "generating sequence");
        let terms = (0..self.count)
            .map(|i| kind.term(self.first_term, self.step, i))
            .collect();
        Sequence { kind, terms }
    }
}

fn strict_number(field: &'static str, raw: &str) -> Result<f64> {
    let value = coerce_number(raw);
    if raw.trim().is_empty() || !value.is_finite() {
        return Err(Error::InvalidInput {
            field,
            value: raw.into(),
            expected: "finite number",
        });
    }
    Ok(value)
}

/// A point of the chart of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// 1-based index of the term
    pub x: usize,
    /// Value of the term
    pub y: f64,
}

/// A generated sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
    kind: SequenceKind,
    terms: Vec<f64>,
}

impl Sequence {
    /// The progression this sequence follows
    #[must_use]
    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    /// The terms, in order
    #[must_use]
    pub fn terms(&self) -> &[f64] {
        &self.terms
    }

    /// Number of terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the sequence has no term
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Chart points: x is the 1-based index, y the term value
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, &y)| Point { x: i + 1, y })
            .collect()
    }

    /// Consume the sequence, returning its terms
    #[must_use]
    pub fn into_terms(self) -> Vec<f64> {
        self.terms
    }
}

impl Display for Sequence {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", format::join(&self.terms))
    }
}

/// Generate `count` terms of the arithmetic sequence starting at
/// `first_term` with common difference `step`.
///
/// ```
/// assert_eq!(amath::arithmetic(1.0, 2.0, 5).terms(), &[1.0, 3.0, 5.0, 7.0, 9.0]);
/// ```
#[must_use]
pub fn arithmetic(first_term: f64, step: f64, count: usize) -> Sequence {
    SequenceRequest::new(first_term, step, count).generate(SequenceKind::Arithmetic)
}

/// Generate `count` terms of the geometric sequence starting at
/// `first_term` with common ratio `ratio`.
///
/// ```
/// assert_eq!(amath::geometric(1.0, 2.0, 5).terms(), &[1.0, 2.0, 4.0, 8.0, 16.0]);
/// ```
#[must_use]
pub fn geometric(first_term: f64, ratio: f64, count: usize) -> Sequence {
    SequenceRequest::new(first_term, ratio, count).generate(SequenceKind::Geometric)
}
