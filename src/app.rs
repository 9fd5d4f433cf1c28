//! Request/response values for a front end.
//!
//! A front end owns all of its state and hands each user action to
//! [`handle`] as a [`Request`]. Handling is stateless: the same request
//! always gives the same [`Response`].

use crate::error::Error;
use crate::expr::evaluate;
use crate::sequence::{Point, Sequence, SequenceKind, SequenceRequest, DEFAULT_MAX_TERMS};
use crate::word_problem::{solve, SolverResult};
use serde_json::{json, Value};

/// A single user action
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Evaluate a free-form expression
    Evaluate(String),
    /// Generate a sequence
    Sequence(SequenceKind, SequenceRequest),
    /// Solve a word problem
    SolveWordProblem(String),
}

/// The outcome of a [`Request`]
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Rendered result of an expression, or `"Error"`
    Evaluation(String),
    /// A generated sequence
    Sequence(Sequence),
    /// Answer to a word problem
    Answer(SolverResult),
    /// A request refused before running, such as a sequence above the term
    /// limit
    Rejected(Error),
}

/// Run a request to completion, with at most [`DEFAULT_MAX_TERMS`] terms per
/// sequence
#[must_use]
pub fn handle(request: &Request) -> Response {
    handle_with_limit(request, DEFAULT_MAX_TERMS)
}

/// Run a request to completion, refusing sequences of more than `max_terms`
/// terms
#[must_use]
pub fn handle_with_limit(request: &Request, max_terms: usize) -> Response {
    match *request {
        Request::Evaluate(ref expression) => Response::Evaluation(evaluate(expression)),
        Request::Sequence(kind, ref parameters) => match parameters.check_limit(max_terms) {
            Ok(()) => Response::Sequence(parameters.generate(kind)),
            Err(err) => Response::Rejected(err),
        },
        Request::SolveWordProblem(ref text) => Response::Answer(solve(text)),
    }
}

impl Response {
    /// Text for display. Empty for an empty sequence, which has nothing to
    /// show.
    #[must_use]
    pub fn to_text(&self) -> String {
        match *self {
            Self::Evaluation(ref result) => format!("Result: {}", result),
            Self::Sequence(ref sequence) if sequence.is_empty() => String::new(),
            Self::Sequence(ref sequence) => format!("Sequence: {}", sequence),
            Self::Answer(ref answer) => format!("Answer: {}", answer),
            Self::Rejected(ref err) => format!("Error: {}", err),
        }
    }

    /// Machine readable form, for external renderers such as a chart
    #[must_use]
    pub fn to_json(&self) -> Value {
        match *self {
            Self::Evaluation(ref result) => json!({ "result": result }),
            Self::Sequence(ref sequence) => json!({
                "kind": sequence.kind(),
                "terms": sequence.terms(),
                "points": sequence.points(),
            }),
            Self::Answer(SolverResult::Solved(value)) => json!({ "answer": value }),
            Self::Answer(ref answer) => json!({ "answer": answer.to_string() }),
            Self::Rejected(ref err) => json!({ "error": err.to_string() }),
        }
    }

    /// Chart points, for sequence responses
    #[must_use]
    pub fn points(&self) -> Option<Vec<Point>> {
        match *self {
            Self::Sequence(ref sequence) => Some(sequence.points()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate() {
        let response = handle(&Request::Evaluate("2+3*4".into()));
        assert_eq!(response, Response::Evaluation("14".into()));
        assert_eq!(response.to_text(), "Result: 14");
        assert_eq!(response.to_json(), json!({ "result": "14" }));

        let response = handle(&Request::Evaluate("(".into()));
        assert_eq!(response.to_text(), "Result: Error");
    }

    #[test]
    fn sequence() {
        let request = Request::Sequence(
            SequenceKind::Arithmetic,
            SequenceRequest::coerce("1", "2", "3"),
        );
        let response = handle(&request);
        assert_eq!(response.to_text(), "Sequence: 1, 3, 5");
        assert_eq!(
            response.to_json(),
            json!({
                "kind": "arithmetic",
                "terms": [1.0, 3.0, 5.0],
                "points": [
                    { "x": 1, "y": 1.0 },
                    { "x": 2, "y": 3.0 },
                    { "x": 3, "y": 5.0 },
                ],
            })
        );
        assert_eq!(response.points().map(|points| points.len()), Some(3));

        // same request, same response
        assert_eq!(handle(&request), response);
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        let request = Request::Sequence(
            SequenceKind::Geometric,
            SequenceRequest::coerce("1", "2", "0"),
        );
        let response = handle(&request);
        assert_eq!(response.to_text(), "");
        assert_eq!(response.to_json()["terms"], json!([]));
    }

    #[test]
    fn unbounded_count_is_rejected() {
        for count in ["Infinity", "1e12"] {
            let request = Request::Sequence(
                SequenceKind::Arithmetic,
                SequenceRequest::coerce("1", "1", count),
            );
            let response = handle(&request);
            assert!(
                matches!(response, Response::Rejected(Error::TooManyTerms { .. })),
                "{:?}",
                response
            );
            assert!(response.to_text().starts_with("Error: TooManyTerms"));
            assert_eq!(response.points(), None);
        }
    }

    #[test]
    fn custom_limit() {
        let request = Request::Sequence(
            SequenceKind::Geometric,
            SequenceRequest::coerce("1", "2", "4"),
        );
        assert_eq!(
            handle_with_limit(&request, 3),
            Response::Rejected(Error::TooManyTerms {
                requested: 4,
                limit: 3
            })
        );
        assert_eq!(
            handle_with_limit(&request, 3).to_json(),
            json!({ "error": "TooManyTerms: 4 terms requested, the limit is 3" })
        );
        assert_eq!(
            handle_with_limit(&request, 4).to_text(),
            "Sequence: 1, 2, 4, 8"
        );
    }

    #[test]
    fn word_problem() {
        let response = handle(&Request::SolveWordProblem(
            "sum of first terms, arithmetic, a=1 d=2 n=10".into(),
        ));
        assert_eq!(response.to_text(), "Answer: 100");
        assert_eq!(response.to_json(), json!({ "answer": 100.0 }));
        assert_eq!(response.points(), None);

        let response = handle(&Request::SolveWordProblem("what is love".into()));
        assert_eq!(response.to_text(), "Answer: Cannot solve this problem yet");
        assert_eq!(
            response.to_json(),
            json!({ "answer": "Cannot solve this problem yet" })
        );
    }
}
