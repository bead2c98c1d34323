//! # Expression Evaluation
//!
//! Stateless evaluation of parsed formulas, and the error taxonomy shared by
//! every computed slot of a template. Errors are values: one failing cell
//! must not prevent the rest of the template from rendering, so nothing in
//! this module panics or throws past its caller.

use thiserror::Error;

use crate::parser::FormulaError;

pub mod expression;

pub use expression::ExpressionEvaluator;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A referenced symbolic field has no corresponding value in the
    /// supplied order, customer or option data. Never silently substituted
    /// with zero.
    #[error("missing field: {0}")]
    MissingField(String),
    /// An expression attempted division by a zero divisor. Surfaced as an
    /// error rather than infinity so non-finite values never reach totals.
    #[error("division by zero")]
    DivisionByZero,
    /// An aggregation rule matched no occurrences of its option type.
    #[error("no matching occurrences")]
    NoOccurrences,
    /// A two-operand aggregation policy had fewer occurrences than it needs.
    #[error("insufficient occurrences: policy needs {needed}, found {found}")]
    InsufficientOccurrences { needed: usize, found: usize },
    /// A column or display item lacks its required source-specific fields
    /// and is skipped rather than evaluated.
    #[error("incomplete configuration: {0}")]
    IncompleteConfiguration(String),
    /// The formula source itself failed to tokenize or parse.
    #[error("formula error: {0}")]
    Formula(#[from] FormulaError),
}
