use crate::ast::{BinaryOperator, Expr, FieldRef};
use crate::parser::parse_formula;

use super::{EvalError, EvalResult};

/// Evaluates formula expressions against a field-lookup function.
///
/// The evaluator is re-entrant and stateless; the same expression may be
/// evaluated once per row of a table and independently per display item.
/// A lookup returning `None` is the typed NotFound token and fails the whole
/// expression with [`EvalError::MissingField`] — a missing reference never
/// degrades to a partial numeric result.
#[derive(Default)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Parses and evaluates a formula source string in one step.
    pub fn evaluate<F>(&self, source: &str, lookup: &F) -> EvalResult<f64>
    where
        F: Fn(&FieldRef) -> Option<f64>,
    {
        let expr = parse_formula(source)?;
        self.eval_expr(&expr, lookup)
    }

    pub fn eval_expr<F>(&self, expr: &Expr, lookup: &F) -> EvalResult<f64>
    where
        F: Fn(&FieldRef) -> Option<f64>,
    {
        match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Field(field_ref) => {
                lookup(field_ref).ok_or_else(|| EvalError::MissingField(field_ref.to_string()))
            }
            Expr::Negate(inner) => Ok(-self.eval_expr(inner, lookup)?),
            Expr::BinaryOp { op, left, right } => {
                let left_val = self.eval_expr(left, lookup)?;
                let right_val = self.eval_expr(right, lookup)?;
                self.eval_binary_op(*op, left_val, right_val)
            }
        }
    }

    fn eval_binary_op(&self, op: BinaryOperator, left: f64, right: f64) -> EvalResult<f64> {
        match op {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Subtract => Ok(left - right),
            BinaryOperator::Multiply => Ok(left * right),
            BinaryOperator::Divide => {
                if right == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }
}
