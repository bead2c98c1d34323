use formwork::ast::{BinaryOperator, Expr, FieldRef};
use formwork::eval::{EvalError, ExpressionEvaluator};
use formwork::parser::{parse_formula, FormulaError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn eval(source: &str) -> Result<f64, EvalError> {
    ExpressionEvaluator::new().evaluate(source, &|_: &FieldRef| None)
}

#[test]
fn test_full_pipeline_for_a_wizard_formula() {
    let expr = parse_formula("width * height / 1000").unwrap();
    assert_eq!(
        expr,
        Expr::BinaryOp {
            op: BinaryOperator::Divide,
            left: Box::new(Expr::BinaryOp {
                op: BinaryOperator::Multiply,
                left: Box::new(Expr::Field(FieldRef::Bare("width".to_string()))),
                right: Box::new(Expr::Field(FieldRef::Bare("height".to_string()))),
            }),
            right: Box::new(Expr::Number(1000.0)),
        }
    );
}

#[test]
fn test_qualified_references_survive_the_pipeline() {
    let expr = parse_formula("Material.gauge * Product.width + 2.5").unwrap();
    assert_eq!(
        expr.references(),
        vec![
            FieldRef::Qualified {
                entity: "Material".to_string(),
                field: "gauge".to_string(),
            },
            FieldRef::Qualified {
                entity: "Product".to_string(),
                field: "width".to_string(),
            },
        ]
    );
}

#[test]
fn test_malformed_formulas_are_diagnosed_not_panicked() {
    assert!(matches!(parse_formula(""), Err(FormulaError::Parse(_))));
    // A dangling operator leaves the trailing token unconsumed.
    assert!(matches!(
        parse_formula("width +"),
        Err(FormulaError::TrailingTokens(_))
    ));
    assert!(matches!(
        parse_formula("width % 2"),
        Err(FormulaError::Tokenize(_))
    ));
    assert!(matches!(
        parse_formula("(width"),
        Err(FormulaError::Parse(_))
    ));
    assert!(matches!(
        parse_formula("width height"),
        Err(FormulaError::TrailingTokens(_))
    ));
}

#[test]
fn test_display_round_trips_through_the_parser() {
    for source in ["width * height / 1000", "(a + b) * c", "-(a + b)"] {
        let expr = parse_formula(source).unwrap();
        let reparsed = parse_formula(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed, "source: {}", source);
    }
}

proptest! {
    #[test]
    fn prop_multiplication_binds_tighter_than_addition(
        a in -999i32..999,
        b in -999i32..999,
        c in -999i32..999,
    ) {
        let source = format!("{} + {} * {}", a, b, c);
        prop_assert_eq!(eval(&source), Ok(a as f64 + b as f64 * c as f64));
    }

    #[test]
    fn prop_parentheses_override_precedence(
        a in -999i32..999,
        b in -999i32..999,
        c in 1i32..999,
    ) {
        let source = format!("({} + {}) * {}", a, b, c);
        prop_assert_eq!(eval(&source), Ok((a as f64 + b as f64) * c as f64));
    }

    #[test]
    fn prop_subtraction_associates_left(
        a in -999i32..999,
        b in -999i32..999,
        c in -999i32..999,
    ) {
        let source = format!("{} - {} - {}", a, b, c);
        prop_assert_eq!(eval(&source), Ok(a as f64 - b as f64 - c as f64));
    }

    #[test]
    fn prop_division_by_nonzero_is_finite(
        a in -999i32..999,
        b in 1i32..999,
    ) {
        let source = format!("{} / {}", a, b);
        let result = eval(&source).unwrap();
        prop_assert!(result.is_finite());
        prop_assert_eq!(result, a as f64 / b as f64);
    }
}
