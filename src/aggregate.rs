//! # Occurrence Aggregator
//!
//! Collapses every occurrence of one catalog option type within a single
//! order down to one number, per the rule's multiple-occurrence policy.
//!
//! The two-operand policies depend on occurrence order: they use the first
//! two matching occurrences in the array order the occurrences were
//! supplied, which is the order of appearance on the order record. They are
//! never sorted by any other key.

use tracing::debug;

use crate::eval::{EvalError, EvalResult};
use crate::model::MultipleOccurrencePolicy;
use crate::order::OptionOccurrence;

/// Filters `occurrences` to `option_type_id`, extracts `spec_field` from
/// every match, and reduces per `policy`.
///
/// Zero matching occurrences is [`EvalError::NoOccurrences`], never zero;
/// a two-operand policy with a single match is
/// [`EvalError::InsufficientOccurrences`]. A matching occurrence without a
/// numeric value for the field fails the whole aggregation as
/// [`EvalError::MissingField`] rather than being silently skipped.
pub fn aggregate(
    occurrences: &[OptionOccurrence],
    option_type_id: &str,
    spec_field: &str,
    policy: MultipleOccurrencePolicy,
) -> EvalResult<f64> {
    let mut values = Vec::new();
    for occurrence in occurrences
        .iter()
        .filter(|o| o.option_type_id == option_type_id)
    {
        let value = occurrence
            .field(spec_field)
            .and_then(|v| v.as_number())
            .ok_or_else(|| {
                EvalError::MissingField(format!("{}.{}", occurrence.option_type_name, spec_field))
            })?;
        values.push(value);
    }

    if values.is_empty() {
        return Err(EvalError::NoOccurrences);
    }
    debug!(option_type_id, spec_field, policy = %policy, count = values.len(), "aggregating occurrences");

    match policy {
        MultipleOccurrencePolicy::AllSum => Ok(values.iter().sum()),
        MultipleOccurrencePolicy::AverageAll => {
            Ok(values.iter().sum::<f64>() / values.len() as f64)
        }
        MultipleOccurrencePolicy::MultiplyAll => Ok(values.iter().product()),
        MultipleOccurrencePolicy::FirstMinusSecond => {
            let (first, second) = first_two(&values)?;
            Ok(first - second)
        }
        MultipleOccurrencePolicy::SecondMinusFirst => {
            let (first, second) = first_two(&values)?;
            Ok(second - first)
        }
    }
}

// More than two matches uses only the first two, in supplied order.
fn first_two(values: &[f64]) -> EvalResult<(f64, f64)> {
    match values {
        [first, second, ..] => Ok((*first, *second)),
        _ => Err(EvalError::InsufficientOccurrences {
            needed: 2,
            found: values.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Value;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn occurrence(type_id: &str, qty: f64) -> OptionOccurrence {
        OptionOccurrence {
            option_type_id: type_id.to_string(),
            option_type_name: "Product".to_string(),
            option_spec_id: "OS-1".to_string(),
            values: HashMap::from([("qty".to_string(), Value::Number(qty))]),
        }
    }

    fn two_products() -> Vec<OptionOccurrence> {
        vec![occurrence("OT-1", 27.0), occurrence("OT-1", 20.0)]
    }

    #[test]
    fn test_all_policies_over_two_occurrences() {
        let occurrences = two_products();
        let run = |policy| aggregate(&occurrences, "OT-1", "qty", policy);
        assert_eq!(run(MultipleOccurrencePolicy::AllSum), Ok(47.0));
        assert_eq!(run(MultipleOccurrencePolicy::AverageAll), Ok(23.5));
        assert_eq!(run(MultipleOccurrencePolicy::MultiplyAll), Ok(540.0));
        assert_eq!(run(MultipleOccurrencePolicy::FirstMinusSecond), Ok(7.0));
        assert_eq!(run(MultipleOccurrencePolicy::SecondMinusFirst), Ok(-7.0));
    }

    #[test]
    fn test_zero_matches_is_no_occurrences() {
        let occurrences = two_products();
        assert_eq!(
            aggregate(&occurrences, "OT-9", "qty", MultipleOccurrencePolicy::AllSum),
            Err(EvalError::NoOccurrences)
        );
    }

    #[test]
    fn test_single_occurrence_with_two_operand_policy() {
        let occurrences = vec![occurrence("OT-1", 27.0)];
        assert_eq!(
            aggregate(
                &occurrences,
                "OT-1",
                "qty",
                MultipleOccurrencePolicy::FirstMinusSecond
            ),
            Err(EvalError::InsufficientOccurrences {
                needed: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_two_operand_policy_uses_first_two_in_supplied_order() {
        // Deliberately not sorted: the supplied order is load-bearing.
        let occurrences = vec![
            occurrence("OT-1", 5.0),
            occurrence("OT-1", 50.0),
            occurrence("OT-1", 500.0),
        ];
        assert_eq!(
            aggregate(
                &occurrences,
                "OT-1",
                "qty",
                MultipleOccurrencePolicy::FirstMinusSecond
            ),
            Ok(-45.0)
        );
        assert_eq!(
            aggregate(
                &occurrences,
                "OT-1",
                "qty",
                MultipleOccurrencePolicy::SecondMinusFirst
            ),
            Ok(45.0)
        );
    }

    #[test]
    fn test_non_numeric_field_fails_loudly() {
        let mut bad = occurrence("OT-1", 0.0);
        bad.values
            .insert("qty".to_string(), Value::Text("wide".to_string()));
        let occurrences = vec![occurrence("OT-1", 10.0), bad];
        assert_eq!(
            aggregate(&occurrences, "OT-1", "qty", MultipleOccurrencePolicy::AllSum),
            Err(EvalError::MissingField("Product.qty".to_string()))
        );
    }

    #[test]
    fn test_interleaved_types_filter_before_reducing() {
        let occurrences = vec![
            occurrence("OT-2", 1000.0),
            occurrence("OT-1", 27.0),
            occurrence("OT-2", 2000.0),
            occurrence("OT-1", 20.0),
        ];
        assert_eq!(
            aggregate(&occurrences, "OT-1", "qty", MultipleOccurrencePolicy::AllSum),
            Ok(47.0)
        );
    }
}
