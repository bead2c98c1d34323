//! # Template Runtime
//!
//! Orchestrates one evaluation: a normalized [`TemplateConfig`] plus one
//! [`Order`] in, an [`EvaluatedTemplate`] out. Every computed slot — table
//! cell, display item, calculation rule, totals entry — carries its own
//! value or its own typed failure; one failing slot never aborts the rest.
//!
//! Evaluation is pure and synchronous. Invoking it twice with identical
//! inputs yields identical output, and independent (template, order) pairs
//! may be evaluated concurrently without coordination.

use std::collections::HashMap;

use tracing::debug;

use crate::aggregate::aggregate;
use crate::ast::{Expr, FieldRef};
use crate::eval::{EvalError, EvalResult, ExpressionEvaluator};
use crate::model::{
    ColumnConfig, ColumnSource, DisplaySource, TemplateConfig, TotalsFormula,
};
use crate::order::{ManualEntry, Order, Value};
use crate::parser::parse_formula;
use crate::resolver;

/// What end users see in a slot whose evaluation failed.
pub const NOT_AVAILABLE: &str = "N/A";

/// A successfully resolved slot value with its declared unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CellValue {
    pub value: Value,
    pub unit: Option<String>,
    /// Boolean-style values render as Yes/No when the template's spec
    /// selection asked for it.
    pub show_yes_no: bool,
}

impl CellValue {
    fn bare(value: Value) -> Self {
        Self {
            value,
            unit: None,
            show_yes_no: false,
        }
    }

    fn number(n: f64) -> Self {
        Self::bare(Value::Number(n))
    }

    pub fn display_text(&self) -> String {
        match &self.value {
            Value::Boolean(b) if self.show_yes_no => {
                if *b { "Yes" } else { "No" }.to_string()
            }
            value => match &self.unit {
                Some(unit) if !value.is_null() => format!("{} {}", value, unit),
                _ => value.to_string(),
            },
        }
    }
}

/// Value-or-typed-failure for one computed slot. The error kind is kept for
/// diagnostic tooling, distinct from the opaque "N/A" shown to end users.
pub type SlotOutcome = Result<CellValue, EvalError>;

/// Renders a slot the way the data-entry screen does.
pub fn display_text(outcome: &SlotOutcome) -> String {
    match outcome {
        Ok(cell) => cell.display_text(),
        Err(_) => NOT_AVAILABLE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedColumn {
    pub column_id: String,
    pub name: String,
    pub label: String,
    pub outcome: SlotOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedRow {
    pub cells: Vec<EvaluatedColumn>,
}

impl EvaluatedRow {
    pub fn cell(&self, column_name: &str) -> Option<&EvaluatedColumn> {
        self.cells.iter().find(|c| c.name == column_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedDisplayItem {
    pub item_id: String,
    pub label: String,
    pub outcome: SlotOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedRule {
    pub rule_id: String,
    pub label: String,
    pub show_in_summary: bool,
    pub outcome: SlotOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedTotal {
    pub column_name: String,
    pub label: String,
    pub is_visible: bool,
    pub outcome: SlotOutcome,
}

/// The sole interface consumed by rendering and export code.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedTemplate {
    pub rows: Vec<EvaluatedRow>,
    pub display_items: Vec<EvaluatedDisplayItem>,
    pub rule_results: Vec<EvaluatedRule>,
    pub totals: Vec<EvaluatedTotal>,
}

/// Evaluates one template against one order.
#[tracing::instrument(
    level = "debug",
    skip(template, order),
    fields(template = %template.template_name, order = %order.order_id)
)]
pub fn evaluate_template(template: &TemplateConfig, order: &Order) -> EvaluatedTemplate {
    let template = template.normalized();
    let evaluator = ExpressionEvaluator::new();

    // Formulas are parsed once per evaluation, not once per row.
    let parsed_formulas = parse_column_formulas(&template);

    // Stable sort: the `order` key decides, configuration order breaks ties.
    let mut columns: Vec<&ColumnConfig> = template.columns.iter().collect();
    columns.sort_by_key(|c| c.order);

    // An order without entered rows still renders one row, so columns fed
    // from the order, customer and option data appear.
    let empty_entry = ManualEntry::default();
    let entries: Vec<&ManualEntry> = if order.entries.is_empty() {
        vec![&empty_entry]
    } else {
        order.entries.iter().collect()
    };

    let rows: Vec<EvaluatedRow> = entries
        .iter()
        .map(|entry| evaluate_row(&template, order, &columns, &parsed_formulas, entry, &evaluator))
        .collect();

    let display_items = evaluate_display_items(&template, order, &rows, &evaluator);
    let rule_results = evaluate_rules(&template, order);
    let totals = evaluate_totals(&template, &rows, &evaluator);

    EvaluatedTemplate {
        rows,
        display_items,
        rule_results,
        totals,
    }
}

fn parse_column_formulas(template: &TemplateConfig) -> HashMap<String, Result<Expr, EvalError>> {
    let mut parsed = HashMap::new();
    for column in &template.columns {
        if let Ok(ColumnSource::Calculated { formula }) = column.source() {
            let expr = parse_formula(&formula.expression).map_err(EvalError::from);
            parsed.insert(column.id.clone(), expr);
        }
    }
    parsed
}

fn evaluate_row(
    template: &TemplateConfig,
    order: &Order,
    columns: &[&ColumnConfig],
    parsed_formulas: &HashMap<String, Result<Expr, EvalError>>,
    entry: &ManualEntry,
    evaluator: &ExpressionEvaluator,
) -> EvaluatedRow {
    let mut cells = Vec::with_capacity(columns.len());
    // Numeric cell values computed so far, for formula references. Columns
    // evaluate in their sort order, so a formula sees everything before it.
    let mut computed: HashMap<String, f64> = HashMap::new();

    for column in columns {
        let outcome = evaluate_cell(template, order, column, parsed_formulas, entry, &computed, evaluator);

        if let Ok(cell) = &outcome {
            if let Some(n) = cell.value.as_number() {
                computed.insert(column.name.clone(), n);
            }
        }
        if let Err(e) = &outcome {
            debug!(column = %column.name, error = %e, "column cell failed to evaluate");
        }

        cells.push(EvaluatedColumn {
            column_id: column.id.clone(),
            name: column.name.clone(),
            label: column.label.clone(),
            outcome,
        });
    }

    EvaluatedRow { cells }
}

fn evaluate_cell(
    template: &TemplateConfig,
    order: &Order,
    column: &ColumnConfig,
    parsed_formulas: &HashMap<String, Result<Expr, EvalError>>,
    entry: &ManualEntry,
    computed: &HashMap<String, f64>,
    evaluator: &ExpressionEvaluator,
) -> SlotOutcome {
    match column.source()? {
        ColumnSource::Manual => match resolver::resolve_manual_field(entry, &column.name) {
            Some(value) => Ok(CellValue::bare(value)),
            None if column.is_required => Err(EvalError::MissingField(column.name.clone())),
            None => Ok(CellValue::bare(Value::Null)),
        },
        ColumnSource::Order { source_field } => resolver::resolve_order_field(order, &source_field)
            .map(CellValue::bare)
            .ok_or(EvalError::MissingField(source_field)),
        ColumnSource::Customer { source_field } => {
            resolver::resolve_customer_field(&order.customer, &source_field)
                .map(CellValue::bare)
                .ok_or(EvalError::MissingField(source_field))
        }
        ColumnSource::OptionSpec(spec) => resolver::resolve_option_spec(&order.occurrences, &spec)
            .map(|value| CellValue {
                value,
                unit: spec.spec_field_unit.clone(),
                show_yes_no: template.show_yes_no(&spec.option_spec_id),
            })
            .ok_or_else(|| {
                EvalError::MissingField(format!("{}.{}", spec.option_type_id, spec.spec_field))
            }),
        ColumnSource::Calculated { .. } => {
            let expr = parsed_formulas
                .get(&column.id)
                .ok_or_else(|| {
                    EvalError::IncompleteConfiguration(format!(
                        "column {:?}: calculated column without a formula",
                        column.name
                    ))
                })?
                .as_ref()
                .map_err(Clone::clone)?;
            let lookup = |field_ref: &FieldRef| -> Option<f64> {
                match field_ref {
                    FieldRef::Bare(name) => computed
                        .get(name)
                        .copied()
                        .or_else(|| entry.get(name).and_then(|v| v.as_number())),
                    FieldRef::Qualified { entity, field } => {
                        resolver::resolve_qualified(&order.occurrences, entity, field)
                            .and_then(|v| v.as_number())
                    }
                }
            };
            evaluator.eval_expr(expr, &lookup).map(CellValue::number)
        }
    }
}

fn evaluate_display_items(
    template: &TemplateConfig,
    order: &Order,
    rows: &[EvaluatedRow],
    evaluator: &ExpressionEvaluator,
) -> Vec<EvaluatedDisplayItem> {
    let mut items: Vec<_> = template
        .display_items
        .iter()
        .filter(|item| item.is_visible)
        .collect();
    items.sort_by_key(|item| item.order);

    items
        .into_iter()
        .map(|item| {
            let outcome = evaluate_display_item(template, order, rows, item, evaluator);
            if let Err(e) = &outcome {
                debug!(item = %item.label, error = %e, "display item failed to evaluate");
            }
            EvaluatedDisplayItem {
                item_id: item.id.clone(),
                label: item.label.clone(),
                outcome,
            }
        })
        .collect()
}

fn evaluate_display_item(
    template: &TemplateConfig,
    order: &Order,
    rows: &[EvaluatedRow],
    item: &crate::model::DisplayItemConfig,
    evaluator: &ExpressionEvaluator,
) -> SlotOutcome {
    match item.source()? {
        DisplaySource::OptionSpec(spec) => resolver::resolve_option_spec(&order.occurrences, &spec)
            .map(|value| CellValue {
                value,
                unit: spec.spec_field_unit.clone(),
                show_yes_no: template.show_yes_no(&spec.option_spec_id),
            })
            .ok_or_else(|| {
                EvalError::MissingField(format!("{}.{}", spec.option_type_id, spec.spec_field))
            }),
        DisplaySource::Order { source_field } => resolver::resolve_order_field(order, &source_field)
            .map(CellValue::bare)
            .ok_or(EvalError::MissingField(source_field)),
        DisplaySource::Customer { source_field } => {
            resolver::resolve_customer_field(&order.customer, &source_field)
                .map(CellValue::bare)
                .ok_or(EvalError::MissingField(source_field))
        }
        DisplaySource::Formula(formula) => {
            // Bare references resolve against the first row's cells; panel
            // formulas summarize the table, they have no row of their own.
            let lookup = |field_ref: &FieldRef| -> Option<f64> {
                match field_ref {
                    FieldRef::Bare(name) => rows
                        .first()
                        .and_then(|row| row.cell(name))
                        .and_then(|cell| cell.outcome.as_ref().ok())
                        .and_then(|cell| cell.value.as_number()),
                    FieldRef::Qualified { entity, field } => {
                        resolver::resolve_qualified(&order.occurrences, entity, field)
                            .and_then(|v| v.as_number())
                    }
                }
            };
            evaluator
                .evaluate(&formula.expression, &lookup)
                .map(CellValue::number)
        }
    }
}

fn evaluate_rules(template: &TemplateConfig, order: &Order) -> Vec<EvaluatedRule> {
    template
        .calculation_rules
        .iter()
        .filter(|rule| rule.is_active)
        .map(|rule| {
            let outcome = aggregate(
                &order.occurrences,
                &rule.option_type_id,
                &rule.spec_field,
                rule.multiple_occurrence,
            )
            .map(|n| CellValue {
                value: Value::Number(n),
                unit: rule.result_unit.clone(),
                show_yes_no: false,
            });
            if let Err(e) = &outcome {
                debug!(rule = %rule.result_label, error = %e, "calculation rule failed");
            }
            EvaluatedRule {
                rule_id: rule.id.clone(),
                label: rule.result_label.clone(),
                show_in_summary: rule.show_in_summary,
                outcome,
            }
        })
        .collect()
}

fn evaluate_totals(
    template: &TemplateConfig,
    rows: &[EvaluatedRow],
    evaluator: &ExpressionEvaluator,
) -> Vec<EvaluatedTotal> {
    // Non-custom totals first; custom expressions reference them by column
    // name, in totals scope only.
    let mut totals_values: HashMap<String, f64> = HashMap::new();
    let mut results: Vec<(usize, EvaluatedTotal)> = Vec::new();

    for (index, total) in template.totals_config.iter().enumerate() {
        if total.formula == TotalsFormula::Custom {
            continue;
        }
        let outcome = reduce_column(template, rows, &total.column_name, total.formula).map(|n| {
            CellValue {
                value: Value::Number(n),
                unit: total.unit.clone(),
                show_yes_no: false,
            }
        });
        if let Ok(cell) = &outcome {
            if let Some(n) = cell.value.as_number() {
                totals_values.insert(total.column_name.clone(), n);
            }
        }
        results.push((
            index,
            EvaluatedTotal {
                column_name: total.column_name.clone(),
                label: total.label.clone(),
                is_visible: total.is_visible,
                outcome,
            },
        ));
    }

    for (index, total) in template.totals_config.iter().enumerate() {
        if total.formula != TotalsFormula::Custom {
            continue;
        }
        let outcome = match &total.custom_formula {
            Some(formula) => {
                let lookup = |field_ref: &FieldRef| -> Option<f64> {
                    match field_ref {
                        FieldRef::Bare(name) => totals_values.get(name).copied(),
                        FieldRef::Qualified { .. } => None,
                    }
                };
                evaluator
                    .evaluate(&formula.expression, &lookup)
                    .map(|n| CellValue {
                        value: Value::Number(n),
                        unit: total.unit.clone(),
                        show_yes_no: false,
                    })
            }
            None => Err(EvalError::IncompleteConfiguration(format!(
                "totals {:?}: CUSTOM without an expression",
                total.label
            ))),
        };
        if let Err(e) = &outcome {
            debug!(total = %total.label, error = %e, "totals entry failed");
        }
        results.push((
            index,
            EvaluatedTotal {
                column_name: total.column_name.clone(),
                label: total.label.clone(),
                is_visible: total.is_visible,
                outcome,
            },
        ));
    }

    // Back to configuration order regardless of evaluation phase.
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, total)| total).collect()
}

fn reduce_column(
    template: &TemplateConfig,
    rows: &[EvaluatedRow],
    column_name: &str,
    formula: TotalsFormula,
) -> EvalResult<f64> {
    if !template.columns.iter().any(|c| c.name == column_name) {
        return Err(EvalError::MissingField(column_name.to_string()));
    }

    let mut values = Vec::new();
    let mut present = 0usize;
    for row in rows {
        if let Some(cell) = row.cell(column_name) {
            if let Ok(cell) = &cell.outcome {
                if !cell.value.is_null() {
                    present += 1;
                }
                if let Some(n) = cell.value.as_number() {
                    values.push(n);
                }
            }
        }
    }

    match formula {
        TotalsFormula::Sum => Ok(values.iter().sum()),
        TotalsFormula::Count => Ok(present as f64),
        TotalsFormula::Average => {
            if values.is_empty() {
                Err(EvalError::NoOccurrences)
            } else {
                Ok(values.iter().sum::<f64>() / values.len() as f64)
            }
        }
        TotalsFormula::Multiply => {
            if values.is_empty() {
                Err(EvalError::NoOccurrences)
            } else {
                Ok(values.iter().product())
            }
        }
        TotalsFormula::Divide => {
            let (first, rest) = values.split_first().ok_or(EvalError::NoOccurrences)?;
            rest.iter().try_fold(*first, |acc, divisor| {
                if *divisor == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(acc / divisor)
                }
            })
        }
        // Custom totals are evaluated against the other totals entries, not
        // against a column; handled by the caller.
        TotalsFormula::Custom => Err(EvalError::IncompleteConfiguration(format!(
            "totals for {:?}: CUSTOM is not a column reduction",
            column_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CalculationRule, CalculationType, ColumnDataType, FormulaSpec, MultipleOccurrencePolicy,
        SourceType, TotalsConfig,
    };
    use crate::order::OptionOccurrence;
    use pretty_assertions::assert_eq;

    fn manual_column(id: &str, name: &str) -> ColumnConfig {
        ColumnConfig {
            id: id.to_string(),
            name: name.to_string(),
            label: name.to_string(),
            data_type: ColumnDataType::Number,
            order: 0,
            width: None,
            is_required: false,
            is_read_only: false,
            is_visible: true,
            source_type: SourceType::Manual,
            source_field: None,
            option_type_id: None,
            option_spec_id: None,
            spec_field: None,
            spec_field_unit: None,
            formula: None,
            dropdown_options: vec![],
        }
    }

    fn formula_column(id: &str, name: &str, expression: &str) -> ColumnConfig {
        ColumnConfig {
            data_type: ColumnDataType::Formula,
            source_type: SourceType::Calculated,
            is_read_only: true,
            order: 10,
            formula: Some(FormulaSpec {
                expression: expression.to_string(),
                dependencies: vec![],
            }),
            ..manual_column(id, name)
        }
    }

    fn entry(pairs: &[(&str, f64)]) -> ManualEntry {
        ManualEntry {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::Number(*v)))
                .collect(),
        }
    }

    fn product_occurrence(qty: f64) -> OptionOccurrence {
        OptionOccurrence {
            option_type_id: "OT-1".to_string(),
            option_type_name: "Product".to_string(),
            option_spec_id: "OS-1".to_string(),
            values: HashMap::from([("qty".to_string(), Value::Number(qty))]),
        }
    }

    fn template_with(columns: Vec<ColumnConfig>) -> TemplateConfig {
        TemplateConfig {
            template_name: "Press 4 / Standard".to_string(),
            columns,
            ..Default::default()
        }
    }

    #[test]
    fn test_formula_cell_uses_row_values() {
        let template = template_with(vec![
            manual_column("c1", "width"),
            manual_column("c2", "height"),
            formula_column("c3", "area", "width * height"),
        ]);
        let order = Order {
            entries: vec![entry(&[("width", 6.0), ("height", 7.0)])],
            ..Default::default()
        };

        let result = evaluate_template(&template, &order);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(
            result.rows[0].cell("area").unwrap().outcome,
            Ok(CellValue::number(42.0))
        );
    }

    #[test]
    fn test_partial_failure_is_isolated() {
        let template = template_with(vec![
            manual_column("c1", "width"),
            formula_column("c2", "doubled", "width * 2"),
            formula_column("c3", "broken", "width / missing"),
        ]);
        let order = Order {
            entries: vec![entry(&[("width", 5.0)])],
            ..Default::default()
        };

        let result = evaluate_template(&template, &order);
        let row = &result.rows[0];
        assert_eq!(
            row.cell("doubled").unwrap().outcome,
            Ok(CellValue::number(10.0))
        );
        assert_eq!(
            row.cell("broken").unwrap().outcome,
            Err(EvalError::MissingField("missing".to_string()))
        );
        assert_eq!(display_text(&row.cell("broken").unwrap().outcome), "N/A");
    }

    #[test]
    fn test_required_manual_value_missing() {
        let mut required = manual_column("c1", "width");
        required.is_required = true;
        let template = template_with(vec![required, manual_column("c2", "remark")]);
        let order = Order {
            entries: vec![ManualEntry::default()],
            ..Default::default()
        };

        let result = evaluate_template(&template, &order);
        let row = &result.rows[0];
        assert_eq!(
            row.cell("width").unwrap().outcome,
            Err(EvalError::MissingField("width".to_string()))
        );
        // Optional column without a value is a null cell, not a failure.
        assert_eq!(
            row.cell("remark").unwrap().outcome,
            Ok(CellValue::bare(Value::Null))
        );
    }

    #[test]
    fn test_rules_respect_is_active() {
        let rule = CalculationRule {
            id: "r1".to_string(),
            option_type_id: "OT-1".to_string(),
            spec_field: "qty".to_string(),
            calculation_type: CalculationType::Sum,
            multiple_occurrence: MultipleOccurrencePolicy::AllSum,
            result_label: "Total qty".to_string(),
            result_unit: Some("pcs".to_string()),
            show_in_summary: true,
            is_active: true,
        };
        let inactive = CalculationRule {
            id: "r2".to_string(),
            is_active: false,
            ..rule.clone()
        };
        let template = TemplateConfig {
            calculation_rules: vec![rule, inactive],
            ..template_with(vec![])
        };
        let order = Order {
            occurrences: vec![product_occurrence(27.0), product_occurrence(20.0)],
            ..Default::default()
        };

        let result = evaluate_template(&template, &order);
        assert_eq!(result.rule_results.len(), 1);
        assert_eq!(
            result.rule_results[0].outcome,
            Ok(CellValue {
                value: Value::Number(47.0),
                unit: Some("pcs".to_string()),
                show_yes_no: false,
            })
        );
    }

    #[test]
    fn test_totals_across_rows() {
        let template = TemplateConfig {
            totals_config: vec![
                TotalsConfig {
                    column_name: "width".to_string(),
                    formula: TotalsFormula::Sum,
                    custom_formula: None,
                    label: "Total width".to_string(),
                    unit: None,
                    is_visible: true,
                },
                TotalsConfig {
                    column_name: "width".to_string(),
                    formula: TotalsFormula::Average,
                    custom_formula: None,
                    label: "Mean width".to_string(),
                    unit: None,
                    is_visible: true,
                },
            ],
            ..template_with(vec![manual_column("c1", "width")])
        };
        let order = Order {
            entries: vec![
                entry(&[("width", 10.0)]),
                entry(&[("width", 20.0)]),
                entry(&[("width", 30.0)]),
            ],
            ..Default::default()
        };

        let result = evaluate_template(&template, &order);
        assert_eq!(result.totals[0].outcome, Ok(CellValue::number(60.0)));
        assert_eq!(result.totals[1].outcome, Ok(CellValue::number(20.0)));
    }

    #[test]
    fn test_custom_total_references_other_totals() {
        let template = TemplateConfig {
            totals_config: vec![
                TotalsConfig {
                    column_name: "width".to_string(),
                    formula: TotalsFormula::Sum,
                    custom_formula: None,
                    label: "Total width".to_string(),
                    unit: None,
                    is_visible: true,
                },
                TotalsConfig {
                    column_name: "half".to_string(),
                    formula: TotalsFormula::Custom,
                    custom_formula: Some(FormulaSpec {
                        expression: "width / 2".to_string(),
                        dependencies: vec![],
                    }),
                    label: "Half width".to_string(),
                    unit: None,
                    is_visible: true,
                },
                TotalsConfig {
                    column_name: "bad".to_string(),
                    formula: TotalsFormula::Custom,
                    custom_formula: Some(FormulaSpec {
                        expression: "nonexistent * 2".to_string(),
                        dependencies: vec![],
                    }),
                    label: "Bad".to_string(),
                    unit: None,
                    is_visible: true,
                },
            ],
            ..template_with(vec![manual_column("c1", "width")])
        };
        let order = Order {
            entries: vec![entry(&[("width", 10.0)]), entry(&[("width", 20.0)])],
            ..Default::default()
        };

        let result = evaluate_template(&template, &order);
        assert_eq!(result.totals[1].outcome, Ok(CellValue::number(15.0)));
        // Unknown totals-scoped name is a missing field, not a crash.
        assert_eq!(
            result.totals[2].outcome,
            Err(EvalError::MissingField("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_deterministic_output() {
        let template = template_with(vec![
            manual_column("c1", "width"),
            formula_column("c2", "doubled", "width * 2"),
        ]);
        let order = Order {
            entries: vec![entry(&[("width", 5.0)])],
            occurrences: vec![product_occurrence(27.0)],
            ..Default::default()
        };

        let first = evaluate_template(&template, &order);
        let second = evaluate_template(&template, &order);
        assert_eq!(first, second);
        assert_eq!(format!("{:?}", first), format!("{:?}", second));
    }

    #[test]
    fn test_yes_no_rendering() {
        let cell = CellValue {
            value: Value::Boolean(true),
            unit: None,
            show_yes_no: true,
        };
        assert_eq!(cell.display_text(), "Yes");
        let cell = CellValue {
            value: Value::Number(42.0),
            unit: Some("mm".to_string()),
            show_yes_no: false,
        };
        assert_eq!(cell.display_text(), "42 mm");
    }
}
