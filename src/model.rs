//! # Template Configuration Model
//!
//! The persisted configuration for one (machine, order-type) pair: data-entry
//! columns, aggregation rules, display-panel items and totals. Instances are
//! authored by the external wizard and stored as JSON; the engine treats them
//! as immutable input for the duration of one evaluation, apart from the
//! load-time normalization in [`TemplateConfig::normalize`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::warn;

use crate::eval::EvalError;
use crate::parser::parse_formula;

fn default_true() -> bool {
    true
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnDataType {
    Text,
    Number,
    Formula,
    Dropdown,
    Boolean,
    Date,
    Image,
    File,
    Audio,
}

/// Wire tag naming where a column's value comes from. The resolved,
/// payload-carrying form is [`ColumnSource`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SourceType {
    Manual,
    Order,
    Customer,
    OptionSpec,
    Calculated,
}

/// Advisory label for a calculation rule. Never branches evaluation; the
/// reduction applied is [`MultipleOccurrencePolicy`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationType {
    Sum,
    Average,
    Multiply,
    Min,
    Max,
    Difference,
    PercentageDiff,
}

/// The reduction applied across every occurrence of one option type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MultipleOccurrencePolicy {
    AllSum,
    AverageAll,
    MultiplyAll,
    FirstMinusSecond,
    SecondMinusFirst,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayType {
    Text,
    Number,
    Formula,
    Boolean,
    Image,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DisplaySourceType {
    OptionSpec,
    Order,
    Customer,
    Formula,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TotalsFormula {
    Sum,
    Average,
    Count,
    Multiply,
    Divide,
    Custom,
}

/// A user-authored formula as persisted by the wizard. `dependencies` is
/// advisory; the engine recomputes references from the parsed tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormulaSpec {
    pub expression: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// The (optionTypeId, optionSpecId, specField) triple identifying exactly
/// one catalog field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpecRef {
    pub option_type_id: String,
    pub option_spec_id: String,
    pub spec_field: String,
    #[serde(default)]
    pub spec_field_unit: Option<String>,
}

/// Resolved column source with its payload; produced by
/// [`ColumnConfig::source`] so downstream matching is exhaustive.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSource {
    Manual,
    Order { source_field: String },
    Customer { source_field: String },
    OptionSpec(OptionSpecRef),
    Calculated { formula: FormulaSpec },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub id: String,
    /// Symbolic key; formulas reference the column by this name.
    pub name: String,
    /// Display text.
    pub label: String,
    pub data_type: ColumnDataType,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    pub source_type: SourceType,
    #[serde(default)]
    pub source_field: Option<String>,
    #[serde(default)]
    pub option_type_id: Option<String>,
    #[serde(default)]
    pub option_spec_id: Option<String>,
    #[serde(default)]
    pub spec_field: Option<String>,
    #[serde(default)]
    pub spec_field_unit: Option<String>,
    #[serde(default)]
    pub formula: Option<FormulaSpec>,
    #[serde(default)]
    pub dropdown_options: Vec<DropdownOption>,
}

impl ColumnConfig {
    /// Resolves the flat persisted fields into a [`ColumnSource`]. A column
    /// whose source-specific fields are missing is incomplete and excluded
    /// from evaluation.
    pub fn source(&self) -> Result<ColumnSource, EvalError> {
        match self.source_type {
            SourceType::Manual => Ok(ColumnSource::Manual),
            SourceType::Order => self
                .source_field
                .clone()
                .filter(|f| !f.is_empty())
                .map(|source_field| ColumnSource::Order { source_field })
                .ok_or_else(|| self.incomplete("order source without sourceField")),
            SourceType::Customer => self
                .source_field
                .clone()
                .filter(|f| !f.is_empty())
                .map(|source_field| ColumnSource::Customer { source_field })
                .ok_or_else(|| self.incomplete("customer source without sourceField")),
            SourceType::OptionSpec => self
                .option_spec_ref()
                .map(ColumnSource::OptionSpec)
                .ok_or_else(|| {
                    self.incomplete("optionSpec source without a complete (type, spec, field) triple")
                }),
            SourceType::Calculated => self
                .formula
                .clone()
                .filter(|f| !f.expression.is_empty())
                .map(|formula| ColumnSource::Calculated { formula })
                .ok_or_else(|| self.incomplete("calculated column without a formula")),
        }
    }

    fn option_spec_ref(&self) -> Option<OptionSpecRef> {
        let option_type_id = self.option_type_id.clone().filter(|s| !s.is_empty())?;
        let option_spec_id = self.option_spec_id.clone().filter(|s| !s.is_empty())?;
        let spec_field = self.spec_field.clone().filter(|s| !s.is_empty())?;
        Some(OptionSpecRef {
            option_type_id,
            option_spec_id,
            spec_field,
            spec_field_unit: self.spec_field_unit.clone(),
        })
    }

    fn incomplete(&self, detail: &str) -> EvalError {
        EvalError::IncompleteConfiguration(format!("column {:?}: {}", self.name, detail))
    }
}

/// Aggregates one numeric field across every occurrence of one option type
/// inside a single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRule {
    #[serde(default)]
    pub id: String,
    pub option_type_id: String,
    pub spec_field: String,
    pub calculation_type: CalculationType,
    pub multiple_occurrence: MultipleOccurrencePolicy,
    pub result_label: String,
    #[serde(default)]
    pub result_unit: Option<String>,
    #[serde(default)]
    pub show_in_summary: bool,
    /// Inactive rules are retained in configuration but never evaluated.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Resolved display-item source; produced by [`DisplayItemConfig::source`].
#[derive(Debug, Clone, PartialEq)]
pub enum DisplaySource {
    OptionSpec(OptionSpecRef),
    Order { source_field: String },
    Customer { source_field: String },
    Formula(FormulaSpec),
}

/// A read-only value shown in the informational panel, outside the
/// data-entry table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItemConfig {
    #[serde(default)]
    pub id: String,
    pub label: String,
    pub display_type: DisplayType,
    pub source_type: DisplaySourceType,
    #[serde(default)]
    pub option_type_id: Option<String>,
    #[serde(default)]
    pub option_spec_id: Option<String>,
    #[serde(default)]
    pub spec_field: Option<String>,
    #[serde(default)]
    pub spec_field_unit: Option<String>,
    #[serde(default)]
    pub source_field: Option<String>,
    #[serde(default)]
    pub formula: Option<FormulaSpec>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub order: i32,
}

impl DisplayItemConfig {
    pub fn source(&self) -> Result<DisplaySource, EvalError> {
        match self.source_type {
            DisplaySourceType::OptionSpec => {
                let option_type_id = self.option_type_id.clone().filter(|s| !s.is_empty());
                let option_spec_id = self.option_spec_id.clone().filter(|s| !s.is_empty());
                let spec_field = self.spec_field.clone().filter(|s| !s.is_empty());
                match (option_type_id, option_spec_id, spec_field) {
                    (Some(option_type_id), Some(option_spec_id), Some(spec_field)) => {
                        Ok(DisplaySource::OptionSpec(OptionSpecRef {
                            option_type_id,
                            option_spec_id,
                            spec_field,
                            spec_field_unit: self.spec_field_unit.clone(),
                        }))
                    }
                    _ => Err(self.incomplete("optionSpec source without a complete triple")),
                }
            }
            DisplaySourceType::Order => self
                .source_field
                .clone()
                .filter(|f| !f.is_empty())
                .map(|source_field| DisplaySource::Order { source_field })
                .ok_or_else(|| self.incomplete("order source without sourceField")),
            DisplaySourceType::Customer => self
                .source_field
                .clone()
                .filter(|f| !f.is_empty())
                .map(|source_field| DisplaySource::Customer { source_field })
                .ok_or_else(|| self.incomplete("customer source without sourceField")),
            DisplaySourceType::Formula => self
                .formula
                .clone()
                .filter(|f| !f.expression.is_empty())
                .map(DisplaySource::Formula)
                .ok_or_else(|| self.incomplete("formula item without an expression")),
        }
    }

    fn incomplete(&self, detail: &str) -> EvalError {
        EvalError::IncompleteConfiguration(format!("display item {:?}: {}", self.label, detail))
    }
}

/// A single summary statistic over one column's values across all rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsConfig {
    /// Must reference an existing [`ColumnConfig::name`].
    pub column_name: String,
    pub formula: TotalsFormula,
    /// Only read when `formula` is [`TotalsFormula::Custom`].
    #[serde(default)]
    pub custom_formula: Option<FormulaSpec>,
    pub label: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

/// Per-spec display selection made in the wizard: which named fields are
/// surfaced, and whether boolean-style values render as Yes/No.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSelection {
    pub option_spec_id: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub show_yes_no: bool,
}

/// The unit of configuration for one (machine, order-type) pair. The
/// external store enforces at-most-one template per pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub machine_type_id: String,
    #[serde(default)]
    pub machine_id: String,
    #[serde(default)]
    pub order_type_id: String,
    #[serde(default)]
    pub option_type_ids: Vec<String>,
    #[serde(default)]
    pub option_spec_ids: Vec<String>,
    #[serde(default)]
    pub selected_specifications: Vec<SpecSelection>,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub calculation_rules: Vec<CalculationRule>,
    #[serde(default)]
    pub display_items: Vec<DisplayItemConfig>,
    #[serde(default)]
    pub totals_config: Vec<TotalsConfig>,
    /// Flag bags owned by the surrounding application; passed through
    /// unchanged and never read by the engine.
    #[serde(default)]
    pub customer_fields: serde_json::Value,
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl TemplateConfig {
    /// Load-time normalization. Derived values are never hand-edited, so a
    /// formula column that arrives writable is auto-corrected to read-only.
    /// Persisted dependency lists are checked against the parsed expression
    /// and mismatches logged; a malformed expression is left in place and
    /// surfaces as a per-slot error during evaluation.
    pub fn normalize(&mut self) {
        for column in &mut self.columns {
            if column.data_type == ColumnDataType::Formula {
                if !column.is_read_only {
                    warn!(column = %column.name, "formula column was writable, forcing read-only");
                    column.is_read_only = true;
                }
                if column.source_type != SourceType::Calculated {
                    warn!(
                        column = %column.name,
                        source_type = %column.source_type,
                        "formula column had a non-calculated source, correcting"
                    );
                    column.source_type = SourceType::Calculated;
                }
            }

            if let Some(formula) = &column.formula {
                if let Ok(expr) = parse_formula(&formula.expression) {
                    let found: Vec<String> =
                        expr.references().iter().map(|r| r.to_string()).collect();
                    if !formula.dependencies.is_empty() && formula.dependencies != found {
                        warn!(
                            column = %column.name,
                            persisted = ?formula.dependencies,
                            parsed = ?found,
                            "persisted formula dependencies disagree with the expression"
                        );
                    }
                }
            }
        }
    }

    /// Returns a normalized copy, leaving the caller's configuration
    /// untouched.
    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        copy.normalize();
        copy
    }

    /// Yes/No rendering applies when any selected specification for this
    /// spec id asked for it.
    pub fn show_yes_no(&self, option_spec_id: &str) -> bool {
        self.selected_specifications
            .iter()
            .any(|s| s.option_spec_id == option_spec_id && s.show_yes_no)
    }
}
