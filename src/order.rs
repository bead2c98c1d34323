//! Runtime inputs: the order record, its customer sub-record, catalog
//! option occurrences, and operator-entered rows. All of these are
//! JSON-shaped objects owned by the surrounding application; the engine
//! only reads them.

use core::fmt;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Scalar value as found in orders, entries and occurrence field maps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Text(String),
    #[default]
    Null,
}

impl Value {
    /// Numeric view of the value. Text that parses as a number counts,
    /// since the backing store delivers some numeric fields as strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Boolean(_) | Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// One concrete instance of a catalog option type attached to an order.
/// An order may carry the same option type more than once; the engine
/// preserves the array order in which occurrences arrive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOccurrence {
    pub option_type_id: String,
    /// Catalog display name of the option type; qualified formula
    /// references (`Material.gauge`) match against this.
    pub option_type_name: String,
    #[serde(default)]
    pub option_spec_id: String,
    /// Specification field values keyed by field name.
    #[serde(default)]
    pub values: HashMap<String, Value>,
}

impl OptionOccurrence {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// One operator-entered data row, keyed by column name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualEntry {
    pub values: HashMap<String, Value>,
}

impl ManualEntry {
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.values.get(column_name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone1: String,
    #[serde(default)]
    pub phone2: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub tax_number: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub order_type_id: String,
    #[serde(default)]
    pub machine_id: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub status: String,
    /// Opaque pass-through; the engine never does date arithmetic.
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub occurrences: Vec<OptionOccurrence>,
    /// Operator-entered rows for this order's data-entry table.
    #[serde(default)]
    pub entries: Vec<ManualEntry>,
}
