//! # Field Resolver
//!
//! Pure reads of one scalar from one of the heterogeneous sources a template
//! column can bind to: a manual entry row, the order record, its customer
//! sub-record, or the order's catalog option occurrences.
//!
//! Order and customer paths are explicit whitelists rather than reflection,
//! so an unknown path fails predictably as NotFound (`None`) instead of a
//! runtime lookup error. `None` is the typed missing-value token; deciding
//! whether that fails an expression is the evaluator's job, never this
//! module's.

use crate::model::OptionSpecRef;
use crate::order::{Customer, ManualEntry, OptionOccurrence, Order, Value};

/// Reads a dotted path from the order record. Accepts the path with or
/// without its `order.` prefix, matching the symbolic strings the wizard
/// persists.
pub fn resolve_order_field(order: &Order, path: &str) -> Option<Value> {
    let key = path.strip_prefix("order.").unwrap_or(path);
    match key {
        "orderId" => Some(Value::Text(order.order_id.clone())),
        "orderNumber" => Some(Value::Text(order.order_number.clone())),
        "orderTypeId" => Some(Value::Text(order.order_type_id.clone())),
        "machineId" => Some(Value::Text(order.machine_id.clone())),
        "quantity" => Some(Value::Number(order.quantity)),
        "status" => Some(Value::Text(order.status.clone())),
        "dueDate" => Some(Value::Text(order.due_date.clone())),
        "notes" => Some(Value::Text(order.notes.clone())),
        _ => None,
    }
}

/// Reads a dotted path from the order's linked customer sub-record.
pub fn resolve_customer_field(customer: &Customer, path: &str) -> Option<Value> {
    let key = path.strip_prefix("customer.").unwrap_or(path);
    match key {
        "customerId" => Some(Value::Text(customer.customer_id.clone())),
        "name" => Some(Value::Text(customer.name.clone())),
        "phone1" => Some(Value::Text(customer.phone1.clone())),
        "phone2" => Some(Value::Text(customer.phone2.clone())),
        "email" => Some(Value::Text(customer.email.clone())),
        "address" => Some(Value::Text(customer.address.clone())),
        "city" => Some(Value::Text(customer.city.clone())),
        "taxNumber" => Some(Value::Text(customer.tax_number.clone())),
        _ => None,
    }
}

/// Reads a column's value from one operator-entered row.
pub fn resolve_manual_field(entry: &ManualEntry, column_name: &str) -> Option<Value> {
    entry.get(column_name).cloned()
}

/// Scans the order's option occurrences for the configured
/// (optionTypeId, optionSpecId) pair and returns the field value of the
/// first matching occurrence, in the array order the occurrences arrived.
/// Plain field resolution never aggregates; collapsing multi-occurrence
/// cases is the occurrence aggregator's job.
pub fn resolve_option_spec(
    occurrences: &[OptionOccurrence],
    spec: &OptionSpecRef,
) -> Option<Value> {
    occurrences
        .iter()
        .find(|occurrence| {
            occurrence.option_type_id == spec.option_type_id
                && occurrence.option_spec_id == spec.option_spec_id
        })
        .and_then(|occurrence| occurrence.field(&spec.spec_field).cloned())
}

/// Resolves a qualified formula reference (`Material.gauge`) against the
/// first occurrence whose option-type name matches the entity.
pub fn resolve_qualified(
    occurrences: &[OptionOccurrence],
    entity: &str,
    field: &str,
) -> Option<Value> {
    occurrences
        .iter()
        .find(|occurrence| occurrence.option_type_name == entity)
        .and_then(|occurrence| occurrence.field(field).cloned())
}
