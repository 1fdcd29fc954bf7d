//! Deal attribute values as seen by the clause evaluator

use serde_json::Value;
use shared_types::Deal;
use std::collections::HashMap;

pub use shared_types::FieldValue;

/// Field name to value mapping assembled from a [`Deal`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealValues {
    values: HashMap<String, FieldValue>,
}

impl DealValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    /// Builder-style insert, mostly for tests and fixtures
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.insert(field, value);
        self
    }
}

impl From<&Deal> for DealValues {
    fn from(deal: &Deal) -> Self {
        let mut values = DealValues::new();

        // Extra attributes first so the typed fields win on a name clash
        for (name, value) in &deal.extra {
            match value {
                Value::Number(n) => {
                    if let Some(n) = n.as_f64() {
                        values.insert(name.clone(), FieldValue::Number(n));
                    }
                }
                Value::String(s) => values.insert(name.clone(), FieldValue::Text(s.clone())),
                Value::Bool(b) => values.insert(name.clone(), FieldValue::Text(b.to_string())),
                // null, arrays and objects are treated as missing
                _ => {}
            }
        }

        // Numeric attributes pass through as sent; numeric-looking text is
        // coerced at comparison time
        if let Some(amount) = &deal.amount {
            values.insert("amount", amount.clone());
        }
        if let Some(form) = &deal.business_form {
            values.insert("businessForm", FieldValue::Text(form.clone()));
        }
        if let Some(residual) = &deal.residual_type {
            values.insert("residualType", FieldValue::Text(residual.clone()));
        }
        if let Some(rate) = &deal.yield_rate {
            values.insert("yield", rate.clone());
        }
        if let Some(points) = &deal.points {
            values.insert("points", points.clone());
        }

        values
    }
}
