//! Clause evaluation: a single `field operator value` test against a deal

use crate::values::{DealValues, FieldValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// Comparison operator of a clause
///
/// Anything other than the six recognized symbols parses to `Unknown`,
/// which never holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Unknown(String),
}

impl Operator {
    pub fn parse(symbol: &str) -> Self {
        match symbol.trim() {
            "=" => Operator::Eq,
            "!=" => Operator::Ne,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            _ => Operator::Unknown(symbol.to_string()),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Unknown(s) => s.as_str(),
        }
    }

    /// Whether `lhs <op> rhs` holds given `lhs.cmp(rhs) == ordering`
    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Unknown(_) => false,
        }
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        Operator::parse(&s)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub field: String,
    pub operator: Operator,
    pub value: FieldValue,
}

impl Clause {
    pub fn new(field: &str, operator: &str, value: FieldValue) -> Self {
        Self {
            field: field.to_string(),
            operator: Operator::parse(operator),
            value,
        }
    }

    pub fn number(field: &str, operator: &str, value: f64) -> Self {
        Self::new(field, operator, FieldValue::Number(value))
    }

    pub fn text(field: &str, operator: &str, value: &str) -> Self {
        Self::new(field, operator, FieldValue::Text(value.to_string()))
    }
}

/// Decide whether `clause` holds for the given deal values.
///
/// Total: a missing field or an unknown operator yields `false`.
pub fn evaluate(clause: &Clause, values: &DealValues) -> bool {
    let result = match values.get(&clause.field) {
        Some(actual) => compare(actual, &clause.operator, &clause.value),
        None => false,
    };

    trace!(
        field = %clause.field,
        operator = %clause.operator,
        expected = %clause.value,
        result,
        "evaluated clause"
    );

    result
}

fn compare(actual: &FieldValue, operator: &Operator, expected: &FieldValue) -> bool {
    if let Operator::Unknown(_) = operator {
        return false;
    }

    if let (Some(lhs), Some(rhs)) = (actual.as_number(), expected.as_number()) {
        return lhs
            .partial_cmp(&rhs)
            .is_some_and(|ordering| operator.holds(ordering));
    }

    // Non-numeric operands only support (in)equality
    let equal = actual.normalized_text() == expected.normalized_text();
    match operator {
        Operator::Eq => equal,
        Operator::Ne => !equal,
        _ => false,
    }
}
