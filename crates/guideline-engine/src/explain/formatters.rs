//! Per-field clause formatters

use super::ClauseRole;
use crate::clause::{Clause, Operator};
use crate::values::FieldValue;

/// `field operator value`, used for fields without a dedicated formatter
pub fn generic(clause: &Clause) -> String {
    format!(
        "{} {} {}",
        clause.field,
        clause.operator,
        value_text(&clause.value)
    )
}

fn value_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Text(s) => s.trim().to_string(),
    }
}

/// Dollar amount with thousands separators; cents only when present
pub fn format_money(amount: f64) -> String {
    // Scaling to cents overflows for very large amounts, which carry no cents
    let rounded = if amount.abs() < 1e15 {
        (amount * 100.0).round() / 100.0
    } else {
        amount
    };
    let text = if rounded.fract() == 0.0 {
        format!("{:.0}", rounded.abs())
    } else {
        format!("{:.2}", rounded.abs())
    };

    let (whole, cents) = match text.split_once('.') {
        Some((whole, cents)) => (whole, Some(cents)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    match cents {
        Some(cents) => format!("{}{}.{}", sign, grouped, cents),
        None => format!("{}{}", sign, grouped),
    }
}

/// Fraction rendered as a percentage with two decimals (0.08 -> "8.00%")
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

pub fn amount(clause: &Clause, role: ClauseRole) -> String {
    let Some(value) = clause.value.as_number() else {
        return generic(clause);
    };
    let dollars = format!("${}", format_money(value));

    match (role, &clause.operator) {
        (_, Operator::Unknown(_)) => generic(clause),
        (ClauseRole::Condition, op) => format!("Amount {} {}", op, dollars),
        (ClauseRole::Requirement, Operator::Ge) => {
            format!("Minimum amount requirement is {}", dollars)
        }
        (ClauseRole::Requirement, Operator::Gt) => format!("Amount must exceed {}", dollars),
        (ClauseRole::Requirement, Operator::Le) => format!("Maximum amount allowed is {}", dollars),
        (ClauseRole::Requirement, Operator::Lt) => {
            format!("Amount must be less than {}", dollars)
        }
        (ClauseRole::Requirement, Operator::Eq) => format!("Amount must be {}", dollars),
        (ClauseRole::Requirement, Operator::Ne) => format!("Amount cannot be {}", dollars),
    }
}

pub fn yield_rate(clause: &Clause, role: ClauseRole) -> String {
    rate(clause, role, "Yield", "yield")
}

pub fn points(clause: &Clause, role: ClauseRole) -> String {
    rate(clause, role, "Points", "points")
}

fn rate(clause: &Clause, role: ClauseRole, label: &str, noun: &str) -> String {
    let Some(value) = clause.value.as_number() else {
        return generic(clause);
    };
    let percent = format_percent(value);

    match (role, &clause.operator) {
        (_, Operator::Unknown(_)) => generic(clause),
        (ClauseRole::Condition, op) => format!("{} {} {}", label, op, percent),
        (ClauseRole::Requirement, Operator::Le) => {
            format!("Maximum {} allowed is {}", noun, percent)
        }
        (ClauseRole::Requirement, Operator::Lt) => format!("{} must be below {}", label, percent),
        (ClauseRole::Requirement, Operator::Ge) => {
            format!("Minimum {} required is {}", noun, percent)
        }
        (ClauseRole::Requirement, Operator::Gt) => format!("{} must exceed {}", label, percent),
        (ClauseRole::Requirement, Operator::Eq) => format!("{} must be {}", label, percent),
        (ClauseRole::Requirement, Operator::Ne) => format!("{} cannot be {}", label, percent),
    }
}

pub fn business_form(clause: &Clause, role: ClauseRole) -> String {
    categorical(clause, role, "Business form")
}

pub fn residual_type(clause: &Clause, role: ClauseRole) -> String {
    categorical(clause, role, "Residual type")
}

fn categorical(clause: &Clause, role: ClauseRole, label: &str) -> String {
    let value = value_text(&clause.value);
    match (role, &clause.operator) {
        (ClauseRole::Condition, Operator::Eq) => format!("{} is {}", label, value),
        (ClauseRole::Condition, Operator::Ne) => format!("{} is not {}", label, value),
        (ClauseRole::Requirement, Operator::Eq) => format!("{} must be {}", label, value),
        (ClauseRole::Requirement, Operator::Ne) => format!("{} cannot be {}", label, value),
        _ => generic(clause),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(50000.0), "50,000");
        assert_eq!(format_money(999.0), "999");
        assert_eq!(format_money(1000.0), "1,000");
        assert_eq!(format_money(1234567.0), "1,234,567");
        assert_eq!(format_money(1234.5), "1,234.50");
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(-2500.0), "-2,500");
    }

    #[test]
    fn test_format_money_huge_amounts() {
        assert_eq!(format_money(1e15), "1,000,000,000,000,000");

        let max = format_money(f64::MAX);
        assert!(max.starts_with("179,769,313"));
        assert!(!max.contains("inf"));

        let clause = Clause::number("amount", ">=", f64::MAX);
        let text = amount(&clause, ClauseRole::Requirement);
        assert!(text.starts_with("Minimum amount requirement is $179,769,313"));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.08), "8.00%");
        assert_eq!(format_percent(0.095), "9.50%");
        assert_eq!(format_percent(0.0125), "1.25%");
    }

    #[test]
    fn test_amount_requirements() {
        let cases = [
            (">=", "Minimum amount requirement is $50,000"),
            (">", "Amount must exceed $50,000"),
            ("<=", "Maximum amount allowed is $50,000"),
            ("<", "Amount must be less than $50,000"),
            ("=", "Amount must be $50,000"),
            ("!=", "Amount cannot be $50,000"),
        ];
        for (op, expected) in cases {
            let clause = Clause::number("amount", op, 50000.0);
            assert_eq!(amount(&clause, ClauseRole::Requirement), expected);
        }
    }

    #[test]
    fn test_amount_condition_keeps_operator() {
        let clause = Clause::number("amount", ">", 250000.0);
        assert_eq!(amount(&clause, ClauseRole::Condition), "Amount > $250,000");
    }

    #[test]
    fn test_amount_with_text_value_is_generic() {
        let clause = Clause::text("amount", ">=", "large");
        assert_eq!(amount(&clause, ClauseRole::Requirement), "amount >= large");

        // Numeric-looking text still gets dollar phrasing
        let clause = Clause::text("amount", ">=", "50000");
        assert_eq!(
            amount(&clause, ClauseRole::Requirement),
            "Minimum amount requirement is $50,000"
        );
    }

    #[test]
    fn test_rate_requirements() {
        let cases = [
            ("<=", "Maximum yield allowed is 8.00%"),
            ("<", "Yield must be below 8.00%"),
            (">=", "Minimum yield required is 8.00%"),
            (">", "Yield must exceed 8.00%"),
            ("=", "Yield must be 8.00%"),
            ("!=", "Yield cannot be 8.00%"),
        ];
        for (op, expected) in cases {
            let clause = Clause::number("yield", op, 0.08);
            assert_eq!(yield_rate(&clause, ClauseRole::Requirement), expected);
        }

        let clause = Clause::number("points", "<=", 0.02);
        assert_eq!(
            points(&clause, ClauseRole::Requirement),
            "Maximum points allowed is 2.00%"
        );
        assert_eq!(points(&clause, ClauseRole::Condition), "Points <= 2.00%");
    }

    #[test]
    fn test_categorical_phrasing() {
        let eq = Clause::text("residualType", "=", " FMV ");
        let ne = Clause::text("residualType", "!=", "TRAC");
        assert_eq!(residual_type(&eq, ClauseRole::Condition), "Residual type is FMV");
        assert_eq!(residual_type(&ne, ClauseRole::Condition), "Residual type is not TRAC");
        assert_eq!(residual_type(&eq, ClauseRole::Requirement), "Residual type must be FMV");
        assert_eq!(
            residual_type(&ne, ClauseRole::Requirement),
            "Residual type cannot be TRAC"
        );

        let form = Clause::text("businessForm", "=", "LLC");
        assert_eq!(business_form(&form, ClauseRole::Requirement), "Business form must be LLC");
    }

    #[test]
    fn test_categorical_ordering_is_generic() {
        let clause = Clause::text("businessForm", "<", "LLC");
        assert_eq!(business_form(&clause, ClauseRole::Condition), "businessForm < LLC");
    }

    #[test]
    fn test_unknown_operator_is_generic() {
        let clause = Clause::number("yield", "between", 0.08);
        assert_eq!(yield_rate(&clause, ClauseRole::Requirement), "yield between 0.08");
    }
}
