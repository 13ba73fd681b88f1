//! Static type checking for parsed rules.
//!
//! Conditions (`and`, `or`, `not`) only accept bool operands, arithmetic and
//! ordering only accept ints, and `==`/`!=` need both sides of the same type.
//! A rule that passes here cannot fail during evaluation.

use super::error::RuleError;
use super::parser::{CmpOp, Expr};
use super::variables::ValueType;

/// Infer the type of an expression.
pub fn infer(expr: &Expr) -> Result<ValueType, RuleError> {
    match expr {
        Expr::Bool(_) => Ok(ValueType::Bool),
        Expr::Int(_) => Ok(ValueType::Int),
        Expr::Var(var) => Ok(var.value_type()),

        Expr::Not(inner) => {
            expect(inner, ValueType::Bool, "`not`")?;
            Ok(ValueType::Bool)
        }

        Expr::Neg(inner) => {
            expect(inner, ValueType::Int, "unary `-`")?;
            Ok(ValueType::Int)
        }

        Expr::And(left, right) => {
            expect(left, ValueType::Bool, "`and`")?;
            expect(right, ValueType::Bool, "`and`")?;
            Ok(ValueType::Bool)
        }

        Expr::Or(left, right) => {
            expect(left, ValueType::Bool, "`or`")?;
            expect(right, ValueType::Bool, "`or`")?;
            Ok(ValueType::Bool)
        }

        Expr::Compare { op, left, right } => {
            if op.is_ordering() {
                expect(left, ValueType::Int, "ordering comparison")?;
                expect(right, ValueType::Int, "ordering comparison")?;
            } else {
                let lt = infer(left)?;
                let rt = infer(right)?;
                if lt != rt {
                    let symbol = if *op == CmpOp::Eq { "==" } else { "!=" };
                    return Err(RuleError::Type(format!(
                        "cannot compare {lt} with {rt} using `{symbol}`"
                    )));
                }
            }
            Ok(ValueType::Bool)
        }

        Expr::Arith { left, right, .. } => {
            expect(left, ValueType::Int, "arithmetic")?;
            expect(right, ValueType::Int, "arithmetic")?;
            Ok(ValueType::Int)
        }
    }
}

/// Check that a whole rule is a condition.
pub fn check_condition(expr: &Expr) -> Result<(), RuleError> {
    match infer(expr)? {
        ValueType::Bool => Ok(()),
        other => Err(RuleError::NotBoolean(other)),
    }
}

fn expect(expr: &Expr, wanted: ValueType, context: &str) -> Result<(), RuleError> {
    let found = infer(expr)?;
    if found == wanted {
        Ok(())
    } else {
        Err(RuleError::Type(format!(
            "{context} expects {wanted}, found {found}"
        )))
    }
}
