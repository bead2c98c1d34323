use core::fmt;

/// A symbolic reference inside a formula.
///
/// Bare references resolve against columns of the current row by name;
/// qualified references (`Material.gauge`) resolve against an option-type
/// field of the order being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldRef {
    Bare(String),
    Qualified { entity: String, field: String },
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldRef::Bare(name) => write!(f, "{}", name),
            FieldRef::Qualified { entity, field } => write!(f, "{}.{}", entity, field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Binding strength; multiplication and division bind tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
        }
    }
}

/// Parsed formula expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Field(FieldRef),
    Negate(Box<Expr>),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Collects every field reference of the expression, first occurrence
    /// order, duplicates removed. The `dependencies` list persisted by the
    /// authoring wizard is advisory; callers that care recompute from here.
    pub fn references(&self) -> Vec<FieldRef> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references(&self, out: &mut Vec<FieldRef>) {
        match self {
            Expr::Number(_) => {}
            Expr::Field(field_ref) => {
                if !out.contains(field_ref) {
                    out.push(field_ref.clone());
                }
            }
            Expr::Negate(inner) => inner.collect_references(out),
            Expr::BinaryOp { left, right, .. } => {
                left.collect_references(out);
                right.collect_references(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::BinaryOp { op, .. } => op.precedence(),
            _ => u8::MAX,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Field(field_ref) => write!(f, "{}", field_ref),
            Expr::Negate(inner) => {
                if matches!(**inner, Expr::BinaryOp { .. }) {
                    write!(f, "-({})", inner)
                } else {
                    write!(f, "-{}", inner)
                }
            }
            Expr::BinaryOp { op, left, right } => {
                if left.precedence() < op.precedence() {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " {} ", op)?;
                // Right side needs parens at equal precedence too, since
                // subtraction and division are left-associative.
                if right.precedence() < op.precedence()
                    || (right.precedence() == op.precedence()
                        && matches!(op, BinaryOperator::Subtract | BinaryOperator::Divide))
                {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn binop(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_references_dedup_in_order() {
        let expr = binop(
            BinaryOperator::Add,
            binop(
                BinaryOperator::Multiply,
                Expr::Field(FieldRef::Bare("qty".to_string())),
                Expr::Field(FieldRef::Qualified {
                    entity: "Material".to_string(),
                    field: "gauge".to_string(),
                }),
            ),
            Expr::Field(FieldRef::Bare("qty".to_string())),
        );
        assert_eq!(
            expr.references(),
            vec![
                FieldRef::Bare("qty".to_string()),
                FieldRef::Qualified {
                    entity: "Material".to_string(),
                    field: "gauge".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_display_inserts_parens_for_lower_precedence() {
        let expr = binop(
            BinaryOperator::Multiply,
            binop(
                BinaryOperator::Add,
                Expr::Number(2.0),
                Expr::Number(3.0),
            ),
            Expr::Number(4.0),
        );
        assert_eq!(expr.to_string(), "(2 + 3) * 4");
    }

    #[test]
    fn test_display_qualified_reference() {
        let expr = Expr::Field(FieldRef::Qualified {
            entity: "Product".to_string(),
            field: "width".to_string(),
        });
        assert_eq!(expr.to_string(), "Product.width");
    }
}
