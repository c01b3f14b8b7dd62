//! # Formula Expressions

use core::fmt;

use crate::errors::{SGResult, SyntaxGymError};

/// Relative tolerance of `=`.
pub const EQUALITY_RTOL: f64 = 1e-5;

/// Absolute tolerance of `=`.
pub const EQUALITY_ATOL: f64 = 1e-3;

/// Tolerant float equality: `|a - b| <= ATOL + RTOL * |b|`.
pub fn is_close(
    a: f64,
    b: f64,
) -> bool {
    (a - b).abs() <= EQUALITY_ATOL + EQUALITY_RTOL * b.abs()
}

/// The region part of a region reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionNumber {
    /// A single region.
    Number(u32),

    /// `*`: the sum over every region of the condition.
    Wildcard,
}

impl fmt::Display for RegionNumber {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Wildcard => write!(f, "*"),
        }
    }
}

/// `(N;%condition%)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionRef {
    /// The region, or `*`.
    pub region: RegionNumber,

    /// The condition name.
    pub condition: String,
}

impl fmt::Display for RegionRef {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "({};%{}%)", self.region, self.condition)
    }
}

/// `+` `-`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
}

/// `<` `>` `=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `=`, within tolerance.
    Equal,
}

/// `&` `|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    /// `&`
    And,
    /// `|`
    Or,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Number, number to number.
    Arithmetic(ArithOp),

    /// Number, number to bool.
    Comparison(CompareOp),

    /// Bool, bool to bool.
    Boolean(BoolOp),
}

impl BinaryOp {
    /// The operator symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Arithmetic(ArithOp::Add) => "+",
            Self::Arithmetic(ArithOp::Sub) => "-",
            Self::Comparison(CompareOp::Less) => "<",
            Self::Comparison(CompareOp::Greater) => ">",
            Self::Comparison(CompareOp::Equal) => "=",
            Self::Boolean(BoolOp::And) => "&",
            Self::Boolean(BoolOp::Or) => "|",
        }
    }

    /// The kind of operands the operator takes.
    pub fn operand_kind(&self) -> ExprKind {
        match self {
            Self::Arithmetic(_) | Self::Comparison(_) => ExprKind::Number,
            Self::Boolean(_) => ExprKind::Bool,
        }
    }

    /// The kind of value the operator produces.
    pub fn result_kind(&self) -> ExprKind {
        match self {
            Self::Arithmetic(_) => ExprKind::Number,
            Self::Comparison(_) | Self::Boolean(_) => ExprKind::Bool,
        }
    }
}

/// The static type of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExprKind {
    /// A float.
    Number,

    /// A truth value.
    Bool,
}

/// An evaluated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A float.
    Number(f64),

    /// A truth value.
    Bool(bool),
}

/// Source of region values during evaluation.
pub trait RegionValues {
    /// Resolve a region reference to its value.
    fn region_value(
        &self,
        region: &RegionRef,
    ) -> SGResult<f64>;
}

/// An immutable formula expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A region reference.
    Region(RegionRef),

    /// A float literal.
    Literal(f64),

    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,

        /// The left operand.
        lhs: Box<Expr>,

        /// The right operand.
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Build a binary expression.
    pub fn binary(
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
    ) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// The static type of this expression.
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Region(_) | Self::Literal(_) => ExprKind::Number,
            Self::Binary { op, .. } => op.result_kind(),
        }
    }

    /// Every region reference, left to right.
    pub fn region_refs(&self) -> Vec<&RegionRef> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs<'a>(
        &'a self,
        refs: &mut Vec<&'a RegionRef>,
    ) {
        match self {
            Self::Region(r) => refs.push(r),
            Self::Literal(_) => {}
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_refs(refs);
                rhs.collect_refs(refs);
            }
        }
    }

    /// Evaluate the expression. Both operands are always evaluated.
    pub fn evaluate(
        &self,
        values: &dyn RegionValues,
    ) -> SGResult<Value> {
        Ok(match self {
            Self::Region(r) => Value::Number(values.region_value(r)?),
            Self::Literal(v) => Value::Number(*v),
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(values)?;
                let rhs = rhs.evaluate(values)?;
                match (op, lhs, rhs) {
                    (BinaryOp::Arithmetic(op), Value::Number(a), Value::Number(b)) => {
                        Value::Number(match op {
                            ArithOp::Add => a + b,
                            ArithOp::Sub => a - b,
                        })
                    }
                    (BinaryOp::Comparison(op), Value::Number(a), Value::Number(b)) => {
                        Value::Bool(match op {
                            CompareOp::Less => a < b,
                            CompareOp::Greater => a > b,
                            CompareOp::Equal => is_close(a, b),
                        })
                    }
                    (BinaryOp::Boolean(op), Value::Bool(a), Value::Bool(b)) => {
                        Value::Bool(match op {
                            BoolOp::And => a && b,
                            BoolOp::Or => a || b,
                        })
                    }
                    (op, lhs, rhs) => {
                        return Err(SyntaxGymError::PredictionParse {
                            formula: self.to_string(),
                            reason: format!(
                                "operator {} applied to {lhs:?} and {rhs:?}",
                                op.symbol()
                            ),
                        });
                    }
                }
            }
        })
    }
}

impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Region(r) => write!(f, "{r}"),
            Self::Literal(v) if *v < 0.0 => write!(f, "-{}", -v),
            Self::Literal(v) => write!(f, "{v}"),
            Self::Binary { op, lhs, rhs } => {
                let operand = |f: &mut fmt::Formatter<'_>, e: &Expr| match e {
                    Self::Binary { .. } => write!(f, "({e})"),
                    _ => write!(f, "{e}"),
                };
                operand(f, lhs)?;
                write!(f, " {} ", op.symbol())?;
                operand(f, rhs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl RegionValues for Fixed {
        fn region_value(
            &self,
            region: &RegionRef,
        ) -> SGResult<f64> {
            match (region.region, region.condition.as_str()) {
                (RegionNumber::Number(1), "a") => Ok(10.0),
                (RegionNumber::Number(1), "b") => Ok(10.0005),
                (RegionNumber::Wildcard, "a") => Ok(25.0),
                _ => Err(SyntaxGymError::MissingCondition(region.condition.clone())),
            }
        }
    }

    fn region(
        n: u32,
        condition: &str,
    ) -> Expr {
        Expr::Region(RegionRef {
            region: RegionNumber::Number(n),
            condition: condition.to_string(),
        })
    }

    #[test]
    fn test_is_close() {
        assert!(is_close(10.0, 10.0005));
        assert!(is_close(1000.0, 1000.0105));
        assert!(!is_close(10.0, 10.002));
    }

    #[test]
    fn test_evaluate() {
        let eq = Expr::binary(
            BinaryOp::Comparison(CompareOp::Equal),
            region(1, "a"),
            region(1, "b"),
        );
        assert_eq!(eq.evaluate(&Fixed).unwrap(), Value::Bool(true));

        let sum = Expr::binary(
            BinaryOp::Arithmetic(ArithOp::Sub),
            Expr::Region(RegionRef {
                region: RegionNumber::Wildcard,
                condition: "a".to_string(),
            }),
            Expr::Literal(5.0),
        );
        assert_eq!(sum.evaluate(&Fixed).unwrap(), Value::Number(20.0));

        let missing = Expr::binary(
            BinaryOp::Comparison(CompareOp::Less),
            region(1, "a"),
            region(1, "zzz"),
        );
        assert!(matches!(
            missing.evaluate(&Fixed),
            Err(SyntaxGymError::MissingCondition(_))
        ));
    }

    #[test]
    fn test_display_and_refs() {
        let expr = Expr::binary(
            BinaryOp::Boolean(BoolOp::And),
            Expr::binary(
                BinaryOp::Comparison(CompareOp::Greater),
                region(2, "sub"),
                Expr::Literal(-1.5),
            ),
            Expr::binary(
                BinaryOp::Comparison(CompareOp::Less),
                region(3, "sub"),
                region(3, "no-sub"),
            ),
        );
        assert_eq!(
            expr.to_string(),
            "((2;%sub%) > -1.5) & ((3;%sub%) < (3;%no-sub%))"
        );
        assert_eq!(expr.kind(), ExprKind::Bool);
        assert_eq!(expr.region_refs().len(), 3);
    }
}
