//! # Formula Parser
//!
//! Precedence climbing over [`FormulaToken`]s, with operand types checked
//! as the tree is built.

use core::ops::Range;

use logos::Logos;

use crate::{
    errors::{SGResult, SyntaxGymError},
    prediction::{
        ArithOp,
        BinaryOp,
        BoolOp,
        CompareOp,
        Expr,
        ExprKind,
        RegionNumber,
        RegionRef,
        formula_lexer::FormulaToken,
    },
};

/// Parse a prediction formula.
///
/// ## Arguments
/// * `formula` - The formula source.
///
/// ## Returns
/// A boolean expression tree, or `PredictionParse` naming the formula.
pub fn parse_formula(formula: &str) -> SGResult<Expr> {
    let mut parser = FormulaParser::new(formula)?;
    let expr = parser.parse_expr()?;
    if let Some((token, span)) = parser.peek() {
        return Err(parser.error(format!(
            "unexpected {token:?} {:?} at offset {}",
            &formula[span.clone()],
            span.start
        )));
    }
    if expr.kind() != ExprKind::Bool {
        return Err(parser.error("formula must be a comparison or boolean expression"));
    }
    Ok(expr)
}

/// Binding strength; higher binds tighter.
fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Boolean(_) => 1,
        BinaryOp::Comparison(_) => 2,
        BinaryOp::Arithmetic(_) => 3,
    }
}

fn binary_op(token: FormulaToken) -> Option<BinaryOp> {
    use FormulaToken::*;
    Some(match token {
        Plus => BinaryOp::Arithmetic(ArithOp::Add),
        Minus => BinaryOp::Arithmetic(ArithOp::Sub),
        Less => BinaryOp::Comparison(CompareOp::Less),
        Greater => BinaryOp::Comparison(CompareOp::Greater),
        Equal => BinaryOp::Comparison(CompareOp::Equal),
        And => BinaryOp::Boolean(BoolOp::And),
        Or => BinaryOp::Boolean(BoolOp::Or),
        _ => return None,
    })
}

struct FormulaParser<'s> {
    formula: &'s str,
    tokens: Vec<(FormulaToken, Range<usize>)>,
    pos: usize,
}

impl<'s> FormulaParser<'s> {
    fn new(formula: &'s str) -> SGResult<Self> {
        let mut tokens = Vec::new();
        for (res, span) in FormulaToken::lexer(formula).spanned() {
            match res {
                Ok(FormulaToken::Whitespace) => {}
                Ok(token) => tokens.push((token, span)),
                Err(()) => {
                    return Err(SyntaxGymError::PredictionParse {
                        formula: formula.to_string(),
                        reason: format!(
                            "unexpected character {:?} at offset {}",
                            &formula[span.clone()],
                            span.start
                        ),
                    });
                }
            }
        }
        Ok(Self {
            formula,
            tokens,
            pos: 0,
        })
    }

    fn error<S: Into<String>>(
        &self,
        reason: S,
    ) -> SyntaxGymError {
        SyntaxGymError::PredictionParse {
            formula: self.formula.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<&(FormulaToken, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<(FormulaToken, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expr(&mut self) -> SGResult<Expr> {
        self.parse_binary(1)
    }

    /// Parse operators binding at least as tightly as `min_prec`.
    fn parse_binary(
        &mut self,
        min_prec: u8,
    ) -> SGResult<Expr> {
        let mut lhs = self.parse_atom()?;
        while let Some(op) = self.peek().and_then(|(t, _)| binary_op(*t)) {
            let prec = precedence(op);
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let rhs = self.parse_binary(prec + 1)?;
            lhs = self.check_binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn check_binary(
        &self,
        op: BinaryOp,
        lhs: Expr,
        rhs: Expr,
    ) -> SGResult<Expr> {
        let want = op.operand_kind();
        for operand in [&lhs, &rhs] {
            if operand.kind() != want {
                return Err(self.error(format!(
                    "operator {} needs {want} operands, but {operand} is {}",
                    op.symbol(),
                    operand.kind()
                )));
            }
        }
        Ok(Expr::binary(op, lhs, rhs))
    }

    fn parse_atom(&mut self) -> SGResult<Expr> {
        let Some((token, span)) = self.next() else {
            return Err(self.error("unexpected end of formula"));
        };
        let text = &self.formula[span.clone()];
        match token {
            FormulaToken::RegionRef => self.parse_region_ref(text).map(Expr::Region),
            FormulaToken::Number => self.parse_number(text).map(Expr::Literal),
            FormulaToken::Minus => match self.next() {
                Some((FormulaToken::Number, span)) => {
                    let text = &self.formula[span];
                    self.parse_number(text).map(|v| Expr::Literal(-v))
                }
                _ => Err(self.error(format!(
                    "unary minus at offset {} must precede a number",
                    span.start
                ))),
            },
            FormulaToken::LParen => {
                let expr = self.parse_expr()?;
                match self.next() {
                    Some((FormulaToken::RParen, _)) => Ok(expr),
                    _ => Err(self.error(format!(
                        "unclosed parenthesis at offset {}",
                        span.start
                    ))),
                }
            }
            _ => Err(self.error(format!(
                "expected a region, number or '(' at offset {}, found {text:?}",
                span.start
            ))),
        }
    }

    fn parse_number(
        &self,
        text: &str,
    ) -> SGResult<f64> {
        text.parse::<f64>()
            .map_err(|e| self.error(format!("bad number {text:?}: {e}")))
    }

    /// Split `( N ; %name% )` into its parts.
    fn parse_region_ref(
        &self,
        text: &str,
    ) -> SGResult<RegionRef> {
        let inner = text.trim_start_matches('(').trim_end_matches(')');
        let Some((number, condition)) = inner.split_once(';') else {
            return Err(self.error(format!("bad region reference {text:?}")));
        };
        let number = number.trim();
        let region = if number == "*" {
            RegionNumber::Wildcard
        } else {
            match number.parse::<u32>() {
                Ok(n) if n > 0 => RegionNumber::Number(n),
                _ => {
                    return Err(self.error(format!(
                        "bad region number {number:?} in {text:?}"
                    )));
                }
            }
        };
        let condition = condition.trim().trim_matches('%').to_string();
        Ok(RegionRef { region, condition })
    }
}
