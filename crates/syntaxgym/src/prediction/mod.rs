//! # Predictions
//!
//! Prediction formulas compare aggregated region values across the
//! conditions of an item:
//!
//! ```text
//! ((2;%sub%) > (2;%no-sub%)) & ((*;%sub%) - 1.5 < (*;%no-sub%))
//! ```
//!
//! Operators, from loosest to tightest binding: `&` `|`, then `<` `>` `=`,
//! then `+` `-`. All are left associative. `=` compares within a tolerance.

pub mod expr;
pub mod formula_lexer;
pub mod formula_parser;
pub mod prediction_formula;
pub mod prediction_results;

#[doc(inline)]
pub use expr::{
    ArithOp,
    BinaryOp,
    BoolOp,
    CompareOp,
    Expr,
    ExprKind,
    RegionNumber,
    RegionRef,
    RegionValues,
    Value,
    is_close,
};
#[doc(inline)]
pub use formula_parser::parse_formula;
#[doc(inline)]
pub use prediction_formula::{ItemValues, Prediction};
#[doc(inline)]
pub use prediction_results::{PredictionResult, accuracy, write_prediction_results};
