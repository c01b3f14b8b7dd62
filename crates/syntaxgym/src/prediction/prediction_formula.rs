//! # Prediction

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{SGResult, SyntaxGymError},
    metrics::Metric,
    prediction::{Expr, RegionNumber, RegionRef, RegionValues, Value, parse_formula},
    suite::Item,
};

const FORMULA_TYPE: &str = "formula";

/// Region values of one item, under one metric.
#[derive(Debug, Clone, Copy)]
pub struct ItemValues<'a> {
    item: &'a Item,
    metric: Metric,
}

impl<'a> ItemValues<'a> {
    /// Look up `metric` values in `item`.
    pub fn new(
        item: &'a Item,
        metric: Metric,
    ) -> Self {
        Self { item, metric }
    }
}

impl RegionValues for ItemValues<'_> {
    fn region_value(
        &self,
        region: &RegionRef,
    ) -> SGResult<f64> {
        let condition = self
            .item
            .condition(&region.condition)
            .ok_or_else(|| SyntaxGymError::MissingCondition(region.condition.clone()))?;

        let missing = |region_number: u32| SyntaxGymError::MissingRegionValue {
            condition_name: region.condition.clone(),
            region_number,
            metric: self.metric.to_string(),
        };

        match region.region {
            RegionNumber::Number(n) => condition
                .region(n)
                .and_then(|r| r.value(self.metric))
                .ok_or_else(|| missing(n)),
            RegionNumber::Wildcard => condition.regions.iter().try_fold(0.0, |acc, r| {
                r.value(self.metric)
                    .map(|v| acc + v)
                    .ok_or_else(|| missing(r.region_number))
            }),
        }
    }
}

/// A parsed prediction formula.
///
/// Serialized as `{"type": "formula", "formula": "..."}`, keeping the
/// source text as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPrediction", into = "RawPrediction")]
pub struct Prediction {
    formula: String,
    expr: Expr,
    metric: Metric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPrediction {
    #[serde(rename = "type")]
    kind: String,
    formula: String,
}

impl TryFrom<RawPrediction> for Prediction {
    type Error = SyntaxGymError;

    fn try_from(raw: RawPrediction) -> SGResult<Self> {
        if raw.kind != FORMULA_TYPE {
            return Err(SyntaxGymError::UnknownPredictionType(raw.kind));
        }
        Prediction::new(raw.formula)
    }
}

impl From<Prediction> for RawPrediction {
    fn from(prediction: Prediction) -> Self {
        Self {
            kind: FORMULA_TYPE.to_string(),
            formula: prediction.formula,
        }
    }
}

impl Prediction {
    /// Parse a formula.
    ///
    /// Region values are looked up under `sum`.
    pub fn new<S: Into<String>>(formula: S) -> SGResult<Self> {
        let formula = formula.into();
        let expr = parse_formula(&formula)?;
        Ok(Self {
            formula,
            expr,
            metric: Metric::Sum,
        })
    }

    /// Set the metric region values are looked up under.
    pub fn with_metric(
        mut self,
        metric: Metric,
    ) -> Self {
        self.metric = metric;
        self
    }

    /// Get the formula source.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Get the expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Get the lookup metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// The condition names the formula references.
    pub fn conditions(&self) -> BTreeSet<&str> {
        self.expr
            .region_refs()
            .into_iter()
            .map(|r| r.condition.as_str())
            .collect()
    }

    /// Check that `item` has every condition the formula references.
    pub fn check_conditions(
        &self,
        item: &Item,
    ) -> SGResult<()> {
        match self
            .conditions()
            .into_iter()
            .find(|name| item.condition(name).is_none())
        {
            Some(name) => Err(SyntaxGymError::PredictionParse {
                formula: self.formula.clone(),
                reason: format!("item {} has no condition {name:?}", item.item_number),
            }),
            None => Ok(()),
        }
    }

    /// Evaluate the prediction on one item.
    ///
    /// ## Returns
    /// Whether the prediction holds; `MissingCondition` or
    /// `MissingRegionValue` if the item lacks a referenced value.
    pub fn evaluate(
        &self,
        item: &Item,
    ) -> SGResult<bool> {
        match self.expr.evaluate(&ItemValues::new(item, self.metric))? {
            Value::Bool(result) => Ok(result),
            Value::Number(_) => Err(SyntaxGymError::PredictionParse {
                formula: self.formula.clone(),
                reason: "formula does not produce a truth value".to_string(),
            }),
        }
    }
}
