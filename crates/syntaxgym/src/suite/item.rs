//! # Items and Conditions

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{SGResult, SyntaxGymError},
    suite::{Region, Sentence},
};

/// One variant of an item: an ordered list of regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition")]
pub struct Condition {
    /// The condition name, shared across the items of a suite.
    pub condition_name: String,

    /// Regions, in sentence order.
    pub regions: Vec<Region>,
}

#[derive(Deserialize)]
struct RawCondition {
    condition_name: String,
    regions: Vec<Region>,
}

impl TryFrom<RawCondition> for Condition {
    type Error = SyntaxGymError;

    fn try_from(raw: RawCondition) -> SGResult<Self> {
        Condition::new(raw.condition_name, raw.regions)
    }
}

impl Condition {
    /// Create a condition, checking that region numbers are unique.
    pub fn new<S: Into<String>>(
        condition_name: S,
        regions: Vec<Region>,
    ) -> SGResult<Self> {
        let condition_name = condition_name.into();
        let mut seen = HashSet::with_capacity(regions.len());
        for region in &regions {
            if !seen.insert(region.region_number) {
                return Err(SyntaxGymError::InvalidSpec(format!(
                    "condition {condition_name:?} repeats region number {}",
                    region.region_number
                )));
            }
        }
        Ok(Self {
            condition_name,
            regions,
        })
    }

    /// Find a region by number.
    pub fn region(
        &self,
        region_number: u32,
    ) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| r.region_number == region_number)
    }
}

/// One template instantiated under several conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The item number.
    pub item_number: u32,

    /// The conditions, in document order.
    pub conditions: Vec<Condition>,
}

impl Item {
    /// Find a condition by name.
    pub fn condition(
        &self,
        condition_name: &str,
    ) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|c| c.condition_name == condition_name)
    }

    /// Iterate the sentences of this item, in condition order.
    pub fn sentences(&self) -> impl Iterator<Item = Sentence<'_>> {
        self.conditions
            .iter()
            .map(|c| Sentence::new(self.item_number, &c.condition_name, &c.regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_region_numbers() {
        let regions = vec![Region::new(1, "a").unwrap(), Region::new(1, "b").unwrap()];
        assert!(matches!(
            Condition::new("dup", regions),
            Err(SyntaxGymError::InvalidSpec(_))
        ));

        let json = r#"{"condition_name": "dup", "regions": [
            {"region_number": 2, "content": "x"},
            {"region_number": 2, "content": "y"}
        ]}"#;
        assert!(serde_json::from_str::<Condition>(json).is_err());
    }

    #[test]
    fn test_lookup() {
        let item = Item {
            item_number: 7,
            conditions: vec![
                Condition::new(
                    "match",
                    vec![Region::new(2, "the dog").unwrap(), Region::new(1, "").unwrap()],
                )
                .unwrap(),
                Condition::new("mismatch", vec![]).unwrap(),
            ],
        };

        let cond = item.condition("match").unwrap();
        assert_eq!(cond.region(2).unwrap().content(), "the dog");
        assert!(cond.region(3).is_none());
        assert!(item.condition("other").is_none());

        let names: Vec<_> = item.sentences().map(|s| s.condition_name()).collect();
        assert_eq!(names, vec!["match", "mismatch"]);
    }
}
