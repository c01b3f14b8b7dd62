//! # Sentence View

use crate::suite::Region;

/// A borrowed view of one (item, condition) pair.
///
/// The sentence text is the non-empty region contents joined with single
/// spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentence<'a> {
    item_number: u32,
    condition_name: &'a str,
    regions: &'a [Region],
}

impl<'a> Sentence<'a> {
    /// Create a new sentence view.
    pub fn new(
        item_number: u32,
        condition_name: &'a str,
        regions: &'a [Region],
    ) -> Self {
        Self {
            item_number,
            condition_name,
            regions,
        }
    }

    /// Get the item number.
    pub fn item_number(&self) -> u32 {
        self.item_number
    }

    /// Get the condition name.
    pub fn condition_name(&self) -> &'a str {
        self.condition_name
    }

    /// Get the regions, in sentence order.
    pub fn regions(&self) -> &'a [Region] {
        self.regions
    }

    /// Build the sentence text.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .regions
            .iter()
            .map(Region::content)
            .filter(|c| !c.is_empty())
            .collect();
        parts.join(" ")
    }

    /// Character offsets of the left edge of each region in [`Sentence::text`].
    ///
    /// The joining space before a region belongs to that region, so region
    /// `k` spans `edges[k]..edges[k + 1]`. Empty regions have zero width.
    pub fn region_edges(&self) -> Vec<usize> {
        let mut edges = Vec::with_capacity(self.regions.len());
        let mut pos = 0;
        let mut first = true;
        for region in self.regions {
            edges.push(pos);
            if region.is_empty() {
                continue;
            }
            let width = region.content().chars().count();
            if first {
                pos += width;
                first = false;
            } else {
                pos += width + 1;
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(contents: &[&str]) -> Vec<Region> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| Region::new(i as u32 + 1, *c).unwrap())
            .collect()
    }

    #[test]
    fn test_text_skips_empty_regions() {
        let regions = regions(&["The woman", "", "saw", "herself."]);
        let sentence = Sentence::new(1, "reflexive", &regions);
        assert_eq!(sentence.text(), "The woman saw herself.");
        assert_eq!(sentence.item_number(), 1);
        assert_eq!(sentence.condition_name(), "reflexive");
    }

    #[test]
    fn test_region_edges() {
        let regions = regions(&["The woman", "", "saw", "herself."]);
        let sentence = Sentence::new(1, "reflexive", &regions);
        let text: Vec<char> = sentence.text().chars().collect();

        let edges = sentence.region_edges();
        assert_eq!(edges, vec![0, 9, 9, 13]);
        assert_eq!(text[edges[2]..edges[3]].iter().collect::<String>(), " saw");
        assert_eq!(text[edges[3]..].iter().collect::<String>(), " herself.");
    }

    #[test]
    fn test_region_edges_leading_empty() {
        let regions = regions(&["", "Über", "alles"]);
        let sentence = Sentence::new(1, "c", &regions);
        assert_eq!(sentence.text(), "Über alles");
        assert_eq!(sentence.region_edges(), vec![0, 0, 4]);
    }
}
