//! The ordered list of wheel options.
//!
//! Order matters: index decides wheel position and colour.

use crate::{
    resolver::{segment_span, SegmentSpan},
    types::Item,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ItemList {
    items: Vec<Item>,
}

/// One wedge of the wheel, as handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub label: Item,
    pub color: String,
    pub span:  SegmentSpan,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw strings, dropping blanks and duplicates.
    pub fn from_items<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for item in raw {
            list.add(item.as_ref());
        }
        list
    }

    /// Append a trimmed, non-empty, not-yet-present item.
    /// Returns false (and changes nothing) otherwise.
    pub fn add(&mut self, raw: &str) -> bool {
        let item = raw.trim();
        if item.is_empty() {
            log::debug!("items: rejected empty item");
            return false;
        }
        if self.contains(item) {
            log::debug!("items: rejected duplicate {item:?}");
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    /// Remove an item by exact match. Returns whether it was present.
    pub fn remove(&mut self, item: &str) -> bool {
        match self.position(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    pub fn position(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Wedges for the renderer: equal arcs starting at 12 o'clock.
    pub fn layout(&self, palette: &[String]) -> Vec<Segment> {
        let n = self.items.len();
        self.items
            .iter()
            .enumerate()
            .map(|(index, label)| Segment {
                index,
                label: label.clone(),
                color: color_for(index, palette),
                span:  segment_span(index, n),
            })
            .collect()
    }
}

/// Palette colour for the item at `index`. Empty palettes yield white.
pub fn color_for(index: usize, palette: &[String]) -> String {
    if palette.is_empty() {
        return "#FFFFFF".to_string();
    }
    palette[index % palette.len()].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_rejects_blank_and_duplicates() {
        let mut list = ItemList::new();
        assert!(list.add("  Pizza "));
        assert!(!list.add("Pizza"));
        assert!(!list.add("   "));
        assert!(list.add("pizza"), "uniqueness is case-sensitive");
        assert_eq!(list.as_slice(), ["Pizza".to_string(), "pizza".to_string()]);
    }

    #[test]
    fn colors_wrap_around_the_palette() {
        let palette = vec!["#1".to_string(), "#2".to_string()];
        assert_eq!(color_for(0, &palette), "#1");
        assert_eq!(color_for(3, &palette), "#2");
        assert_eq!(color_for(3, &[]), "#FFFFFF");
    }

    #[test]
    fn layout_covers_full_circle() {
        let list = ItemList::from_items(["A", "B", "C"]);
        let segments = list.layout(&["#F00".to_string()]);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].span.start, -90.0);
        assert_eq!(segments[2].span.end, 270.0);
        assert!(segments.iter().all(|s| s.color == "#F00"));
    }
}
