/*!
 * Animation catalog built from the robot toolkit's flat animation listing.
 *
 * The listing is a newline-separated set of slash-delimited paths, either
 * `Category/Name` or `Category/Subcategory/Name`. The catalog groups them
 * into a two-level tree used for authoring and for pre-dispatch validation.
 */

use log::debug;
use std::collections::BTreeMap;

/// Sentinel subcategory for animations listed directly under a category
pub const NO_SUBCATEGORY: &str = "_no_subcategory";

/// Two-level animation tree: category -> subcategory -> animation names.
///
/// Immutable after construction; a reload builds a fresh catalog rather
/// than mutating this one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationCatalog {
    categories: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl AnimationCatalog {
    /// Build a catalog from the newline-separated animation listing.
    ///
    /// Lines with two segments land in the [`NO_SUBCATEGORY`] bucket, lines
    /// with three segments under their subcategory. Any other segment count
    /// is malformed listing data and is dropped, not an error. Insertion
    /// order within a bucket follows input order.
    pub fn from_listing(listing: &str) -> Self {
        let mut categories: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
        let mut dropped = 0usize;

        for line in listing.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split('/').collect();
            match parts.as_slice() {
                [category, name] => {
                    categories
                        .entry((*category).to_string())
                        .or_default()
                        .entry(NO_SUBCATEGORY.to_string())
                        .or_default()
                        .push((*name).to_string());
                }
                [category, subcategory, name] => {
                    categories
                        .entry((*category).to_string())
                        .or_default()
                        .entry((*subcategory).to_string())
                        .or_default()
                        .push((*name).to_string());
                }
                _ => {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            debug!("Animation listing contained {} malformed line(s), dropped", dropped);
        }

        Self { categories }
    }

    /// Number of categories in the catalog
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Total number of animations across all buckets
    pub fn animation_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|subs| subs.values())
            .map(|names| names.len())
            .sum()
    }

    /// True when the listing produced no animations at all
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate categories in deterministic (sorted) order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Subcategories of a category, in deterministic (sorted) order.
    ///
    /// Includes [`NO_SUBCATEGORY`] when the category has direct animations.
    pub fn subcategories(&self, category: &str) -> Option<impl Iterator<Item = &str>> {
        self.categories
            .get(category)
            .map(|subs| subs.keys().map(String::as_str))
    }

    /// Animation names under a (category, subcategory) bucket, in input order.
    ///
    /// Pass `None` for animations listed directly under the category.
    pub fn animations(&self, category: &str, subcategory: Option<&str>) -> Option<&[String]> {
        let bucket = subcategory.unwrap_or(NO_SUBCATEGORY);
        self.categories
            .get(category)
            .and_then(|subs| subs.get(bucket))
            .map(Vec::as_slice)
    }

    /// Check whether a specific animation exists in the catalog
    pub fn contains(&self, category: &str, subcategory: Option<&str>, name: &str) -> bool {
        self.animations(category, subcategory)
            .is_some_and(|names| names.iter().any(|n| n == name))
    }

    /// Resolve a slash-delimited animation path against the catalog.
    ///
    /// Accepts the same two shapes as the listing itself; any other segment
    /// count cannot resolve.
    pub fn is_valid_path(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.trim().split('/').collect();
        match parts.as_slice() {
            [category, name] => self.contains(category, None, name),
            [category, subcategory, name] => self.contains(category, Some(subcategory), name),
            _ => false,
        }
    }
}
