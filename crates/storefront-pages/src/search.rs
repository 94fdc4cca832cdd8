// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Search-as-you-type over the products already on the page.

use serde::{Deserialize, Serialize};
use storefront_app_core::timer::{TimerId, TimerIds, TimerSlot};
use tracing::debug;

use crate::page::Product;

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke; zero searches on every input.
    pub debounce_ms: u32,
    /// Cap on rendered results; `None` renders every match.
    pub max_results: Option<usize>,
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// Blank term: hide the result panel.
    Hidden,
    /// Matching products in page order; may be empty.
    Results(Vec<&'a Product>),
}

/// Lower-cased product names for substring matching.
#[derive(Debug, Clone)]
pub struct ProductIndex {
    products: Vec<Product>,
    names: Vec<String>,
    max_results: Option<usize>,
}

impl ProductIndex {
    /// Index `products`.
    pub fn new(products: Vec<Product>, config: &SearchConfig) -> Self {
        let names = products.iter().map(|p| p.item_name.to_lowercase()).collect();
        Self {
            products,
            names,
            max_results: config.max_results,
        }
    }

    /// Indexed product count.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Match `term` case-insensitively against item names.
    ///
    /// The lowered term is matched as typed, so surrounding spaces count.
    pub fn query(&self, term: &str) -> SearchOutcome<'_> {
        let needle = term.to_lowercase();
        if needle.trim().is_empty() {
            return SearchOutcome::Hidden;
        }
        let cap = self.max_results.unwrap_or(usize::MAX);
        let hits = self
            .products
            .iter()
            .zip(&self.names)
            .filter(|(_, name)| name.contains(&needle))
            .map(|(product, _)| product)
            .take(cap)
            .collect();
        SearchOutcome::Results(hits)
    }
}

/// Label shown under a search hit.
pub fn price_label(product: &Product) -> String {
    format!("Price : {}", product.standard_rate)
}

/// What the host does with one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep {
    /// Query right away.
    Now(String),
    /// Wait for the debounce timer.
    Deferred {
        /// Timer to cancel first.
        cancel: Option<TimerId>,
        /// Timer to schedule.
        schedule: TimerId,
        /// Delay for `schedule`.
        delay_ms: u32,
    },
}

/// Debounced search input.
#[derive(Debug, Default)]
pub struct SearchBox {
    debounce_ms: u32,
    ids: TimerIds,
    slot: TimerSlot,
    pending: Option<String>,
}

impl SearchBox {
    /// Input debounced per `config`.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            ..Self::default()
        }
    }

    /// Feed the current input value.
    pub fn input(&mut self, term: &str) -> SearchStep {
        if self.debounce_ms == 0 {
            return SearchStep::Now(term.to_string());
        }
        self.pending = Some(term.to_string());
        let rearm = self.slot.arm(&mut self.ids);
        SearchStep::Deferred {
            cancel: rearm.canceled,
            schedule: rearm.scheduled,
            delay_ms: self.debounce_ms,
        }
    }

    /// The debounce timer fired; returns the term to query unless stale.
    pub fn fire(&mut self, timer: TimerId) -> Option<String> {
        if !self.slot.claim(timer) {
            debug!(%timer, "stale search timer ignored");
            return None;
        }
        self.pending.take()
    }
}

#[allow(clippy::unwrap_used, clippy::panic)]
#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, name: &str) -> Product {
        Product {
            item_code: code.into(),
            item_name: name.into(),
            image: None,
            standard_rate: "10".into(),
            has_variants: 0,
        }
    }

    fn index(max_results: Option<usize>) -> ProductIndex {
        ProductIndex::new(
            vec![
                product("T1", "Red Shirt"),
                product("T2", "Blue Shirt"),
                product("M1", "Coffee Mug"),
            ],
            &SearchConfig {
                debounce_ms: 0,
                max_results,
            },
        )
    }

    fn codes(outcome: SearchOutcome<'_>) -> Vec<String> {
        match outcome {
            SearchOutcome::Results(hits) => hits.into_iter().map(|p| p.item_code.clone()).collect(),
            SearchOutcome::Hidden => vec!["<hidden>".into()],
        }
    }

    #[test]
    fn matches_case_insensitively() {
        assert_eq!(codes(index(None).query("SHIRT")), vec!["T1", "T2"]);
    }

    #[test]
    fn blank_term_hides_panel() {
        assert_eq!(index(None).query("   "), SearchOutcome::Hidden);
        assert_eq!(index(None).query(""), SearchOutcome::Hidden);
    }

    #[test]
    fn no_match_is_an_empty_result() {
        assert_eq!(index(None).query("lamp"), SearchOutcome::Results(vec![]));
    }

    #[test]
    fn spaces_are_part_of_the_term() {
        assert_eq!(codes(index(None).query("d s")), vec!["T1"]);
        assert_eq!(codes(index(None).query(" mug ")), Vec::<String>::new());
    }

    #[test]
    fn result_cap_applies() {
        assert_eq!(codes(index(Some(1)).query("shirt")), vec!["T1"]);
    }

    #[test]
    fn price_label_format() {
        assert_eq!(price_label(&product("X", "x")), "Price : 10");
    }

    #[test]
    fn zero_debounce_is_immediate() {
        let mut input = SearchBox::new(&SearchConfig::default());
        assert_eq!(input.input("mug"), SearchStep::Now("mug".into()));
    }

    #[test]
    fn debounce_keeps_only_last_term() {
        let mut input = SearchBox::new(&SearchConfig {
            debounce_ms: 200,
            max_results: None,
        });
        let SearchStep::Deferred { schedule: first, .. } = input.input("m") else {
            panic!("expected deferred");
        };
        let SearchStep::Deferred { cancel, schedule, delay_ms } = input.input("mu") else {
            panic!("expected deferred");
        };
        assert_eq!(cancel, Some(first));
        assert_eq!(delay_ms, 200);
        assert_eq!(input.fire(first), None);
        assert_eq!(input.fire(schedule).as_deref(), Some("mu"));
        assert_eq!(input.fire(schedule), None);
    }
}
