//! Statistics over a collected aggregate
//!
//! This module provides functionality for summarizing and displaying what a
//! crawl collected.

use crate::model::Aggregate;
use std::collections::BTreeMap;

/// Aggregate statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStatistics {
    /// Number of page records
    pub pages: u64,

    /// Total number of element records
    pub elements: u64,

    /// Elements that can be targeted when applying
    pub eligible_elements: u64,

    /// Total number of translation entries
    pub translations: u64,

    /// Entries with empty text
    pub blank_translations: u64,

    /// Blank entries per language code
    pub blank_by_language: BTreeMap<String, u64>,
}

impl AggregateStatistics {
    /// Computes statistics for an aggregate
    pub fn from_aggregate(aggregate: &Aggregate) -> Self {
        let mut stats = Self {
            pages: aggregate.len() as u64,
            ..Self::default()
        };

        for element in aggregate.elements() {
            stats.elements += 1;
            if element.eligible {
                stats.eligible_elements += 1;
            }
            for entry in &element.translations {
                stats.translations += 1;
                if entry.is_blank() {
                    stats.blank_translations += 1;
                    *stats
                        .blank_by_language
                        .entry(entry.language_code.clone())
                        .or_insert(0) += 1;
                }
            }
        }

        stats
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &AggregateStatistics) {
    println!("=== Translation Data ===\n");

    println!("Overview:");
    println!("  Pages: {}", stats.pages);
    println!(
        "  Elements: {} ({} with an id)",
        stats.elements, stats.eligible_elements
    );
    println!("  Translation entries: {}", stats.translations);
    println!();

    if !stats.blank_by_language.is_empty() {
        println!("Blank Entries by Language:");
        for (code, count) in &stats.blank_by_language {
            println!("  {}: {}", code, count);
        }
        println!();
    }

    let filled = stats.translations - stats.blank_translations;
    let coverage = if stats.translations > 0 {
        (filled as f64 / stats.translations as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Coverage: {:.1}% ({} / {} entries translated)",
        coverage, filled, stats.translations
    );
}
