//! Chart data aggregation
//!
//! Distributions are bounded by bucket count, not by component count, so they
//! stay small for any project size.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::reporting::BAR_WIDTH;
use crate::types::{ComponentInfo, DependencyInfo};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value: usize,
}

impl ChartPoint {
    fn new(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

const COMPLEXITY_BUCKETS: &[(&str, u32, u32)] = &[
    ("low (1-5)", 1, 5),
    ("moderate (6-10)", 6, 10),
    ("high (11-20)", 11, 20),
    ("very high (21+)", 21, u32::MAX),
];

const ACCESSIBILITY_BUCKETS: &[(&str, u8, u8)] = &[
    ("excellent (90-100)", 90, 100),
    ("good (70-89)", 70, 89),
    ("fair (50-69)", 50, 69),
    ("poor (0-49)", 0, 49),
];

/// Count of components per type, in type order
pub fn type_distribution(components: &[ComponentInfo]) -> Vec<ChartPoint> {
    let mut counts = BTreeMap::new();
    for component in components {
        *counts.entry(component.component_type).or_insert(0usize) += 1;
    }
    counts
        .into_iter()
        .map(|(kind, count)| ChartPoint::new(kind.to_string(), count))
        .collect()
}

pub fn complexity_distribution(components: &[ComponentInfo]) -> Vec<ChartPoint> {
    COMPLEXITY_BUCKETS
        .iter()
        .map(|(label, low, high)| {
            let count = components
                .iter()
                .filter(|c| (*low..=*high).contains(&c.complexity.cyclomatic.max(1)))
                .count();
            ChartPoint::new(*label, count)
        })
        .collect()
}

pub fn accessibility_distribution(components: &[ComponentInfo]) -> Vec<ChartPoint> {
    ACCESSIBILITY_BUCKETS
        .iter()
        .map(|(label, low, high)| {
            let count = components
                .iter()
                .filter(|c| (*low..=*high).contains(&c.accessibility.score.min(100)))
                .count();
            ChartPoint::new(*label, count)
        })
        .collect()
}

/// Dependencies per category, categories with none left out
pub fn dependency_distribution(dependencies: &[DependencyInfo]) -> Vec<ChartPoint> {
    let mut counts = BTreeMap::new();
    for dep in dependencies {
        *counts.entry(dep.category).or_insert(0usize) += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| ChartPoint::new(category.to_string(), count))
        .collect()
}

/// Fixed-width text bar for a 0-100 score
pub fn score_bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
