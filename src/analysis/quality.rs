//! Project quality scoring
//!
//! Component-derived metrics fall back to a neutral score when nothing was
//! analyzed. Every score is clamped to 0..=100.

use crate::constants::quality::*;
use crate::types::{
    ArchitectureInfo, ComponentInfo, DependencyInfo, FrameworkInfo, QualityScores, clamp_score,
};

use super::manifest::is_unpinned;

/// Everything the scores are computed from
pub struct QualityInputs<'a> {
    pub components: &'a [ComponentInfo],
    pub dependencies: &'a [DependencyInfo],
    pub framework: &'a FrameworkInfo,
    pub architecture: &'a ArchitectureInfo,
    pub has_readme: bool,
}

pub fn assess(inputs: &QualityInputs<'_>) -> QualityScores {
    let components = inputs.components;

    let accessibility = mean(components, |c| f64::from(c.accessibility.score));
    let maintainability = mean(components, |c| c.complexity.maintainability_index);

    let code_quality = if components.is_empty() {
        NEUTRAL_SCORE
    } else {
        let cyclomatic = mean(components, |c| f64::from(c.complexity.cyclomatic));
        let excess = (cyclomatic - COMPLEXITY_TARGET).max(0.0);
        let typescript_penalty = if inputs.architecture.typescript {
            0.0
        } else {
            NO_TYPESCRIPT_PENALTY
        };
        100.0 - excess * COMPLEXITY_PENALTY - typescript_penalty
    };

    let production: Vec<&DependencyInfo> =
        inputs.dependencies.iter().filter(|d| !d.is_dev).collect();
    let extra_production = production.len().saturating_sub(PROD_DEPENDENCY_ALLOWANCE);
    let unpinned = production.iter().filter(|d| is_unpinned(&d.version)).count();
    let security = 100.0
        - extra_production as f64 * SECURITY_PER_EXTRA_DEPENDENCY
        - unpinned as f64 * UNPINNED_VERSION_PENALTY;

    let extra_total = inputs
        .dependencies
        .len()
        .saturating_sub(TOTAL_DEPENDENCY_ALLOWANCE);
    let mean_lines = mean(components, |c| c.lines_of_code as f64);
    let size_penalty = if components.is_empty() {
        0.0
    } else {
        (mean_lines - LARGE_COMPONENT_LINES).max(0.0) / LINES_PER_PERFORMANCE_POINT
    };
    let framework_penalty = if inputs.framework.is_known() {
        0.0
    } else {
        UNKNOWN_FRAMEWORK_PENALTY
    };
    let performance = 100.0
        - extra_total as f64 * PERFORMANCE_PER_EXTRA_DEPENDENCY
        - size_penalty
        - framework_penalty;

    let test_coverage = if components.is_empty() {
        NEUTRAL_SCORE
    } else {
        let bonus = if inputs.architecture.testing.is_empty() {
            0.0
        } else {
            TEST_FRAMEWORK_BONUS
        };
        share(components, |c| c.has_tests) * 100.0 + bonus
    };

    let readme = if inputs.has_readme { README_BONUS } else { 0.0 };
    let documentation = if components.is_empty() {
        NEUTRAL_SCORE
    } else {
        share(components, |c| c.has_documentation) * DOCUMENTED_SHARE_WEIGHT + readme
    };

    let mut scores = QualityScores {
        overall: 0,
        code_quality: clamp_score(code_quality),
        security: clamp_score(security),
        performance: clamp_score(performance),
        accessibility: clamp_score(accessibility),
        maintainability: clamp_score(maintainability),
        test_coverage: clamp_score(test_coverage),
        documentation: clamp_score(documentation),
    };
    let categories = scores.categories();
    let total: f64 = categories.iter().map(|(_, s)| f64::from(*s)).sum();
    scores.overall = clamp_score(total / categories.len() as f64);
    scores
}

fn mean(components: &[ComponentInfo], value: impl Fn(&ComponentInfo) -> f64) -> f64 {
    if components.is_empty() {
        return NEUTRAL_SCORE;
    }
    components.iter().map(value).sum::<f64>() / components.len() as f64
}

fn share(components: &[ComponentInfo], predicate: impl Fn(&ComponentInfo) -> bool) -> f64 {
    if components.is_empty() {
        return 0.0;
    }
    components.iter().filter(|c| predicate(c)).count() as f64 / components.len() as f64
}
