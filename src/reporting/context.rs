//! Report data assembly
//!
//! Each builder turns an engine result into a [`ReportDocument`]: sections
//! for the text formats and a structured `data` payload for JSON. When the
//! component count exceeds the summarize threshold, per-component listings
//! are replaced by counts and distributions in both.

use chrono::Utc;
use serde_json::{Value, json};

use super::charts::{
    ChartPoint, accessibility_distribution, complexity_distribution, dependency_distribution,
    score_bar, type_distribution,
};
use super::smells::detect_smells;
use super::types::{ReportDocument, ReportKind, Section, Table};
use crate::config::ReportingConfig;
use crate::constants::reporting::RECOMMENDATION_THRESHOLD;
use crate::migration::MigrationResult;
use crate::types::{AnalysisResult, QualityScores};

/// Smells listed by name in a summarized architecture report
const MAX_SUMMARIZED_SMELLS: usize = 10;

const RECOMMENDATIONS: &[(&str, &str)] = &[
    ("Code Quality", "Reduce branching in the most complex components and adopt TypeScript"),
    ("Security", "Pin dependency versions and prune unused production dependencies"),
    ("Performance", "Trim the dependency list and split oversized components"),
    ("Accessibility", "Add labels, ARIA roles and keyboard handlers to interactive elements"),
    ("Maintainability", "Extract shared logic into hooks and break up long components"),
    ("Test Coverage", "Add tests for components without a test file"),
    ("Documentation", "Document components with doc comments or stories and keep a README"),
];

pub fn health(analysis: &AnalysisResult, config: &ReportingConfig) -> ReportDocument {
    let count = analysis.components.len();
    let summarized = count > config.summarize_threshold;
    let quality = &analysis.quality;

    let overview = Section::new("Overview")
        .item(format!("Project: {}", project_label(analysis)))
        .item(format!(
            "Framework: {} {}",
            analysis.framework.name, analysis.framework.version
        ))
        .item(format!("Architecture: {}", analysis.architecture.pattern))
        .item(format!(
            "TypeScript: {}",
            yes_no(analysis.architecture.typescript)
        ))
        .item(format!(
            "Dependencies: {} production, {} development",
            analysis.production_dependencies().count(),
            analysis.dev_dependencies().count()
        ))
        .item(format!("Skipped files: {}", analysis.skipped_files.len()));

    let types = type_distribution(&analysis.components);
    let complexity = complexity_distribution(&analysis.components);
    let accessibility = accessibility_distribution(&analysis.components);
    let issue_count: usize = analysis
        .components
        .iter()
        .map(|c| c.accessibility.issues.len())
        .sum();

    let mut sections = vec![
        overview,
        Section::new("Quality Scores").table(score_table(quality)),
        Section::new("Component Types").table(chart_table("Type", &types)),
        Section::new("Complexity").table(chart_table("Cyclomatic complexity", &complexity)),
        Section::new("Accessibility")
            .paragraph(format!("{} accessibility issues found", issue_count))
            .table(chart_table("Score", &accessibility)),
    ];

    let listing = if summarized {
        sections.push(Section::new("Components").paragraph(summary_note(count, config)));
        Value::Null
    } else {
        let mut table = Table::new(["Name", "Type", "Complexity", "A11y", "Lines", "Tests"]);
        for c in &analysis.components {
            table = table.row([
                c.name.clone(),
                c.component_type.to_string(),
                c.complexity.cyclomatic.to_string(),
                c.accessibility.score.to_string(),
                c.lines_of_code.to_string(),
                yes_no(c.has_tests).to_string(),
            ]);
        }
        let mut section = Section::new("Components");
        if table.is_empty() {
            section = section.paragraph("No components found");
        } else {
            section = section.table(table);
        }
        sections.push(section);
        json!(analysis.components)
    };

    let recommendations = recommendations(quality);
    sections.push(recommendation_section(&recommendations));

    let data = json!({
        "project": analysis.project,
        "component_count": count,
        "framework": analysis.framework,
        "architecture": analysis.architecture,
        "quality": quality,
        "grade": quality.grade().to_string(),
        "distributions": {
            "types": types,
            "complexity": complexity,
            "accessibility": accessibility,
        },
        "components": listing,
        "skipped_files": analysis.skipped_files.len(),
        "recommendations": recommendations,
    });

    document(
        ReportKind::Health,
        format!(
            "{}: {} components, overall quality {}/100 (grade {})",
            analysis.project.name,
            count,
            quality.overall,
            quality.grade()
        ),
        summarized,
        sections,
        data,
    )
}

pub fn architecture(analysis: &AnalysisResult, config: &ReportingConfig) -> ReportDocument {
    let count = analysis.components.len();
    let summarized = count > config.summarize_threshold;
    let arch = &analysis.architecture;

    let structure = Section::new("Structure")
        .item(format!("Pattern: {}", arch.pattern))
        .item(format!(
            "State management: {}",
            arch.state_management.as_deref().unwrap_or("none detected")
        ))
        .item(format!("Styling: {}", list_or_none(&arch.styling)))
        .item(format!(
            "Routing: {}",
            arch.routing.as_deref().unwrap_or("none detected")
        ))
        .item(format!("Testing: {}", list_or_none(&arch.testing)))
        .item(format!("TypeScript: {}", yes_no(arch.typescript)));

    let types = type_distribution(&analysis.components);
    let categories = dependency_distribution(&analysis.dependencies);
    let mut dependencies = Section::new("Dependencies").table(chart_table("Category", &categories));
    if !summarized && !analysis.dependencies.is_empty() {
        let mut table = Table::new(["Name", "Version", "Category", "Scope"]);
        for dep in &analysis.dependencies {
            table = table.row([
                dep.name.clone(),
                dep.version.clone(),
                dep.category.to_string(),
                if dep.is_dev { "dev" } else { "production" }.to_string(),
            ]);
        }
        dependencies = dependencies.table(table);
    }

    let smells = detect_smells(&analysis.components, config.god_component_threshold);
    let mut smell_section = Section::new("Architecture Smells");
    if smells.is_empty() {
        smell_section = smell_section.paragraph("No architecture smells detected");
    } else {
        let listed = if summarized {
            MAX_SUMMARIZED_SMELLS.min(smells.len())
        } else {
            smells.len()
        };
        smell_section = smell_section
            .paragraph(format!("{} smells detected", smells.len()))
            .items(smells.iter().take(listed).map(|s| s.to_string()));
        if listed < smells.len() {
            smell_section = smell_section.item(format!("... and {} more", smells.len() - listed));
        }
    }

    let mut sections = vec![
        structure,
        Section::new("Component Types").table(chart_table("Type", &types)),
        dependencies,
        smell_section,
    ];
    if summarized {
        sections.push(Section::new("Components").paragraph(summary_note(count, config)));
    }

    let listed_smells: Vec<_> = if summarized {
        smells.iter().take(MAX_SUMMARIZED_SMELLS).collect()
    } else {
        smells.iter().collect()
    };
    let dependency_listing = if summarized {
        Value::Null
    } else {
        json!(analysis.dependencies)
    };
    let data = json!({
        "project": analysis.project,
        "component_count": count,
        "architecture": arch,
        "distributions": { "types": types, "dependencies": categories },
        "dependencies": dependency_listing,
        "smell_count": smells.len(),
        "smells": listed_smells,
    });

    document(
        ReportKind::Architecture,
        format!(
            "{}: {} components, {} architecture",
            analysis.project.name, count, arch.pattern
        ),
        summarized,
        sections,
        data,
    )
}

pub fn executive_summary(analysis: &AnalysisResult, config: &ReportingConfig) -> ReportDocument {
    let count = analysis.components.len();
    let quality = &analysis.quality;
    let grade = quality.grade();

    let strengths: Vec<String> = quality
        .categories()
        .iter()
        .filter(|(_, score)| *score >= 80)
        .map(|(name, score)| format!("{} ({})", name, score))
        .collect();
    let risks: Vec<String> = quality
        .categories()
        .iter()
        .filter(|(_, score)| *score < RECOMMENDATION_THRESHOLD)
        .map(|(name, score)| format!("{} ({})", name, score))
        .collect();
    let recommendations = recommendations(quality);

    let summary = Section::new("Summary").paragraph(format!(
        "{} is a {} project with {} components. Overall quality is {}/100, grade {}.",
        project_label(analysis),
        analysis.framework.name,
        count,
        quality.overall,
        grade
    ));

    let sections = vec![
        summary,
        Section::new("Scores").table(score_table(quality)),
        list_section("Strengths", &strengths, "No category scores 80 or above"),
        list_section("Risks", &risks, "No category scores below the recommendation threshold"),
        recommendation_section(&recommendations),
    ];

    let data = json!({
        "project": analysis.project,
        "component_count": count,
        "framework": analysis.framework.name,
        "overall": quality.overall,
        "grade": grade.to_string(),
        "quality": quality,
        "strengths": strengths,
        "risks": risks,
        "recommendations": recommendations,
    });

    document(
        ReportKind::ExecutiveSummary,
        format!(
            "{}: grade {} ({}/100) across {} components",
            analysis.project.name, grade, quality.overall, count
        ),
        count > config.summarize_threshold,
        sections,
        data,
    )
}

pub fn migration(result: &MigrationResult, config: &ReportingConfig) -> ReportDocument {
    let file_count = result.modified_files.len() + result.previewed_files.len();
    let summarized = file_count + result.skipped_files.len() > config.summarize_threshold;
    let status = if result.success { "succeeded" } else { "failed" };

    let mut outcome = Section::new("Outcome")
        .item(format!("Status: {}", status))
        .item(format!("Final state: {}", result.final_state))
        .item(format!("Completed phases: {}", result.completed_phases.len()))
        .item(format!("Failed phases: {}", result.failed_phases.len()));
    if let Some(location) = &result.backup_location {
        outcome = outcome.item(format!("Backup: {}", location.display()));
    }

    let mut phases = Table::new(["Phase", "Status"]);
    for id in &result.completed_phases {
        phases = phases.row([id.as_str(), "completed"]);
    }
    for id in &result.failed_phases {
        phases = phases.row([id.as_str(), "failed"]);
    }
    let mut phase_section = Section::new("Phases");
    phase_section = if phases.is_empty() {
        phase_section.paragraph("No phases ran")
    } else {
        phase_section.table(phases)
    };

    let mut files = Section::new("Files")
        .item(format!("Modified: {}", result.modified_files.len()))
        .item(format!("Previewed: {}", result.previewed_files.len()))
        .item(format!("Skipped: {}", result.skipped_files.len()));
    if summarized {
        files = files.paragraph(format!(
            "File listing omitted for {} files (threshold {})",
            file_count + result.skipped_files.len(),
            config.summarize_threshold
        ));
    } else {
        let paths = result
            .modified_files
            .iter()
            .map(|p| format!("modified {}", p.display()))
            .chain(
                result
                    .previewed_files
                    .iter()
                    .map(|p| format!("previewed {}", p.display())),
            )
            .chain(
                result
                    .skipped_files
                    .iter()
                    .map(|p| format!("skipped {}", p.display())),
            );
        files = files.items(paths);
    }

    let errors: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
    let sections = vec![
        outcome,
        phase_section,
        files,
        list_section("Errors", &errors, "No errors"),
        list_section("Warnings", &result.warnings, "No warnings"),
    ];

    let file_listing = if summarized {
        Value::Null
    } else {
        json!({
            "modified": result.modified_files,
            "previewed": result.previewed_files,
            "skipped": result.skipped_files,
        })
    };
    let data = json!({
        "success": result.success,
        "final_state": result.final_state,
        "completed_phases": result.completed_phases,
        "failed_phases": result.failed_phases,
        "backup_location": result.backup_location,
        "file_counts": {
            "modified": result.modified_files.len(),
            "previewed": result.previewed_files.len(),
            "skipped": result.skipped_files.len(),
        },
        "files": file_listing,
        "errors": result.errors,
        "warnings": result.warnings,
    });

    document(
        ReportKind::Migration,
        format!(
            "Migration {}: {} completed, {} failed phases",
            status,
            result.completed_phases.len(),
            result.failed_phases.len()
        ),
        summarized,
        sections,
        data,
    )
}

fn document(
    kind: ReportKind,
    headline: String,
    summarized: bool,
    sections: Vec<Section>,
    data: Value,
) -> ReportDocument {
    ReportDocument {
        kind,
        title: kind.title().to_string(),
        headline,
        generated_at: Utc::now(),
        summarized,
        sections,
        data,
    }
}

/// Recommendation text for every category below the threshold
pub fn recommendations(quality: &QualityScores) -> Vec<String> {
    quality
        .categories()
        .iter()
        .filter(|(_, score)| *score < RECOMMENDATION_THRESHOLD)
        .filter_map(|(name, _)| {
            RECOMMENDATIONS
                .iter()
                .find(|(category, _)| category == name)
                .map(|(_, advice)| format!("{}: {}", name, advice))
        })
        .collect()
}

fn score_table(quality: &QualityScores) -> Table {
    let mut table = Table::new(["Category", "Score", "Chart"]).row([
        "Overall".to_string(),
        format!("{} ({})", quality.overall, quality.grade()),
        score_bar(quality.overall),
    ]);
    for (name, score) in quality.categories() {
        table = table.row([name.to_string(), score.to_string(), score_bar(score)]);
    }
    table
}

fn chart_table(label: &str, points: &[ChartPoint]) -> Table {
    points.iter().fold(Table::new([label, "Count"]), |table, point| {
        table.row([point.label.clone(), point.value.to_string()])
    })
}

fn recommendation_section(recommendations: &[String]) -> Section {
    list_section(
        "Recommendations",
        recommendations,
        "All categories meet the quality threshold",
    )
}

fn list_section(heading: &str, items: &[String], empty: &str) -> Section {
    if items.is_empty() {
        Section::new(heading).paragraph(empty)
    } else {
        Section::new(heading).items(items.iter().cloned())
    }
}

fn summary_note(count: usize, config: &ReportingConfig) -> String {
    format!(
        "Component listing omitted for {} components (threshold {}); distributions shown above",
        count, config.summarize_threshold
    )
}

fn project_label(analysis: &AnalysisResult) -> String {
    if analysis.project.version.is_empty() {
        analysis.project.name.clone()
    } else {
        format!("{} v{}", analysis.project.name, analysis.project.version)
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none detected".to_string()
    } else {
        items.join(", ")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
