//! Report document model

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::migration::MigrationResult;
use crate::types::AnalysisResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Health,
    Architecture,
    ExecutiveSummary,
    Migration,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Health => "Project Health Report",
            Self::Architecture => "Architecture Report",
            Self::ExecutiveSummary => "Executive Summary",
            Self::Migration => "Migration Report",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Health => "health",
            Self::Architecture => "architecture",
            Self::ExecutiveSummary => "executive-summary",
            Self::Migration => "migration",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "health" => Ok(Self::Health),
            "architecture" | "arch" => Ok(Self::Architecture),
            "executive" | "executive-summary" | "summary" => Ok(Self::ExecutiveSummary),
            "migration" => Ok(Self::Migration),
            _ => Err(format!(
                "Unknown report kind: {}. Valid options: health, architecture, executive, migration",
                s
            )),
        }
    }
}

/// What a report is generated from
#[derive(Debug, Clone, Copy)]
pub enum ReportInput<'a> {
    Analysis(&'a AnalysisResult),
    Migration(&'a MigrationResult),
}

/// Format-independent report, rendered by the text templates
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub title: String,
    pub headline: String,
    pub generated_at: DateTime<Utc>,
    /// Item listings were replaced by distributions
    pub summarized: bool,
    pub sections: Vec<Section>,
    /// Structured payload emitted by the JSON format
    #[serde(skip)]
    pub data: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Section {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub items: Vec<String>,
    pub tables: Vec<Table>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Default::default()
        }
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    pub fn item(mut self, text: impl Into<String>) -> Self {
        self.items.push(text.into());
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }
}

/// Serializes as `headers`, `rows` and the plain-text `lines`
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column widths for plain-text alignment
    pub widths: Vec<usize>,
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Table", 3)?;
        state.serialize_field("headers", &self.headers)?;
        state.serialize_field("rows", &self.rows)?;
        state.serialize_field("lines", &self.aligned_lines())?;
        state.end()
    }
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let widths = headers.iter().map(|h| h.chars().count()).collect();
        Self {
            headers,
            rows: Vec::new(),
            widths,
        }
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        for (i, cell) in cells.iter().enumerate() {
            let width = cell.chars().count();
            match self.widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => self.widths.push(width),
            }
        }
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header, rule and rows padded to column width
    pub fn aligned_lines(&self) -> Vec<String> {
        let line = |cells: &[String]| {
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let width = self.widths.get(i).copied().unwrap_or(0);
                    format!("{:<width$}", cell)
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };
        let rule = self
            .widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = vec![line(&self.headers), rule];
        lines.extend(self.rows.iter().map(|row| line(row)));
        lines
    }
}

/// Architecture finding surfaced by the architecture report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchitectureSmell {
    pub kind: SmellKind,
    pub components: Vec<String>,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum SmellKind {
    GodComponent,
    CircularDependency,
}

impl fmt::Display for SmellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GodComponent => write!(f, "God Component"),
            Self::CircularDependency => write!(f, "Circular Dependency"),
        }
    }
}

impl fmt::Display for ArchitectureSmell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.kind, self.components.join(" <-> "), self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("summary".parse::<ReportKind>().unwrap(), ReportKind::ExecutiveSummary);
        assert_eq!(ReportKind::ExecutiveSummary.to_string(), "executive-summary");
        assert!("weekly".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_table_tracks_widths() {
        let table = Table::new(["Name", "Score"]).row(["Accessibility", "9"]).row(["Docs", "100"]);
        assert_eq!(table.widths, vec![13, 5]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.aligned_lines(),
            vec![
                "Name           Score",
                "-------------  -----",
                "Accessibility  9",
                "Docs           100",
            ]
        );
    }

    #[test]
    fn test_smell_display() {
        let smell = ArchitectureSmell {
            kind: SmellKind::CircularDependency,
            components: vec!["A".into(), "B".into()],
            detail: "mutual imports".into(),
        };
        assert_eq!(smell.to_string(), "Circular Dependency: A <-> B (mutual imports)");
    }
}
