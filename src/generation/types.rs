//! Generation inputs and outputs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{EngineError, PropInfo, ValidationError, ValidationErrorKind, pascal_case};

// =============================================================================
// Generation Context
// =============================================================================

/// Target runtime of generated components
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Web,
    Native,
}

/// Directory layout generated files are placed into
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureStyle {
    /// `components/atoms|molecules|organisms/<Name>/`
    Atomic,
    /// `components/<Name>/`
    Feature,
    /// `components/<Name>.tsx`
    #[default]
    Flat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StylingApproach {
    #[default]
    CssModules,
    StyledComponents,
    Tailwind,
    Emotion,
    Plain,
}

impl StylingApproach {
    /// Template key suffix
    pub fn key(&self) -> &'static str {
        match self {
            Self::CssModules => "css-modules",
            Self::StyledComponents => "styled-components",
            Self::Tailwind => "tailwind",
            Self::Emotion => "emotion",
            Self::Plain => "plain",
        }
    }
}

impl std::fmt::Display for StylingApproach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Read-only settings for one `GenerationEngine`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationContext {
    /// Component output directory, relative to the project root
    pub components_dir: PathBuf,

    /// Page output directory, relative to the project root
    pub pages_dir: PathBuf,

    pub platform: Platform,

    pub architecture: ArchitectureStyle,

    /// Emit `.tsx`/`.ts` with type annotations instead of `.jsx`/`.js`
    pub typescript: bool,

    /// Styling used when a spec does not choose one
    pub styling: StylingApproach,

    pub include_tests: bool,

    pub include_stories: bool,

    pub include_docs: bool,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self {
            components_dir: PathBuf::from("src/components"),
            pages_dir: PathBuf::from("src/pages"),
            platform: Platform::Web,
            architecture: ArchitectureStyle::Flat,
            typescript: true,
            styling: StylingApproach::CssModules,
            include_tests: true,
            include_stories: false,
            include_docs: false,
        }
    }
}

impl GenerationContext {
    /// Extension of component and page files
    pub fn component_extension(&self) -> &'static str {
        if self.typescript { "tsx" } else { "jsx" }
    }

    /// Extension of plain modules such as hooks
    pub fn module_extension(&self) -> &'static str {
        if self.typescript { "ts" } else { "js" }
    }
}

// =============================================================================
// Specs
// =============================================================================

/// Structural role of a component, chosen from description keywords
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Button,
    Form,
    Modal,
    Table,
    Navigation,
    #[default]
    Generic,
}

impl ComponentKind {
    /// Root element and its fixed attributes
    pub fn root_element(&self) -> (&'static str, &'static str) {
        match self {
            Self::Button => ("button", " type=\"button\""),
            Self::Form => ("form", ""),
            Self::Modal => ("div", " role=\"dialog\" aria-modal=\"true\""),
            Self::Table => ("table", ""),
            Self::Navigation => ("nav", ""),
            Self::Generic => ("div", ""),
        }
    }

    /// Atomic design tier a component of this kind belongs to
    pub fn atomic_tier(&self) -> &'static str {
        match self {
            Self::Button => "atoms",
            Self::Generic => "molecules",
            Self::Form | Self::Modal | Self::Table | Self::Navigation => "organisms",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Button => "button",
            Self::Form => "form",
            Self::Modal => "modal",
            Self::Table => "table",
            Self::Navigation => "navigation",
            Self::Generic => "generic",
        };
        write!(f, "{}", name)
    }
}

/// Per-spec overrides of the context's test and story flags
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestingOptions {
    pub include_tests: Option<bool>,
    pub include_stories: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComponentSpec {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: ComponentKind,
    pub props: Vec<PropInfo>,
    pub styling: Option<StylingApproach>,
    pub sub_components: Vec<String>,
    pub hooks: Vec<String>,
    pub testing: TestingOptions,
}

impl ComponentSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// The trimmed name; it and every sub-component name must yield an
    /// identifier starting with a letter
    pub fn validate(&self) -> Result<&str, ValidationError> {
        let name = required_name(self.name.as_deref(), "Component name is required")?;
        check_identifier(name, "component", "name")?;
        for sub in &self.sub_components {
            check_identifier(sub, "sub-component", "sub_components")?;
        }
        Ok(name)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    #[default]
    Default,
    Dashboard,
    Landing,
    Auth,
}

impl PageLayout {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dashboard => "dashboard",
            Self::Landing => "landing",
            Self::Auth => "auth",
        }
    }
}

/// A page region rendered by a named component
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageSection {
    pub name: String,
    pub component: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageSpec {
    pub name: Option<String>,
    pub route: Option<String>,
    pub title: Option<String>,
    pub layout: PageLayout,
    pub sections: Vec<PageSection>,
    pub sub_components: Vec<String>,
}

impl PageSpec {
    pub fn validate(&self) -> Result<&str, ValidationError> {
        let name = required_name(self.name.as_deref(), "Page name is required")?;
        check_identifier(name, "page", "name")?;
        for sub in &self.sub_components {
            check_identifier(sub, "sub-component", "sub_components")?;
        }
        Ok(name)
    }
}

/// Optional tooling of a generated project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectFeature {
    Typescript,
    Eslint,
    Tailwind,
    Prettier,
    I18n,
    Testing,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectSpec {
    pub name: Option<String>,
    pub description: Option<String>,
    pub features: Vec<ProjectFeature>,
    pub components: Vec<ComponentSpec>,
    pub styling: Option<StylingApproach>,
}

impl ProjectSpec {
    pub fn has(&self, feature: ProjectFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn validate(&self) -> Result<&str, ValidationError> {
        required_name(self.name.as_deref(), "Project name is required")
    }
}

/// Any generation request, tagged by `target`
///
/// ```
/// use uiforge::generation::GenerationSpec;
///
/// let spec: GenerationSpec =
///     serde_json::from_str(r#"{"target": "component", "name": "Avatar"}"#).unwrap();
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum GenerationSpec {
    Component(ComponentSpec),
    Page(PageSpec),
    Project(ProjectSpec),
}

impl GenerationSpec {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Component(spec) => spec.validate().map(|_| ()),
            Self::Page(spec) => spec.validate().map(|_| ()),
            Self::Project(spec) => spec.validate().map(|_| ()),
        }
    }
}

fn required_name<'a>(name: Option<&'a str>, message: &str) -> Result<&'a str, ValidationError> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ValidationError::missing_field("name", message)),
    }
}

/// PascalCase identifiers such as `HTMLViewer` are kept as written
pub(crate) fn component_identifier(name: &str) -> String {
    let name = name.trim();
    let is_identifier = name.starts_with(|c: char| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric());
    if is_identifier {
        name.to_string()
    } else {
        pascal_case(name)
    }
}

fn check_identifier(name: &str, what: &str, field: &str) -> Result<(), ValidationError> {
    if component_identifier(name).starts_with(char::is_alphabetic) {
        return Ok(());
    }
    Err(ValidationError::new(
        ValidationErrorKind::Format,
        format!("Invalid {} name '{}': must start with a letter", what, name.trim()),
    )
    .with_field(field))
}

// =============================================================================
// Outputs
// =============================================================================

/// Downstream writers dispatch on this tag; manifests and tool configs are `Docs`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Component,
    Types,
    Styles,
    Test,
    Story,
    Docs,
    Locale,
}

/// A file produced by the engine; writing it is the caller's job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            file_type,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResult {
    pub success: bool,
    pub files: Vec<GeneratedFile>,
    pub warnings: Vec<String>,
    pub errors: Vec<EngineError>,
}

/// Files and warnings of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    pub files: Vec<GeneratedFile>,
    pub warnings: Vec<String>,
}

impl GenerationResult {
    pub fn succeeded(files: Vec<GeneratedFile>, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            files,
            warnings,
            errors: Vec::new(),
        }
    }

    /// No files are kept on failure
    pub fn failed(error: impl Into<EngineError>) -> Self {
        Self {
            success: false,
            files: Vec::new(),
            warnings: Vec::new(),
            errors: vec![error.into()],
        }
    }

    pub fn file(&self, path: impl AsRef<std::path::Path>) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path.as_ref())
    }

    pub fn into_result(self) -> Result<GeneratedOutput, Vec<EngineError>> {
        if self.success {
            Ok(GeneratedOutput {
                files: self.files,
                warnings: self.warnings,
            })
        } else {
            Err(self.errors)
        }
    }
}
