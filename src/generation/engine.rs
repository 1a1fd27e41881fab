use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};

use super::description::parse_description;
use super::templates;
use super::types::*;
use crate::template::TemplateRegistry;
use crate::types::{
    ForgeError, PropInfo, Result, capitalize_first, camel_case, kebab_case, pascal_case,
};

pub const NO_REQUIREMENTS_WARNING: &str =
    "No specific requirements detected, generating basic component";

/// Turns descriptions and specs into source files
///
/// Templates are compiled once in [`GenerationEngine::new`]; every generate
/// call is a pure function of the spec and the context. Failures never
/// propagate: they come back as `success: false` with recorded errors.
pub struct GenerationEngine {
    context: GenerationContext,
    templates: TemplateRegistry,
}

impl GenerationEngine {
    pub fn new(context: GenerationContext) -> Result<Self> {
        Ok(Self::with_registry(context, templates::builtin()?))
    }

    /// Use a caller-supplied template registry
    pub fn with_registry(context: GenerationContext, templates: TemplateRegistry) -> Self {
        Self { context, templates }
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    pub fn generate(&self, spec: &GenerationSpec) -> GenerationResult {
        match spec {
            GenerationSpec::Component(spec) => self.generate_component(spec),
            GenerationSpec::Page(spec) => self.generate_page(spec),
            GenerationSpec::Project(spec) => self.generate_project(spec),
        }
    }

    /// Generate a component from free text
    ///
    /// Never fails on vague or empty input: a single scaffold file is
    /// produced along with a warning.
    pub fn generate_from_description(&self, text: &str) -> GenerationResult {
        let parsed = parse_description(text);
        tracing::debug!(
            "Generation: Parsed description (name={:?}, kind={}, props={})",
            parsed.name,
            parsed.kind,
            parsed.props.len()
        );

        if !parsed.has_requirements() {
            let name = parsed.name_or_default();
            let spec = ComponentSpec {
                name: Some(name.clone()),
                description: non_empty(text),
                styling: Some(StylingApproach::Plain),
                ..Default::default()
            };
            tracing::warn!("Generation: {} ({})", NO_REQUIREMENTS_WARNING, name);
            return self.finish(
                "scaffold",
                &name,
                self.main_file(&self.context, &name, &spec).map(|file| vec![file]),
                vec![NO_REQUIREMENTS_WARNING.to_string()],
            );
        }

        let spec = ComponentSpec {
            name: Some(parsed.name_or_default()),
            description: non_empty(text),
            kind: parsed.kind,
            props: parsed.props,
            ..Default::default()
        };
        self.generate_component(&spec)
    }

    pub fn generate_component(&self, spec: &ComponentSpec) -> GenerationResult {
        let name = match spec.validate() {
            Ok(name) => component_identifier(name),
            Err(e) => return GenerationResult::failed(e),
        };
        self.finish(
            "component",
            &name,
            self.component_files(&self.context, &name, spec),
            Vec::new(),
        )
    }

    pub fn generate_page(&self, spec: &PageSpec) -> GenerationResult {
        let name = match spec.validate() {
            Ok(name) => component_identifier(name),
            Err(e) => return GenerationResult::failed(e),
        };
        let mut warnings = Vec::new();
        let files = self.page_files(&name, spec, &mut warnings);
        self.finish("page", &name, files, warnings)
    }

    pub fn generate_project(&self, spec: &ProjectSpec) -> GenerationResult {
        let name = match spec.validate() {
            Ok(name) => name.to_string(),
            Err(e) => return GenerationResult::failed(e),
        };
        if let Some(Err(e)) = spec.components.iter().map(|c| c.validate()).find(|r| r.is_err()) {
            return GenerationResult::failed(e);
        }
        self.finish("project", &name, self.project_files(&name, spec), Vec::new())
    }

    fn finish(
        &self,
        target: &str,
        name: &str,
        files: Result<Vec<GeneratedFile>>,
        warnings: Vec<String>,
    ) -> GenerationResult {
        match files {
            Ok(files) => {
                tracing::info!(
                    "Generation: {} {} ({} files, {} warnings)",
                    target,
                    name,
                    files.len(),
                    warnings.len()
                );
                GenerationResult::succeeded(files, warnings)
            }
            Err(e) => {
                tracing::warn!("Generation: {} {} failed: {}", target, name, e);
                let mut result = GenerationResult::failed(e.to_engine_error());
                result.warnings = warnings;
                result
            }
        }
    }

    /// Render `<target>.<variant>`, falling back to `<target>.default`
    fn render(&self, target: &str, variant: &str, context: &Value) -> Result<String> {
        let key = format!("{}.{}", target, variant);
        if self.templates.contains(&key) {
            self.templates.render(&key, context)
        } else {
            self.templates.render(&format!("{}.default", target), context)
        }
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    fn component_dir(&self, ctx: &GenerationContext, name: &str, kind: ComponentKind) -> PathBuf {
        match ctx.architecture {
            ArchitectureStyle::Flat => ctx.components_dir.clone(),
            ArchitectureStyle::Feature => ctx.components_dir.join(name),
            ArchitectureStyle::Atomic => ctx.components_dir.join(kind.atomic_tier()).join(name),
        }
    }

    fn main_file(
        &self,
        ctx: &GenerationContext,
        name: &str,
        spec: &ComponentSpec,
    ) -> Result<GeneratedFile> {
        let styling = spec.styling.unwrap_or(ctx.styling);
        let dir = self.component_dir(ctx, name, spec.kind);
        let data = component_context(ctx, name, spec);
        let variant = match ctx.platform {
            Platform::Native => "native",
            Platform::Web => styling.key(),
        };
        let content = self.render("component", variant, &data)?;
        Ok(GeneratedFile::new(
            dir.join(format!("{}.{}", name, ctx.component_extension())),
            content,
            FileType::Component,
        ))
    }

    fn component_files(
        &self,
        ctx: &GenerationContext,
        name: &str,
        spec: &ComponentSpec,
    ) -> Result<Vec<GeneratedFile>> {
        let dir = self.component_dir(ctx, name, spec.kind);
        let data = component_context(ctx, name, spec);
        let styling = spec.styling.unwrap_or(ctx.styling);

        let mut files = vec![self.main_file(ctx, name, spec)?];

        if styling == StylingApproach::CssModules && ctx.platform == Platform::Web {
            files.push(GeneratedFile::new(
                dir.join(format!("{}.module.css", name)),
                self.render("styles", styling.key(), &data)?,
                FileType::Styles,
            ));
        }

        for sub in &spec.sub_components {
            let sub = component_identifier(sub);
            let sub_data = json!({
                "name": sub,
                "parent": name,
                "css_class": kebab_case(&sub),
                "typescript": ctx.typescript,
            });
            files.push(GeneratedFile::new(
                dir.join(format!("{}.{}", sub, ctx.component_extension())),
                self.render("subcomponent", "default", &sub_data)?,
                FileType::Component,
            ));
        }

        for hook in &spec.hooks {
            let hook = hook_name(hook);
            let hook_data = json!({ "name": hook, "typescript": ctx.typescript });
            files.push(GeneratedFile::new(
                dir.join(format!("{}.{}", hook, ctx.module_extension())),
                self.render("hook", "default", &hook_data)?,
                FileType::Component,
            ));
        }

        if spec.testing.include_tests.unwrap_or(ctx.include_tests) {
            files.push(GeneratedFile::new(
                dir.join(format!("{}.test.{}", name, ctx.component_extension())),
                self.render("test", "default", &data)?,
                FileType::Test,
            ));
        }

        if spec.testing.include_stories.unwrap_or(ctx.include_stories) {
            files.push(GeneratedFile::new(
                dir.join(format!("{}.stories.{}", name, ctx.component_extension())),
                self.render("story", "default", &data)?,
                FileType::Story,
            ));
        }

        if ctx.include_docs {
            files.push(GeneratedFile::new(
                dir.join(format!("{}.md", name)),
                self.render("docs", "default", &data)?,
                FileType::Docs,
            ));
        }

        Ok(files)
    }

    // -------------------------------------------------------------------------
    // Pages
    // -------------------------------------------------------------------------

    fn page_files(
        &self,
        name: &str,
        spec: &PageSpec,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<GeneratedFile>> {
        let ctx = &self.context;
        let page = if name.ends_with("Page") {
            name.to_string()
        } else {
            format!("{}Page", name)
        };
        let base = page.trim_end_matches("Page");
        let base = if base.is_empty() { page.as_str() } else { base };
        let slug = kebab_case(base);
        let sub_components: Vec<String> =
            spec.sub_components.iter().map(|s| component_identifier(s)).collect();

        let sections: Vec<Value> = spec
            .sections
            .iter()
            .filter_map(|section| {
                let component = if section.component.trim().is_empty() {
                    pascal_case(&section.name)
                } else {
                    component_identifier(&section.component)
                };
                if component.is_empty() {
                    warnings.push(format!("Skipping unnamed section in page {}", page));
                    return None;
                }
                let label = if section.name.trim().is_empty() {
                    component.clone()
                } else {
                    section.name.clone()
                };
                Some(json!({ "name": label, "id": kebab_case(&label), "component": component }))
            })
            .collect();

        let module_base = import_base(&ctx.components_dir);
        let mut imports: Vec<Value> = Vec::new();
        let mut imported: Vec<&str> = Vec::new();
        for component in sections
            .iter()
            .filter_map(|s| s["component"].as_str())
            .chain(sub_components.iter().map(String::as_str))
        {
            if imported.contains(&component) {
                continue;
            }
            imported.push(component);
            let from = if sub_components.iter().any(|s| s == component) {
                format!("{}/{}/{}", module_base, slug, component)
            } else {
                format!("{}/{}", module_base, component)
            };
            imports.push(json!({ "component": component, "from": from }));
        }

        let title = spec
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| words_of(base));
        let route = spec
            .route
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| format!("/{}", slug));

        let data = json!({
            "page": page,
            "title": title,
            "route": route,
            "css_class": slug,
            "sections": sections,
            "imports": imports,
            "typescript": ctx.typescript,
        });

        let mut files = vec![GeneratedFile::new(
            ctx.pages_dir
                .join(format!("{}.{}", page, ctx.component_extension())),
            self.render("page", spec.layout.key(), &data)?,
            FileType::Component,
        )];

        for sub in &sub_components {
            let sub_data = json!({
                "name": sub,
                "parent": page,
                "css_class": kebab_case(sub),
                "typescript": ctx.typescript,
            });
            files.push(GeneratedFile::new(
                ctx.components_dir
                    .join(&slug)
                    .join(format!("{}.{}", sub, ctx.component_extension())),
                self.render("subcomponent", "default", &sub_data)?,
                FileType::Component,
            ));
        }

        Ok(files)
    }

    // -------------------------------------------------------------------------
    // Projects
    // -------------------------------------------------------------------------

    fn project_files(&self, name: &str, spec: &ProjectSpec) -> Result<Vec<GeneratedFile>> {
        let typescript = spec.has(ProjectFeature::Typescript);
        let styling = spec.styling.unwrap_or(if spec.has(ProjectFeature::Tailwind) {
            StylingApproach::Tailwind
        } else {
            self.context.styling
        });
        let ctx = GenerationContext {
            typescript,
            styling,
            include_tests: spec.has(ProjectFeature::Testing),
            ..self.context.clone()
        };

        let mut files = vec![GeneratedFile::new(
            "package.json",
            to_json(&package_manifest(name, spec, styling))?,
            FileType::Docs,
        )];

        if typescript {
            files.push(GeneratedFile::new(
                "tsconfig.json",
                to_json(&tsconfig())?,
                FileType::Docs,
            ));
            files.push(GeneratedFile::new(
                "src/types/index.ts",
                self.render("project", "types", &json!({ "name": name }))?,
                FileType::Types,
            ));
        }
        if spec.has(ProjectFeature::Eslint) {
            let mut extends = vec!["next/core-web-vitals"];
            if spec.has(ProjectFeature::Prettier) {
                extends.push("prettier");
            }
            files.push(GeneratedFile::new(
                ".eslintrc.json",
                to_json(&json!({ "root": true, "extends": extends }))?,
                FileType::Docs,
            ));
        }
        if spec.has(ProjectFeature::Tailwind) {
            files.push(GeneratedFile::new(
                "tailwind.config.js",
                self.render("project", "tailwind", &json!({}))?,
                FileType::Docs,
            ));
        }
        if spec.has(ProjectFeature::Prettier) {
            files.push(GeneratedFile::new(
                ".prettierrc",
                to_json(&json!({
                    "semi": true,
                    "singleQuote": true,
                    "trailingComma": "all",
                    "printWidth": 100,
                }))?,
                FileType::Docs,
            ));
        }
        if spec.has(ProjectFeature::I18n) {
            files.push(GeneratedFile::new(
                "public/locales/en/common.json",
                to_json(&json!({
                    "app": {
                        "title": name,
                        "description": spec.description.clone().unwrap_or_default(),
                    }
                }))?,
                FileType::Locale,
            ));
        }

        let component_names: Vec<String> = spec
            .components
            .iter()
            .filter_map(|c| c.name.as_deref().map(component_identifier))
            .collect();
        let features: Vec<String> = spec.features.iter().map(feature_label).collect();
        files.push(GeneratedFile::new(
            "README.md",
            self.render(
                "project",
                "readme",
                &json!({
                    "name": name,
                    "description": spec.description.clone().unwrap_or_default(),
                    "features": features,
                    "components": component_names,
                }),
            )?,
            FileType::Docs,
        ));

        for (component, component_name) in spec.components.iter().zip(&component_names) {
            files.extend(self.component_files(&ctx, component_name, component)?);
        }

        Ok(files)
    }
}

// =============================================================================
// Template contexts
// =============================================================================

fn component_context(ctx: &GenerationContext, name: &str, spec: &ComponentSpec) -> Value {
    let props: Vec<Value> = spec.props.iter().map(prop_context).collect();
    let required: Vec<Value> = spec
        .props
        .iter()
        .filter(|p| !p.optional)
        .map(prop_context)
        .collect();
    let destructured = spec
        .props
        .iter()
        .map(|p| p.name.as_str())
        .chain(std::iter::once("children"))
        .collect::<Vec<_>>()
        .join(", ");
    let sub_components: Vec<Value> = spec
        .sub_components
        .iter()
        .map(|s| json!({ "name": component_identifier(s) }))
        .collect();
    let hooks: Vec<Value> = spec
        .hooks
        .iter()
        .map(|h| {
            let hook = hook_name(h);
            json!({ "name": hook, "binding": hook_binding(&hook) })
        })
        .collect();
    let (tag, tag_attrs) = spec.kind.root_element();
    let native_attrs = match spec.kind {
        ComponentKind::Button => " accessibilityRole=\"button\"",
        ComponentKind::Navigation => " accessibilityRole=\"menu\"",
        _ => "",
    };

    let mut data = Map::new();
    data.insert("component".into(), json!(name));
    data.insert("css_class".into(), json!(kebab_case(name)));
    data.insert("kind".into(), json!(spec.kind.to_string()));
    data.insert("is_button".into(), json!(spec.kind == ComponentKind::Button));
    data.insert("typescript".into(), json!(ctx.typescript));
    data.insert("has_props".into(), json!(!props.is_empty()));
    data.insert("props".into(), Value::Array(props));
    data.insert("required_props".into(), Value::Array(required));
    data.insert("destructured".into(), json!(destructured));
    data.insert("sub_components".into(), Value::Array(sub_components));
    data.insert("hooks".into(), Value::Array(hooks));
    data.insert("tag".into(), json!(tag));
    data.insert("tag_attrs".into(), json!(tag_attrs));
    data.insert("native_attrs".into(), json!(native_attrs));
    data.insert(
        "description".into(),
        json!(spec.description.as_deref().map(str::trim).unwrap_or_default()),
    );
    Value::Object(data)
}

fn prop_context(prop: &PropInfo) -> Value {
    let (sample, arg) = sample_values(prop);
    json!({
        "name": prop.name,
        "type": prop.prop_type,
        "type_md": prop.prop_type.replace('|', "\\|"),
        "optional": prop.optional,
        "marker": if prop.optional { "?" } else { "" },
        "required": if prop.optional { "no" } else { "yes" },
        "sample": sample,
        "arg": arg,
    })
}

/// JSX attribute value and plain JS value used in tests and stories
fn sample_values(prop: &PropInfo) -> (String, String) {
    let ty = prop.prop_type.trim();
    if ty.contains("=>") {
        ("{() => {}}".to_string(), "() => {}".to_string())
    } else if ty == "boolean" {
        ("{true}".to_string(), "true".to_string())
    } else if ty == "number" {
        ("{0}".to_string(), "0".to_string())
    } else if ty.ends_with("[]") || ty.starts_with("Array<") {
        ("{[]}".to_string(), "[]".to_string())
    } else {
        let text = capitalize_first(&prop.name);
        (format!("\"{}\"", text), format!("'{}'", text))
    }
}

fn package_manifest(name: &str, spec: &ProjectSpec, styling: StylingApproach) -> Value {
    let mut scripts = Map::new();
    scripts.insert("dev".into(), json!("next dev"));
    scripts.insert("build".into(), json!("next build"));
    scripts.insert("start".into(), json!("next start"));

    let mut dependencies = Map::new();
    dependencies.insert("next".into(), json!("^14.0.0"));
    dependencies.insert("react".into(), json!("^18.2.0"));
    dependencies.insert("react-dom".into(), json!("^18.2.0"));
    match styling {
        StylingApproach::StyledComponents => {
            dependencies.insert("styled-components".into(), json!("^6.1.0"));
        }
        StylingApproach::Emotion => {
            dependencies.insert("@emotion/react".into(), json!("^11.11.0"));
            dependencies.insert("@emotion/styled".into(), json!("^11.11.0"));
        }
        _ => {}
    }

    let mut dev = Map::new();
    if spec.has(ProjectFeature::Typescript) {
        dev.insert("typescript".into(), json!("^5.3.0"));
        dev.insert("@types/react".into(), json!("^18.2.0"));
        dev.insert("@types/node".into(), json!("^20.10.0"));
    }
    if spec.has(ProjectFeature::Eslint) {
        scripts.insert("lint".into(), json!("next lint"));
        dev.insert("eslint".into(), json!("^8.55.0"));
        dev.insert("eslint-config-next".into(), json!("^14.0.0"));
    }
    if spec.has(ProjectFeature::Tailwind) {
        dev.insert("tailwindcss".into(), json!("^3.4.0"));
        dev.insert("postcss".into(), json!("^8.4.0"));
        dev.insert("autoprefixer".into(), json!("^10.4.0"));
    }
    if spec.has(ProjectFeature::Prettier) {
        scripts.insert("format".into(), json!("prettier --write ."));
        dev.insert("prettier".into(), json!("^3.1.0"));
        if spec.has(ProjectFeature::Eslint) {
            dev.insert("eslint-config-prettier".into(), json!("^9.1.0"));
        }
    }
    if spec.has(ProjectFeature::I18n) {
        dependencies.insert("i18next".into(), json!("^23.7.0"));
        dependencies.insert("react-i18next".into(), json!("^13.5.0"));
    }
    if spec.has(ProjectFeature::Testing) {
        scripts.insert("test".into(), json!("jest"));
        dev.insert("jest".into(), json!("^29.7.0"));
        dev.insert("@testing-library/react".into(), json!("^14.1.0"));
    }

    let mut manifest = Map::new();
    manifest.insert("name".into(), json!(kebab_case(name)));
    manifest.insert("version".into(), json!("0.1.0"));
    manifest.insert("private".into(), json!(true));
    if let Some(description) = spec.description.as_deref().filter(|d| !d.trim().is_empty()) {
        manifest.insert("description".into(), json!(description));
    }
    manifest.insert("scripts".into(), Value::Object(scripts));
    manifest.insert("dependencies".into(), Value::Object(dependencies));
    manifest.insert("devDependencies".into(), Value::Object(dev));
    Value::Object(manifest)
}

fn tsconfig() -> Value {
    json!({
        "compilerOptions": {
            "target": "ES2020",
            "lib": ["dom", "dom.iterable", "esnext"],
            "strict": true,
            "noEmit": true,
            "module": "esnext",
            "moduleResolution": "bundler",
            "jsx": "preserve",
            "baseUrl": ".",
            "paths": { "@/*": ["./src/*"] }
        },
        "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx"],
        "exclude": ["node_modules"]
    })
}

fn feature_label(feature: &ProjectFeature) -> String {
    match feature {
        ProjectFeature::Typescript => "TypeScript",
        ProjectFeature::Eslint => "ESLint",
        ProjectFeature::Tailwind => "Tailwind CSS",
        ProjectFeature::Prettier => "Prettier",
        ProjectFeature::I18n => "Internationalization",
        ProjectFeature::Testing => "Jest + Testing Library",
    }
    .to_string()
}

fn to_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .map_err(ForgeError::from)
}

// =============================================================================
// Naming
// =============================================================================

/// `toggle` -> `useToggle`; `useFetch` stays
fn hook_name(name: &str) -> String {
    let name = name.trim();
    let is_hook = name.len() > 3
        && name.starts_with("use")
        && name[3..].starts_with(|c: char| c.is_ascii_uppercase());
    if is_hook {
        name.to_string()
    } else {
        format!("use{}", pascal_case(name))
    }
}

/// `useToggle` -> `toggle`
fn hook_binding(hook: &str) -> String {
    let binding = camel_case(hook.strip_prefix("use").unwrap_or(hook));
    if binding.is_empty() {
        "value".to_string()
    } else {
        binding
    }
}

/// `UserSettings` -> `User Settings`
fn words_of(name: &str) -> String {
    let mut out = String::new();
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// `src/components` -> `@/components`
fn import_base(components_dir: &Path) -> String {
    let relative = components_dir
        .strip_prefix("src")
        .unwrap_or(components_dir)
        .to_string_lossy()
        .replace('\\', "/");
    format!("@/{}", relative.trim_matches('/'))
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
