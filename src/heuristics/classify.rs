use std::path::{Component, Path};

use super::patterns::{
    regex_default_export_name, regex_default_export_page, regex_exported_hook,
    regex_named_component_export,
};
use super::source::strip_comments;
use crate::types::{ComponentType, pascal_case};

/// Directory names that mark route-level files
const PAGE_SEGMENTS: &[&str] = &["pages", "views", "screens", "routes"];

/// Classify a source file.
///
/// An exported `use*` function makes it a hook even inside a pages
/// directory; otherwise a pages-like path segment, an App Router `page.*`
/// file or a default-exported `*Page` makes it a page; a `use*` file stem
/// is the last hook signal.
pub fn determine_component_type(text: &str, file_path: &Path) -> ComponentType {
    let code = strip_comments(text);

    if regex_exported_hook().is_match(&code) {
        return ComponentType::Hook;
    }
    if is_page_path(file_path) || regex_default_export_page().is_match(&code) {
        return ComponentType::Page;
    }
    if file_stem(file_path).is_some_and(is_hook_name) {
        return ComponentType::Hook;
    }
    ComponentType::Component
}

fn is_page_path(path: &Path) -> bool {
    let in_pages_dir = path.parent().is_some_and(|parent| {
        parent.components().any(|c| match c {
            Component::Normal(s) => s
                .to_str()
                .is_some_and(|s| PAGE_SEGMENTS.contains(&s.to_lowercase().as_str())),
            _ => false,
        })
    });
    let app_router_page = file_stem(path) == Some("page")
        && path
            .components()
            .any(|c| matches!(c, Component::Normal(s) if s == "app"));
    in_pages_dir || app_router_page
}

fn file_stem(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    // `Button.test.tsx` -> `Button`
    name.split('.').next().filter(|s| !s.is_empty())
}

fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// Display name of the component declared in a file: the default export,
/// else the first exported component or hook, else the file name.
/// `index` and `page` files take their directory's name.
pub fn component_name(text: &str, file_path: &Path) -> String {
    let code = strip_comments(text);

    let declared = regex_default_export_name()
        .captures(&code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| name.starts_with(|c: char| c.is_uppercase()) || is_hook_name(name))
        .or_else(|| {
            regex_named_component_export()
                .captures(&code)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        });
    if let Some(name) = declared {
        return name.to_string();
    }

    let stem = match file_stem(file_path) {
        Some("index" | "page" | "layout") => file_path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str()),
        other => other,
    };
    match stem {
        Some(stem) if is_hook_name(stem) => stem.to_string(),
        Some(stem) => pascal_case(stem),
        None => "Unknown".to_string(),
    }
}

/// Whether the file carries a JSDoc block
pub fn has_doc_comment(text: &str) -> bool {
    text.contains("/**")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_by_path() {
        let src = "export default function Home() { return <main />; }";
        assert_eq!(
            determine_component_type(src, Path::new("src/pages/index.tsx")),
            ComponentType::Page
        );
        assert_eq!(
            determine_component_type(src, Path::new("app/dashboard/page.tsx")),
            ComponentType::Page
        );
    }

    #[test]
    fn test_page_by_default_export_name() {
        let src = "export default function SettingsPage() { return null; }";
        assert_eq!(
            determine_component_type(src, Path::new("src/components/Settings.tsx")),
            ComponentType::Page
        );
    }

    #[test]
    fn test_hook_content_wins_over_page_path() {
        let src = "export function useAuth() { return useContext(Auth); }";
        assert_eq!(
            determine_component_type(src, Path::new("src/pages/useAuth.ts")),
            ComponentType::Hook
        );
    }

    #[test]
    fn test_hook_by_file_name() {
        let src = "const useThing = () => 1;\nexport default useThing;";
        assert_eq!(
            determine_component_type(src, Path::new("src/hooks/useThing.ts")),
            ComponentType::Hook
        );
    }

    #[test]
    fn test_plain_component() {
        let src = "export const Button = () => <button />;";
        assert_eq!(
            determine_component_type(src, Path::new("src/components/Button.tsx")),
            ComponentType::Component
        );
        // `user` is not a hook name
        assert_eq!(
            determine_component_type("export const x = 1;", Path::new("src/user.tsx")),
            ComponentType::Component
        );
    }

    #[test]
    fn test_component_name() {
        assert_eq!(
            component_name("export default function Card() {}", Path::new("x/y.tsx")),
            "Card"
        );
        assert_eq!(
            component_name("export const Modal = () => null;", Path::new("x/y.tsx")),
            "Modal"
        );
        assert_eq!(
            component_name("const a = 1;", Path::new("src/user-menu/index.tsx")),
            "UserMenu"
        );
        assert_eq!(component_name("", Path::new("src/useFetch.ts")), "useFetch");
        assert_eq!(
            component_name("export default connect(mapState)(List);", Path::new("src/todo_list.jsx")),
            "TodoList"
        );
    }

    #[test]
    fn test_doc_comment() {
        assert!(has_doc_comment("/** Button */\nexport const B = 1;"));
        assert!(!has_doc_comment("// plain"));
    }
}
