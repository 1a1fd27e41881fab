//! Report layouts
//!
//! One layout per text format renders every report kind; the kind-specific
//! content lives in the document's sections.

use serde_json::Value;

use crate::config::ReportFormat;
use crate::template::TemplateRegistry;
use crate::types::Result;

pub const ERROR_HEADING: &str = "Error generating report";

const PLAIN: &str = "{{title}}
{{headline}}
Generated: {{generated_at}}
{{#each sections}}
== {{heading}} ==
{{#each paragraphs}}{{this}}
{{/each}}{{#each items}}  - {{this}}
{{/each}}{{#each tables}}{{#each lines}}  {{this}}
{{/each}}{{/each}}{{/each}}";

const MARKDOWN: &str = "# {{title}}

**{{headline}}**

_Generated {{generated_at}}_
{{#each sections}}
## {{heading}}

{{#each paragraphs}}{{this}}

{{/each}}{{#if items}}{{#each items}}- {{this}}
{{/each}}
{{/if}}{{#each tables}}|{{#each headers}} {{this}} |{{/each}}
|{{#each headers}} --- |{{/each}}
{{#each rows}}|{{#each this}} {{this}} |{{/each}}
{{/each}}
{{/each}}{{/each}}";

const HTML: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{{title}}</title>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #1f2937; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #d1d5db; padding: 0.25rem 0.75rem; text-align: left; }
.headline { font-size: 1.1rem; font-weight: 600; }
.meta { color: #6b7280; }
</style>
</head>
<body>
<h1>{{title}}</h1>
<p class=\"headline\">{{headline}}</p>
<p class=\"meta\">Generated {{generated_at}}</p>
{{#each sections}}<section>
<h2>{{heading}}</h2>
{{#each paragraphs}}<p>{{this}}</p>
{{/each}}{{#if items}}<ul>
{{#each items}}<li>{{this}}</li>
{{/each}}</ul>
{{/if}}{{#each tables}}<table>
<thead><tr>{{#each headers}}<th>{{this}}</th>{{/each}}</tr></thead>
<tbody>
{{#each rows}}<tr>{{#each this}}<td>{{this}}</td>{{/each}}</tr>
{{/each}}</tbody>
</table>
{{/each}}</section>
{{/each}}</body>
</html>
";

/// Template key for a text format; JSON has none
pub fn template_key(format: ReportFormat) -> Option<&'static str> {
    match format {
        ReportFormat::Plain => Some("report.plain"),
        ReportFormat::Markdown => Some("report.markdown"),
        ReportFormat::Html => Some("report.html"),
        ReportFormat::Json => None,
    }
}

pub fn builtin() -> Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::new();
    registry.register("report.plain", PLAIN)?;
    registry.register("report.markdown", MARKDOWN)?;
    registry.register("report.html", HTML)?;
    Ok(registry)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape every string in a template context
pub fn escape_values(value: &mut Value) {
    match value {
        Value::String(s) => *s = escape_html(s),
        Value::Array(items) => items.iter_mut().for_each(escape_values),
        Value::Object(map) => map.values_mut().for_each(escape_values),
        _ => {}
    }
}

/// Report shown in place of one that failed to render
pub fn error_report(format: ReportFormat, message: &str) -> String {
    match format {
        ReportFormat::Plain => format!("{}\n\n{}\n", ERROR_HEADING, message),
        ReportFormat::Markdown => format!("# {}\n\n{}\n", ERROR_HEADING, message),
        ReportFormat::Html => format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{0}</title></head>\n\
             <body>\n<h1>{0}</h1>\n<p>{1}</p>\n</body>\n</html>\n",
            ERROR_HEADING,
            escape_html(message)
        ),
        ReportFormat::Json => serde_json::json!({
            "error": ERROR_HEADING,
            "message": message,
        })
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Value {
        json!({
            "title": "Health",
            "headline": "app: 2 components",
            "generated_at": "2026-01-01T00:00:00Z",
            "sections": [
                {
                    "heading": "Scores",
                    "paragraphs": ["All good"],
                    "items": ["Overall 90"],
                    "tables": [{
                        "headers": ["Name", "Score"],
                        "rows": [["Docs", "80"]],
                        "lines": ["Name  Score", "----  -----", "Docs  80"]
                    }]
                }
            ]
        })
    }

    #[test]
    fn test_markdown_layout() {
        let out = builtin().unwrap().render("report.markdown", &context()).unwrap();
        assert!(out.starts_with("# Health\n\n**app: 2 components**"));
        assert!(out.contains("## Scores\n\nAll good\n\n- Overall 90\n\n"));
        assert!(out.contains("| Name | Score |\n| --- | --- |\n| Docs | 80 |\n"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_plain_layout() {
        let out = builtin().unwrap().render("report.plain", &context()).unwrap();
        assert!(out.contains("== Scores ==\nAll good\n  - Overall 90\n  Name  Score\n"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_html_layout_and_escaping() {
        let mut ctx = context();
        ctx["headline"] = json!("<script>alert('x')</script> & co");
        escape_values(&mut ctx);
        let out = builtin().unwrap().render("report.html", &ctx).unwrap();
        assert!(out.contains("<td>Docs</td><td>80</td>"));
        assert!(out.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_error_report() {
        for format in [
            ReportFormat::Plain,
            ReportFormat::Markdown,
            ReportFormat::Html,
            ReportFormat::Json,
        ] {
            let out = error_report(format, "boom <x>");
            assert!(out.contains(ERROR_HEADING));
        }
        let json: Value = serde_json::from_str(&error_report(ReportFormat::Json, "boom")).unwrap();
        assert_eq!(json["message"], "boom");
    }
}
