//! Built-in generation templates
//!
//! Keys are `<target>.<variant>`; lookups fall back to `<target>.default`.

use crate::template::TemplateRegistry;
use crate::types::Result;

const COMPONENT_IMPORTS: &str = "\
{{#each sub_components}}import { {{name}} } from './{{name}}';
{{/each}}{{#each hooks}}import { {{name}} } from './{{name}}';
{{/each}}";

const PROPS_INTERFACE: &str = "\
{{#if typescript}}export interface {{component}}Props {
{{#each props}}  {{name}}{{marker}}: {{type}};
{{/each}}  children?: React.ReactNode;
}

{{/if}}{{#if description}}/** {{description}} */
{{/if}}";

const COMPONENT_SIGNATURE: &str = "\
export function {{component}}({ {{destructured}} }{{#if typescript}}: {{component}}Props{{/if}}) {
{{#each hooks}}  const {{binding}} = {{name}}();
{{/each}}";

const COMPONENT_CHILDREN: &str = "\
{{#each sub_components}}      <{{name}} />
{{/each}}      {children}";

const COMPONENT_FOOTER: &str = "
export default {{component}};
";

fn component_template(header: &str, before: &str, open: &str, close: &str, after: &str) -> String {
    format!(
        "import React from 'react';\n{header}{COMPONENT_IMPORTS}\n{PROPS_INTERFACE}{before}\
         {COMPONENT_SIGNATURE}  return (\n    {open}\n{COMPONENT_CHILDREN}\n    {close}\n  );\n}}\n\
         {after}{COMPONENT_FOOTER}"
    )
}

const STYLED_ROOT: &str = "const Root = styled.{{tag}}`
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
`;

";

const NATIVE_STYLES: &str = "
const styles = StyleSheet.create({
  root: {
    flexDirection: 'column',
    gap: 8,
  },
});
";

const STYLES_CSS_MODULES: &str = ".root {
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
}
";

const SUB_COMPONENT: &str = "import React from 'react';

{{#if typescript}}export interface {{name}}Props {
  children?: React.ReactNode;
}

{{/if}}/** Part of {{parent}} */
export function {{name}}({ children }{{#if typescript}}: {{name}}Props{{/if}}) {
  return <div className=\"{{css_class}}\">{children}</div>;
}

export default {{name}};
";

const HOOK: &str = "import { useCallback, useState } from 'react';

export function {{name}}() {
  const [value, setValue] = useState{{#if typescript}}<unknown>{{/if}}(null);
  const reset = useCallback(() => setValue(null), []);

  return { value, setValue, reset };
}

export default {{name}};
";

const TEST: &str = "import React from 'react';
import { render, screen } from '@testing-library/react';
import { {{component}} } from './{{component}}';

describe('{{component}}', () => {
  it('renders without crashing', () => {
    const { container } = render(<{{component}}{{#each required_props}} {{name}}={{sample}}{{/each}} />);
    expect(container.firstChild).not.toBeNull();
  });
{{#if is_button}}
  it('exposes a button role', () => {
    render(<{{component}}{{#each required_props}} {{name}}={{sample}}{{/each}} />);
    expect(screen.getByRole('button')).toBeTruthy();
  });
{{/if}}});
";

const STORY: &str = "import { {{component}} } from './{{component}}';

export default {
  title: 'Components/{{component}}',
  component: {{component}},
};

export const Default = {
  args: {
{{#each props}}    {{name}}: {{arg}},
{{/each}}  },
};
";

const DOCS: &str = "# {{component}}

{{#if description}}{{description}}

{{/if}}## Props

{{#if has_props}}| Name | Type | Required |
| --- | --- | --- |
{{#each props}}| `{{name}}` | `{{type_md}}` | {{required}} |
{{/each}}{{else}}This component takes no props.
{{/if}}
## Usage

```jsx
import { {{component}} } from './{{component}}';

<{{component}}{{#each required_props}} {{name}}={{sample}}{{/each}} />
```
";

const PAGE_HEADER: &str = "import React from 'react';
{{#each imports}}import { {{component}} } from '{{from}}';
{{/each}}
// Route: {{route}}
export default function {{page}}() {
  return (
";

const PAGE_SECTIONS: &str = "{{#each sections}}        <section id=\"{{id}}\" aria-label=\"{{name}}\">
          <{{component}} />
        </section>
{{/each}}";

const PAGE_FOOTER: &str = "  );
}
";

const PAGE_DEFAULT: &str = "    <main className=\"page page-{{css_class}}\">
      <h1>{{title}}</h1>
{{#each sections}}      <section id=\"{{id}}\" aria-label=\"{{name}}\">
        <{{component}} />
      </section>
{{/each}}    </main>
";

const PAGE_DASHBOARD: &str = "    <div className=\"dashboard-layout\">
      <aside className=\"dashboard-sidebar\">
        <nav aria-label=\"{{title}} navigation\">
          <ul>
{{#each sections}}            <li><a href=\"#{{id}}\">{{name}}</a></li>
{{/each}}          </ul>
        </nav>
      </aside>
      <main className=\"dashboard-main\">
        <h1>{{title}}</h1>
";

const PAGE_DASHBOARD_CLOSE: &str = "      </main>
    </div>
";

const PAGE_LANDING: &str = "    <div className=\"landing-layout\">
      <header className=\"landing-hero\">
        <h1>{{title}}</h1>
      </header>
      <main>
";

const PAGE_LANDING_CLOSE: &str = "      </main>
      <footer className=\"landing-footer\" />
    </div>
";

const PAGE_AUTH: &str = "    <main className=\"auth-layout\">
      <div className=\"auth-card\">
        <h1>{{title}}</h1>
";

const PAGE_AUTH_CLOSE: &str = "      </div>
    </main>
";

const PROJECT_README: &str = "# {{name}}

{{#if description}}{{description}}

{{/if}}## Getting Started

```bash
npm install
npm run dev
```
{{#if features}}
## Features

{{#each features}}- {{this}}
{{/each}}{{/if}}{{#if components}}
## Components

{{#each components}}- `{{this}}`
{{/each}}{{/if}}";

const PROJECT_TAILWIND: &str = "/** @type {import('tailwindcss').Config} */
module.exports = {
  content: ['./src/**/*.{js,jsx,ts,tsx}'],
  theme: {
    extend: {},
  },
  plugins: [],
};
";

const PROJECT_TYPES: &str = "import type { ReactNode } from 'react';

/** Props shared by every {{name}} component */
export interface BaseProps {
  className?: string;
  children?: ReactNode;
}
";

/// Compile every built-in template
pub fn builtin() -> Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::new();

    registry.register(
        "component.css-modules",
        &component_template(
            "import styles from './{{component}}.module.css';\n",
            "",
            "<{{tag}} className={styles.root}{{tag_attrs}}>",
            "</{{tag}}>",
            "",
        ),
    )?;
    registry.register(
        "component.styled-components",
        &component_template(
            "import styled from 'styled-components';\n",
            STYLED_ROOT,
            "<Root{{tag_attrs}}>",
            "</Root>",
            "",
        ),
    )?;
    registry.register(
        "component.emotion",
        &component_template(
            "import styled from '@emotion/styled';\n",
            STYLED_ROOT,
            "<Root{{tag_attrs}}>",
            "</Root>",
            "",
        ),
    )?;
    registry.register(
        "component.tailwind",
        &component_template(
            "",
            "",
            "<{{tag}} className=\"flex flex-col gap-2\"{{tag_attrs}}>",
            "</{{tag}}>",
            "",
        ),
    )?;
    registry.register(
        "component.default",
        &component_template(
            "",
            "",
            "<{{tag}} className=\"{{css_class}}\"{{tag_attrs}}>",
            "</{{tag}}>",
            "",
        ),
    )?;
    registry.register(
        "component.native",
        &component_template(
            "import { StyleSheet, View } from 'react-native';\n",
            "",
            "<View style={styles.root}{{native_attrs}}>",
            "</View>",
            NATIVE_STYLES,
        ),
    )?;

    registry.register("styles.css-modules", STYLES_CSS_MODULES)?;
    registry.register("subcomponent.default", SUB_COMPONENT)?;
    registry.register("hook.default", HOOK)?;
    registry.register("test.default", TEST)?;
    registry.register("story.default", STORY)?;
    registry.register("docs.default", DOCS)?;

    let page = |open: &str, close: &str| {
        format!("{PAGE_HEADER}{open}{PAGE_SECTIONS}{close}{PAGE_FOOTER}")
    };
    registry.register("page.default", &format!("{PAGE_HEADER}{PAGE_DEFAULT}{PAGE_FOOTER}"))?;
    registry.register("page.dashboard", &page(PAGE_DASHBOARD, PAGE_DASHBOARD_CLOSE))?;
    registry.register("page.landing", &page(PAGE_LANDING, PAGE_LANDING_CLOSE))?;
    registry.register("page.auth", &page(PAGE_AUTH, PAGE_AUTH_CLOSE))?;

    registry.register("project.readme", PROJECT_README)?;
    registry.register("project.tailwind", PROJECT_TAILWIND)?;
    registry.register("project.types", PROJECT_TYPES)?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_templates_compile() {
        let registry = builtin().unwrap();
        for key in [
            "component.css-modules",
            "component.styled-components",
            "component.emotion",
            "component.tailwind",
            "component.default",
            "component.native",
            "page.default",
            "page.dashboard",
            "project.readme",
        ] {
            assert!(registry.contains(key), "{}", key);
        }
    }

    #[test]
    fn test_css_modules_component_renders() {
        let registry = builtin().unwrap();
        let out = registry
            .render(
                "component.css-modules",
                &json!({
                    "component": "Badge",
                    "typescript": true,
                    "props": [{"name": "count", "type": "number", "marker": "?"}],
                    "destructured": "count, children",
                    "tag": "span",
                    "tag_attrs": "",
                    "sub_components": [],
                    "hooks": [],
                }),
            )
            .unwrap();
        assert!(out.contains("import styles from './Badge.module.css';"));
        assert!(out.contains("export interface BadgeProps {\n  count?: number;\n"));
        assert!(out.contains("export function Badge({ count, children }: BadgeProps) {"));
        assert!(out.contains("<span className={styles.root}>"));
        assert!(out.contains("export default Badge;"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_readme_sections_are_conditional() {
        let registry = builtin().unwrap();
        let out = registry
            .render(
                "project.readme",
                &json!({"name": "shop", "features": [], "components": ["Header"]}),
            )
            .unwrap();
        assert!(out.starts_with("# shop\n"));
        assert!(!out.contains("## Features"));
        assert!(out.contains("- `Header`"));
    }
}
