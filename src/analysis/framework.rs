use super::manifest::{Manifest, normalize_version};
use crate::types::{DependencyCategory, DependencyInfo, FrameworkInfo, FrameworkKind};

/// Dependency signatures in detection priority: meta-frameworks first,
/// so a Next.js project is not reported as plain React.
const SIGNATURES: &[(&str, &str, FrameworkKind)] = &[
    ("next", "Next.js", FrameworkKind::Ssr),
    ("nuxt", "Nuxt", FrameworkKind::Ssr),
    ("@remix-run/react", "Remix", FrameworkKind::Ssr),
    ("gatsby", "Gatsby", FrameworkKind::Static),
    ("@angular/core", "Angular", FrameworkKind::Spa),
    ("vue", "Vue.js", FrameworkKind::Spa),
    ("svelte", "Svelte", FrameworkKind::Spa),
    ("react", "React", FrameworkKind::Spa),
];

/// Detect the framework from declared dependencies
pub fn detect_framework(manifest: &Manifest) -> FrameworkInfo {
    SIGNATURES
        .iter()
        .find_map(|(dependency, name, kind)| {
            manifest
                .version_of(dependency)
                .map(|range| FrameworkInfo::new(*name, normalize_version(range), *kind))
        })
        .unwrap_or_else(FrameworkInfo::unknown)
}

const FRAMEWORK: &[&str] = &[
    "react", "react-dom", "next", "nuxt", "vue", "svelte", "gatsby", "solid-js", "preact",
    "react-native",
];
const FRAMEWORK_PREFIXES: &[&str] = &["@angular/", "@remix-run/", "@sveltejs/"];

const UI: &[&str] = &["antd", "react-bootstrap", "semantic-ui-react", "primereact", "vuetify"];
const UI_PREFIXES: &[&str] = &[
    "@mui/", "@chakra-ui/", "@radix-ui/", "@headlessui/", "@mantine/", "@shadcn/",
];

const STATE: &[&str] = &[
    "redux", "react-redux", "zustand", "mobx", "mobx-react", "recoil", "jotai", "xstate", "swr",
    "pinia", "vuex",
];
const STATE_PREFIXES: &[&str] = &["@reduxjs/", "@tanstack/react-query", "@xstate/"];

const STYLING: &[&str] = &[
    "styled-components", "tailwindcss", "sass", "less", "postcss", "autoprefixer", "clsx",
    "classnames",
];
const STYLING_PREFIXES: &[&str] = &["@emotion/", "@vanilla-extract/", "@stitches/"];

const TESTING: &[&str] = &[
    "jest", "vitest", "cypress", "mocha", "chai", "enzyme", "playwright", "jsdom",
];
const TESTING_PREFIXES: &[&str] = &["@testing-library/", "@playwright/", "@vitest/", "jest-"];

const BUILD: &[&str] = &[
    "typescript", "webpack", "vite", "rollup", "esbuild", "parcel", "prettier", "eslint", "turbo",
    "babel-loader", "ts-node",
];
const BUILD_PREFIXES: &[&str] = &["@types/", "@babel/", "@vitejs/", "eslint-", "@typescript-eslint/"];

/// Coarse purpose of a dependency by name
pub fn categorize(name: &str) -> DependencyCategory {
    let is = |exact: &[&str], prefixes: &[&str]| {
        exact.contains(&name) || prefixes.iter().any(|p| name.starts_with(p))
    };

    if is(FRAMEWORK, FRAMEWORK_PREFIXES) {
        DependencyCategory::Framework
    } else if is(UI, UI_PREFIXES) {
        DependencyCategory::Ui
    } else if is(STATE, STATE_PREFIXES) {
        DependencyCategory::State
    } else if is(STYLING, STYLING_PREFIXES) {
        DependencyCategory::Styling
    } else if is(TESTING, TESTING_PREFIXES) {
        DependencyCategory::Testing
    } else if is(BUILD, BUILD_PREFIXES) {
        DependencyCategory::Build
    } else {
        DependencyCategory::Other
    }
}

/// Production then dev dependencies, each group in name order
pub fn collect_dependencies(manifest: &Manifest) -> Vec<DependencyInfo> {
    let tag = |is_dev: bool| {
        move |(name, range): (&String, &String)| DependencyInfo {
            name: name.clone(),
            version: range.clone(),
            is_dev,
            category: categorize(name),
        }
    };

    manifest
        .dependencies
        .iter()
        .map(tag(false))
        .chain(manifest.dev_dependencies.iter().map(tag(true)))
        .collect()
}
