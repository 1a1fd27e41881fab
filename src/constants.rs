//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// File discovery constants
pub mod discovery {
    /// Default maximum file size for analysis (1MB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

    /// Project manifest file name
    pub const MANIFEST_FILE: &str = "package.json";

    /// Default component file patterns (root-relative)
    pub const DEFAULT_INCLUDE: &[&str] = &["**/*.tsx", "**/*.jsx", "**/use*.ts", "**/use*.js"];

    /// Default excluded paths
    pub const DEFAULT_EXCLUDE: &[&str] = &[
        "**/node_modules/**",
        "**/dist/**",
        "**/build/**",
        "**/.next/**",
        "**/coverage/**",
        "**/*.d.ts",
    ];

    /// File name markers of test files
    pub const TEST_MARKERS: &[&str] = &[".test.", ".spec.", "__tests__"];

    /// File name marker of story files
    pub const STORY_MARKER: &str = ".stories.";
}

/// Accessibility scoring weights
pub mod accessibility {
    /// Score of a snippet with no signals at all
    pub const BASE_SCORE: i32 = 70;

    pub const ARIA_WEIGHT: i32 = 5;
    pub const ROLE_WEIGHT: i32 = 5;
    pub const TAB_INDEX_WEIGHT: i32 = 4;
    pub const KEYBOARD_HANDLER_WEIGHT: i32 = 6;
    pub const ALT_WEIGHT: i32 = 4;
    pub const LABEL_WEIGHT: i32 = 4;

    /// Clickable non-interactive element without any accessibility attribute
    pub const CLICKABLE_WITHOUT_A11Y_PENALTY: i32 = 15;

    /// `<img>` without `alt`
    pub const IMAGE_WITHOUT_ALT_PENALTY: i32 = 10;
}

/// Quality scoring constants
pub mod quality {
    /// Score used for component-derived metrics when no component was analyzed
    pub const NEUTRAL_SCORE: f64 = 50.0;

    /// Cyclomatic complexity considered healthy for a component
    pub const COMPLEXITY_TARGET: f64 = 5.0;

    /// Points lost per unit of mean complexity above target
    pub const COMPLEXITY_PENALTY: f64 = 5.0;

    /// Penalty when the project does not use TypeScript
    pub const NO_TYPESCRIPT_PENALTY: f64 = 10.0;

    /// Production dependencies tolerated before security deductions
    pub const PROD_DEPENDENCY_ALLOWANCE: usize = 20;

    /// Security points lost per production dependency above the allowance
    pub const SECURITY_PER_EXTRA_DEPENDENCY: f64 = 2.0;

    /// Security points lost per unpinned (`*`, `latest`) dependency
    pub const UNPINNED_VERSION_PENALTY: f64 = 10.0;

    /// Total dependencies tolerated before performance deductions
    pub const TOTAL_DEPENDENCY_ALLOWANCE: usize = 40;

    /// Performance points lost per dependency above the allowance
    pub const PERFORMANCE_PER_EXTRA_DEPENDENCY: f64 = 1.0;

    /// Mean component size (lines) above which performance is penalized
    pub const LARGE_COMPONENT_LINES: f64 = 300.0;

    /// Extra mean lines per lost performance point
    pub const LINES_PER_PERFORMANCE_POINT: f64 = 10.0;

    /// Penalty when no known framework is declared
    pub const UNKNOWN_FRAMEWORK_PENALTY: f64 = 10.0;

    /// Bonus when a test framework is declared
    pub const TEST_FRAMEWORK_BONUS: f64 = 10.0;

    /// Documentation points awarded for a README
    pub const README_BONUS: f64 = 20.0;

    /// Documentation points for documenting every component
    pub const DOCUMENTED_SHARE_WEIGHT: f64 = 80.0;
}

/// Report rendering constants
pub mod reporting {
    /// Components above which reports summarize instead of enumerating
    pub const DEFAULT_SUMMARIZE_THRESHOLD: usize = 50;

    /// Dependency count above which a component is a "God Component"
    pub const DEFAULT_GOD_COMPONENT_THRESHOLD: usize = 10;

    /// Width of ASCII score bars
    pub const BAR_WIDTH: usize = 20;

    /// Scores below this produce a recommendation
    pub const RECOMMENDATION_THRESHOLD: u8 = 70;
}

/// Migration constants
pub mod migration {
    /// Default backup directory (relative to project root)
    pub const DEFAULT_BACKUP_DIR: &str = ".uiforge/backups";

    /// Backup manifest file name
    pub const BACKUP_MANIFEST: &str = "manifest.json";

    /// Component wildcard in phase targets
    pub const ALL_COMPONENTS: &str = "*";
}
