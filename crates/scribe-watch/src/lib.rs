use once_cell::sync::Lazy;
use regex::Regex;

/// Directory names ignored by default: dependency trees, build output,
/// version control, virtual environments, and language tool caches.
///
/// `build` and `env` are deliberately absent; both are common names for
/// user content directories.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    ".git",
    ".venv",
    "venv",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".cache",
];

/// An immutable, ordered collection of path-ignore rules.
///
/// Each rule matches a directory name only as a whole path segment,
/// bounded by separators or string ends, at any depth. A candidate path
/// is ignored if any rule matches; there is no per-rule priority.
#[derive(Debug)]
pub struct IgnoreRules {
    rules: Vec<Regex>,
}

impl IgnoreRules {
    /// Compile a rule set from directory names. Names are taken literally;
    /// regex metacharacters in them are escaped.
    pub fn from_segments(names: &[&str]) -> anyhow::Result<Self> {
        let mut rules = Vec::with_capacity(names.len());
        for name in names {
            let pattern = format!("(^|/){}(/|$)", regex::escape(name));
            rules.push(Regex::new(&pattern)?);
        }
        Ok(Self { rules })
    }

    /// True when any rule matches `path`. Backslashes are normalized to
    /// forward slashes so Windows paths hit the same rules.
    pub fn is_ignored(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        self.rules.iter().any(|rule| rule.is_match(&normalized))
    }

    /// The compiled patterns, in construction order. Watch services that
    /// take raw regexes consume these directly.
    pub fn rules(&self) -> &[Regex] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The process-wide default rule set, compiled once and handed to the
/// watch service at setup. No mutation API exists.
pub fn default_watch_ignored() -> &'static IgnoreRules {
    static DEFAULT: Lazy<IgnoreRules> = Lazy::new(|| {
        IgnoreRules::from_segments(DEFAULT_IGNORED_DIRS)
            .expect("default ignore patterns must compile")
    });
    &DEFAULT
}
