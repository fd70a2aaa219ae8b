//! The known-image registry: canonical output names and their plans.
//!
//! Web sites expect a handful of icon files with fixed names and sizes
//! (`favicon-32x32.png`, `apple-touch-icon.png`, `og-image.png`, ...).
//! The registry maps each canonical base name to an [`ImagePlan`]: the
//! sizes to emit, the rule for building each output's filename suffix,
//! and an optional fallback entry whose source can stand in when the
//! entry's own SVG is absent.
//!
//! Lookup is case-insensitive and exact — `FAVICON` resolves, but
//! `android-chrome-` does not prefix-match anything. An absent key
//! means "no known plan" and the caller converts the file at its
//! native size instead.
//!
//! The table is `const` data; [`validate`] checks its self-consistency
//! (fallback references resolve, no fallback cycles, no empty size
//! lists) once at the start of a run.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A target raster box: square or rectangular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Square(u32),
    Rect { width: u32, height: u32 },
}

impl SizeSpec {
    pub fn width(self) -> u32 {
        match self {
            SizeSpec::Square(n) => n,
            SizeSpec::Rect { width, .. } => width,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            SizeSpec::Square(n) => n,
            SizeSpec::Rect { height, .. } => height,
        }
    }
}

impl fmt::Display for SizeSpec {
    /// `16x16` / `1200x630` — the label used in suffixes and progress lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

/// How an output filename suffix is derived from a size.
///
/// A tagged enum instead of a closure so the registry stays plain
/// `const` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixRule {
    /// `-{w}x{h}` — used when one plan emits several sizes that must
    /// not overwrite each other.
    Sized,
    /// A constant suffix (empty for every current entry).
    Fixed(&'static str),
}

impl SuffixRule {
    pub fn apply(self, size: SizeSpec) -> String {
        match self {
            SuffixRule::Sized => format!("-{}", size),
            SuffixRule::Fixed(s) => s.to_string(),
        }
    }
}

/// How one canonical output name is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePlan {
    /// Emission order; never empty.
    pub sizes: &'static [SizeSpec],
    pub suffix: SuffixRule,
    /// Canonical name of another registry entry whose source may
    /// substitute when this entry's own source is missing.
    pub fallback: Option<&'static str>,
}

use SizeSpec::{Rect, Square};

/// The canonical name table. Iteration order is meaningful: fallback
/// generation emits candidates in this order.
pub const KNOWN_IMAGES: &[(&str, ImagePlan)] = &[
    (
        "favicon",
        ImagePlan {
            sizes: &[
                Square(16),
                Square(32),
                Square(48),
                Square(64),
                Square(128),
                Square(256),
            ],
            suffix: SuffixRule::Sized,
            fallback: None,
        },
    ),
    (
        "favicon-16x16",
        ImagePlan {
            sizes: &[Square(16)],
            suffix: SuffixRule::Fixed(""),
            fallback: Some("favicon"),
        },
    ),
    (
        "favicon-32x32",
        ImagePlan {
            sizes: &[Square(32)],
            suffix: SuffixRule::Fixed(""),
            fallback: Some("favicon"),
        },
    ),
    (
        "apple-touch-icon",
        ImagePlan {
            sizes: &[Square(180)],
            suffix: SuffixRule::Fixed(""),
            fallback: Some("favicon"),
        },
    ),
    (
        "og-image",
        ImagePlan {
            sizes: &[Rect {
                width: 1200,
                height: 630,
            }],
            suffix: SuffixRule::Fixed(""),
            fallback: None,
        },
    ),
    (
        "twitter-image",
        ImagePlan {
            sizes: &[Rect {
                width: 1200,
                height: 600,
            }],
            suffix: SuffixRule::Fixed(""),
            fallback: None,
        },
    ),
    (
        "android-chrome-192x192",
        ImagePlan {
            sizes: &[Square(192)],
            suffix: SuffixRule::Fixed(""),
            fallback: Some("favicon"),
        },
    ),
    (
        "android-chrome-512x512",
        ImagePlan {
            sizes: &[Square(512)],
            suffix: SuffixRule::Fixed(""),
            fallback: Some("favicon"),
        },
    ),
];

/// Look up the plan for a base file name.
///
/// Exact match on the lowercased forms of both the query and the
/// stored key. Returns `None` for unrecognized names, which callers
/// treat as "convert at native size".
pub fn resolve_plan(base_name: &str) -> Option<&'static ImagePlan> {
    let query = base_name.to_lowercase();
    KNOWN_IMAGES
        .iter()
        .find(|(name, _)| name.to_lowercase() == query)
        .map(|(_, plan)| plan)
}

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("Entry '{0}' declares unknown fallback '{1}'")]
    UnknownFallback(String, String),
    #[error("Fallback cycle starting at '{0}'")]
    FallbackCycle(String),
    #[error("Entry '{0}' has an empty size list")]
    EmptySizes(String),
}

/// Validate the built-in table. Called once per run before any work.
pub fn validate() -> Result<(), RegistryError> {
    validate_table(KNOWN_IMAGES)
}

/// Self-consistency check for a registry table.
///
/// Current data only ever needs one fallback hop, but the cycle walk
/// guards future edits rather than relying on call-depth accidents.
fn validate_table(table: &[(&str, ImagePlan)]) -> Result<(), RegistryError> {
    let lookup = |name: &str| {
        let query = name.to_lowercase();
        table
            .iter()
            .find(|(key, _)| key.to_lowercase() == query)
            .map(|(_, plan)| plan)
    };

    for (name, plan) in table {
        if plan.sizes.is_empty() {
            return Err(RegistryError::EmptySizes(name.to_string()));
        }

        let mut seen = vec![name.to_lowercase()];
        let mut current = *plan;
        while let Some(next) = current.fallback {
            let Some(next_plan) = lookup(next) else {
                return Err(RegistryError::UnknownFallback(
                    name.to_string(),
                    next.to_string(),
                ));
            };
            if seen.contains(&next.to_lowercase()) {
                return Err(RegistryError::FallbackCycle(name.to_string()));
            }
            seen.push(next.to_lowercase());
            current = *next_plan;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn favicon_has_six_distinct_suffixes() {
        let plan = resolve_plan("favicon").unwrap();
        assert_eq!(plan.sizes.len(), 6);

        let suffixes: Vec<String> = plan.sizes.iter().map(|s| plan.suffix.apply(*s)).collect();
        assert_eq!(
            suffixes,
            vec!["-16x16", "-32x32", "-48x48", "-64x64", "-128x128", "-256x256"]
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(resolve_plan("FAVICON").is_some());
        assert!(resolve_plan("Apple-Touch-Icon").is_some());
        assert_eq!(resolve_plan("FAVICON"), resolve_plan("favicon"));
    }

    #[test]
    fn lookup_requires_exact_match() {
        // No prefix or glob matching, even for names sharing a prefix.
        assert!(resolve_plan("android-chrome-").is_none());
        assert!(resolve_plan("favicon-16").is_none());
        assert!(resolve_plan("logo").is_none());
    }

    #[test]
    fn og_image_is_rectangular() {
        let plan = resolve_plan("og-image").unwrap();
        assert_eq!(
            plan.sizes,
            &[Rect {
                width: 1200,
                height: 630
            }]
        );
        assert_eq!(plan.suffix.apply(plan.sizes[0]), "");
    }

    #[test]
    fn fallback_entries_point_at_favicon() {
        for name in [
            "favicon-16x16",
            "favicon-32x32",
            "apple-touch-icon",
            "android-chrome-192x192",
            "android-chrome-512x512",
        ] {
            assert_eq!(resolve_plan(name).unwrap().fallback, Some("favicon"));
        }
        assert_eq!(resolve_plan("favicon").unwrap().fallback, None);
        assert_eq!(resolve_plan("og-image").unwrap().fallback, None);
    }

    #[test]
    fn size_spec_labels() {
        assert_eq!(Square(16).to_string(), "16x16");
        assert_eq!(
            Rect {
                width: 1200,
                height: 630
            }
            .to_string(),
            "1200x630"
        );
    }

    #[test]
    fn validate_rejects_unknown_fallback() {
        let table: &[(&str, ImagePlan)] = &[(
            "lonely",
            ImagePlan {
                sizes: &[Square(16)],
                suffix: SuffixRule::Fixed(""),
                fallback: Some("missing"),
            },
        )];
        assert_eq!(
            validate_table(table),
            Err(RegistryError::UnknownFallback(
                "lonely".to_string(),
                "missing".to_string()
            ))
        );
    }

    #[test]
    fn validate_rejects_fallback_cycle() {
        let table: &[(&str, ImagePlan)] = &[
            (
                "a",
                ImagePlan {
                    sizes: &[Square(16)],
                    suffix: SuffixRule::Fixed(""),
                    fallback: Some("b"),
                },
            ),
            (
                "b",
                ImagePlan {
                    sizes: &[Square(16)],
                    suffix: SuffixRule::Fixed(""),
                    fallback: Some("a"),
                },
            ),
        ];
        assert_eq!(
            validate_table(table),
            Err(RegistryError::FallbackCycle("a".to_string()))
        );
    }

    #[test]
    fn validate_rejects_self_fallback() {
        let table: &[(&str, ImagePlan)] = &[(
            "narcissus",
            ImagePlan {
                sizes: &[Square(16)],
                suffix: SuffixRule::Fixed(""),
                fallback: Some("narcissus"),
            },
        )];
        assert_eq!(
            validate_table(table),
            Err(RegistryError::FallbackCycle("narcissus".to_string()))
        );
    }

    #[test]
    fn validate_rejects_empty_sizes() {
        let table: &[(&str, ImagePlan)] = &[(
            "empty",
            ImagePlan {
                sizes: &[],
                suffix: SuffixRule::Fixed(""),
                fallback: None,
            },
        )];
        assert_eq!(
            validate_table(table),
            Err(RegistryError::EmptySizes("empty".to_string()))
        );
    }
}
