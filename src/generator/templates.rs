//! Message template families.
//!
//! Each family holds several literal variants with `{placeholder}` slots.
//! Filling replaces unknown placeholders with an ellipsis marker rather
//! than leaving literal braces in published text.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker substituted for a placeholder with no data
pub const ELLIPSIS: &str = "...";

/// The five template families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateFamily {
    BuildUpdate,
    LessonLearned,
    HotTake,
    Prediction,
    BehindTheScenes,
}

impl TemplateFamily {
    /// Literal template variants for this family
    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            Self::BuildUpdate => &[
                "build update: {summary} ({project})",
                "shipped today on {project}: {summary}",
                "{count} commits into {project} today. latest: {summary}",
            ],
            Self::LessonLearned => &[
                "lesson from this week: {insight}",
                "thing I keep relearning: {insight}",
                "note to past me: {insight}",
            ],
            Self::HotTake => &[
                "hot take: {take}",
                "unpopular opinion: {take}",
                "saying it louder for the people in the back: {take}",
            ],
            Self::Prediction => &[
                "calling it now: {claim}",
                "prediction: {claim}. screenshot this.",
                "on record: {claim}",
            ],
            Self::BehindTheScenes => &[
                "behind the scenes: {detail}",
                "what building this actually looks like: {detail}",
                "today's desk reality: {detail}",
            ],
        }
    }
}

impl std::fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BuildUpdate => "build-update",
            Self::LessonLearned => "lesson-learned",
            Self::HotTake => "hot-take",
            Self::Prediction => "prediction",
            Self::BehindTheScenes => "behind-the-scenes",
        };
        write!(f, "{}", s)
    }
}

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"))
}

/// Fill `{placeholder}` slots from `values`; missing keys become [`ELLIPSIS`]
pub fn fill(template: &str, values: &HashMap<&str, String>) -> String {
    placeholder_re()
        .replace_all(template, |caps: &regex::Captures<'_>| {
            values
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| ELLIPSIS.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_known_placeholders() {
        let mut values = HashMap::new();
        values.insert("summary", "rewrote the parser".to_string());
        values.insert("project", "brandpipe".to_string());

        let out = fill("build update: {summary} ({project})", &values);
        assert_eq!(out, "build update: rewrote the parser (brandpipe)");
    }

    #[test]
    fn test_missing_placeholder_becomes_ellipsis() {
        let values = HashMap::new();
        let out = fill("hot take: {take}", &values);
        assert_eq!(out, "hot take: ...");
        assert!(!out.contains('{'));
    }

    #[test]
    fn test_every_family_has_variants() {
        for family in [
            TemplateFamily::BuildUpdate,
            TemplateFamily::LessonLearned,
            TemplateFamily::HotTake,
            TemplateFamily::Prediction,
            TemplateFamily::BehindTheScenes,
        ] {
            assert!(!family.variants().is_empty());
        }
    }
}
