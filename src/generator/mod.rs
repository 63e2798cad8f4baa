//! Idea generator: upstream signals in, ranked content candidates out.
//!
//! Template variant choice goes through an injected selector so tests can
//! pin the output text; the default selector is uniform random.

pub mod templates;

use std::collections::HashMap;

use rand::Rng;

use crate::domain::{ContentItem, SignalKind, SignalSnapshot};
use crate::signals::{CommitEntry, MemorySignal};
use templates::{fill, TemplateFamily};

/// Heuristic priorities per signal type (higher = offered first)
const PRIORITY_HOT_TAKE: i32 = 7;
const PRIORITY_LESSON: i32 = 6;
const PRIORITY_BUILD_UPDATE: i32 = 5;
const PRIORITY_PREDICTION: i32 = 4;
const PRIORITY_BEHIND_THE_SCENES: i32 = 3;

/// Produces candidate content items from commit and memory-log signals
pub struct IdeaGenerator {
    selector: Box<dyn Fn(usize) -> usize + Send + Sync>,
}

impl Default for IdeaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdeaGenerator {
    /// Generator with uniform-random template selection
    pub fn new() -> Self {
        Self::with_selector(|len| rand::rng().random_range(0..len))
    }

    /// Generator with a custom variant selector (index into the family's
    /// variant list). Used by tests for deterministic output.
    pub fn with_selector(selector: impl Fn(usize) -> usize + Send + Sync + 'static) -> Self {
        Self {
            selector: Box::new(selector),
        }
    }

    fn pick(&self, family: TemplateFamily) -> &'static str {
        let variants = family.variants();
        variants[(self.selector)(variants.len()) % variants.len()]
    }

    fn idea(
        &self,
        family: TemplateFamily,
        values: &HashMap<&str, String>,
        priority: i32,
        source: SignalSnapshot,
    ) -> ContentItem {
        let text = fill(self.pick(family), values);
        ContentItem::new(text, family, priority, source)
    }

    /// Generate candidates from the signals and return the top `limit` by
    /// priority (stable on ties). The caller runs them through the dedup
    /// filter before queue admission.
    pub fn generate(
        &self,
        commits: &[CommitEntry],
        memory: &MemorySignal,
        limit: usize,
    ) -> Vec<ContentItem> {
        let mut ideas = Vec::new();

        // One build update per project with recent commits, newest commit
        // as the summary.
        let mut seen_projects: Vec<&str> = Vec::new();
        for commit in commits {
            if seen_projects.contains(&commit.source.as_str()) {
                continue;
            }
            seen_projects.push(commit.source.as_str());

            let count = commits.iter().filter(|c| c.source == commit.source).count();
            let mut values = HashMap::new();
            values.insert("summary", commit.message.clone());
            values.insert("project", commit.source.clone());
            values.insert("count", count.to_string());

            ideas.push(self.idea(
                TemplateFamily::BuildUpdate,
                &values,
                PRIORITY_BUILD_UPDATE,
                SignalSnapshot::new(SignalKind::Commit, &commit.identifier),
            ));
        }

        // The most recently active project earns a public prediction.
        if let Some(project) = seen_projects.first() {
            let mut values = HashMap::new();
            values.insert(
                "claim",
                format!("{} ships something public this month", project),
            );
            ideas.push(self.idea(
                TemplateFamily::Prediction,
                &values,
                PRIORITY_PREDICTION,
                SignalSnapshot::new(SignalKind::Commit, *project),
            ));
        }

        let memory_ref = format!("memory:{}d", memory.days.len());

        if memory.problems > 0 {
            let mut values = HashMap::new();
            values.insert(
                "insight",
                format!("hit {} snags this week and shipped anyway", memory.problems),
            );
            ideas.push(self.idea(
                TemplateFamily::LessonLearned,
                &values,
                PRIORITY_LESSON,
                SignalSnapshot::new(SignalKind::MemoryLog, &memory_ref),
            ));
        }

        if memory.decisions > 0 {
            let mut values = HashMap::new();
            values.insert(
                "take",
                format!(
                    "{} fast decisions beat one perfect plan",
                    memory.decisions
                ),
            );
            ideas.push(self.idea(
                TemplateFamily::HotTake,
                &values,
                PRIORITY_HOT_TAKE,
                SignalSnapshot::new(SignalKind::MemoryLog, &memory_ref),
            ));
        }

        if memory.successes > 0 {
            let mut values = HashMap::new();
            values.insert(
                "detail",
                format!("{} wins in the log this week, none of them glamorous", memory.successes),
            );
            ideas.push(self.idea(
                TemplateFamily::BehindTheScenes,
                &values,
                PRIORITY_BEHIND_THE_SCENES,
                SignalSnapshot::new(SignalKind::MemoryLog, &memory_ref),
            ));
        }

        // Stable sort keeps insertion order on equal priority.
        ideas.sort_by(|a, b| b.priority.cmp(&a.priority));
        ideas.truncate(limit);
        ideas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn commit(source: &str, id: &str, message: &str) -> CommitEntry {
        CommitEntry {
            source: source.to_string(),
            identifier: id.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    fn generator() -> IdeaGenerator {
        IdeaGenerator::with_selector(|_| 0)
    }

    #[test]
    fn test_commit_produces_build_update_with_exact_text() {
        let commits = vec![commit("brandpipe", "abc1234", "rewrote the parser")];
        let ideas = generator().generate(&commits, &MemorySignal::default(), 10);

        // Build update + the prediction for the busiest project
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].text, "build update: rewrote the parser (brandpipe)");
        assert_eq!(ideas[0].template_family, TemplateFamily::BuildUpdate);
        assert_eq!(ideas[0].source.reference, "abc1234");
    }

    #[test]
    fn test_one_build_update_per_project() {
        let commits = vec![
            commit("alpha", "a1", "first"),
            commit("alpha", "a2", "second"),
            commit("beta", "b1", "third"),
        ];
        let ideas = generator().generate(&commits, &MemorySignal::default(), 10);

        let build_updates: Vec<_> = ideas
            .iter()
            .filter(|i| i.template_family == TemplateFamily::BuildUpdate)
            .collect();
        assert_eq!(build_updates.len(), 2);
        // Newest commit per project wins the summary slot
        assert!(build_updates[0].text.contains("first"));
    }

    #[test]
    fn test_memory_signal_families_and_ranking() {
        let memory = MemorySignal {
            days: Vec::new(),
            decisions: 3,
            problems: 2,
            successes: 1,
        };
        let ideas = generator().generate(&[], &memory, 10);

        assert_eq!(ideas.len(), 3);
        // Ranked by priority: hot take (7) > lesson (6) > behind-the-scenes (3)
        assert_eq!(ideas[0].template_family, TemplateFamily::HotTake);
        assert_eq!(ideas[1].template_family, TemplateFamily::LessonLearned);
        assert_eq!(ideas[2].template_family, TemplateFamily::BehindTheScenes);
        assert_eq!(ideas[0].text, "hot take: 3 fast decisions beat one perfect plan");
    }

    #[test]
    fn test_limit_keeps_top_priority() {
        let memory = MemorySignal {
            days: Vec::new(),
            decisions: 1,
            problems: 1,
            successes: 1,
        };
        let ideas = generator().generate(&[], &memory, 1);

        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].template_family, TemplateFamily::HotTake);
    }

    #[test]
    fn test_no_signals_no_ideas() {
        let ideas = generator().generate(&[], &MemorySignal::default(), 5);
        assert!(ideas.is_empty());
    }

    #[test]
    fn test_selector_chooses_variant() {
        let commits = vec![commit("brandpipe", "abc", "tidy up")];
        let ideas = IdeaGenerator::with_selector(|_| 1).generate(
            &commits,
            &MemorySignal::default(),
            1,
        );

        assert_eq!(ideas[0].text, "shipped today on brandpipe: tidy up");
    }
}
