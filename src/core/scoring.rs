//! Clip detection scoring.
//!
//! A rule-based classifier, deterministic for identical input state.
//! Independent indicators contribute fixed weights that sum to an admission
//! score; the score must meet the threshold for a clip to be detected.

use crate::domain::LiveState;

/// Flat weight for a chat-volume spike
pub const CHAT_SPIKE_WEIGHT: u32 = 3;

/// Flat weight for each matching keyword category
pub const KEYWORD_WEIGHT: u32 = 5;

/// Flat weight for clearing the viewer threshold
pub const VIEWER_WEIGHT: u32 = 1;

/// Minimum score that persists a clip
pub const DETECTION_THRESHOLD: u32 = 5;

/// A named group of trigger phrases
pub struct KeywordCategory {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
}

/// Trigger phrase categories, matched case-insensitively as substrings of
/// the concatenated recent chat text
pub const KEYWORD_CATEGORIES: &[KeywordCategory] = &[
    KeywordCategory {
        name: "clip-request",
        phrases: &["clip it", "clip that", "someone clip"],
    },
    KeywordCategory {
        name: "hype",
        phrases: &["lets go", "let's go", "insane", "no way", "pog"],
    },
    KeywordCategory {
        name: "laughter",
        phrases: &["lmao", "lol", "haha"],
    },
];

/// Tunable thresholds for the non-keyword indicators
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Messages in the window that count as a chat spike
    pub chat_spike_messages: usize,

    /// Viewer count that earns the viewer indicator
    pub viewer_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            chat_spike_messages: 10,
            viewer_threshold: 50,
        }
    }
}

/// Outcome of scoring one live snapshot
#[derive(Debug, Clone)]
pub struct Detection {
    /// Summed admission score
    pub score: u32,

    /// Indicator tags that contributed
    pub indicators: Vec<String>,
}

impl Detection {
    /// Whether the score meets the admission threshold
    pub fn is_clip(&self) -> bool {
        self.score >= DETECTION_THRESHOLD
    }
}

/// Score a live snapshot against the fixed indicator weights
pub fn score_live_state(state: &LiveState, config: &ScoringConfig) -> Detection {
    let mut score = 0;
    let mut indicators = Vec::new();

    if state.chat_messages.len() >= config.chat_spike_messages {
        score += CHAT_SPIKE_WEIGHT;
        indicators.push("chat-spike".to_string());
    }

    let chat_text = state
        .chat_messages
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    for category in KEYWORD_CATEGORIES {
        if category.phrases.iter().any(|p| chat_text.contains(p)) {
            score += KEYWORD_WEIGHT;
            indicators.push(format!("keyword:{}", category.name));
        }
    }

    if state.viewer_count >= config.viewer_threshold {
        score += VIEWER_WEIGHT;
        indicators.push("viewers".to_string());
    }

    Detection { score, indicators }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatMessage;
    use chrono::Utc;

    fn messages(texts: &[&str]) -> Vec<ChatMessage> {
        texts
            .iter()
            .map(|t| ChatMessage {
                user: "viewer".to_string(),
                text: t.to_string(),
                timestamp: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_keyword_match_alone_meets_threshold() {
        let state = LiveState {
            chat_messages: messages(&["CLIP IT right now"]),
            viewer_count: 0,
        };

        let detection = score_live_state(&state, &ScoringConfig::default());

        assert_eq!(detection.score, 5);
        assert!(detection.is_clip());
        assert_eq!(detection.indicators, vec!["keyword:clip-request"]);
    }

    #[test]
    fn test_spike_plus_viewers_without_keyword_misses_threshold() {
        let texts: Vec<String> = (0..12).map(|i| format!("message number {}", i)).collect();
        let state = LiveState {
            chat_messages: messages(&texts.iter().map(String::as_str).collect::<Vec<_>>()),
            viewer_count: 100,
        };

        let detection = score_live_state(&state, &ScoringConfig::default());

        // 3 (spike) + 1 (viewers) = 4 < 5
        assert_eq!(detection.score, 4);
        assert!(!detection.is_clip());
    }

    #[test]
    fn test_each_matching_category_contributes_once() {
        let state = LiveState {
            chat_messages: messages(&["lol clip that", "no way lmao"]),
            viewer_count: 0,
        };

        let detection = score_live_state(&state, &ScoringConfig::default());

        // clip-request + hype + laughter = 15
        assert_eq!(detection.score, 15);
        assert_eq!(detection.indicators.len(), 3);
    }

    #[test]
    fn test_quiet_state_scores_zero() {
        let detection = score_live_state(&LiveState::default(), &ScoringConfig::default());
        assert_eq!(detection.score, 0);
        assert!(detection.indicators.is_empty());
    }
}
