//! Classifying why yt-dlp could not extract a playlist entry.
//!
//! yt-dlp only reports failures as free text on stderr, so the reason is
//! guessed from keywords. The rules are data behind a trait so they can change
//! without touching the resolver.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Private, deleted or otherwise unavailable video
    Unavailable,
    AgeRestricted,
    /// Anything not recognised
    ExtractionFailed,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unavailable => "unavailable",
            Self::AgeRestricted => "age-restricted",
            Self::ExtractionFailed => "failed to extract",
        };
        f.write_str(label)
    }
}

pub trait FailureClassifier: Send + Sync {
    fn classify(&self, stderr: &str) -> FailureReason;
}

impl<F> FailureClassifier for F
where
    F: Fn(&str) -> FailureReason + Send + Sync,
{
    fn classify(&self, stderr: &str) -> FailureReason {
        self(stderr)
    }
}

/// Ordered substring rules, matched case-insensitively. First hit wins.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<(String, FailureReason)>,
}

impl KeywordClassifier {
    pub fn new(rules: Vec<(String, FailureReason)>) -> Self {
        let rules = rules
            .into_iter()
            .map(|(pattern, reason)| (pattern.to_lowercase(), reason))
            .collect();
        Self { rules }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        let rules = [
            ("unavailable", FailureReason::Unavailable),
            ("private", FailureReason::Unavailable),
            ("deleted", FailureReason::Unavailable),
            ("removed", FailureReason::Unavailable),
            ("age-restricted", FailureReason::AgeRestricted),
            ("confirm your age", FailureReason::AgeRestricted),
        ];
        Self::new(
            rules
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        )
    }
}

impl FailureClassifier for KeywordClassifier {
    fn classify(&self, stderr: &str) -> FailureReason {
        let lower = stderr.to_lowercase();
        self.rules
            .iter()
            .find(|(pattern, _)| lower.contains(pattern.as_str()))
            .map(|(_, reason)| *reason)
            .unwrap_or(FailureReason::ExtractionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_video() {
        let c = KeywordClassifier::default();
        assert_eq!(
            c.classify("ERROR: [youtube] abc: Private video. Sign in if you've been granted access"),
            FailureReason::Unavailable
        );
    }

    #[test]
    fn test_unavailable_and_deleted() {
        let c = KeywordClassifier::default();
        assert_eq!(c.classify("ERROR: Video unavailable"), FailureReason::Unavailable);
        assert_eq!(
            c.classify("This video has been deleted by the uploader"),
            FailureReason::Unavailable
        );
    }

    #[test]
    fn test_age_restricted() {
        let c = KeywordClassifier::default();
        assert_eq!(
            c.classify("ERROR: this video is Age-Restricted"),
            FailureReason::AgeRestricted
        );
        assert_eq!(
            c.classify("Sign in to confirm your age. This video may be inappropriate"),
            FailureReason::AgeRestricted
        );
    }

    #[test]
    fn test_unavailable_checked_before_age() {
        let c = KeywordClassifier::default();
        assert_eq!(
            c.classify("video unavailable: age-restricted"),
            FailureReason::Unavailable
        );
    }

    #[test]
    fn test_unknown_text() {
        let c = KeywordClassifier::default();
        assert_eq!(
            c.classify("ERROR: HTTP Error 403: Forbidden"),
            FailureReason::ExtractionFailed
        );
        assert_eq!(c.classify(""), FailureReason::ExtractionFailed);
    }

    #[test]
    fn test_custom_rules_and_closures() {
        let c = KeywordClassifier::new(vec![("Members Only".to_string(), FailureReason::Unavailable)]);
        assert_eq!(c.classify("join: members only"), FailureReason::Unavailable);
        assert_eq!(c.classify("private video"), FailureReason::ExtractionFailed);

        let always_age = |_: &str| FailureReason::AgeRestricted;
        assert_eq!(always_age.classify("anything"), FailureReason::AgeRestricted);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FailureReason::Unavailable.to_string(), "unavailable");
        assert_eq!(FailureReason::AgeRestricted.to_string(), "age-restricted");
        assert_eq!(FailureReason::ExtractionFailed.to_string(), "failed to extract");
    }
}
