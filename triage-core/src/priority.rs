use serde::{Deserialize, Serialize};

/// Display-only bucket for a server-computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// score >= 120
    High,
    /// 80 <= score < 120
    Medium,
    /// Everything else, including NaN
    Low,
}

impl Priority {
    pub const HIGH_THRESHOLD: f64 = 120.0;
    pub const MEDIUM_THRESHOLD: f64 = 80.0;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Priority::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// CSS class used by the HTML card markup.
    pub fn css_class(self) -> &'static str {
        match self {
            Priority::High => "priority-high",
            Priority::Medium => "priority-medium",
            Priority::Low => "priority-low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High priority",
            Priority::Medium => "Medium priority",
            Priority::Low => "Low priority",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(Priority::from_score(150.0).css_class(), "priority-high");
        assert_eq!(Priority::from_score(120.0), Priority::High);
        assert_eq!(Priority::from_score(80.0).css_class(), "priority-medium");
        assert_eq!(Priority::from_score(79.9).css_class(), "priority-low");
        assert_eq!(Priority::from_score(0.0).css_class(), "priority-low");
        assert_eq!(Priority::from_score(-5.0), Priority::Low);
    }

    #[test]
    fn test_nan_is_low() {
        assert_eq!(Priority::from_score(f64::NAN), Priority::Low);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Priority::High.label(), "High priority");
        assert_eq!(Priority::Medium.label(), "Medium priority");
        assert_eq!(Priority::Low.label(), "Low priority");
    }
}
