//! User progress model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::constants::skill_thresholds;
use crate::models::Difficulty;

/// Proficiency tier derived from the total solved count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTier {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillTier {
    pub fn from_total(total_solved: i32) -> Self {
        if total_solved < skill_thresholds::BEGINNER_BELOW {
            Self::Beginner
        } else if total_solved < skill_thresholds::INTERMEDIATE_BELOW {
            Self::Intermediate
        } else if total_solved < skill_thresholds::ADVANCED_BELOW {
            Self::Advanced
        } else {
            Self::Expert
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

impl std::fmt::Display for SkillTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user cumulative counters (one row per user)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: String,
    pub total_solved: i32,
    pub easy_solved: i32,
    pub medium_solved: i32,
    pub hard_solved: i32,
    pub skill_level: String,
    pub preferred_categories: Vec<String>,
    pub weak_categories: Vec<String>,
    pub last_activity_at: DateTime<Utc>,
}

impl UserProgress {
    /// Zero counters for a user with no row yet
    pub fn fresh(user_id: &str, at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_solved: 0,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            skill_level: SkillTier::Beginner.as_str().to_string(),
            preferred_categories: Vec::new(),
            weak_categories: Vec::new(),
            last_activity_at: at,
        }
    }

    /// Count one more solved question and recompute the tier
    pub fn record_solved(&mut self, difficulty: Difficulty, at: DateTime<Utc>) {
        self.total_solved += 1;
        match difficulty {
            Difficulty::Easy => self.easy_solved += 1,
            Difficulty::Medium => self.medium_solved += 1,
            Difficulty::Hard => self.hard_solved += 1,
        }
        self.skill_level = SkillTier::from_total(self.total_solved).as_str().to_string();
        self.last_activity_at = at;
    }

    pub fn skill_tier(&self) -> SkillTier {
        SkillTier::from_str(&self.skill_level)
            .unwrap_or_else(|| SkillTier::from_total(self.total_solved))
    }
}
