use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{DifficultyBreakdown, ProfileStats, SolvedCount};

pub const SUCCESS_STATUS: &str = "success";

/// Body returned by the stats provider. Every counter may be absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsPayload {
    pub status: Option<String>,
    pub message: Option<String>,
    pub total_solved: Option<u32>,
    pub total_questions: Option<u32>,
    pub easy_solved: Option<u32>,
    pub total_easy: Option<u32>,
    pub medium_solved: Option<u32>,
    pub total_medium: Option<u32>,
    pub hard_solved: Option<u32>,
    pub total_hard: Option<u32>,
    pub ranking: Option<u32>,
    pub acceptance_rate: Option<f64>,
    pub contribution_points: Option<u32>,
}

impl StatsPayload {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }

    pub fn into_profile_stats(self) -> Result<ProfileStats> {
        if !self.is_success() {
            return Err(Error::StatsApi(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Failed to fetch stats".to_string()),
            ));
        }

        Ok(ProfileStats {
            total_solved: self.total_solved.unwrap_or(0),
            total_questions: self.total_questions.unwrap_or(0),
            per_difficulty: DifficultyBreakdown {
                easy: SolvedCount::new(
                    self.easy_solved.unwrap_or(0),
                    self.total_easy.unwrap_or(0),
                ),
                medium: SolvedCount::new(
                    self.medium_solved.unwrap_or(0),
                    self.total_medium.unwrap_or(0),
                ),
                hard: SolvedCount::new(
                    self.hard_solved.unwrap_or(0),
                    self.total_hard.unwrap_or(0),
                ),
            },
            ranking: self.ranking.filter(|r| *r > 0),
            acceptance_rate: self.acceptance_rate.unwrap_or(0.0),
            contribution_points: self.contribution_points.unwrap_or(0),
        })
    }
}
