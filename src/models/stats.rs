use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SolvedCount {
    pub solved: u32,
    pub total: u32,
}

impl SolvedCount {
    pub fn new(solved: u32, total: u32) -> Self {
        Self { solved, total }
    }

    /// Share solved, in percent. Zero when there is nothing to solve.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.solved) * 100.0 / f64::from(self.total)
        }
    }
}

/// Solved/total counters keyed by the fixed set of difficulty labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DifficultyBreakdown {
    pub easy: SolvedCount,
    pub medium: SolvedCount,
    pub hard: SolvedCount,
}

impl DifficultyBreakdown {
    pub fn get(&self, difficulty: Difficulty) -> SolvedCount {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, SolvedCount)> + '_ {
        Difficulty::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Normalized solved-problem counters of a coding-challenge profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileStats {
    pub total_solved: u32,
    pub total_questions: u32,
    pub per_difficulty: DifficultyBreakdown,
    /// `None` when the upstream does not know the rank.
    pub ranking: Option<u32>,
    pub acceptance_rate: f64,
    pub contribution_points: u32,
}

impl ProfileStats {
    /// Placeholder shown whenever live stats cannot be produced.
    pub fn fallback() -> Self {
        Self {
            total_solved: 150,
            total_questions: 3000,
            per_difficulty: DifficultyBreakdown {
                easy: SolvedCount::new(65, 800),
                medium: SolvedCount::new(70, 1600),
                hard: SolvedCount::new(15, 600),
            },
            ranking: Some(125_000),
            acceptance_rate: 85.5,
            contribution_points: 1250,
        }
    }

    pub fn completion_percent(&self) -> f64 {
        SolvedCount::new(self.total_solved, self.total_questions).percent()
    }
}

/// Where a rendered value came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback { reason: String },
}

/// Stats plus the flag telling the renderer whether they are live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsReport {
    pub stats: ProfileStats,
    #[serde(flatten)]
    pub source: DataSource,
}

impl StatsReport {
    pub fn live(stats: ProfileStats) -> Self {
        Self {
            stats,
            source: DataSource::Live,
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            stats: ProfileStats::fallback(),
            source: DataSource::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.source, DataSource::Live)
    }

    /// Soft notice for the renderer, present only for fallback data.
    pub fn notice(&self) -> Option<&str> {
        match &self.source {
            DataSource::Live => None,
            DataSource::Fallback { reason } => Some(reason),
        }
    }
}
