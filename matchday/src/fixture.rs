use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub id: u64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub round: u32,
    pub team_h: u32,
    pub team_a: u32,
    pub team_h_score: Option<u32>,
    pub team_a_score: Option<u32>,
}

impl Fixture {
    /// Builds an unplayed fixture whose interval is `[kickoff, kickoff + duration]`.
    pub fn scheduled(
        id: u64,
        kickoff: DateTime<Utc>,
        duration: Duration,
        round: u32,
        team_h: u32,
        team_a: u32,
    ) -> Self {
        Self {
            id,
            start: kickoff,
            end: kickoff + duration,
            round,
            team_h,
            team_a,
            team_h_score: None,
            team_a_score: None,
        }
    }

    pub fn with_score(mut self, team_h_score: u32, team_a_score: u32) -> Self {
        self.team_h_score = Some(team_h_score);
        self.team_a_score = Some(team_a_score);
        self
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_played(&self) -> bool {
        self.team_h_score.is_some() && self.team_a_score.is_some()
    }
}
