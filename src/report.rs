use crate::types::{MatchTableRow, Track};

/// Result of searching the destination service for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(String),
    NoMatch,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub track: Track,
    pub outcome: MatchOutcome,
}

/// Search outcomes in the order of the source tracks, one per track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    matches: Vec<TrackMatch>,
}

impl MatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            matches: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, track: Track, outcome: MatchOutcome) {
        self.matches.push(TrackMatch { track, outcome });
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn entries(&self) -> &[TrackMatch] {
        &self.matches
    }

    pub fn outcomes(&self) -> Vec<&MatchOutcome> {
        self.matches.iter().map(|m| &m.outcome).collect()
    }

    /// Matched video ids, in track order.
    pub fn video_ids(&self) -> Vec<String> {
        self.matches
            .iter()
            .filter_map(|m| match &m.outcome {
                MatchOutcome::Matched(video_id) => Some(video_id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn matched_count(&self) -> usize {
        self.count(|o| matches!(o, MatchOutcome::Matched(_)))
    }

    pub fn no_match_count(&self) -> usize {
        self.count(|o| matches!(o, MatchOutcome::NoMatch))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, MatchOutcome::Failed(_)))
    }

    /// Table rows for every track that did not end up with a video.
    pub fn unmatched_rows(&self) -> Vec<MatchTableRow> {
        self.matches
            .iter()
            .filter_map(|m| {
                let result = match &m.outcome {
                    MatchOutcome::Matched(_) => return None,
                    MatchOutcome::NoMatch => "no match".to_string(),
                    MatchOutcome::Failed(reason) => format!("failed: {reason}"),
                };
                Some(MatchTableRow {
                    track: m.track.name.clone(),
                    artists: m.track.artists.join(", "),
                    result,
                })
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&MatchOutcome) -> bool) -> usize {
        self.matches.iter().filter(|m| predicate(&m.outcome)).count()
    }
}
