use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;

use crate::{
    Res,
    http::{ApiError, HttpResponse},
    info,
    report::{MatchOutcome, MatchReport},
    types::{SearchListResponse, Track},
    warning,
    youtube::YouTubeClient,
};

/// Search text for a track: name, comma-joined artists and "music video".
pub fn build_search_query(track: &Track) -> String {
    format!("{} {} music video", track.name, track.artists.join(", "))
}

impl<S, A> YouTubeClient<S, A> {
    /// Looks up one video per track, in order.
    ///
    /// Every track first goes through the `youtube_cache` namespace, which
    /// only decides whether the track is reported as cached. The match itself
    /// always comes from a live search limited to one video. A failing search
    /// marks that track as [`MatchOutcome::Failed`] and the loop moves on.
    ///
    /// The report has exactly one entry per input track. No request is made
    /// for an empty track list.
    pub async fn find_matches(&self, tracks: &[Track]) -> MatchReport {
        let mut report = MatchReport::with_capacity(tracks.len());
        if tracks.is_empty() {
            return report;
        }

        let pb = ProgressBar::new(tracks.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        for track in tracks {
            let query = build_search_query(track);
            let artists = track.artists.join(", ");
            pb.set_message(track.name.clone());

            match self.probe_cache(&query).await {
                Ok(true) => pb.suspend(|| {
                    info!("Using cached response for track: {} by {}", track.name, artists)
                }),
                Ok(false) => pb.suspend(|| {
                    info!("Making API request for track: {} by {}", track.name, artists)
                }),
                Err(e) => pb.suspend(|| {
                    warning!("Cache lookup failed for track: {} by {}: {}", track.name, artists, e)
                }),
            }

            let outcome = match self.search_video(&query).await {
                Ok(Some(video_id)) => MatchOutcome::Matched(video_id),
                Ok(None) => MatchOutcome::NoMatch,
                Err(e) => {
                    pb.suspend(|| warning!("An error occurred: {}", e));
                    MatchOutcome::Failed(e.to_string())
                }
            };

            report.push(track.clone(), outcome);
            pb.inc(1);
        }

        pb.finish_and_clear();
        report
    }

    /// Sends the cached search request and tells whether it was a cache hit.
    ///
    /// The request carries no `part` parameter, which the live API answers
    /// with an error status. Error responses are never stored, so against
    /// the real API this always reports a miss; the match comes from
    /// [`Self::search_video`] either way.
    async fn probe_cache(&self, query: &str) -> Res<bool> {
        let url = Url::parse_with_params(
            &format!("{}/search", self.api_url),
            &[
                ("q", query),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ],
        )?;

        let response = self.cache.cached_get(&self.http, url.as_str(), &[]).await?;
        Ok(response.from_cache)
    }

    /// Live search for the first video matching `query`.
    async fn search_video(&self, query: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .http
            .get(format!("{}/search", self.api_url))
            .query(&[
                ("part", "id"),
                ("maxResults", "1"),
                ("type", "video"),
                ("q", query),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let response = HttpResponse {
            status: response.status().as_u16(),
            body: response.text().await?,
            from_cache: false,
        }
        .error_for_status("YouTube")?;

        let results: SearchListResponse = response.json()?;
        Ok(results
            .items
            .into_iter()
            .next()
            .and_then(|item| item.id.video_id))
    }
}
