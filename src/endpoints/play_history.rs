//! Play history and listening statistics endpoints

use rand::Rng;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::client::{query_path, ApiError, Dispatcher};

/// Shortest simulated play, in seconds
const MIN_PLAY_SECS: f64 = 40.0;

/// Longest simulated play, in seconds
const MAX_PLAY_SECS: u32 = 360;

/// Mean of the exponential part of a simulated play, in seconds
const MEAN_EXTRA_PLAY_SECS: f64 = 150.0;

/// What a play total is counted over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayTarget {
    Song,
    Album,
    Singer,
}

impl PlayTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayTarget::Song => "song",
            PlayTarget::Album => "album",
            PlayTarget::Singer => "singer",
        }
    }
}

impl fmt::Display for PlayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "song" => Ok(PlayTarget::Song),
            "album" => Ok(PlayTarget::Album),
            "singer" | "artist" => Ok(PlayTarget::Singer),
            other => Err(format!(
                "Invalid play target: '{}'. Valid targets: song, album, singer",
                other
            )),
        }
    }
}

/// Wrappers for `/playHistory/...` endpoints
#[derive(Debug, Clone, Copy)]
pub struct PlayHistoryApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> PlayHistoryApi<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Records that a song was played
    ///
    /// Without an explicit `duration` a realistic listening time is sampled
    /// with [`simulated_play_duration`].
    pub async fn record_play(&self, song_id: u64, duration: Option<u32>) -> Result<Value, ApiError> {
        let play_duration = duration.unwrap_or_else(simulated_play_duration);
        self.dispatcher
            .post(
                "/playHistory/record_play/",
                json!({"song_id": song_id, "play_duration": play_duration}),
            )
            .await
    }

    /// Total plays of a song, or summed over an album's or singer's songs
    pub async fn total_stats(&self, target: PlayTarget, target_id: u64) -> Result<Value, ApiError> {
        self.dispatcher.get(&total_stats_path(target, target_id)).await
    }

    pub async fn my_history(&self, filters: Value) -> Result<Value, ApiError> {
        self.dispatcher
            .post("/playHistory/get_my_play_history/", filters)
            .await
    }

    /// Listening report for `time_range` ("week", "month", "all" or "self-defined")
    pub async fn report(
        &self,
        time_range: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/playHistory/get_play_report/",
                report_body(time_range, start_date, end_date),
            )
            .await
    }

    /// The user's most played songs, singers or albums
    pub async fn top_charts(&self, kind: &str, limit: u32) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/playHistory/get_user_top_charts/",
                json!({"type": kind, "limit": limit}),
            )
            .await
    }

    /// Plays per day or per month
    pub async fn activity_trend(&self, period: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .post(
                "/playHistory/get_user_activity_trend/",
                json!({"period": period}),
            )
            .await
    }
}

fn total_stats_path(target: PlayTarget, target_id: u64) -> String {
    query_path(
        "/playHistory/get_total_play_stats/",
        &[
            ("target_type", target.to_string()),
            ("target_id", target_id.to_string()),
        ],
    )
}

fn report_body(time_range: &str, start_date: Option<&str>, end_date: Option<&str>) -> Value {
    let mut body = Map::new();
    body.insert("time_range".to_string(), json!(time_range));
    if let Some(start) = start_date {
        body.insert("start_date".to_string(), json!(start));
    }
    if let Some(end) = end_date {
        body.insert("end_date".to_string(), json!(end));
    }
    Value::Object(body)
}

/// Samples a play duration in seconds
///
/// Durations follow an exponential distribution with a 40 second floor and a
/// mean of 190 seconds, capped at 360 seconds.
pub fn simulated_play_duration() -> u32 {
    duration_from_sample(rand::thread_rng().gen::<f64>())
}

/// Maps a uniform sample in `[0, 1)` to a play duration
fn duration_from_sample(u: f64) -> u32 {
    let secs = (-(1.0 - u).ln() * MEAN_EXTRA_PLAY_SECS + MIN_PLAY_SECS).floor();
    (secs as u32).min(MAX_PLAY_SECS)
}
