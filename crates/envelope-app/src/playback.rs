//! Headless playback channel.
//!
//! Resolves the configured source list the way a media element does: try
//! each candidate in priority order and play the first that loads. Here
//! "loads" means the URL answers a one-byte range request successfully.
//! No samples are decoded; position and volume are tracked so the fade
//! behaves the same as with a real device.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use envelope_common::PlaybackError;
use envelope_config::schema::AudioConfig;
use envelope_core::{AudioChannel, PlaybackStart};
use futures_util::future::FutureExt;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct ChannelState {
    volume: f64,
    playing: bool,
    loaded: Option<String>,
    /// Bumped by every start and pause; a pending start whose generation is
    /// stale has been interrupted.
    generation: u64,
    started_at: Option<Instant>,
    offset: Duration,
}

impl ChannelState {
    fn position(&self) -> Duration {
        self.offset + self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }
}

pub struct ProbingChannel {
    sources: Vec<String>,
    looping: bool,
    http: reqwest::Client,
    state: Arc<Mutex<ChannelState>>,
}

impl ProbingChannel {
    pub fn new(config: &AudioConfig) -> Result<Self, PlaybackError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.probe_timeout())
            .timeout(config.probe_timeout())
            .build()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        Ok(Self {
            sources: config.sources.clone(),
            looping: config.looping,
            http,
            state: Arc::new(Mutex::new(ChannelState {
                volume: config.start_volume,
                ..ChannelState::default()
            })),
        })
    }

    /// The source currently loaded, if any start has succeeded.
    pub fn loaded_source(&self) -> Option<String> {
        lock(&self.state).loaded.clone()
    }

    pub fn position(&self) -> Duration {
        lock(&self.state).position()
    }

    /// Whether the track restarts when it ends.
    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl AudioChannel for ProbingChannel {
    fn volume(&self) -> f64 {
        lock(&self.state).volume
    }

    fn set_volume(&mut self, volume: f64) {
        lock(&self.state).volume = volume.clamp(0.0, 1.0);
    }

    fn start(&mut self) -> PlaybackStart {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.generation
        };
        let sources = self.sources.clone();
        let http = self.http.clone();
        let state = Arc::clone(&self.state);

        async move {
            for url in &sources {
                if lock(&state).generation != generation {
                    return Err(PlaybackError::Interrupted);
                }
                match probe(&http, url).await {
                    Ok(()) => {
                        let mut state = lock(&state);
                        if state.generation != generation {
                            return Err(PlaybackError::Interrupted);
                        }
                        // Restarting while already playing keeps the time played so far.
                        if let Some(started) = state.started_at.take() {
                            state.offset += started.elapsed();
                        }
                        if state.loaded.as_deref() != Some(url.as_str()) {
                            state.offset = Duration::ZERO;
                        }
                        state.loaded = Some(url.clone());
                        state.playing = true;
                        state.started_at = Some(Instant::now());
                        info!(source = %url, "playing");
                        return Ok(());
                    }
                    Err(reason) => debug!(source = %url, "source unavailable: {reason}"),
                }
            }

            if lock(&state).generation != generation {
                Err(PlaybackError::Interrupted)
            } else {
                Err(PlaybackError::NoSource(sources.len()))
            }
        }
        .boxed()
    }

    fn pause(&mut self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        if let Some(started) = state.started_at.take() {
            state.offset += started.elapsed();
        }
        state.playing = false;
    }

    fn rewind(&mut self) {
        let mut state = lock(&self.state);
        if state.loaded.is_some() {
            state.offset = Duration::ZERO;
            if state.started_at.is_some() {
                state.started_at = Some(Instant::now());
            }
        }
    }

    fn is_playing(&self) -> bool {
        lock(&self.state).playing
    }
}

async fn probe(http: &reqwest::Client, url: &str) -> Result<(), String> {
    let response = http
        .get(url)
        .header(reqwest::header::RANGE, "bytes=0-0")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {status}"))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config_with(sources: Vec<String>) -> AudioConfig {
        AudioConfig {
            sources,
            probe_timeout_secs: 2,
            ..AudioConfig::default()
        }
    }

    /// Serves `status_line` to every connection.
    async fn serve(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-length: 1\r\nconnection: close\r\n\r\nx"
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}/music.mp3")
    }

    async fn dead_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/music.mp3")
    }

    #[tokio::test]
    async fn empty_source_list_has_no_source() {
        let mut channel = ProbingChannel::new(&config_with(Vec::new())).unwrap();
        let result = channel.start().await;
        assert_eq!(result, Err(PlaybackError::NoSource(0)));
        assert!(!channel.is_playing());
    }

    #[tokio::test]
    async fn pause_before_resolution_interrupts() {
        let mut channel = ProbingChannel::new(&config_with(Vec::new())).unwrap();
        let pending = channel.start();
        channel.pause();
        assert_eq!(pending.await, Err(PlaybackError::Interrupted));
    }

    #[tokio::test]
    async fn falls_through_to_first_working_source() {
        let dead = dead_url().await;
        let missing = serve("404 Not Found").await;
        let good = serve("206 Partial Content").await;
        let mut channel =
            ProbingChannel::new(&config_with(vec![dead, missing, good.clone()])).unwrap();

        channel.start().await.unwrap();
        assert!(channel.is_playing());
        assert_eq!(channel.loaded_source(), Some(good));
    }

    #[tokio::test]
    async fn pause_and_rewind_reset_position() {
        let good = serve("200 OK").await;
        let mut channel = ProbingChannel::new(&config_with(vec![good])).unwrap();
        channel.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        channel.pause();
        assert!(!channel.is_playing());
        assert!(channel.position() >= Duration::from_millis(20));

        channel.rewind();
        assert_eq!(channel.position(), Duration::ZERO);
    }

    #[tokio::test]
    async fn restart_while_playing_keeps_position() {
        let good = serve("200 OK").await;
        let mut channel = ProbingChannel::new(&config_with(vec![good])).unwrap();
        channel.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        let before = channel.position();
        channel.start().await.unwrap();
        assert!(channel.is_playing());
        assert!(
            channel.position() >= before,
            "position went back from {before:?} to {:?}",
            channel.position()
        );
    }

    #[tokio::test]
    async fn looping_follows_config() {
        let channel = ProbingChannel::new(&config_with(Vec::new())).unwrap();
        assert!(channel.is_looping());

        let config = AudioConfig {
            looping: false,
            ..config_with(Vec::new())
        };
        assert!(!ProbingChannel::new(&config).unwrap().is_looping());
    }

    #[tokio::test]
    async fn volume_is_clamped() {
        let mut channel = ProbingChannel::new(&config_with(Vec::new())).unwrap();
        assert_eq!(channel.volume(), 1.0);
        channel.set_volume(1.7);
        assert_eq!(channel.volume(), 1.0);
        channel.set_volume(-0.2);
        assert_eq!(channel.volume(), 0.0);
    }
}
