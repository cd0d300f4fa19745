//! Turning searches and playlists into playable stream URLs with yt-dlp.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::error::ResolveError;
use crate::failure::{FailureClassifier, FailureReason, KeywordClassifier};
use crate::runner::ToolRunner;

/// Direct, short-lived media URL as printed by `yt-dlp --get-url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamUrl(String);

impl StreamUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Progress of a playlist resolution. `Display` gives the console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveEvent {
    Listing { target: String },
    Listed { total: usize },
    ListingFailed,
    Resolved { index: usize, total: usize, id: String },
    Skipped { index: usize, total: usize, id: String, reason: FailureReason },
    Finished { resolved: usize, total: usize },
}

impl fmt::Display for ResolveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listing { target } => write!(f, "Fetching playlist entries from {}...", target),
            Self::Listed { total } => write!(f, "Found {} videos in playlist.", total),
            Self::ListingFailed => write!(
                f,
                "Failed to list playlist. Check yt-dlp installation and cookies."
            ),
            Self::Resolved { index, total, id } => write!(f, "✓ [{}/{}] {}", index, total, id),
            Self::Skipped {
                index,
                total,
                id,
                reason,
            } => write!(f, "✗ [{}/{}] {}: {}", index, total, id, reason),
            Self::Finished { resolved, total } => {
                write!(f, "Resolved {}/{} videos.", resolved, total)
            }
        }
    }
}

pub struct StreamResolver {
    runner: Arc<dyn ToolRunner>,
    yt_dlp: PathBuf,
    config: ExtractionConfig,
    classifier: Box<dyn FailureClassifier>,
}

impl StreamResolver {
    pub fn new(runner: Arc<dyn ToolRunner>, yt_dlp: PathBuf, config: ExtractionConfig) -> Self {
        Self {
            runner,
            yt_dlp,
            config,
            classifier: Box::new(KeywordClassifier::default()),
        }
    }

    pub fn with_classifier(mut self, classifier: impl FailureClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    fn cookie_args(&self) -> Vec<String> {
        match &self.config.cookies_file {
            Some(path) if !path.as_os_str().is_empty() => {
                vec!["--cookies".to_string(), path.display().to_string()]
            }
            _ => Vec::new(),
        }
    }

    /// Arguments asking for the best-audio stream URL of `target`.
    fn stream_url_args(&self, target: String) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.config.audio_format.clone(),
            "--no-playlist".to_string(),
            "--get-url".to_string(),
        ];
        args.extend(self.cookie_args());
        args.push("--".to_string());
        args.push(target);
        args
    }

    fn list_args(&self, target: &str) -> Vec<String> {
        let mut args = vec![
            "--flat-playlist".to_string(),
            "--print".to_string(),
            "id".to_string(),
        ];
        args.extend(self.cookie_args());
        args.push("--".to_string());
        args.push(target.to_string());
        args
    }

    /// Canonical playlist URL when an id is known, the input otherwise.
    pub fn playlist_target(&self, url: &str, playlist_id: Option<&str>) -> String {
        match playlist_id {
            Some(id) => format!("{}{}", self.config.playlist_base_url, id),
            None => url.to_string(),
        }
    }

    /// Stream URL of the first search result for `query`.
    pub async fn resolve_one(&self, query: &str) -> Result<StreamUrl, ResolveError> {
        let args = self.stream_url_args(format!("ytsearch1:{}", query));
        let out = self.runner.capture(&self.yt_dlp, &args).await?;

        let not_found = || ResolveError::NotFound {
            query: query.to_string(),
            stderr: out.stderr.clone(),
        };
        if !out.success {
            return Err(not_found());
        }
        let url = out.lines().next().map(StreamUrl::new).ok_or_else(not_found)?;
        info!("resolved '{}'", query);
        Ok(url)
    }

    /// Ids of a playlist's entries, in playlist order.
    pub async fn list_entries(&self, target: &str) -> Result<Vec<String>, ResolveError> {
        let out = self.runner.capture(&self.yt_dlp, &self.list_args(target)).await?;
        if !out.success {
            return Err(ResolveError::Listing {
                target: target.to_string(),
                reason: self.classifier.classify(&out.stderr),
                stderr: out.stderr,
            });
        }
        Ok(out.lines().map(str::to_string).collect())
    }

    async fn resolve_entry(&self, id: &str) -> Result<StreamUrl, FailureReason> {
        let target = format!("{}{}", self.config.watch_base_url, id);
        match self.runner.capture(&self.yt_dlp, &self.stream_url_args(target)).await {
            Ok(out) if out.success => match out.lines().next() {
                Some(url) => Ok(StreamUrl::new(url)),
                None => Err(FailureReason::ExtractionFailed),
            },
            Ok(out) => Err(self.classifier.classify(&out.stderr)),
            Err(e) => {
                warn!("entry {}: {}", id, e);
                Err(FailureReason::ExtractionFailed)
            }
        }
    }

    /// Resolve every entry of a playlist, one after the other.
    ///
    /// A failed entry is reported through `on_event` and skipped; the result
    /// keeps the playlist order of the entries that worked. A failed listing
    /// yields an empty result.
    pub async fn resolve_playlist(
        &self,
        url: &str,
        playlist_id: Option<&str>,
        mut on_event: impl FnMut(ResolveEvent),
    ) -> Vec<StreamUrl> {
        let target = self.playlist_target(url, playlist_id);
        on_event(ResolveEvent::Listing {
            target: target.clone(),
        });

        let ids = match self.list_entries(&target).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("{}", e);
                on_event(ResolveEvent::ListingFailed);
                return Vec::new();
            }
        };

        let total = ids.len();
        on_event(ResolveEvent::Listed { total });

        let mut urls = Vec::with_capacity(total);
        for (i, id) in ids.into_iter().enumerate() {
            let index = i + 1;
            match self.resolve_entry(&id).await {
                Ok(stream) => {
                    debug!("entry {} resolved", id);
                    urls.push(stream);
                    on_event(ResolveEvent::Resolved { index, total, id });
                }
                Err(reason) => {
                    on_event(ResolveEvent::Skipped {
                        index,
                        total,
                        id,
                        reason,
                    });
                }
            }
        }

        on_event(ResolveEvent::Finished {
            resolved: urls.len(),
            total,
        });
        urls
    }
}
