//! Sequencing input handling, resolution and playback.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::classify::{classify, MediaReference};
use crate::config::Config;
use crate::console::Console;
use crate::error::PlaybackError;
use crate::loop_spec::LoopSpec;
use crate::platform;
use crate::player::Player;
use crate::resolver::StreamResolver;
use crate::runner::ToolRunner;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player was started with this many tracks.
    Played { tracks: usize },
    /// Nothing could be resolved, the player was not started.
    NothingToPlay,
}

pub struct Jukebox {
    resolver: StreamResolver,
    player: Player,
    console: Arc<dyn Console>,
    qualifier: String,
}

impl Jukebox {
    /// Build with yt-dlp and mpv located from the config and environment.
    pub fn new(config: Config, runner: Arc<dyn ToolRunner>, console: Arc<dyn Console>) -> Self {
        let yt_dlp = platform::resolve_tool(
            platform::find_yt_dlp_binary(&config.tools.yt_dlp_lookup()),
            "yt-dlp",
        );
        let mpv = platform::resolve_tool(
            platform::find_mpv_binary(&config.tools.mpv_lookup()),
            "mpv",
        );
        info!("yt-dlp: {}, mpv: {}", yt_dlp.display(), mpv.display());
        Self::with_tools(config, runner, console, yt_dlp, mpv)
    }

    pub fn with_tools(
        config: Config,
        runner: Arc<dyn ToolRunner>,
        console: Arc<dyn Console>,
        yt_dlp: PathBuf,
        mpv: PathBuf,
    ) -> Self {
        Self {
            resolver: StreamResolver::new(runner.clone(), yt_dlp, config.extraction),
            player: Player::new(runner, mpv, config.playback.extra_args),
            console,
            qualifier: config.search.qualifier.trim().to_string(),
        }
    }

    /// Search text with the configured qualifier appended, unless it is
    /// already there.
    pub fn augment_query(&self, query: &str) -> String {
        let query = query.trim();
        if self.qualifier.is_empty()
            || query
                .to_lowercase()
                .ends_with(&self.qualifier.to_lowercase())
        {
            query.to_string()
        } else {
            format!("{} {}", query, self.qualifier)
        }
    }

    pub async fn run(&self, input: &str, loop_spec: LoopSpec) -> Result<Outcome, PlaybackError> {
        match classify(input) {
            MediaReference::Search { query } if query.is_empty() => {
                self.console.line("Nothing to play.");
                Ok(Outcome::NothingToPlay)
            }
            MediaReference::Search { query } => self.play_search(&query, loop_spec).await,
            MediaReference::Playlist { url, playlist_id } => {
                self.play_playlist(&url, playlist_id.as_deref(), loop_spec)
                    .await
            }
        }
    }

    async fn play_search(&self, query: &str, loop_spec: LoopSpec) -> Result<Outcome, PlaybackError> {
        let query = self.augment_query(query);
        self.console.line(&format!("Searching: {}", query));

        let url = match self.resolver.resolve_one(&query).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("{}", e);
                self.console
                    .line("Failed to fetch URL. Check yt-dlp installation and cookies.");
                None
            }
        };

        if url.is_some() {
            self.console.line(&format!("Playing: {}", query));
        }
        self.player
            .play_one(url.as_ref(), loop_spec, self.console.as_ref())
            .await?;

        Ok(match url {
            Some(_) => Outcome::Played { tracks: 1 },
            None => Outcome::NothingToPlay,
        })
    }

    async fn play_playlist(
        &self,
        url: &str,
        playlist_id: Option<&str>,
        loop_spec: LoopSpec,
    ) -> Result<Outcome, PlaybackError> {
        let console = self.console.as_ref();
        let urls = self
            .resolver
            .resolve_playlist(url, playlist_id, |event| console.line(&event.to_string()))
            .await;

        if urls.is_empty() {
            console.line("No videos found in playlist.");
            return Ok(Outcome::NothingToPlay);
        }

        self.player.play_many(&urls, loop_spec, console).await?;
        Ok(Outcome::Played { tracks: urls.len() })
    }
}
