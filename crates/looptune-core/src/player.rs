//! Handing stream URLs to mpv.
//!
//! mpv owns the terminal while it runs, so next/previous/pause and the rest
//! of the controls are its own key bindings.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::console::Console;
use crate::error::PlaybackError;
use crate::loop_spec::LoopSpec;
use crate::resolver::StreamUrl;
use crate::runner::ToolRunner;

const CONTROLS: &[&str] = &[
    "  >  / ENTER   next track",
    "  <            previous track",
    "  SPACE        pause / resume",
    "  LEFT / RIGHT seek -/+ 5 seconds",
    "  UP / DOWN    seek +/- 1 minute",
    "  9 / 0        volume down / up",
    "  q            quit",
];

pub struct Player {
    runner: Arc<dyn ToolRunner>,
    mpv: PathBuf,
    extra_args: Vec<String>,
}

impl Player {
    pub fn new(runner: Arc<dyn ToolRunner>, mpv: PathBuf, extra_args: Vec<String>) -> Self {
        Self {
            runner,
            mpv,
            extra_args,
        }
    }

    fn base_args(&self, loop_arg: Option<String>) -> Vec<String> {
        let mut args = vec!["--no-video".to_string()];
        args.extend(loop_arg);
        args.extend(self.extra_args.iter().cloned());
        args
    }

    pub fn single_args(&self, url: &StreamUrl, loop_spec: LoopSpec) -> Vec<String> {
        let mut args = self.base_args(loop_spec.track_arg());
        args.push(url.as_str().to_string());
        args
    }

    pub fn queue_args(&self, urls: &[StreamUrl], loop_spec: LoopSpec) -> Vec<String> {
        let mut args = self.base_args(loop_spec.playlist_arg());
        args.extend(urls.iter().map(|u| u.as_str().to_string()));
        args
    }

    async fn run(&self, args: Vec<String>) -> Result<(), PlaybackError> {
        let code = self.runner.interactive(&self.mpv, &args).await?;
        match code {
            Some(0) => info!("mpv finished"),
            other => warn!("mpv exited with {:?}", other),
        }
        Ok(())
    }

    /// Play one stream. Without a URL nothing is spawned.
    pub async fn play_one(
        &self,
        url: Option<&StreamUrl>,
        loop_spec: LoopSpec,
        console: &dyn Console,
    ) -> Result<(), PlaybackError> {
        let Some(url) = url else {
            console.line("No URL to play.");
            return Ok(());
        };
        info!("playing single stream, loop {}", loop_spec);
        self.run(self.single_args(url, loop_spec)).await
    }

    /// Play all streams as one mpv queue, in the given order.
    pub async fn play_many(
        &self,
        urls: &[StreamUrl],
        loop_spec: LoopSpec,
        console: &dyn Console,
    ) -> Result<(), PlaybackError> {
        if urls.is_empty() {
            console.line("No URL to play.");
            return Ok(());
        }

        console.line(&format!("Playing {} tracks. Player controls:", urls.len()));
        for line in CONTROLS {
            console.line(line);
        }

        info!("playing queue of {}, loop {}", urls.len(), loop_spec);
        self.run(self.queue_args(urls, loop_spec)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::recording::RecordingConsole;
    use crate::runner::fake::ScriptedRunner;
    use std::num::NonZeroU32;

    fn player(runner: Arc<ScriptedRunner>) -> Player {
        Player::new(runner, PathBuf::from("mpv"), Vec::new())
    }

    #[tokio::test]
    async fn test_play_one_without_url_never_spawns() {
        let runner = Arc::new(ScriptedRunner::default());
        let console = RecordingConsole::default();
        for spec in [LoopSpec::Infinite, LoopSpec::Once] {
            player(runner.clone()).play_one(None, spec, &console).await.unwrap();
        }
        assert!(runner.interactive_calls().is_empty());
        assert_eq!(console.lines(), vec!["No URL to play.", "No URL to play."]);
    }

    #[tokio::test]
    async fn test_play_one_with_repeat_count() {
        let runner = Arc::new(ScriptedRunner::default());
        let url = StreamUrl::new("https://cdn.test/a");
        let three = LoopSpec::Times(NonZeroU32::new(3).unwrap());

        player(runner.clone())
            .play_one(Some(&url), three, &RecordingConsole::default())
            .await
            .unwrap();

        let calls = runner.interactive_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "mpv");
        assert_eq!(calls[0].1, vec!["--no-video", "--loop=3", "https://cdn.test/a"]);
    }

    #[test]
    fn test_single_args_infinite_and_once() {
        let p = player(Arc::new(ScriptedRunner::default()));
        let url = StreamUrl::new("u");
        assert_eq!(p.single_args(&url, LoopSpec::Infinite), vec!["--no-video", "--loop", "u"]);
        assert_eq!(p.single_args(&url, LoopSpec::Once), vec!["--no-video", "u"]);
    }

    #[test]
    fn test_extra_args_come_before_urls() {
        let p = Player::new(
            Arc::new(ScriptedRunner::default()),
            PathBuf::from("mpv"),
            vec!["--volume=40".to_string()],
        );
        let urls = [StreamUrl::new("a"), StreamUrl::new("b")];
        assert_eq!(
            p.queue_args(&urls, LoopSpec::Once),
            vec!["--no-video", "--volume=40", "a", "b"]
        );
    }

    #[tokio::test]
    async fn test_play_many_prints_controls_and_keeps_order() {
        let runner = Arc::new(ScriptedRunner::default());
        let console = RecordingConsole::default();
        let urls = [StreamUrl::new("c"), StreamUrl::new("a"), StreamUrl::new("b")];

        player(runner.clone())
            .play_many(&urls, LoopSpec::Infinite, &console)
            .await
            .unwrap();

        let lines = console.lines();
        assert_eq!(lines[0], "Playing 3 tracks. Player controls:");
        assert_eq!(lines.len(), 1 + CONTROLS.len());

        let calls = runner.interactive_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1,
            vec!["--no-video", "--loop-playlist=inf", "c", "a", "b"]
        );
    }

    #[tokio::test]
    async fn test_play_many_empty_never_spawns() {
        let runner = Arc::new(ScriptedRunner::default());
        player(runner.clone())
            .play_many(&[], LoopSpec::Once, &RecordingConsole::default())
            .await
            .unwrap();
        assert!(runner.interactive_calls().is_empty());
    }
}
