use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use looptune_core::{Config, Console, Jukebox, ToolError, ToolOutput, ToolRunner};

/// Stands in for yt-dlp and mpv. Captured runs are answered by their last
/// argument; interactive runs are recorded and succeed.
#[derive(Default)]
pub struct FakeTools {
    responses: Mutex<HashMap<String, ToolOutput>>,
    captured: Mutex<Vec<Vec<String>>>,
    played: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeTools {
    pub fn ok(&self, last_arg: &str, stdout: &str) {
        self.responses.lock().unwrap().insert(
            last_arg.to_string(),
            ToolOutput {
                success: true,
                code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    pub fn fail(&self, last_arg: &str, stderr: &str) {
        self.responses.lock().unwrap().insert(
            last_arg.to_string(),
            ToolOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    pub fn captured(&self) -> Vec<Vec<String>> {
        self.captured.lock().unwrap().clone()
    }

    pub fn played(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolRunner for FakeTools {
    async fn capture(&self, _program: &Path, args: &[String]) -> Result<ToolOutput, ToolError> {
        self.captured.lock().unwrap().push(args.to_vec());
        let key = args.last().cloned().unwrap_or_default();
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or(ToolOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: "ERROR: Unsupported URL".to_string(),
            }))
    }

    async fn interactive(&self, program: &Path, args: &[String]) -> Result<Option<i32>, ToolError> {
        self.played
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        Ok(Some(0))
    }
}

#[derive(Default)]
pub struct Transcript {
    lines: Mutex<Vec<String>>,
}

impl Transcript {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Console for Transcript {
    fn line(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

pub fn jukebox(tools: &Arc<FakeTools>, transcript: &Arc<Transcript>) -> Jukebox {
    Jukebox::with_tools(
        Config::default(),
        tools.clone(),
        transcript.clone(),
        PathBuf::from("/usr/bin/yt-dlp"),
        PathBuf::from("/usr/bin/mpv"),
    )
}
