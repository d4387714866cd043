use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::args::build_args;

/// What to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// 1-4
    pub episode: i32,
    /// 1-5
    pub difficulty: i32,
    /// Custom IWAD, passed to the engine as `-iwad`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wad_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            episode: 1,
            difficulty: 3,
            wad_path: None,
        }
    }
}

impl GameConfig {
    /// Arguments for this selection: [`build_args`] plus a trailing `-iwad` when set.
    pub fn launch_args(&self, scaling: Option<i32>) -> Vec<String> {
        let mut args = build_args(Some(self.episode), Some(self.difficulty), scaling);
        if let Some(wad) = &self.wad_path {
            args.push("-iwad".to_string());
            args.push(wad.to_string_lossy().into_owned());
        }
        args
    }
}

/// Consumer-side bookkeeping for a running engine. The host never writes to this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub is_initialized: bool,
    pub is_running: bool,
    /// Last rendered frame, encoded by whoever captured it.
    pub current_frame: String,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl GameState {
    pub fn record_error(&mut self, error: impl ToString) {
        self.is_running = false;
        self.last_error = Some(error.to_string());
    }
}
