//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Each test binary uses a different subset

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::io::Write;
use survivor_tracker::models::CardDescriptor;
use survivor_tracker::services::CardSurface;
use tempfile::TempDir;

/// Minimal RIFF/WEBP header.
pub const WEBP_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 \x00\x00\x00\x00";

/// Minimal PNG header.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

/// Name of the file the tracked set is stored in.
pub const TRACKED_FILE: &str = "ghostfaceTrackedSurvivors.json";

/// Card surface that records every call, for asserting on the render sequence.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Cards from the last `replace_cards`
    pub cards: Vec<CardDescriptor>,
    /// Visibility from the last `apply_visibility`
    pub visible: Vec<bool>,
    /// Last stats line
    pub stats: String,
    /// Number of `replace_cards` calls
    pub renders: usize,
}

impl RecordingSurface {
    /// Names of the currently visible cards.
    pub fn visible_names(&self) -> Vec<&str> {
        self.cards
            .iter()
            .zip(&self.visible)
            .filter(|(_, shown)| **shown)
            .map(|(card, _)| card.name.as_str())
            .collect()
    }
}

impl CardSurface for RecordingSurface {
    fn replace_cards(&mut self, cards: Vec<CardDescriptor>) {
        self.cards = cards;
        self.renders += 1;
    }

    fn apply_visibility(&mut self, visible: &[bool]) {
        self.visible = visible.to_vec();
    }

    fn set_stats(&mut self, stats: String) {
        self.stats = stats;
    }
}

/// Writes a portrait for `slug` under `<assets>/gallery/portraits/`.
pub fn write_portrait(assets: &Path, slug: &str, bytes: &[u8]) -> PathBuf {
    let dir = assets.join("gallery/portraits");
    fs::create_dir_all(&dir).expect("Failed to create portrait dir");
    let path = dir.join(format!("{slug}.webp"));
    fs::write(&path, bytes).expect("Failed to write portrait");
    path
}

/// Writes a custom catalog file and returns its path.
pub fn write_catalog(dir: &TempDir, names: &[&str]) -> PathBuf {
    let quoted: Vec<String> = names.iter().map(|n| format!("{n:?}")).collect();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, format!("names = [{}]\n", quoted.join(", ")))
        .expect("Failed to write catalog");
    path
}

/// Path to the survivor-tracker binary
pub fn tracker_bin() -> String {
    std::env::var("CARGO_BIN_EXE_survivor-tracker")
        .unwrap_or_else(|_| "target/debug/survivor-tracker".to_string())
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(tracker_bin());
    cmd.env("SURVIVOR_TRACKER_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs a command in an isolated config directory.
pub fn run(args: &[&str], config_dir: &Path) -> Output {
    isolated_command(args, config_dir)
        .output()
        .expect("Failed to execute command")
}

/// Runs a command with `input` on stdin.
pub fn run_with_input(args: &[&str], config_dir: &Path, input: &str) -> Output {
    let mut child = isolated_command(args, config_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for command")
}

/// Default tracked-state file for an isolated config directory.
pub fn tracked_file(config_dir: &Path) -> PathBuf {
    config_dir.join("storage").join(TRACKED_FILE)
}
