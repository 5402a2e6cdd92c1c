use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    error::{SkylapseError, SkylapseResult},
    schedule::FRAME_PATTERN,
};

/// Argument list for the single `ffmpeg` pass that stitches the numbered PNG
/// sequence into an MP4. Built as data before anything is spawned.
#[derive(Clone, Debug)]
pub struct EncodeInvocation {
    program: PathBuf,
    pattern: PathBuf,
    framerate: u32,
    crf: u32,
    out_path: PathBuf,
}

impl EncodeInvocation {
    pub fn new(
        program: impl Into<PathBuf>,
        frames_dir: &Path,
        framerate: u32,
        crf: u32,
        out_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            pattern: frames_dir.join(FRAME_PATTERN),
            framerate,
            crf,
            out_path: out_path.into(),
        }
    }

    /// Encoder argv: overwrite the output, read the sequence at the configured
    /// input rate, encode libx264/yuv420p for broadly playable MP4 output.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-framerate".to_string(),
            self.framerate.to_string(),
            "-i".to_string(),
            self.pattern.display().to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            self.out_path.display().to_string(),
        ]
    }

    /// Spawn the encoder and block until it exits, capturing both output
    /// streams. A non-zero exit carries the captured stderr in the error.
    pub fn run(&self) -> SkylapseResult<()> {
        tracing::debug!(out = %self.out_path.display(), "spawning encoder");

        let output = Command::new(&self.program)
            .args(self.args())
            .output()
            .map_err(|e| {
                SkylapseError::encode(format!(
                    "failed to run encoder '{}': {e}",
                    self.program.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SkylapseError::encode(format!(
                "'{}' exited with status {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Probe `program -version` the way a shell would, swallowing its output.
pub fn is_encoder_available(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
