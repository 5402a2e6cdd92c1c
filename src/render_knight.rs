use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use crate::{
    error::{SkylapseError, SkylapseResult},
    schedule::FrameSpec,
};

/// Camera and exposure parameters held fixed across the whole run.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub exposure: f64,
    pub azimuth_deg: f64,
    pub zenith_deg: f64,
}

/// Argument list for one `knight` render, built as data before anything is spawned.
#[derive(Clone, Debug)]
pub struct RenderInvocation {
    program: PathBuf,
    date: String,
    settings: RenderSettings,
    frame: FrameSpec,
}

impl RenderInvocation {
    pub fn new(
        program: impl Into<PathBuf>,
        date: impl Into<String>,
        settings: RenderSettings,
        frame: FrameSpec,
    ) -> Self {
        Self {
            program: program.into(),
            date: date.into(),
            settings,
            frame,
        }
    }

    /// Renderer argv. `-c` makes knight write the converted PNG next to the
    /// `.pfm` output path it is given.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-d".to_string(),
            self.date.clone(),
            "-t".to_string(),
            self.frame.time_of_day.clone(),
            "-w".to_string(),
            self.settings.width.to_string(),
            "-h".to_string(),
            self.settings.height.to_string(),
            "-o".to_string(),
            self.frame.frame_path.display().to_string(),
            "-c".to_string(),
            "--exposure".to_string(),
            self.settings.exposure.to_string(),
            "-a".to_string(),
            self.settings.azimuth_deg.to_string(),
            "-z".to_string(),
            self.settings.zenith_deg.to_string(),
        ]
    }

    /// Spawn the renderer and block until it exits. Its stdout is discarded;
    /// stderr is captured and carried in the error on a non-zero exit.
    pub fn run(&self) -> SkylapseResult<()> {
        tracing::debug!(
            frame = self.frame.index,
            time = %self.frame.time_of_day,
            "spawning renderer"
        );

        let output = Command::new(&self.program)
            .args(self.args())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                SkylapseError::render(format!(
                    "failed to run renderer '{}': {e}",
                    self.program.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SkylapseError::render(format!(
                "frame {} ({}) failed with status {}: {}",
                self.frame.index,
                self.frame.time_of_day,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
