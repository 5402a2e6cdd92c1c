use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    encode_ffmpeg::{EncodeInvocation, is_encoder_available},
    error::{SkylapseError, SkylapseResult},
    render_knight::{RenderInvocation, RenderSettings},
    schedule::DaySchedule,
};

/// Fixed settings for one timelapse run.
///
/// The defaults are the production constants; tests point the tool paths and
/// directories somewhere else.
#[derive(Clone, Debug)]
pub struct TimelapseConfig {
    pub renderer: PathBuf,
    pub encoder: PathBuf,
    pub output_dir: PathBuf,
    pub video_path: PathBuf,
    pub interval_minutes: u32,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub exposure: f64,
    pub azimuth_deg: f64,
    pub zenith_deg: f64,
    pub crf: u32,
}

impl Default for TimelapseConfig {
    fn default() -> Self {
        Self {
            renderer: PathBuf::from("./knight"),
            encoder: PathBuf::from("ffmpeg"),
            output_dir: PathBuf::from("timelapse_frames"),
            video_path: PathBuf::from("day_night_cycle.mp4"),
            interval_minutes: 5,
            fps: 24,
            width: 1280,
            height: 720,
            exposure: 1.0,
            azimuth_deg: 20.0,
            zenith_deg: 180.0,
            crf: 18,
        }
    }
}

impl TimelapseConfig {
    pub fn validate(&self) -> SkylapseResult<()> {
        DaySchedule::new(self.interval_minutes)?;
        if self.fps == 0 {
            return Err(SkylapseError::validation("fps must be non-zero"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SkylapseError::validation(
                "render width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(SkylapseError::validation(
                "render width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelapseStats {
    pub frames_rendered: u32,
    pub video_path: PathBuf,
}

/// Drive the full day/night timelapse: one `knight` render per scheduled
/// sample, then a single `ffmpeg` pass over the PNG sequence.
///
/// Sequence:
/// 1. validate the settings and probe the encoder, so a missing `ffmpeg` fails
///    before hours of rendering rather than after
/// 2. render loop: one blocking renderer invocation per sample, deleting each
///    `.pfm` intermediate once its converted PNG is on disk
/// 3. one encoder invocation over the numbered sequence
///
/// Any renderer failure aborts the whole run and nothing is encoded. An encoder
/// failure leaves every rendered PNG in place for inspection or a manual
/// re-encode. Nothing is retried.
#[tracing::instrument(skip(config))]
pub fn run_timelapse(config: &TimelapseConfig) -> SkylapseResult<TimelapseStats> {
    config.validate()?;

    if !is_encoder_available(&config.encoder) {
        return Err(SkylapseError::validation(format!(
            "'{}' is required to assemble the video, but was not found",
            config.encoder.display()
        )));
    }

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create frame directory '{}'",
            config.output_dir.display()
        )
    })?;

    let schedule = DaySchedule::new(config.interval_minutes)?;
    let total = schedule.total_steps();
    // One UTC date for the whole span; a run started near midnight does not roll over.
    let date = Utc::now().format("%Y-%m-%d").to_string();

    tracing::info!(
        %date,
        interval_minutes = config.interval_minutes,
        total,
        "starting timelapse render"
    );

    let settings = RenderSettings {
        width: config.width,
        height: config.height,
        exposure: config.exposure,
        azimuth_deg: config.azimuth_deg,
        zenith_deg: config.zenith_deg,
    };

    let progress = ProgressBar::new(u64::from(total));
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{pos}/{len}] rendering {msg} {wide_bar} {eta}")
            .expect("template is valid"),
    );

    for index in 0..total {
        let frame = schedule.frame_spec(index, &config.output_dir);
        progress.set_message(frame.time_of_day.clone());

        let invocation =
            RenderInvocation::new(&config.renderer, &date, settings.clone(), frame.clone());
        if let Err(err) = invocation.run() {
            progress.abandon();
            tracing::error!(index, "renderer failed, aborting run");
            return Err(err);
        }

        // knight leaves the raw .pfm next to the converted PNG; only the PNG
        // feeds the encoder.
        if frame.frame_path.exists() {
            std::fs::remove_file(&frame.frame_path).with_context(|| {
                format!(
                    "failed to remove intermediate '{}'",
                    frame.frame_path.display()
                )
            })?;
        }

        progress.inc(1);
    }
    progress.finish_and_clear();

    tracing::info!(video = %config.video_path.display(), "render loop complete, assembling video");

    let encode = EncodeInvocation::new(
        &config.encoder,
        &config.output_dir,
        config.fps,
        config.crf,
        &config.video_path,
    );
    if let Err(err) = encode.run() {
        tracing::error!("encoder failed, leaving rendered frames in place");
        return Err(err);
    }

    Ok(TimelapseStats {
        frames_rendered: total,
        video_path: config.video_path.clone(),
    })
}
