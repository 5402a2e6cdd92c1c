use std::path::{Path, PathBuf};

use crate::error::{SkylapseError, SkylapseResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// printf-style name handed to ffmpeg's image-sequence reader. Must agree with the
/// zero padding of [`DaySchedule::frame_spec`] so lexical and numeric order coincide.
pub const FRAME_PATTERN: &str = "frame_%04d.png";

/// Fixed sampling interval across one 24-hour span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DaySchedule {
    interval_minutes: u32,
}

impl DaySchedule {
    pub fn new(interval_minutes: u32) -> SkylapseResult<Self> {
        if interval_minutes == 0 {
            return Err(SkylapseError::validation(
                "sample interval must be at least one minute",
            ));
        }
        if interval_minutes > MINUTES_PER_DAY {
            return Err(SkylapseError::validation(
                "sample interval must fit within one day",
            ));
        }
        Ok(Self { interval_minutes })
    }

    pub fn interval_minutes(self) -> u32 {
        self.interval_minutes
    }

    /// Number of samples across the day. Integer division, so intervals that do
    /// not divide 1440 evenly drop the remainder at the end of the day.
    pub fn total_steps(self) -> u32 {
        MINUTES_PER_DAY / self.interval_minutes
    }

    /// `HH:MM:00` wall-clock string for the sample at `index`.
    pub fn time_of_day(self, index: u32) -> String {
        let total_minutes = index * self.interval_minutes;
        let hour = total_minutes / 60;
        let minute = total_minutes % 60;
        format!("{hour:02}:{minute:02}:00")
    }

    pub fn frame_spec(self, index: u32, output_dir: &Path) -> FrameSpec {
        FrameSpec {
            index,
            time_of_day: self.time_of_day(index),
            frame_path: output_dir.join(frame_file_name(index, "pfm")),
            png_path: output_dir.join(frame_file_name(index, "png")),
        }
    }
}

/// One scheduled sample: when in the day it falls and where its files land.
///
/// `frame_path` is the renderer's raw `.pfm` output, removed once the converted
/// PNG exists; `png_path` is the frame the encoder consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSpec {
    pub index: u32,
    pub time_of_day: String,
    pub frame_path: PathBuf,
    pub png_path: PathBuf,
}

fn frame_file_name(index: u32, extension: &str) -> String {
    format!("frame_{index:04}.{extension}")
}
