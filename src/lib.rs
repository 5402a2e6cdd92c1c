#![forbid(unsafe_code)]

pub mod encode_ffmpeg;
pub mod error;
pub mod pipeline;
pub mod render_knight;
pub mod schedule;

pub use encode_ffmpeg::{EncodeInvocation, is_encoder_available};
pub use error::{SkylapseError, SkylapseResult};
pub use pipeline::{TimelapseConfig, TimelapseStats, run_timelapse};
pub use render_knight::{RenderInvocation, RenderSettings};
pub use schedule::{DaySchedule, FRAME_PATTERN, FrameSpec};
