use skylapse::{TimelapseConfig, run_timelapse};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr alongside the progress bar; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = TimelapseConfig::default();
    let stats = run_timelapse(&config)?;

    println!(
        "Success! {} frames, video saved as {}",
        stats.frames_rendered,
        stats.video_path.display()
    );
    println!(
        "To clean up frames, run: rm -rf {}",
        config.output_dir.display()
    );
    Ok(())
}
