#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use assert_cmd::Command;

const KNIGHT_OK: &str = r#"#!/bin/sh
out=""
while [ $# -gt 0 ]; do
    case "$1" in
    -o) out="$2"; shift 2 ;;
    *) shift ;;
    esac
done
: > "$out"
printf 'png' > "${out%.pfm}.png"
exit 0
"#;

const KNIGHT_LENS_CAP: &str = r#"#!/bin/sh
echo "lens cap on" >&2
exit 1
"#;

const FFMPEG_OK: &str = r#"#!/bin/sh
[ "$1" = "-version" ] && exit 0
for last; do :; done
: > "$last"
exit 0
"#;

fn write_fake_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// PATH with the fake-tool directory up front, so the binary resolves `ffmpeg`
// to our script.
fn path_with(dir: &Path) -> std::ffi::OsString {
    let mut entries = vec![dir.to_path_buf()];
    if let Some(existing) = std::env::var_os("PATH") {
        entries.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(entries).unwrap()
}

#[test]
fn default_run_writes_video_and_prints_cleanup_hint() {
    let tmp = tempfile::tempdir().unwrap();
    let bin_dir = tmp.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    write_fake_tool(tmp.path(), "knight", KNIGHT_OK);
    write_fake_tool(&bin_dir, "ffmpeg", FFMPEG_OK);

    let output = Command::cargo_bin("skylapse")
        .unwrap()
        .current_dir(tmp.path())
        .env("PATH", path_with(&bin_dir))
        .output()
        .unwrap();

    assert!(output.status.success(), "exit: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("day_night_cycle.mp4"), "stdout: {stdout}");
    assert!(
        stdout.contains("rm -rf timelapse_frames"),
        "stdout: {stdout}"
    );

    assert!(tmp.path().join("day_night_cycle.mp4").exists());
    let frames = tmp.path().join("timelapse_frames");
    assert!(frames.join("frame_0000.png").exists());
    assert!(frames.join("frame_0287.png").exists());
    assert!(!frames.join("frame_0287.pfm").exists());
}

#[test]
fn failing_renderer_exits_nonzero_and_names_the_frame() {
    let tmp = tempfile::tempdir().unwrap();
    let bin_dir = tmp.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    write_fake_tool(tmp.path(), "knight", KNIGHT_LENS_CAP);
    write_fake_tool(&bin_dir, "ffmpeg", FFMPEG_OK);

    let output = Command::cargo_bin("skylapse")
        .unwrap()
        .current_dir(tmp.path())
        .env("PATH", path_with(&bin_dir))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("frame 0"), "stderr: {stderr}");
    assert!(stderr.contains("lens cap on"), "stderr: {stderr}");
    assert!(!tmp.path().join("day_night_cycle.mp4").exists());
}
