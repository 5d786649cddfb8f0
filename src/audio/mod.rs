//! Audio output for the 1D editor.
//!
//! Plays tone buffers through a cpal output stream and writes them to WAV
//! files with hound.

pub mod playback;
pub mod wav;

pub use playback::TonePlayer;
pub use wav::write_wav;

use anyhow::anyhow;

#[cfg(target_os = "linux")]
use std::fs::OpenOptions;
#[cfg(target_os = "linux")]
use std::os::unix::io::AsRawFd;

/// Runs `f` with stderr redirected to /dev/null, hiding ALSA's device probing noise.
#[cfg(target_os = "linux")]
pub(crate) fn quiet_stderr<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    let dev_null = OpenOptions::new()
        .write(true)
        .open("/dev/null")
        .map_err(|e| anyhow!("Failed to open /dev/null: {e}"))?;

    let saved = unsafe { libc::dup(libc::STDERR_FILENO) };
    if saved == -1 {
        return Err(anyhow!("Failed to duplicate stderr"));
    }
    if unsafe { libc::dup2(dev_null.as_raw_fd(), libc::STDERR_FILENO) } == -1 {
        unsafe { libc::close(saved) };
        return Err(anyhow!("Failed to redirect stderr"));
    }

    let result = f();

    unsafe {
        libc::dup2(saved, libc::STDERR_FILENO);
        libc::close(saved);
    }
    result
}

/// No ALSA outside Linux, nothing to hide.
#[cfg(not(target_os = "linux"))]
pub(crate) fn quiet_stderr<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    f()
}
