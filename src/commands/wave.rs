//! Interactive 1D spectrum painting with playback.

use super::controls::{self, SigmaSlider, IDLE_POLL};
use crate::audio::TonePlayer;
use crate::spectrum::readout::{spectrum_strip, temporal_strip, tone_buffer};
use crate::spectrum::{Editor1D, PaintSession, RepeatingTask, Spectrum1D};
use crate::ui::{self, ScreenCommand, WaveScreen, WaveView};
use std::time::Instant;

/// Runs the 1D editor until the user quits.
///
/// `p` plays the current waveform on the configured output device. Playback
/// failures are logged and leave the editor running.
pub async fn handle_wave() -> Result<(), anyhow::Error> {
    tracing::info!("=== fourierpaint 1D editor started ===");

    let config = controls::load_config()?;
    let editor = Editor1D::new(config.wave.geometry());
    let strip = *editor.geometry();
    tracing::info!(
        "Wave: {} bins, strip {}px, output device={}",
        strip.n,
        strip.image_n,
        config.audio.device
    );

    let mut spectrum = Spectrum1D::new(strip.n);
    let mut session: PaintSession<f64> = PaintSession::with_step(config.painting.amplitude_step);
    let mut ticker = RepeatingTask::new(config.painting.tick_interval());
    let mut slider = SigmaSlider::new(config.painting.sigma_slider, config.painting.sigma_slider_max);
    let mut player = TonePlayer::new(config.audio.device.clone());

    let mut screen = WaveScreen::new().map_err(|e| anyhow::anyhow!("Failed to initialize UI: {e}"))?;
    let mut dirty = true;
    let mut was_playing = false;

    loop {
        let playing = player.is_playing();
        if playing != was_playing {
            was_playing = playing;
            dirty = true;
        }

        if dirty {
            let spectrum_values = spectrum_strip(&spectrum, &strip);
            let waveform = temporal_strip(&spectrum, &strip);
            screen
                .render(&WaveView {
                    spectrum: &spectrum_values,
                    waveform: &waveform,
                    sigma: slider.sigma(config.wave.sigma_scale),
                    slider: slider.value(),
                    slider_max: slider.max(),
                    painting: session.is_painting(),
                    playing,
                })
                .map_err(|e| anyhow::anyhow!("Render failed: {e}"))?;
            dirty = false;
        }

        let timeout = ticker.until_due(Instant::now(), IDLE_POLL);
        let command = ui::read_command(timeout).map_err(|e| {
            tracing::error!("Input handling error: {}", e);
            anyhow::anyhow!("Input handling error: {e}")
        })?;

        match command {
            ScreenCommand::Press { column, row } => {
                if let Some(px) = screen.strip_pixel(column, row, strip.image_n) {
                    tracing::debug!("Painting at strip pixel {:.1}", px);
                    session.press(px);
                    ticker.start(Instant::now());
                    dirty = true;
                }
            }
            ScreenCommand::Release => {
                if ticker.is_running() {
                    ticker.cancel();
                }
                if session.is_painting() {
                    session.release();
                    dirty = true;
                }
            }
            ScreenCommand::SigmaUp => dirty |= slider.raise(),
            ScreenCommand::SigmaDown => dirty |= slider.lower(),
            ScreenCommand::Clear => {
                tracing::debug!("Clearing 1D spectrum");
                player.stop();
                editor.clear(&mut spectrum);
                dirty = true;
            }
            ScreenCommand::Play => {
                let samples = tone_buffer(&spectrum, config.audio.repetitions, config.audio.gain);
                if let Err(e) = player.play(samples) {
                    tracing::warn!("Playback failed: {e:#}");
                }
            }
            ScreenCommand::Redraw => dirty = true,
            ScreenCommand::Quit => break,
            ScreenCommand::Continue => {}
        }

        if ticker.due(Instant::now()) {
            if let Some(stroke) = session.tick() {
                editor.add_bump(
                    &mut spectrum,
                    stroke.anchor,
                    stroke.amplitude,
                    slider.sigma(config.wave.sigma_scale),
                );
                dirty = true;
            }
        }
    }

    player.stop();
    screen
        .cleanup()
        .map_err(|e| anyhow::anyhow!("Failed to restore terminal: {e}"))?;
    tracing::info!("1D editor closed");
    Ok(())
}
