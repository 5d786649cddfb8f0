//! Interactive 2D spectrum painting.

use super::controls::{self, SigmaSlider, IDLE_POLL};
use crate::spectrum::readout::{crop_magnitude, normalize_gray, spatial_image};
use crate::spectrum::{Editor2D, PaintSession, RepeatingTask, Spectrum2D};
use crate::ui::{self, PaintScreen, PaintView, ScreenCommand};
use std::time::Instant;

/// Runs the 2D editor until the user quits.
///
/// Holding the left button on the spectrum deposits a Gaussian bump once per
/// tick with a growing amplitude; the image pane shows the inverse transform.
pub async fn handle_paint() -> Result<(), anyhow::Error> {
    tracing::info!("=== fourierpaint 2D editor started ===");

    let config = controls::load_config()?;
    let editor = Editor2D::new(config.grid.geometry());
    let geometry = *editor.geometry();
    let mut spectrum = Spectrum2D::new(geometry.full_n);
    let mut session: PaintSession<(f64, f64)> =
        PaintSession::with_step(config.painting.amplitude_step);
    let mut ticker = RepeatingTask::new(config.painting.tick_interval());
    tracing::info!(
        "Grid: {}x{} bins, view {}px, crop {} bins, tick {:?}",
        geometry.full_n,
        geometry.full_n,
        geometry.image_n(),
        geometry.crop_n(),
        ticker.interval()
    );
    let mut slider = SigmaSlider::new(config.painting.sigma_slider, config.painting.sigma_slider_max);
    let image_n = geometry.image_n();

    let mut screen = PaintScreen::new().map_err(|e| anyhow::anyhow!("Failed to initialize UI: {e}"))?;
    let mut dirty = true;

    loop {
        if dirty {
            let crop = normalize_gray(&crop_magnitude(&spectrum, &geometry));
            let image = normalize_gray(&spatial_image(&spectrum, &geometry));
            screen
                .render(&PaintView {
                    crop: &crop,
                    image: &image,
                    image_n,
                    sigma: slider.sigma(config.grid.sigma_scale),
                    slider: slider.value(),
                    slider_max: slider.max(),
                    painting: session.is_painting(),
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
                if let Some(pixel) = screen.edit_pixel(column, row, image_n) {
                    tracing::debug!("Painting at view pixel ({:.1}, {:.1})", pixel.0, pixel.1);
                    session.press(pixel);
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
                tracing::debug!("Clearing 2D spectrum");
                editor.clear(&mut spectrum);
                dirty = true;
            }
            ScreenCommand::Redraw => dirty = true,
            ScreenCommand::Quit => break,
            ScreenCommand::Play | ScreenCommand::Continue => {}
        }

        if ticker.due(Instant::now()) {
            if let Some(stroke) = session.tick() {
                let (x, y) = stroke.anchor;
                editor.add_bump(
                    &mut spectrum,
                    x,
                    y,
                    stroke.amplitude,
                    slider.sigma(config.grid.sigma_scale),
                );
                dirty = true;
            }
        }
    }

    screen
        .cleanup()
        .map_err(|e| anyhow::anyhow!("Failed to restore terminal: {e}"))?;
    tracing::info!("2D editor closed");
    Ok(())
}
