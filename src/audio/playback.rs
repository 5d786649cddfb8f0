//! Tone playback through the system audio output.

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::{Arc, Mutex};

/// Samples queued for the output callback and how far it has got.
#[derive(Debug, Default)]
struct PlaybackCursor {
    samples: Vec<f32>,
    position: usize,
}

impl PlaybackCursor {
    fn is_finished(&self) -> bool {
        self.position >= self.samples.len()
    }
}

/// Plays mono `f32` buffers on an output device.
///
/// The stream is opened on the first [`play`](Self::play) and kept open;
/// once a buffer runs out the callback writes silence.
pub struct TonePlayer {
    /// Device name, index, or "default"
    device_name: String,
    /// Active output stream (kept alive while the player lives)
    stream: Option<cpal::Stream>,
    /// Output rate of the opened device
    sample_rate: Option<u32>,
    cursor: Arc<Mutex<PlaybackCursor>>,
}

impl TonePlayer {
    pub fn new(device_name: String) -> Self {
        Self {
            device_name,
            stream: None,
            sample_rate: None,
            cursor: Arc::new(Mutex::new(PlaybackCursor::default())),
        }
    }

    /// Starts playing `samples` from the beginning, replacing anything still playing.
    ///
    /// The buffer plays at the device's own rate.
    ///
    /// # Errors
    /// - If the output device cannot be found or opened
    pub fn play(&mut self, samples: Vec<f32>) -> Result<()> {
        if self.stream.is_none() {
            self.open()?;
        }

        let count = samples.len();
        {
            let mut cursor = self
                .cursor
                .lock()
                .map_err(|_| anyhow!("Playback state poisoned"))?;
            cursor.samples = samples;
            cursor.position = 0;
        }

        tracing::info!(
            "Playing {} samples ({:.2}s at {}Hz)",
            count,
            count as f32 / self.sample_rate.unwrap_or(1) as f32,
            self.sample_rate.unwrap_or_default()
        );
        Ok(())
    }

    /// True while queued samples remain.
    pub fn is_playing(&self) -> bool {
        self.cursor
            .lock()
            .map(|cursor| !cursor.is_finished())
            .unwrap_or(false)
    }

    /// Output rate of the opened device, once playback has started.
    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Drops the queued buffer; the stream stays open and plays silence.
    pub fn stop(&mut self) {
        if let Ok(mut cursor) = self.cursor.lock() {
            cursor.position = cursor.samples.len();
        }
    }

    fn open(&mut self) -> Result<()> {
        let device = super::quiet_stderr(|| find_output_device(&self.device_name))?;
        let device_name = device
            .name()
            .unwrap_or_else(|_| "Unknown device".to_string());
        tracing::info!("Playback device: {}", device_name);

        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let config = supported.config();
        tracing::debug!(
            "Device configuration: {}Hz, {} channels, {:?}",
            config.sample_rate.0,
            config.channels,
            sample_format
        );

        let stream = match sample_format {
            cpal::SampleFormat::F32 => self.build_stream::<f32>(&device, &config)?,
            cpal::SampleFormat::I16 => self.build_stream::<i16>(&device, &config)?,
            cpal::SampleFormat::U16 => self.build_stream::<u16>(&device, &config)?,
            other => return Err(anyhow!("Unsupported output sample format {other:?}")),
        };
        stream.play()?;

        self.sample_rate = Some(config.sample_rate.0);
        self.stream = Some(stream);
        tracing::debug!("Audio output stream started");
        Ok(())
    }

    fn build_stream<T>(&self, device: &cpal::Device, config: &cpal::StreamConfig) -> Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let cursor = Arc::clone(&self.cursor);
        let channels = config.channels as usize;
        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if let Ok(mut cursor) = cursor.lock() {
                    fill_frames(&mut cursor, data, channels);
                }
            },
            |err| {
                tracing::error!("Audio stream error: {}", err);
            },
            None,
        )?;
        Ok(stream)
    }
}

/// Writes the next mono samples into interleaved `data`, copying each to
/// every channel. Silence once the buffer is exhausted.
fn fill_frames<T>(cursor: &mut PlaybackCursor, data: &mut [T], channels: usize)
where
    T: Sample + FromSample<f32>,
{
    for frame in data.chunks_mut(channels.max(1)) {
        let value = match cursor.samples.get(cursor.position) {
            Some(&v) => {
                cursor.position += 1;
                v
            }
            None => 0.0,
        };
        let sample = T::from_sample(value);
        for slot in frame.iter_mut() {
            *slot = sample;
        }
    }
}

/// Finds an output device by name or numeric index; "default" is the system default.
///
/// # Errors
/// - If no device with the specified name/index is found
pub fn find_output_device(device_spec: &str) -> Result<cpal::Device> {
    let host = cpal::default_host();
    if device_spec == "default" {
        return host
            .default_output_device()
            .ok_or_else(|| anyhow!("No audio output device available"));
    }

    let mut devices: Vec<cpal::Device> = host
        .output_devices()
        .map_err(|e| anyhow!("Failed to enumerate devices: {e}"))?
        .collect();

    if let Ok(index) = device_spec.parse::<usize>() {
        let count = devices.len();
        if index < count {
            return Ok(devices.swap_remove(index));
        }
        return Err(anyhow!(
            "Device index {} is out of range (0-{})",
            index,
            count.saturating_sub(1)
        ));
    }

    devices
        .into_iter()
        .find(|device| device.name().map(|name| name == device_spec).unwrap_or(false))
        .ok_or_else(|| {
            anyhow!(
                "Audio output device '{device_spec}' not found. Use 'fourierpaint list-devices' to see available devices."
            )
        })
}
