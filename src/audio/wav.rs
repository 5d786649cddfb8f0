//! WAV export of tone buffers.

use anyhow::Result;
use hound::WavWriter;
use std::path::Path;

/// Writes mono `samples` in -1.0..=1.0 as 16-bit PCM at `sample_rate`.
///
/// Out-of-range values are clipped.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(to_pcm16(sample))?;
    }
    writer.finalize()?;

    tracing::debug!("WAV written: {} ({} samples)", path.display(), samples.len());
    Ok(())
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_conversion_clips() {
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(1.0), i16::MAX);
        assert_eq!(to_pcm16(-2.0), -i16::MAX);
        assert_eq!(to_pcm16(0.5), 16384);
    }

    #[test]
    fn test_write_wav_round_trip() {
        let path = std::env::temp_dir().join(format!("fourierpaint-wav-{}.wav", std::process::id()));
        write_wav(&path, &[0.0, 0.5, -0.5, 0.9], 22050).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 16384, -16384, 29490]);

        std::fs::remove_file(&path).unwrap();
    }
}
