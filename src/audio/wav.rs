//! WAV encoding and decoding.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use super::util::{convert_to_mono, duration_secs};

/// Decoded reference voice clip, mixed down to mono.
#[derive(Debug, Clone)]
pub struct VoiceReference {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl VoiceReference {
    /// Clip length in seconds.
    pub fn duration_secs(&self) -> f32 {
        duration_secs(self.samples.len(), self.sample_rate)
    }
}

/// Encode mono f32 samples as a 16-bit PCM WAV file in memory.
///
/// Samples are hard-clamped to [-1, 1] before quantization.
///
/// # Errors
/// Returns an error if the WAV writer fails.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = WavSpec { channels: 1, sample_rate, bits_per_sample: 16, sample_format: SampleFormat::Int };

    let mut buffer = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut buffer, spec)?;
        for sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(value)?;
        }
        writer.finalize()?;
    }

    Ok(buffer.into_inner())
}

/// Read a reference voice clip from disk.
///
/// Integer and float WAV files of any bit depth are accepted; multi-channel
/// audio is averaged to mono.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not a valid WAV file.
pub fn read_voice_reference(path: &Path) -> Result<VoiceReference, hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader.samples::<i32>().map(|s| s.map(|v| v as f32 / max_val)).collect::<Result<Vec<_>, _>>()?
        }
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
    };

    let samples = convert_to_mono(&interleaved, spec.channels as usize);
    debug!("Read reference voice {} ({} Hz, {} channel(s), {} samples)", path.display(), spec.sample_rate, spec.channels, samples.len());

    Ok(VoiceReference { path: path.to_path_buf(), sample_rate: spec.sample_rate, channels: spec.channels, samples })
}
