//! Shared sample utilities.

/// Convert interleaved f32 samples to mono.
///
/// Handles both mono and multi-channel input:
/// - Mono: Returns a copy of the input
/// - Multi-channel: Mixes channels by averaging each frame
///
/// # Arguments
/// * `data` - Raw f32 samples (interleaved for multi-channel)
/// * `channels` - Number of channels
///
/// # Returns
/// Vector of mono f32 samples
pub fn convert_to_mono(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        data.to_vec()
    } else {
        data.chunks(channels).map(|frame| frame.iter().sum::<f32>() / channels as f32).collect()
    }
}

/// Duration in seconds of `samples` mono samples at `sample_rate`.
pub fn duration_secs(samples: usize, sample_rate: u32) -> f32 {
    if sample_rate == 0 { 0.0 } else { samples as f32 / sample_rate as f32 }
}
