//! Audio buffers exchanged with the UI.
//!
//! Synthesized samples are encoded to WAV with hound; reference voices are
//! decoded from WAV and mixed down to mono.

pub mod util;
mod wav;

pub use wav::{VoiceReference, encode_wav, read_voice_reference};
