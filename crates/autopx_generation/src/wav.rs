//! RIFF/WAV wrapping for raw PCM speech output.

/// Sample rate used when the MIME type does not carry one.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Parse the `rate=` parameter of a MIME type such as `audio/L16;codec=pcm;rate=24000`.
///
/// # Examples
///
/// ```
/// use autopx_generation::sample_rate_from_mime;
///
/// assert_eq!(sample_rate_from_mime("audio/L16;codec=pcm;rate=16000"), 16000);
/// assert_eq!(sample_rate_from_mime("audio/L16"), 24000);
/// ```
pub fn sample_rate_from_mime(mime: &str) -> u32 {
    mime.split(';')
        .skip(1)
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_RATE)
}

/// Wrap mono 16-bit little-endian PCM samples in a 44-byte WAV header.
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = pcm.len() as u32;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    // PCM
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}
