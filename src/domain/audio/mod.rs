use std::io::Cursor;

/// Sample rate assumed when a backend's MIME descriptor omits `rate=`
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Bit depth assumed when a backend's MIME descriptor omits `audio/L<bits>`
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// PCM stream parameters as asserted by a container header or MIME descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            channels: 1,
        }
    }
}

impl PcmFormat {
    /// Parse bit depth and sample rate from an audio MIME descriptor such as
    /// `audio/L16;codec=pcm;rate=24000`. Missing or malformed fields fall
    /// back to the defaults (16-bit, 24 kHz, mono).
    pub fn from_mime(mime_type: &str) -> Self {
        let mut format = PcmFormat::default();

        for param in mime_type.split(';') {
            let param = param.trim();
            let lowered = param.to_ascii_lowercase();
            if let Some(rate) = lowered.strip_prefix("rate=") {
                if let Ok(rate) = rate.parse() {
                    format.sample_rate = rate;
                }
            } else if let Some(bits) = param.strip_prefix("audio/L") {
                if let Ok(bits) = bits.parse() {
                    format.bits_per_sample = bits;
                }
            }
        }

        format
    }
}

/// One decoded audio segment: 16-bit PCM samples plus their format
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    pub format: PcmFormat,
    pub samples: Vec<i16>,
}

impl AudioSegment {
    pub fn duration_seconds(&self) -> f32 {
        let frames = self.samples.len() as f32 / self.format.channels.max(1) as f32;
        frames / self.format.sample_rate as f32
    }
}

/// Prepend the canonical 44-byte RIFF/WAVE header to headerless PCM bytes.
/// Layout: RIFF chunk, WAVE form, `fmt ` subchunk (PCM format code 1),
/// `data` subchunk sized to the payload.
pub fn wav_from_pcm(pcm: &[u8], format: &PcmFormat) -> Vec<u8> {
    let data_size = pcm.len() as u32;
    let bytes_per_sample = (format.bits_per_sample / 8) as u32;
    let block_align = format.channels as u32 * bytes_per_sample;
    let byte_rate = format.sample_rate * block_align;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&(block_align as u16).to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

/// Decode a WAV container into PCM samples using the format asserted by its
/// own header. Only 16-bit integer PCM is supported.
pub fn decode_wav(bytes: &[u8]) -> Result<AudioSegment, String> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| format!("invalid WAV container: {}", e))?;
    let spec = reader.spec();

    if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
        return Err(format!(
            "unsupported sample format: {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        ));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("failed to read samples: {}", e))?;

    Ok(AudioSegment {
        format: PcmFormat {
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            channels: spec.channels,
        },
        samples,
    })
}

/// Encode 16-bit PCM samples into a self-describing WAV container.
pub fn encode_wav(format: &PcmFormat, samples: &[i16]) -> Result<Vec<u8>, String> {
    let spec = hound::WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| format!("failed to create WAV writer: {}", e))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| format!("failed to write sample: {}", e))?;
    }
    writer
        .finalize()
        .map_err(|e| format!("failed to finalize WAV: {}", e))?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_parses_rate_and_bits() {
        let format = PcmFormat::from_mime("audio/L16;codec=pcm;rate=24000");
        assert_eq!(format.sample_rate, 24_000);
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.channels, 1);

        let format = PcmFormat::from_mime("audio/L24; rate=48000");
        assert_eq!(format.sample_rate, 48_000);
        assert_eq!(format.bits_per_sample, 24);
    }

    #[test]
    fn test_from_mime_falls_back_to_defaults() {
        let format = PcmFormat::from_mime("");
        assert_eq!(format, PcmFormat::default());

        let format = PcmFormat::from_mime("audio/mp3");
        assert_eq!(format, PcmFormat::default());

        // Malformed fields are ignored, not errors
        let format = PcmFormat::from_mime("audio/Labc;rate=fast");
        assert_eq!(format, PcmFormat::default());
    }

    #[test]
    fn test_wav_from_pcm_writes_canonical_header() {
        let pcm = [1u8, 0, 2, 0];
        let wav = wav_from_pcm(&pcm, &PcmFormat::default());

        assert_eq!(wav.len(), 44 + pcm.len());
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 4);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        // PCM format code 1, mono
        assert_eq!(u16::from_le_bytes(wav[20..22].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(wav[22..24].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 24_000);
        assert_eq!(u16::from_le_bytes(wav[34..36].try_into().unwrap()), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 4);
    }

    #[test]
    fn test_wav_from_pcm_is_decodable() {
        let samples: [i16; 3] = [100, -200, 300];
        let mut pcm = Vec::new();
        for sample in samples {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }

        let wav = wav_from_pcm(&pcm, &PcmFormat::default());
        let decoded = decode_wav(&wav).unwrap();

        assert_eq!(decoded.format, PcmFormat::default());
        assert_eq!(decoded.samples, samples);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let format = PcmFormat {
            sample_rate: 22_050,
            bits_per_sample: 16,
            channels: 1,
        };
        let samples: Vec<i16> = (0..480).map(|i| (i * 7) as i16).collect();

        let wav = encode_wav(&format, &samples).unwrap();
        let decoded = decode_wav(&wav).unwrap();

        assert_eq!(decoded.format, format);
        assert_eq!(decoded.samples, samples);
    }

    #[test]
    fn test_decode_wav_rejects_garbage() {
        assert!(decode_wav(&[1, 2, 3, 4]).is_err());
        assert!(decode_wav(&[]).is_err());
    }

    #[test]
    fn test_duration_seconds() {
        let segment = AudioSegment {
            format: PcmFormat::default(),
            samples: vec![0; 24_000],
        };
        assert!((segment.duration_seconds() - 1.0).abs() < f32::EPSILON);
    }
}
