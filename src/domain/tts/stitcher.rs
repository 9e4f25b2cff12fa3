use crate::domain::audio::{encode_wav, AudioSegment, PcmFormat};

/// The concatenated waveform plus its encoded WAV byte representation.
/// Created once per successful run and handed to the caller as-is.
#[derive(Debug, Clone)]
pub struct FinalAudio {
    pub wav_data: Vec<u8>,
    pub format: PcmFormat,
    pub sample_count: usize,
}

impl FinalAudio {
    pub fn duration_seconds(&self) -> f32 {
        let frames = self.sample_count as f32 / self.format.channels.max(1) as f32;
        frames / self.format.sample_rate as f32
    }
}

/// Concatenate decoded segments into one continuous waveform and encode it
/// as a single WAV container.
///
/// Sample streams are appended in order with no cross-fade, no silence
/// insertion and no resampling, so every segment must share the format of
/// the first one (a run uses a single backend).
pub fn stitch(segments: &[AudioSegment]) -> Result<FinalAudio, String> {
    let first = segments
        .first()
        .ok_or_else(|| "no audio segments to stitch".to_string())?;
    let format = first.format;

    let total: usize = segments.iter().map(|s| s.samples.len()).sum();
    let mut samples = Vec::with_capacity(total);

    for segment in segments {
        if segment.format != format {
            return Err(format!(
                "mismatched segment formats: expected {:?}, got {:?}",
                format, segment.format
            ));
        }
        samples.extend_from_slice(&segment.samples);
    }

    tracing::info!(
        segment_count = segments.len(),
        sample_count = samples.len(),
        sample_rate = format.sample_rate,
        "Stitching audio segments"
    );

    let wav_data = encode_wav(&format, &samples)?;

    Ok(FinalAudio {
        wav_data,
        format,
        sample_count: samples.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::decode_wav;
    use pretty_assertions::assert_eq;

    fn segment_of(samples: Vec<i16>) -> AudioSegment {
        AudioSegment {
            format: PcmFormat::default(),
            samples,
        }
    }

    #[test]
    fn test_stitch_concatenates_in_order() {
        let segments = vec![
            segment_of(vec![1, 2, 3]),
            segment_of(vec![4, 5]),
            segment_of(vec![6]),
        ];

        let final_audio = stitch(&segments).unwrap();
        assert_eq!(final_audio.sample_count, 6);

        let decoded = decode_wav(&final_audio.wav_data).unwrap();
        assert_eq!(decoded.samples, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_stitch_output_header_matches_segment_format() {
        let format = PcmFormat {
            sample_rate: 22_050,
            bits_per_sample: 16,
            channels: 1,
        };
        let segments = vec![AudioSegment {
            format,
            samples: vec![7; 100],
        }];

        let final_audio = stitch(&segments).unwrap();
        let decoded = decode_wav(&final_audio.wav_data).unwrap();

        assert_eq!(decoded.format, format);
        assert_eq!(decoded.samples.len(), final_audio.sample_count);
    }

    #[test]
    fn test_stitch_rejects_mismatched_formats() {
        let other = PcmFormat {
            sample_rate: 48_000,
            bits_per_sample: 16,
            channels: 1,
        };
        let segments = vec![
            segment_of(vec![1]),
            AudioSegment {
                format: other,
                samples: vec![2],
            },
        ];

        assert!(stitch(&segments).is_err());
    }

    #[test]
    fn test_stitch_rejects_empty_input() {
        assert!(stitch(&[]).is_err());
    }

    #[test]
    fn test_final_audio_duration() {
        let segments = vec![segment_of(vec![0; 12_000])];
        let final_audio = stitch(&segments).unwrap();
        assert!((final_audio.duration_seconds() - 0.5).abs() < f32::EPSILON);
    }
}
