//! MP3 Codec - 基于 symphonia + LAME 的音频编解码器
//!
//! 解码：symphonia probe（WAV / MP3），混合为单声道 f32 PCM
//! 编码：mp3lame-encoder，固定比特率输出 MP3

use std::io::Cursor;

use mp3lame_encoder::{Builder, FlushNoGap, MonoPcm};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioClip, AudioCodecPort, CodecError};

/// MP3 编解码器
pub struct Mp3Codec {
    /// 输出比特率（kbps）
    bitrate_kbps: u32,
}

impl Mp3Codec {
    pub fn new(bitrate_kbps: u32) -> Self {
        Self { bitrate_kbps }
    }

    /// LAME 支持的 MPEG 采样率
    ///
    /// 不在列表中的采样率编码前先就近重采样
    fn mp3_compatible_sample_rate(sample_rate: u32) -> u32 {
        match sample_rate {
            8000 | 11025 | 12000 | 16000 | 22050 | 24000 | 32000 | 44100 | 48000 => sample_rate,
            r if r <= 8000 => 8000,
            r if r <= 11025 => 11025,
            r if r <= 12000 => 12000,
            r if r <= 16000 => 16000,
            r if r <= 22050 => 22050,
            r if r <= 24000 => 24000,
            r if r <= 32000 => 32000,
            r if r <= 44100 => 44100,
            _ => 48000,
        }
    }

    fn bitrate(&self) -> mp3lame_encoder::Birtate {
        use mp3lame_encoder::Birtate;
        match self.bitrate_kbps {
            0..=48 => Birtate::Kbps48,
            49..=64 => Birtate::Kbps64,
            65..=96 => Birtate::Kbps96,
            97..=128 => Birtate::Kbps128,
            129..=160 => Birtate::Kbps160,
            161..=192 => Birtate::Kbps192,
            193..=256 => Birtate::Kbps256,
            _ => Birtate::Kbps320,
        }
    }
}

impl AudioCodecPort for Mp3Codec {
    /// 解码音频字节为单声道剪辑
    ///
    /// 多声道输入按声道平均混合
    fn decode(&self, data: &[u8]) -> Result<AudioClip, CodecError> {
        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let hint = Hint::new();
        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| CodecError::DecodingError(format!("Probe failed: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| CodecError::DecodingError("No audio track found".to_string()))?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| CodecError::DecodingError("Unknown sample rate".to_string()))?;

        let decoder_opts = DecoderOptions::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &decoder_opts)
            .map_err(|e| CodecError::DecodingError(format!("Decoder creation failed: {}", e)))?;

        let track_id = track.id;
        let mut samples: Vec<f32> = Vec::new();
        let mut decoded_any = false;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(CodecError::DecodingError(format!(
                        "Packet read error: {}",
                        e
                    )));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Decode error (skipping packet): {}", e);
                    continue;
                }
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            let channel_count = spec.channels.count();
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            let interleaved = &sample_buf.samples()[..num_frames * channel_count];

            // 多声道混合为单声道
            if channel_count == 1 {
                samples.extend_from_slice(interleaved);
            } else {
                for frame in interleaved.chunks_exact(channel_count) {
                    samples.push(frame.iter().sum::<f32>() / channel_count as f32);
                }
            }
            decoded_any = true;
        }

        if !decoded_any {
            return Err(CodecError::DecodingError(
                "No audio packets decoded".to_string(),
            ));
        }

        Ok(AudioClip {
            samples,
            sample_rate,
        })
    }

    /// 将剪辑编码为 MP3 字节流
    fn encode(&self, clip: &AudioClip) -> Result<Vec<u8>, CodecError> {
        // LAME 不接受任意采样率
        let target_rate = Self::mp3_compatible_sample_rate(clip.sample_rate);
        let clip = if target_rate != clip.sample_rate {
            tracing::debug!(
                from = clip.sample_rate,
                to = target_rate,
                "Resampling before MP3 encode"
            );
            clip.resampled(target_rate)
        } else {
            clip.clone()
        };

        let pcm_i16: Vec<i16> = clip
            .samples
            .iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
            .collect();

        let mut builder = Builder::new().ok_or_else(|| {
            CodecError::EncodingError("Failed to allocate LAME encoder".to_string())
        })?;
        builder
            .set_num_channels(1)
            .map_err(|e| CodecError::EncodingError(format!("set_num_channels: {}", e)))?;
        builder
            .set_sample_rate(clip.sample_rate)
            .map_err(|e| CodecError::EncodingError(format!("set_sample_rate: {}", e)))?;
        builder
            .set_brate(self.bitrate())
            .map_err(|e| CodecError::EncodingError(format!("set_brate: {}", e)))?;
        builder
            .set_quality(mp3lame_encoder::Quality::Best)
            .map_err(|e| CodecError::EncodingError(format!("set_quality: {}", e)))?;
        let mut encoder = builder
            .build()
            .map_err(|e| CodecError::EncodingError(format!("LAME init failed: {}", e)))?;

        let mut mp3_out = Vec::new();
        mp3_out.reserve(mp3lame_encoder::max_required_buffer_size(pcm_i16.len()));

        let encoded = encoder
            .encode(MonoPcm(&pcm_i16), mp3_out.spare_capacity_mut())
            .map_err(|e| CodecError::EncodingError(format!("MP3 encode failed: {}", e)))?;
        // SAFETY: encoder 刚初始化了前 encoded 个字节
        unsafe {
            mp3_out.set_len(mp3_out.len() + encoded);
        }

        mp3_out.reserve(7200); // flush 的最坏情况缓冲
        let flushed = encoder
            .flush::<FlushNoGap>(mp3_out.spare_capacity_mut())
            .map_err(|e| CodecError::EncodingError(format!("MP3 flush failed: {}", e)))?;
        // SAFETY: 同上
        unsafe {
            mp3_out.set_len(mp3_out.len() + flushed);
        }

        Ok(mp3_out)
    }

    fn output_extension(&self) -> &'static str {
        "mp3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::codec::synthetic_wav;

    #[test]
    fn test_decode_wav_duration_and_rate() {
        let codec = Mp3Codec::new(192);
        let clip = codec.decode(&synthetic_wav(1000, 16000)).unwrap();
        assert_eq!(clip.sample_rate, 16000);
        assert_eq!(clip.samples.len(), 16000);
        assert_eq!(clip.duration_ms(), 1000);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let codec = Mp3Codec::new(192);
        let err = codec.decode(b"definitely not audio data").unwrap_err();
        assert!(matches!(err, CodecError::DecodingError(_)));
    }

    #[test]
    fn test_decode_truncated_wav_fails() {
        let codec = Mp3Codec::new(192);
        let wav = synthetic_wav(1000, 16000);
        // 只留文件头之前的一小截
        assert!(codec.decode(&wav[..10]).is_err());
    }

    #[test]
    fn test_encode_produces_mpeg_stream() {
        let codec = Mp3Codec::new(192);
        let clip = AudioClip::silence(500, 44100);
        let mp3 = codec.encode(&clip).unwrap();
        assert!(!mp3.is_empty());
        // MPEG 帧同步字
        assert_eq!(mp3[0], 0xFF);
    }

    #[test]
    fn test_encode_decode_roundtrip_duration() {
        let codec = Mp3Codec::new(192);
        let wav_clip = codec.decode(&synthetic_wav(2000, 44100)).unwrap();
        let mp3 = codec.encode(&wav_clip).unwrap();

        let decoded = codec.decode(&mp3).unwrap();
        // 编解码器首尾填充在容差内
        let d = decoded.duration_ms();
        assert!((1850..=2150).contains(&d), "duration {}", d);
    }

    #[test]
    fn test_incompatible_rate_is_snapped() {
        assert_eq!(Mp3Codec::mp3_compatible_sample_rate(44100), 44100);
        assert_eq!(Mp3Codec::mp3_compatible_sample_rate(22000), 22050);
        assert_eq!(Mp3Codec::mp3_compatible_sample_rate(96000), 48000);
        assert_eq!(Mp3Codec::mp3_compatible_sample_rate(7000), 8000);

        // 非标准采样率也能编码
        let codec = Mp3Codec::new(128);
        let clip = AudioClip::silence(500, 22000);
        assert!(codec.encode(&clip).is_ok());
    }
}
