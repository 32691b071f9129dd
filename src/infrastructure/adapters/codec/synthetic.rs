//! Synthetic WAV - 生成固定时长的 PCM WAV 字节流
//!
//! 供 FakeTtsClient 和测试使用：不依赖任何真实音频文件

/// 生成指定时长的 16 位单声道 WAV（440Hz 正弦波）
pub fn synthetic_wav(duration_ms: u64, sample_rate: u32) -> Vec<u8> {
    let num_samples = (duration_ms * sample_rate as u64 / 1000) as usize;
    let bits_per_sample: u16 = 16;
    let num_channels: u16 = 1;

    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&num_channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    let block_align = num_channels * (bits_per_sample / 8);
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());

    for i in 0..num_samples {
        let t = i as f32 / sample_rate as f32;
        let value = (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
        wav.extend_from_slice(&((value * 32767.0) as i16).to_le_bytes());
    }

    wav
}
