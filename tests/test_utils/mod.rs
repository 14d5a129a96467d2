#![allow(dead_code)]

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

pub const SAMPLE_RATE: u32 = 44100;

/// Scratch directory unique to one test
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("attackcov_{}_{}", prefix, Uuid::new_v4()));
        fs::create_dir_all(&path).expect("Failed to create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub fn run_attackcov() -> Command {
    Command::new(env!("CARGO_BIN_EXE_attackcov"))
}

/// Write mono 16-bit PCM samples in [-1, 1]
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    for &s in samples {
        let value = (s.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16;
        writer.write_sample(value).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

/// Sine burst under a Hann envelope
pub fn tone_burst(frequency: f64, len: usize, sample_rate: u32, amplitude: f64) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let envelope = 0.5 - 0.5 * (2.0 * PI * i as f64 / (len - 1) as f64).cos();
            amplitude * envelope * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Deterministic noise in [-amplitude, amplitude]
pub fn pseudo_noise(len: usize, seed: u64, amplitude: f64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            amplitude * (2.0 * unit - 1.0)
        })
        .collect()
}

/// Burst frequency for each reference, in LP..HK order
pub const REFERENCE_FREQUENCIES: [f64; 6] = [30.0, 50.0, 70.0, 90.0, 110.0, 130.0];

/// Write six tone-burst references and a noisy recording with `embedded`
/// (index into LP..HK) placed at `offset` samples
pub fn write_attack_folder(dir: &Path, clip_len: usize, recording_len: usize, embedded: usize, offset: usize) {
    let names = ["LP.wav", "LK.wav", "MP.wav", "MK.wav", "HP.wav", "HK.wav"];
    let clips: Vec<Vec<f64>> = REFERENCE_FREQUENCIES
        .iter()
        .map(|&f| tone_burst(f, clip_len, SAMPLE_RATE, 0.5))
        .collect();

    for (name, clip) in names.iter().zip(clips.iter()) {
        write_wav(&dir.join(name), clip, SAMPLE_RATE);
    }

    let mut recording = pseudo_noise(recording_len, 7, 0.002);
    for (i, &s) in clips[embedded].iter().enumerate() {
        recording[offset + i] += s;
    }
    write_wav(&dir.join("whole.wav"), &recording, SAMPLE_RATE);
}
