// src/core/decoder.rs
//
// Audio loading. Uses Symphonia for format-agnostic decoding and reduces
// every file to a single mono sequence.

use log::debug;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{AnalysisError, Result};

/// Decoded file contents
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Interleaved samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of audio channels
    pub channels: usize,
    /// Duration in seconds
    pub duration_secs: f64,
}

/// Mono signal ready for the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Read a file and down-mix it to mono `f64` samples
pub fn load_signal(path: &Path) -> Result<Signal> {
    let audio = decode_audio(path)?;
    let mono = extract_mono(&audio);
    debug!(
        "{}: {} Hz, {} channel(s), {:.2}s",
        path.display(),
        audio.sample_rate,
        audio.channels,
        audio.duration_secs
    );
    Ok(Signal::new(
        mono.into_iter().map(f64::from).collect(),
        audio.sample_rate,
    ))
}

/// Decode audio file to floating-point samples
pub fn decode_audio(path: &Path) -> Result<AudioData> {
    let file = File::open(path).map_err(|source| AnalysisError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let decode_err = |message: String| AnalysisError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| decode_err(format!("unsupported or corrupted file ({})", e)))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decode_err("no supported audio track".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| decode_err("file does not specify a sample rate".to_string()))?;

    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);
    if channels == 0 {
        return Err(decode_err("file reports 0 audio channels".to_string()));
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_err(format!("no decoder for codec ({})", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(decode_err(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(decode_err(e.to_string())),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let duration = decoded.capacity() as u64;
            sample_buf = Some(SampleBuffer::new(duration, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    if samples.is_empty() {
        return Err(decode_err("no audio samples decoded".to_string()));
    }

    let duration_secs = samples.len() as f64 / (sample_rate as f64 * channels as f64);

    Ok(AudioData {
        samples,
        sample_rate,
        channels,
        duration_secs,
    })
}

/// Average interleaved channels into one sequence
pub fn extract_mono(audio: &AudioData) -> Vec<f32> {
    if audio.channels == 1 {
        return audio.samples.clone();
    }

    audio
        .samples
        .chunks_exact(audio.channels)
        .map(|frame| frame.iter().sum::<f32>() / audio.channels as f32)
        .collect()
}
