//! Headless controller for the mezzo MIDI player.
//!
//! Provides a unified API for loading Standard MIDI Files, playback,
//! and rendering that a GUI or CLI can share.

mod wav;

use mz_audio::{AudioOutput, CpalOutput, OscillatorSynth};
use mz_engine::Player;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

// Re-export common types so callers don't need the inner crates directly.
pub use mz_audio::Frame;
pub use mz_engine::{PlayError, PlaybackConfig, Transport};
pub use mz_ir::{LogSink, NullSink, Sequence, Severity};

pub use wav::{frames_to_wav, write_wav};

/// Render block size for offline and threaded playback.
const BLOCK_FRAMES: usize = 256;

/// Headless player controller. Owns a sequence and manages playback.
pub struct Controller {
    sequence: Sequence,
    config: PlaybackConfig,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            sequence: Sequence::empty(),
            config: PlaybackConfig::default(),
            playback: None,
        }
    }

    pub fn with_config(config: PlaybackConfig) -> Self {
        Self {
            sequence: Sequence::empty(),
            config,
            playback: None,
        }
    }

    // --- Sequence management ---

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn config(&self) -> PlaybackConfig {
        self.config
    }

    /// Decode a Standard MIDI File. Decoding is total: malformed or
    /// truncated input yields whatever events were readable.
    pub fn load_smf(&mut self, data: &[u8]) {
        self.stop();
        self.sequence = mz_smf::load_smf(data);
    }

    /// As `load_smf`, reporting decode progress through `sink`.
    pub fn load_smf_with_sink(&mut self, data: &[u8], sink: &mut dyn LogSink) {
        self.stop();
        self.sequence = mz_smf::load_smf_with_sink(data, sink);
    }

    /// Wall-clock length of the loaded sequence in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.sequence.last_tick() as f64 * self.config.ms_per_tick()
    }

    // --- Real-time playback ---

    /// Start playback on a worker thread.
    pub fn play(&mut self) -> Result<(), PlayError> {
        if self.sequence.is_empty() {
            return Err(PlayError::EmptySequence);
        }
        if !CpalOutput::probe() {
            return Err(PlayError::BackendUnavailable);
        }
        self.stop();

        let sequence = self.sequence.clone();
        let config = self.config;
        let stop_signal = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));

        let stop = stop_signal.clone();
        let done = finished.clone();

        let thread = std::thread::spawn(move || {
            audio_thread(sequence, config, stop, done);
        });

        self.playback = Some(PlaybackHandle {
            stop_signal,
            finished,
            thread: Some(thread),
        });
        Ok(())
    }

    /// Cease playback. A later `play` restarts from tick zero.
    pub fn pause(&mut self) {
        self.stop();
    }

    pub fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                let _ = handle.join();
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| !p.finished.load(Ordering::Relaxed))
    }

    pub fn is_finished(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| p.finished.load(Ordering::Relaxed))
    }

    // --- Offline rendering ---

    /// Render the loaded sequence through the oscillator synth without
    /// touching an audio device.
    pub fn render_frames(&self, sample_rate: u32, max_frames: usize) -> Vec<Frame> {
        let mut synth = OscillatorSynth::new(sample_rate);
        let mut player = Player::new(self.config);
        if player.play(&self.sequence, &mut synth).is_err() {
            return Vec::new();
        }

        let mut frames = Vec::with_capacity(max_frames.min(1 << 20));
        let span_frames = span_frames(player.total_duration_ms(), sample_rate);
        let mut block = [Frame::silence(); BLOCK_FRAMES];
        while frames.len() < max_frames {
            if synth.position() >= span_frames && synth.is_quiet() {
                break;
            }
            let want = (max_frames - frames.len()).min(BLOCK_FRAMES);
            synth.render(&mut block[..want]);
            frames.extend_from_slice(&block[..want]);
        }
        frames
    }

    pub fn render_to_wav(&self, sample_rate: u32, max_seconds: u32) -> Vec<u8> {
        let max_frames = (sample_rate * max_seconds) as usize;
        let frames = self.render_frames(sample_rate, max_frames);
        wav::frames_to_wav(&frames, sample_rate)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames needed to cover a dispatch span plus its release tails.
fn span_frames(duration_ms: f64, sample_rate: u32) -> u64 {
    ((duration_ms / 1000.0 + mz_ir::RELEASE_SECS as f64) * sample_rate as f64) as u64
}

fn audio_thread(
    sequence: Sequence,
    config: PlaybackConfig,
    stop_signal: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
) {
    let Ok((mut output, consumer)) = CpalOutput::new() else {
        finished.store(true, Ordering::Relaxed);
        return;
    };

    let sample_rate = output.sample_rate();
    let mut synth = OscillatorSynth::new(sample_rate);
    let mut player = Player::new(config);
    if player.play(&sequence, &mut synth).is_err() {
        finished.store(true, Ordering::Relaxed);
        return;
    }

    if output.build_stream(consumer).is_err() {
        finished.store(true, Ordering::Relaxed);
        return;
    }
    let _ = output.start();

    let span = span_frames(player.total_duration_ms(), sample_rate);
    let mut block = [Frame::silence(); BLOCK_FRAMES];

    while !stop_signal.load(Ordering::Relaxed) {
        if synth.position() >= span && synth.is_quiet() {
            break;
        }
        synth.render(&mut block);
        for frame in block {
            output.write_spin(frame);
        }
    }

    // Flush the ring buffer with a short silent tail
    for _ in 0..(sample_rate / 4) {
        output.write_spin(Frame::silence());
    }
    let _ = output.stop();

    finished.store(true, Ordering::Relaxed);
}
