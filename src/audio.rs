//! Article audio playback through rodio.
//!
//! The whole encoded track is held in memory. The output stream is opened on
//! the first `play` so a missing device only blocks playback, not loading.

use anyhow::{Context, Result, anyhow};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Clone)]
struct SharedBytes(Arc<Vec<u8>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// Playback position derived from a base offset plus wall time since the last
/// start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackClock {
    base: Duration,
    started_at: Option<Instant>,
    duration: Option<Duration>,
    finished: bool,
}

impl PlaybackClock {
    pub fn new(duration: Option<Duration>) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn position(&self, now: Instant) -> Duration {
        let running = self
            .started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default();
        self.clamp(self.base + running)
    }

    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.finished = false;
    }

    pub fn pause(&mut self, now: Instant) {
        self.base = self.position(now);
        self.started_at = None;
    }

    pub fn seek(&mut self, position: Duration, now: Instant) {
        self.base = self.clamp(position);
        self.finished = false;
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
    }

    /// Stop at the end of the track.
    pub fn finish(&mut self, now: Instant) {
        self.base = self.duration.unwrap_or_else(|| self.position(now));
        self.started_at = None;
        self.finished = true;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn clamp(&self, position: Duration) -> Duration {
        match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        }
    }
}

struct Output {
    _stream: Option<OutputStream>,
    sink: Sink,
}

struct Track {
    bytes: SharedBytes,
    clock: PlaybackClock,
    output: Option<Output>,
}

/// Owns the bound audio source and its output sink.
pub struct AudioController {
    track: Option<Track>,
    volume: f32,
}

impl AudioController {
    pub fn new(volume: f32) -> Self {
        Self {
            track: None,
            volume,
        }
    }

    /// Replace the current source. Any playing track is stopped first; the new
    /// one is left paused at the start.
    pub fn set_source(&mut self, bytes: Arc<Vec<u8>>) -> Result<()> {
        self.stop();
        let bytes = SharedBytes(bytes);
        let decoder = Decoder::new(Cursor::new(bytes.clone())).context("Decoding audio track")?;
        let duration = decoder.total_duration();
        info!(
            bytes = bytes.0.len(),
            duration_secs = duration.map(|d| d.as_secs_f64()),
            "Bound audio source"
        );
        self.track = Some(Track {
            bytes,
            clock: PlaybackClock::new(duration),
            output: None,
        });
        Ok(())
    }

    pub fn has_source(&self) -> bool {
        self.track.is_some()
    }

    pub fn play(&mut self, now: Instant) -> Result<()> {
        let volume = self.volume;
        let track = self
            .track
            .as_mut()
            .ok_or_else(|| anyhow!("No audio source bound"))?;

        if track.clock.is_finished() {
            debug!("Restarting finished track from the beginning");
            track.clock.seek(Duration::ZERO, now);
            track.output = None;
        }
        let needs_output = track
            .output
            .as_ref()
            .map(|output| output.sink.empty())
            .unwrap_or(true);
        if needs_output {
            let start = track.clock.position(now);
            track.output = Some(open_output(&track.bytes, start, volume)?);
        }
        if let Some(output) = &track.output {
            output.sink.play();
        }
        track.clock.start(now);
        debug!("Resumed audio playback");
        Ok(())
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(track) = self.track.as_mut() {
            if let Some(output) = &track.output {
                output.sink.pause();
            }
            track.clock.pause(now);
            debug!("Paused audio playback");
        }
    }

    /// Move to `seconds`, clamped to the track. Falls back to re-decoding
    /// from the target when the decoder cannot seek in place.
    pub fn seek(&mut self, seconds: f64, now: Instant) -> Result<()> {
        let volume = self.volume;
        let Some(track) = self.track.as_mut() else {
            return Err(anyhow!("No audio source bound"));
        };
        let target = if seconds.is_finite() && seconds > 0.0 {
            Duration::from_secs_f64(seconds)
        } else {
            Duration::ZERO
        };
        track.clock.seek(target, now);
        let target = track.clock.position(now);

        let Some(output) = &track.output else {
            return Ok(());
        };
        if output.sink.empty() {
            // Drained before `poll_end` ran. A running clock must keep a
            // live sink.
            track.output = None;
            if track.clock.is_running() {
                match open_output(&track.bytes, target, volume) {
                    Ok(fresh) => {
                        fresh.sink.play();
                        track.output = Some(fresh);
                    }
                    Err(err) => {
                        track.clock.pause(now);
                        return Err(err);
                    }
                }
            }
            return Ok(());
        }
        if let Err(err) = output.sink.try_seek(target) {
            debug!(target_secs = target.as_secs_f64(), "In-place seek failed ({err}); re-decoding");
            let was_playing = !output.sink.is_paused();
            output.sink.stop();
            let fresh = open_output(&track.bytes, target, volume)?;
            if was_playing {
                fresh.sink.play();
            }
            track.output = Some(fresh);
        }
        Ok(())
    }

    pub fn position(&self, now: Instant) -> f64 {
        self.track
            .as_ref()
            .map(|track| track.clock.position(now).as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn duration(&self) -> Option<f64> {
        self.track
            .as_ref()
            .and_then(|track| track.clock.duration())
            .map(|d| d.as_secs_f64())
    }

    pub fn is_playing(&self) -> bool {
        self.track
            .as_ref()
            .map(|track| track.clock.is_running())
            .unwrap_or(false)
    }

    /// Detect a drained sink. Returns true exactly once per end of track.
    pub fn poll_end(&mut self, now: Instant) -> bool {
        let Some(track) = self.track.as_mut() else {
            return false;
        };
        if !track.clock.is_running() {
            return false;
        }
        let drained = track
            .output
            .as_ref()
            .map(|output| output.sink.empty())
            .unwrap_or(false);
        if drained {
            track.clock.finish(now);
            track.output = None;
            info!("Audio track reached the end");
        }
        drained
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(output) = self.track.as_ref().and_then(|track| track.output.as_ref()) {
            output.sink.set_volume(volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn stop(&mut self) {
        if let Some(track) = self.track.take() {
            if let Some(output) = track.output {
                output.sink.stop();
            }
            debug!("Released audio source");
        }
    }
}

fn open_output(bytes: &SharedBytes, start: Duration, volume: f32) -> Result<Output> {
    let (stream, handle) = OutputStream::try_default().context("Opening audio output")?;
    let sink = Sink::try_new(&handle).context("Creating sink")?;
    let decoder = Decoder::new(Cursor::new(bytes.clone())).context("Decoding audio track")?;
    sink.pause();
    sink.set_volume(volume);
    sink.append(decoder.skip_duration(start));
    Ok(Output {
        _stream: Some(stream),
        sink,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Mono 16-bit PCM WAV of `samples` zero samples at 8 kHz.
    pub(crate) fn silent_wav(samples: u32) -> Vec<u8> {
        let data_len = samples * 2;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&8_000u32.to_le_bytes());
        bytes.extend_from_slice(&16_000u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        bytes
    }

    #[test]
    fn clock_accumulates_only_while_running() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new(None);
        assert_eq!(clock.position(start + Duration::from_secs(5)), Duration::ZERO);

        clock.start(start);
        clock.pause(start + Duration::from_secs(2));
        assert_eq!(clock.position(start + Duration::from_secs(9)), Duration::from_secs(2));

        clock.start(start + Duration::from_secs(10));
        assert_eq!(clock.position(start + Duration::from_secs(11)), Duration::from_secs(3));
    }

    #[test]
    fn clock_seek_rebases_running_clock() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new(Some(Duration::from_secs(60)));
        clock.start(start);
        clock.seek(Duration::from_secs(30), start + Duration::from_secs(4));
        assert_eq!(clock.position(start + Duration::from_secs(5)), Duration::from_secs(31));
        clock.seek(Duration::from_secs(600), start + Duration::from_secs(5));
        assert_eq!(clock.position(start + Duration::from_secs(5)), Duration::from_secs(60));
    }

    #[test]
    fn finished_clock_parks_at_duration() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new(Some(Duration::from_secs(8)));
        clock.start(start);
        clock.finish(start + Duration::from_secs(8));
        assert!(clock.is_finished());
        assert!(!clock.is_running());
        assert_eq!(clock.position(start + Duration::from_secs(20)), Duration::from_secs(8));
        clock.seek(Duration::ZERO, start);
        assert!(!clock.is_finished());
    }

    #[test]
    fn play_without_source_is_an_error() {
        let mut controller = AudioController::new(1.0);
        assert!(controller.play(Instant::now()).is_err());
        assert!(!controller.is_playing());
    }

    #[test]
    fn undecodable_source_is_rejected() {
        let mut controller = AudioController::new(1.0);
        assert!(controller.set_source(Arc::new(b"not audio".to_vec())).is_err());
        assert!(!controller.has_source());
    }

    #[test]
    fn bound_source_starts_paused_at_zero() {
        let mut controller = AudioController::new(0.5);
        controller
            .set_source(Arc::new(silent_wav(16_000)))
            .expect("wav decodes");
        assert!(controller.has_source());
        assert!(!controller.is_playing());
        assert_eq!(controller.position(Instant::now()), 0.0);
        let duration = controller.duration().expect("wav duration");
        assert!((duration - 2.0).abs() < 0.01);
    }

    #[test]
    fn seek_before_output_is_clamped() {
        let mut controller = AudioController::new(1.0);
        controller
            .set_source(Arc::new(silent_wav(8_000)))
            .expect("wav decodes");
        let now = Instant::now();
        controller.seek(30.0, now).expect("seek");
        assert!((controller.position(now) - 1.0).abs() < 0.01);
        controller.seek(f64::NAN, now).expect("seek");
        assert_eq!(controller.position(now), 0.0);
    }

    #[test]
    fn seek_on_drained_sink_never_leaves_clock_running_silently() {
        let mut controller = AudioController::new(1.0);
        controller
            .set_source(Arc::new(silent_wav(16_000)))
            .expect("wav decodes");
        let now = Instant::now();
        let (sink, _queue) = Sink::new_idle();
        let track = controller.track.as_mut().expect("track");
        track.output = Some(Output {
            _stream: None,
            sink,
        });
        track.clock.start(now);

        // Without an output device the reopen fails and the clock parks.
        let result = controller.seek(0.5, now);
        let track = controller.track.as_ref().expect("track");
        let live_sink = track
            .output
            .as_ref()
            .is_some_and(|output| !output.sink.empty());
        if controller.is_playing() {
            assert!(result.is_ok());
            assert!(live_sink);
        } else {
            assert!(result.is_err());
            assert!((controller.position(now) - 0.5).abs() < 0.01);
        }
    }
}
