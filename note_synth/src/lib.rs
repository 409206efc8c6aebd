//! # note_synth
//!
//! The synthesizer boundary of the air piano.  Notes are held, released, or
//! fired as one-shots by a playback worker thread that owns the actual
//! output backend; the rest of the application talks to it through a
//! [`Synth`] handle over a command channel.
//!
//! Backends implement the private `ToneOut` trait.  The default backend is
//! a MIDI output port via `midir` (a softsynth is preferred when several
//! ports are visible); [`Synth::silent`] gives a null backend for tests and
//! `--silent` runs.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gesture_zones::Note;
//! use note_synth::Synth;
//! use std::time::Duration;
//!
//! let synth = Synth::connect()?;      // Err when no usable MIDI port
//! synth.set_volume(0.7);              // linear 0–1, converted to dB
//! synth.note_on(Note::C);
//! synth.note_off(Note::C);
//! synth.one_shot(Note::G, Duration::from_millis(150));
//! synth.quit();
//! # Ok::<(), note_synth::SynthError>(())
//! ```

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use gesture_zones::{Note, NOTES};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Volume law
// ════════════════════════════════════════════════════════════════════════════

/// Attenuation floor treated as silence.
pub const SILENCE_DB: f32 = -60.0;

/// Convert a linear volume in `[0, 1]` to decibels, `20·log10(v)`, clamped
/// to `[-60, 0]`.  Zero (log's −∞) lands on the −60 dB silence floor.
pub fn volume_to_db(v: f32) -> f32 {
    if v <= 0.0 {
        return SILENCE_DB;
    }
    (20.0 * v.log10()).clamp(SILENCE_DB, 0.0)
}

/// Map a dB attenuation in `[-60, 0]` onto MIDI channel volume (CC 7,
/// 0–127).
pub fn db_to_cc(db: f32) -> u8 {
    let norm = ((db - SILENCE_DB) / -SILENCE_DB).clamp(0.0, 1.0);
    (norm * 127.0).round() as u8
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Why the synthesizer could not be brought up.  All variants are
/// user-retryable; nothing here is raised after a successful connect.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("MIDI subsystem unavailable: {0}")]
    Init(String),
    #[error("no MIDI output ports found (install a synthesiser such as fluidsynth or timidity)")]
    NoPorts,
    #[error("failed to connect to MIDI port \"{port}\": {reason}")]
    Connect { port: String, reason: String },
}

// ════════════════════════════════════════════════════════════════════════════
// ToneOut — abstraction over midir / null
// ════════════════════════════════════════════════════════════════════════════

trait ToneOut: Send {
    fn note_on(&mut self, note: Note, velocity: u8);
    fn note_off(&mut self, note: Note);
    fn set_volume(&mut self, db: f32);
    fn all_off(&mut self) {
        for note in NOTES {
            self.note_off(note);
        }
    }
}

// ── midir backend ─────────────────────────────────────────────────────────

struct MidirOut {
    conn: midir::MidiOutputConnection,
    channel: u8,
}

impl ToneOut for MidirOut {
    fn note_on(&mut self, note: Note, velocity: u8) {
        let _ = self
            .conn
            .send(&[0x90 | (self.channel & 0x0F), note.midi_number(), velocity]);
    }
    fn note_off(&mut self, note: Note) {
        let _ = self
            .conn
            .send(&[0x80 | (self.channel & 0x0F), note.midi_number(), 0]);
    }
    fn set_volume(&mut self, db: f32) {
        let _ = self
            .conn
            .send(&[0xB0 | (self.channel & 0x0F), 7, db_to_cc(db)]);
    }
}

// ── null backend ──────────────────────────────────────────────────────────

struct NullOut;
impl ToneOut for NullOut {
    fn note_on(&mut self, _n: Note, _v: u8) {}
    fn note_off(&mut self, _n: Note) {}
    fn set_volume(&mut self, _db: f32) {}
}

// ════════════════════════════════════════════════════════════════════════════
// open_midi_output — enumerate ports and pick the first usable one
// ════════════════════════════════════════════════════════════════════════════

/// Open the first available MIDI output port, preferring a softsynth when
/// one is visible.  Unlike a silent fallback, failure is returned to the
/// caller: the application decides whether to retry or run without sound.
fn open_midi_output() -> Result<MidirOut, SynthError> {
    let midi_out =
        midir::MidiOutput::new("air_piano").map_err(|e| SynthError::Init(e.to_string()))?;

    let ports = midi_out.ports();
    if ports.is_empty() {
        return Err(SynthError::NoPorts);
    }

    let port_idx = ports
        .iter()
        .enumerate()
        .find(|(_, p)| {
            midi_out
                .port_name(p)
                .map(|n| {
                    let n = n.to_lowercase();
                    n.contains("fluid")
                        || n.contains("timidity")
                        || n.contains("microsoft")
                        || n.contains("gm")
                        || n.contains("synth")
                })
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let port = &ports[port_idx];
    let name = midi_out
        .port_name(port)
        .unwrap_or_else(|_| "Unknown".to_string());
    tracing::info!(port = %name, "opening MIDI output");

    match midi_out.connect(port, "air-piano") {
        Ok(conn) => Ok(MidirOut { conn, channel: 0 }),
        Err(e) => Err(SynthError::Connect {
            port: name,
            reason: e.to_string(),
        }),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Synth — handle to the playback thread
// ════════════════════════════════════════════════════════════════════════════

enum SynthCommand {
    NoteOn(Note),
    NoteOff(Note),
    OneShot(Note, Duration),
    /// Volume already converted to dB.
    SetVolume(f32),
    Quit,
}

/// Velocity for every voice; the gesture path carries no pressure signal.
pub const DEFAULT_VELOCITY: u8 = 100;

/// Handle to the playback worker thread.
///
/// All methods are fire-and-forget sends; a worker that has already quit
/// swallows them silently.  Dropping the handle disconnects the channel and
/// the worker silences everything and exits.
pub struct Synth {
    cmd_tx: Sender<SynthCommand>,
}

impl Synth {
    /// Connect to a real MIDI output.  Initialization failure is the
    /// caller's to surface — typically as a user-retryable audio state.
    pub fn connect() -> Result<Synth, SynthError> {
        let out = open_midi_output()?;
        Ok(Synth::spawn(Box::new(out)))
    }

    /// A synth that accepts every command and produces no sound.
    pub fn silent() -> Synth {
        Synth::spawn(Box::new(NullOut))
    }

    fn spawn(out: Box<dyn ToneOut>) -> Synth {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        thread::spawn(move || synth_thread(out, cmd_rx));
        Synth { cmd_tx }
    }

    /// Start holding a note.
    pub fn note_on(&self, note: Note) {
        let _ = self.cmd_tx.send(SynthCommand::NoteOn(note));
    }

    /// Release a held note.
    pub fn note_off(&self, note: Note) {
        let _ = self.cmd_tx.send(SynthCommand::NoteOff(note));
    }

    /// Sound a note for `duration`; the worker releases it on schedule.
    pub fn one_shot(&self, note: Note, duration: Duration) {
        let _ = self.cmd_tx.send(SynthCommand::OneShot(note, duration));
    }

    /// Linear volume in `[0, 1]`; converted to the backend's dB scale.
    pub fn set_volume(&self, linear: f32) {
        let _ = self
            .cmd_tx
            .send(SynthCommand::SetVolume(volume_to_db(linear)));
    }

    /// Silence every voice and end the playback thread.
    pub fn quit(&self) {
        let _ = self.cmd_tx.send(SynthCommand::Quit);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// synth_thread — the worker loop
// ════════════════════════════════════════════════════════════════════════════

fn synth_thread(mut out: Box<dyn ToneOut>, cmd_rx: Receiver<SynthCommand>) {
    // Scheduled releases for in-flight one-shots.
    let mut pending_off: Vec<(Note, Instant)> = Vec::new();

    loop {
        let now = Instant::now();
        let wait = pending_off
            .iter()
            .map(|&(_, due)| due.saturating_duration_since(now))
            .min()
            .unwrap_or(Duration::from_millis(50));

        match cmd_rx.recv_timeout(wait) {
            Ok(SynthCommand::NoteOn(note)) => out.note_on(note, DEFAULT_VELOCITY),
            Ok(SynthCommand::NoteOff(note)) => out.note_off(note),
            Ok(SynthCommand::OneShot(note, duration)) => {
                out.note_on(note, DEFAULT_VELOCITY);
                pending_off.push((note, Instant::now() + duration));
            }
            Ok(SynthCommand::SetVolume(db)) => out.set_volume(db),
            Ok(SynthCommand::Quit) | Err(RecvTimeoutError::Disconnected) => {
                out.all_off();
                return;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        let now = Instant::now();
        pending_off.retain(|&(note, due)| {
            if due <= now {
                out.note_off(note);
                false
            } else {
                true
            }
        });
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
