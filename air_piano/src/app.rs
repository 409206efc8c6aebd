//! Top-level application state machine.
//!
//! `AppState` owns the zone map, the gesture tracker, the unified note
//! state, the synthesizer handle, the camera, and the frame pump, and is
//! mutated from exactly two entry points — [`AppState::handle_ui`] and
//! [`AppState::tick`] — both called from the single render-loop thread.
//! Each call runs to completion before the next, so every read-modify-write
//! on the shared note state is atomic by construction.

use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use thiserror::Error;

use gesture_zones::{column_zones, GestureEvent, HandLandmarks, Note, Zone, ZoneTracker};
use note_synth::Synth;

use crate::camera::SimCamera;
use crate::detector::{spawn_detector, DetectionResult, DetectorOptions, ModelStatus, SimDetector};
use crate::notes::ActiveNotes;
use crate::pump::FramePump;
use crate::visualizer::{Scene, UiEvent, Visualizer, WindowError};
use crate::watchdog::NoSignalWatchdog;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    pub detector: DetectorOptions,
    /// Linear volume, 0–1.
    pub volume: f32,
    pub watchdog_delay: Duration,
    /// Use the null synthesizer instead of a MIDI port.
    pub silent: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            detector: DetectorOptions::default(),
            volume: 0.7,
            watchdog_delay: NoSignalWatchdog::DEFAULT_DELAY,
            silent: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Audio backend lifecycle.  `Error` is sticky until the user retries.
#[derive(Clone, Debug, PartialEq, Eq)]
enum AudioState {
    Ready,
    Error(String),
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── gesture pipeline ─────────────────────────────────────────────────
    zones: Vec<Zone>,
    tracker: ZoneTracker,
    camera: SimCamera,
    pump: Option<FramePump>,
    model: Option<ModelStatus>,
    watchdog: NoSignalWatchdog,
    detector_options: DetectorOptions,
    /// Landmark snapshot of the last classified result, drawn as-is.
    last_hands: Vec<HandLandmarks>,

    // ── note state / audio ───────────────────────────────────────────────
    notes: ActiveNotes,
    synth: Synth,
    audio: AudioState,
    volume: f32,

    // ── toggles ──────────────────────────────────────────────────────────
    gesture_active: bool,
    sound_enabled: bool,
    silent: bool,

    // ── status message ───────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        AppState::with_camera(cfg, SimCamera::new())
    }

    fn with_camera(cfg: &AppConfig, camera: SimCamera) -> Self {
        let (synth, audio) = if cfg.silent {
            (Synth::silent(), AudioState::Ready)
        } else {
            match Synth::connect() {
                Ok(synth) => (synth, AudioState::Ready),
                Err(e) => {
                    tracing::warn!("audio initialization failed: {e}");
                    (Synth::silent(), AudioState::Error(e.to_string()))
                }
            }
        };
        synth.set_volume(cfg.volume);

        let mut app = AppState {
            zones: column_zones(),
            tracker: ZoneTracker::new(),
            camera,
            pump: None,
            model: None,
            watchdog: NoSignalWatchdog::new(cfg.watchdog_delay),
            detector_options: cfg.detector,
            last_hands: Vec::new(),
            notes: ActiveNotes::new(),
            synth,
            audio,
            volume: cfg.volume,
            gesture_active: false,
            sound_enabled: true,
            silent: cfg.silent,
            status: "press C to enable the camera, T for gesture mode".to_string(),
        };
        app.apply_sound_gate();
        app
    }

    // ── process one UiEvent ──────────────────────────────────────────────

    pub fn handle_ui(&mut self, event: UiEvent) {
        match event {
            UiEvent::Pointer(p) => self.camera.set_pointer(p),

            UiEvent::KeyPress(note) => {
                if self.notes.press(note) {
                    self.synth.note_on(note);
                    self.status = format!("key {note} down  {:.1} hz", note.frequency());
                }
            }
            UiEvent::KeyRelease(note) => {
                if self.notes.release(note) {
                    self.synth.note_off(note);
                }
            }

            UiEvent::StartCamera => self.start_camera(),
            UiEvent::ToggleGesture => self.set_gesture_active(!self.gesture_active),

            UiEvent::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
                self.apply_sound_gate();
                self.status = if self.sound_enabled {
                    "sound on".to_string()
                } else {
                    "sound muted".to_string()
                };
            }

            UiEvent::VolumeDelta(d) => {
                self.volume = (self.volume + d).clamp(0.0, 1.0);
                self.synth.set_volume(self.volume);
                self.status = format!("volume {}", (self.volume * 100.0).round());
            }

            UiEvent::RetryAudio => self.retry_audio(),
            UiEvent::Quit => {} // handled by the run loop
        }
    }

    // ── Per-frame tick ───────────────────────────────────────────────────

    pub fn tick(&mut self, now: Instant) {
        let mut result = None;
        if let Some(pump) = self.pump.as_mut() {
            result = pump.tick(&mut self.camera, self.gesture_active);
            self.model = Some(pump.model_status());
        }
        if let Some(res) = result {
            self.on_detection(res, now);
        }
        self.watchdog.poll(now);
    }

    /// Handle one detection result: classify, emit note transitions, feed
    /// the watchdog — all against the same landmark snapshot the renderer
    /// will draw this frame.
    fn on_detection(&mut self, res: DetectionResult, now: Instant) {
        if !self.gesture_active {
            // A submission can still be in flight when gesture mode goes
            // off; its late result must not revive anything.
            return;
        }
        self.last_hands = res.hands;

        for event in self.tracker.update(&self.last_hands, &self.zones) {
            match event {
                GestureEvent::Enter { note, at } => {
                    if self.notes.press(note) {
                        self.synth.note_on(note);
                    }
                    tracing::debug!(%note, x = at.x, y = at.y, "gesture enter");
                    self.status = format!("gesture {note} at ({:.2}, {:.2})", at.x, at.y);
                }
                GestureEvent::Exit { note } => {
                    if self.notes.release(note) {
                        self.synth.note_off(note);
                    }
                }
            }
        }

        self.watchdog.observe(self.last_hands.len(), now);
    }

    // ── camera / gesture / audio transitions ─────────────────────────────

    fn start_camera(&mut self) {
        match self.camera.start() {
            Ok(()) => {
                if self.pump.is_none() {
                    let handle = spawn_detector(SimDetector::new(), self.detector_options);
                    self.pump = Some(FramePump::new(handle));
                    self.model = Some(ModelStatus::Loading);
                }
                self.status = "camera live, hand model loading".to_string();
            }
            Err(e) => {
                self.status = format!("camera unavailable: {e} — press C to retry");
            }
        }
    }

    fn set_gesture_active(&mut self, active: bool) {
        if self.gesture_active == active {
            return;
        }
        self.gesture_active = active;
        if active {
            self.status = "gesture detection on".to_string();
        } else {
            // Release every gesture hold so nothing sounds forever; manual
            // holds keep their count.
            for event in self.tracker.flush() {
                if let GestureEvent::Exit { note } = event {
                    if self.notes.release(note) {
                        self.synth.note_off(note);
                    }
                }
            }
            self.watchdog.reset();
            self.last_hands.clear();
            self.status = "gesture detection off".to_string();
        }
    }

    fn retry_audio(&mut self) {
        if self.silent || self.audio == AudioState::Ready {
            return;
        }
        match Synth::connect() {
            Ok(synth) => {
                self.synth.quit();
                self.synth = synth;
                self.synth.set_volume(self.volume);
                self.audio = AudioState::Ready;
                self.apply_sound_gate();
                // Audible confirmation that the port is back.
                self.synth.one_shot(Note::C, Duration::from_millis(150));
                self.status = "audio ready".to_string();
            }
            Err(e) => {
                tracing::warn!("audio retry failed: {e}");
                self.audio = AudioState::Error(e.to_string());
                self.status = "audio still unavailable".to_string();
            }
        }
    }

    /// Notes may sound only while sound is enabled *and* audio is up.
    /// Closing the gate drains everything, each voice stopped exactly once.
    fn apply_sound_gate(&mut self) {
        let open = self.sound_enabled && self.audio == AudioState::Ready;
        for note in self.notes.set_enabled(open) {
            self.synth.note_off(note);
        }
    }

    // ── Accessors for the render loop ────────────────────────────────────

    pub fn is_sounding(&self, note: Note) -> bool {
        self.notes.is_sounding(note)
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            zones: &self.zones,
            hands: &self.last_hands,
            sounding: self.notes.sounding(),
            stats: self.pump.as_ref().map(|p| p.stats()).unwrap_or_default(),
            model: self.model,
            camera_on: self.camera.is_streaming(),
            gesture_active: self.gesture_active,
            sound_enabled: self.sound_enabled,
            volume: self.volume,
            show_tip: self.watchdog.tip_visible(),
            audio_error: match &self.audio {
                AudioState::Error(msg) => Some(msg.as_str()),
                AudioState::Ready => None,
            },
            status: &self.status,
        }
    }

    /// Tear everything down: silence the notes, end the synth worker,
    /// release the camera, and disconnect the detector worker.
    pub fn shutdown(&mut self) {
        for note in self.notes.set_enabled(false) {
            self.synth.note_off(note);
        }
        self.synth.quit();
        self.camera.stop();
        self.pump = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the window and the app state, then drives input → tick → render
/// at ~60 fps until the window closes or the user quits.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>();
    let mut vis = Visualizer::new(ui_tx)?;
    let mut app = AppState::new(&cfg);

    while vis.is_open() {
        let keep_going = vis.poll_input();

        loop {
            match ui_rx.try_recv() {
                Ok(UiEvent::Quit) => {
                    app.shutdown();
                    return Ok(());
                }
                Ok(event) => app.handle_ui(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.shutdown();
                    return Ok(());
                }
            }
        }
        if !keep_going {
            break;
        }

        app.tick(Instant::now());
        vis.render(&app.scene());
    }

    app.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_zones::{landmarks, Landmark, NormalizedPoint, LANDMARKS_PER_HAND};
    use std::thread;

    fn make_app() -> AppState {
        let cfg = AppConfig { silent: true, ..AppConfig::default() };
        AppState::with_camera(&cfg, SimCamera::new())
    }

    fn hand_at(x: f32, y: f32) -> HandLandmarks {
        let mut points = vec![Landmark::default(); LANDMARKS_PER_HAND];
        points[landmarks::INDEX_FINGER_TIP] = Landmark { x, y, z: 0.0 };
        HandLandmarks::new(points)
    }

    fn detection(hands: Vec<HandLandmarks>) -> DetectionResult {
        DetectionResult { hands, frame_seq: 0, completed_at: Instant::now() }
    }

    #[test]
    fn manual_press_and_release() {
        let mut app = make_app();
        app.handle_ui(UiEvent::KeyPress(Note::C));
        assert!(app.is_sounding(Note::C));
        app.handle_ui(UiEvent::KeyRelease(Note::C));
        assert!(!app.is_sounding(Note::C));
    }

    #[test]
    fn gesture_and_click_hold_the_same_note_independently() {
        let mut app = make_app();
        app.set_gesture_active(true);

        // Fingertip in F's zone, plus a manual click on F.
        let now = Instant::now();
        app.on_detection(detection(vec![hand_at(0.5, 0.5)]), now);
        app.handle_ui(UiEvent::KeyPress(Note::F));
        assert!(app.is_sounding(Note::F));

        // The hand leaves: the click still holds the note.
        app.on_detection(detection(Vec::new()), now);
        assert!(app.is_sounding(Note::F));

        // The click releases: now it stops.
        app.handle_ui(UiEvent::KeyRelease(Note::F));
        assert!(!app.is_sounding(Note::F));
    }

    #[test]
    fn muting_sound_drains_every_note() {
        let mut app = make_app();
        app.handle_ui(UiEvent::KeyPress(Note::C));
        app.handle_ui(UiEvent::KeyPress(Note::E));

        app.handle_ui(UiEvent::ToggleSound);
        assert!(app.scene().sounding.is_empty());

        // Muted: presses are ignored.
        app.handle_ui(UiEvent::KeyPress(Note::G));
        assert!(!app.is_sounding(Note::G));

        app.handle_ui(UiEvent::ToggleSound);
        app.handle_ui(UiEvent::KeyPress(Note::G));
        assert!(app.is_sounding(Note::G));
    }

    #[test]
    fn gesture_toggle_off_releases_only_gesture_holds() {
        let mut app = make_app();
        app.set_gesture_active(true);
        app.on_detection(detection(vec![hand_at(0.5, 0.5)]), Instant::now());
        app.handle_ui(UiEvent::KeyPress(Note::C));
        assert!(app.is_sounding(Note::F) && app.is_sounding(Note::C));

        app.handle_ui(UiEvent::ToggleGesture);
        assert!(!app.is_sounding(Note::F), "gesture hold must flush");
        assert!(app.is_sounding(Note::C), "manual hold must survive");
    }

    #[test]
    fn late_result_after_gesture_off_is_ignored() {
        let mut app = make_app();
        app.set_gesture_active(true);
        app.set_gesture_active(false);
        app.on_detection(detection(vec![hand_at(0.5, 0.5)]), Instant::now());
        assert!(!app.is_sounding(Note::F));
        assert!(app.scene().hands.is_empty());
    }

    #[test]
    fn volume_clamps_to_unit_range() {
        let mut app = make_app();
        for _ in 0..40 {
            app.handle_ui(UiEvent::VolumeDelta(0.05));
        }
        assert_eq!(app.scene().volume, 1.0);
        for _ in 0..80 {
            app.handle_ui(UiEvent::VolumeDelta(-0.05));
        }
        assert_eq!(app.scene().volume, 0.0);
    }

    #[test]
    fn denied_camera_is_retryable_and_starts_no_pump() {
        let cfg = AppConfig { silent: true, ..AppConfig::default() };
        let mut app = AppState::with_camera(&cfg, SimCamera::denied());

        app.handle_ui(UiEvent::StartCamera);
        assert!(!app.scene().camera_on);
        assert!(app.pump.is_none());
        assert!(app.status.contains("retry"));

        // A second attempt is just another attempt, not a crash.
        app.handle_ui(UiEvent::StartCamera);
        assert!(app.pump.is_none());
    }

    #[test]
    fn watchdog_tip_shows_and_clears() {
        let cfg = AppConfig {
            silent: true,
            watchdog_delay: Duration::from_millis(100),
            ..AppConfig::default()
        };
        let mut app = AppState::with_camera(&cfg, SimCamera::new());
        app.set_gesture_active(true);

        let t0 = Instant::now();
        app.on_detection(detection(Vec::new()), t0);
        app.tick(t0 + Duration::from_millis(200));
        assert!(app.scene().show_tip);

        app.on_detection(detection(vec![hand_at(0.5, 0.5)]), t0 + Duration::from_millis(300));
        assert!(!app.scene().show_tip);
    }

    #[test]
    fn pipeline_plays_f_for_a_centred_fingertip() {
        let mut app = make_app();
        app.handle_ui(UiEvent::StartCamera);
        app.handle_ui(UiEvent::ToggleGesture);
        app.handle_ui(UiEvent::Pointer(Some(NormalizedPoint::new(0.5, 0.5))));

        // Drive the loop until the detection round trip lands.
        for _ in 0..400 {
            app.tick(Instant::now());
            if app.is_sounding(Note::F) {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(app.is_sounding(Note::F));
        assert_eq!(app.scene().stats.hands, 1);

        // Hand leaves the frame: the note releases.
        app.handle_ui(UiEvent::Pointer(None));
        for _ in 0..400 {
            app.tick(Instant::now());
            if !app.is_sounding(Note::F) {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.is_sounding(Note::F));

        app.shutdown();
        assert!(!app.scene().camera_on);
    }
}
