//! Software-rendered window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌────────────────────────────────────┬───────────────────┐
//! │  CAMERA VIEW                       │  GESTURE / SOUND  │
//! │   zone strips + note letters       │  indicators       │
//! │   landmark dots, index tip in red  │                   │
//! │   stats line (hands / fps / model) │  PIANO KEYS       │
//! │   [no-hand tip overlay]            │  [C][D]…[B]       │
//! │                                    │  volume bar       │
//! │  status bar                        │  playing readout  │
//! │  key legend                                            │
//! └────────────────────────────────────┴───────────────────┘
//! ```
//!
//! Input is polled once per frame and translated into [`UiEvent`]s on an
//! mpsc channel; the window never touches application state directly.  The
//! mouse cursor over the camera panel doubles as the simulated fingertip.

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use thiserror::Error;

use gesture_zones::{HandLandmarks, NormalizedPoint, Note, Zone, NOTES};

use crate::detector::ModelStatus;
use crate::pump::DetectionStats;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 1180;
pub const WIN_H: usize = 560;

const CAM_X: usize = 16;
const CAM_Y: usize = 56;
const CAM_W: usize = 740;
const CAM_H: usize = 420;

const PIANO_X: usize = 772;
const KEY_W: usize = 48;
const KEY_GAP: usize = 6;
const KEY_H: usize = 210;
const KEYS_Y: usize = 140;
const VOL_Y: usize = 392;

const STATUS_Y: usize = WIN_H - 36;

const BG_COLOR: u32 = 0xFF1A1A2E;
const CAM_BG: u32 = 0xFF10101C;
const TEXT_BG: u32 = 0xFF0F3460;
const ZONE_COLOR: u32 = 0xFF3B82F6;
const LANDMARK_COLOR: u32 = 0xFF00FF00;
const TIP_COLOR: u32 = 0xFFFF0000;
const KEY_IDLE: u32 = 0xFFE5E7EB;
const KEY_ACTIVE: u32 = 0xFF3B82F6;
const OK_COLOR: u32 = 0xFF4ADE80;
const WARN_COLOR: u32 = 0xFFFFC44D;
const ERR_COLOR: u32 = 0xFFFF6B6B;
const DIM_COLOR: u32 = 0xFF888888;

/// Keyboard piano row: A..J play C..B.
const NOTE_KEYS: [(Key, Note); 7] = [
    (Key::A, Note::C),
    (Key::S, Note::D),
    (Key::D, Note::E),
    (Key::F, Note::F),
    (Key::G, Note::G),
    (Key::H, Note::A),
    (Key::J, Note::B),
];

// ════════════════════════════════════════════════════════════════════════════
// UiEvent
// ════════════════════════════════════════════════════════════════════════════

/// Raw user intent from the window, consumed by the app state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// Simulated fingertip moved (None = left the camera panel).
    Pointer(Option<NormalizedPoint>),
    /// Manual key down (mouse on a piano key, or the keyboard row).
    KeyPress(Note),
    /// Manual key up (button released, or cursor left the held key).
    KeyRelease(Note),
    StartCamera,
    ToggleGesture,
    ToggleSound,
    VolumeDelta(f32),
    RetryAudio,
    Quit,
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to open window: {0}")]
    Create(String),
}

// ════════════════════════════════════════════════════════════════════════════
// Scene — one frame's render snapshot
// ════════════════════════════════════════════════════════════════════════════

/// Everything the renderer needs for one frame, snapshotted by the app so
/// the drawn landmarks are the ones that were classified.
pub struct Scene<'a> {
    pub zones: &'a [Zone],
    pub hands: &'a [HandLandmarks],
    pub sounding: Vec<Note>,
    pub stats: DetectionStats,
    pub model: Option<ModelStatus>,
    pub camera_on: bool,
    pub gesture_active: bool,
    pub sound_enabled: bool,
    pub volume: f32,
    pub show_tip: bool,
    pub audio_error: Option<&'a str>,
    pub status: &'a str,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    ui_tx: Sender<UiEvent>,

    // input edge state
    prev_mouse_down: bool,
    held_key: Option<Note>,
    prev_note_down: [bool; 7],
    last_pointer: Option<NormalizedPoint>,
}

impl Visualizer {
    pub fn new(ui_tx: Sender<UiEvent>) -> Result<Self, WindowError> {
        let mut window = Window::new(
            "Air Piano — play notes with your hands",
            WIN_W,
            WIN_H,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )
        .map_err(|e| WindowError::Create(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            ui_tx,
            prev_mouse_down: false,
            held_key: None,
            prev_note_down: [false; 7],
            last_pointer: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll window input and translate to UiEvents.  Returns false when the
    /// window wants to close.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        let one_shot = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::No);

        if one_shot(&self.window, Key::Q) {
            let _ = self.ui_tx.send(UiEvent::Quit);
            return false;
        }
        if one_shot(&self.window, Key::C) {
            let _ = self.ui_tx.send(UiEvent::StartCamera);
        }
        if one_shot(&self.window, Key::T) {
            let _ = self.ui_tx.send(UiEvent::ToggleGesture);
        }
        if one_shot(&self.window, Key::M) {
            let _ = self.ui_tx.send(UiEvent::ToggleSound);
        }
        if one_shot(&self.window, Key::R) {
            let _ = self.ui_tx.send(UiEvent::RetryAudio);
        }
        if self.window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            let _ = self.ui_tx.send(UiEvent::VolumeDelta(0.05));
        }
        if self.window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            let _ = self.ui_tx.send(UiEvent::VolumeDelta(-0.05));
        }

        // Keyboard piano row, edge-detected so holds behave like holds.
        for (i, (key, note)) in NOTE_KEYS.iter().enumerate() {
            let down = self.window.is_key_down(*key);
            if down && !self.prev_note_down[i] {
                let _ = self.ui_tx.send(UiEvent::KeyPress(*note));
            }
            if !down && self.prev_note_down[i] {
                let _ = self.ui_tx.send(UiEvent::KeyRelease(*note));
            }
            self.prev_note_down[i] = down;
        }

        // Mouse: fingertip over the camera panel, clicks on the piano.
        let pos = self.window.get_mouse_pos(MouseMode::Discard);
        let down = self.window.get_mouse_down(MouseButton::Left);

        let pointer = pos.and_then(|(mx, my)| camera_point(mx, my));
        if pointer != self.last_pointer {
            let _ = self.ui_tx.send(UiEvent::Pointer(pointer));
            self.last_pointer = pointer;
        }

        let hover = pos.and_then(|(mx, my)| key_at(mx, my));
        match self.held_key {
            None => {
                if down && !self.prev_mouse_down {
                    if let Some(note) = hover {
                        let _ = self.ui_tx.send(UiEvent::KeyPress(note));
                        self.held_key = Some(note);
                    }
                }
            }
            Some(held) => {
                if !down || hover != Some(held) {
                    let _ = self.ui_tx.send(UiEvent::KeyRelease(held));
                    self.held_key = None;
                }
            }
        }
        self.prev_mouse_down = down;

        true
    }

    // ── Render ────────────────────────────────────────────────────────────

    pub fn render(&mut self, scene: &Scene) {
        self.buf.fill(BG_COLOR);

        self.draw_label_scaled("AIR PIANO", CAM_X, 16, 3, 0xFFEEEEEE);
        self.draw_label(
            "move a hand over the zones or click the keys",
            CAM_X + 180,
            26,
            DIM_COLOR,
        );

        self.draw_camera_panel(scene);
        self.draw_side_panel(scene);

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(scene.status, 10, STATUS_Y + 8, 0xFFEEEEEE);
        self.draw_label(
            "mouse=hand  click keys / A-J=notes  C=camera  T=gesture  M=sound  Up/Down=volume  R=audio  Q=quit",
            10,
            WIN_H - 14,
            DIM_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Camera panel ──────────────────────────────────────────────────────

    fn draw_camera_panel(&mut self, scene: &Scene) {
        self.fill_rect(CAM_X, CAM_Y, CAM_W, CAM_H, CAM_BG);
        self.draw_border(CAM_X, CAM_Y, CAM_W, CAM_H, TEXT_BG);

        if !scene.camera_on {
            self.draw_label_scaled(
                "press C to enable the camera",
                CAM_X + CAM_W / 2 - 170,
                CAM_Y + CAM_H / 2 - 8,
                2,
                DIM_COLOR,
            );
            return;
        }

        // Zone strips, brightened while their note sounds.
        for zone in scene.zones {
            let (zx, zy) = to_panel(zone.bounds.x, zone.bounds.y);
            let zw = (zone.bounds.width * CAM_W as f32) as usize;
            let zh = (zone.bounds.height * CAM_H as f32) as usize;
            let active = scene.sounding.contains(&zone.note);

            let fill = blend(CAM_BG, ZONE_COLOR, if active { 0.45 } else { 0.12 });
            self.fill_rect(zx, zy, zw, zh, fill);
            self.draw_border(zx, zy, zw, zh, ZONE_COLOR);

            let label_color = if active { 0xFFFFFFFF } else { ZONE_COLOR };
            self.draw_label_scaled(
                zone.note.name(),
                zx + zw / 2 - 4,
                zy + zh / 2 - 7,
                3,
                label_color,
            );
        }

        // Landmarks from the same snapshot that was classified.
        for hand in scene.hands {
            for (i, lm) in hand.points.iter().enumerate() {
                let (px, py) = to_panel(lm.x, lm.y);
                if i == gesture_zones::landmarks::INDEX_FINGER_TIP {
                    self.fill_circle(px, py, 6, TIP_COLOR);
                } else {
                    self.fill_circle(px, py, 3, LANDMARK_COLOR);
                }
            }
        }

        // Stats line.
        let model = match scene.model {
            None => "off",
            Some(ModelStatus::Loading) => "loading",
            Some(ModelStatus::Ready) => "ready",
            Some(ModelStatus::Error) => "error",
        };
        let stats = format!(
            "hands: {}   fps: {:.0}   model: {}",
            scene.stats.hands, scene.stats.fps, model
        );
        self.fill_rect(CAM_X + 6, CAM_Y + 6, 230, 14, TEXT_BG);
        self.draw_label(&stats, CAM_X + 12, CAM_Y + 10, 0xFFEEEEEE);

        // No-hand advisory.
        if scene.show_tip {
            let bx = CAM_X + CAM_W / 2 - 180;
            let by = CAM_Y + CAM_H / 2 - 30;
            self.fill_rect(bx, by, 360, 60, TEXT_BG);
            self.draw_border(bx, by, 360, 60, WARN_COLOR);
            self.draw_label_scaled("hand not detected", bx + 60, by + 12, 2, WARN_COLOR);
            self.draw_label(
                "move closer, improve lighting, show your palm",
                bx + 40,
                by + 40,
                0xFFEEEEEE,
            );
        }
    }

    // ── Side panel: indicators, piano, volume ─────────────────────────────

    fn draw_side_panel(&mut self, scene: &Scene) {
        let (gesture_color, gesture_text) = if scene.gesture_active {
            (OK_COLOR, "gesture: on")
        } else {
            (DIM_COLOR, "gesture: off")
        };
        let (sound_color, sound_text) = if scene.sound_enabled {
            (OK_COLOR, "sound: on")
        } else {
            (DIM_COLOR, "sound: muted")
        };

        self.fill_circle(PIANO_X + 4, 62, 3, gesture_color);
        self.draw_label(gesture_text, PIANO_X + 14, 58, gesture_color);
        self.fill_circle(PIANO_X + 4, 80, 3, sound_color);
        self.draw_label(sound_text, PIANO_X + 14, 76, sound_color);

        if let Some(err) = scene.audio_error {
            self.draw_label("audio error - press R to retry", PIANO_X, 94, ERR_COLOR);
            self.draw_label(err, PIANO_X, 106, ERR_COLOR);
        } else {
            self.draw_label("audio: ready", PIANO_X, 94, OK_COLOR);
        }

        // Keys.
        for (i, &note) in NOTES.iter().enumerate() {
            let kx = PIANO_X + i * (KEY_W + KEY_GAP);
            let active = scene.sounding.contains(&note);
            let fill = if active { KEY_ACTIVE } else { KEY_IDLE };

            self.fill_rect(kx, KEYS_Y, KEY_W, KEY_H, fill);
            self.draw_border(kx, KEYS_Y, KEY_W, KEY_H, 0xFF404040);

            let label_color = if active { 0xFFFFFFFF } else { 0xFF333333 };
            self.draw_label_scaled(note.name(), kx + KEY_W / 2 - 3, KEYS_Y + KEY_H - 24, 2, label_color);
            if active {
                self.fill_circle(kx + KEY_W / 2, KEYS_Y + 14, 4, 0xFFBFDBFE);
            }
        }

        // Volume bar.
        let vol_w = 7 * (KEY_W + KEY_GAP) - KEY_GAP;
        let pct = (scene.volume * 100.0).round() as u32;
        self.draw_label(&format!("volume: {pct}"), PIANO_X, VOL_Y - 14, 0xFFEEEEEE);
        self.fill_rect(PIANO_X, VOL_Y, vol_w, 10, TEXT_BG);
        let filled = (scene.volume.clamp(0.0, 1.0) * vol_w as f32) as usize;
        self.fill_rect(PIANO_X, VOL_Y, filled, 10, KEY_ACTIVE);
        self.draw_border(PIANO_X, VOL_Y, vol_w, 10, DIM_COLOR);

        // Playing readout.
        let readout = if scene.sounding.is_empty() {
            "no notes playing".to_string()
        } else {
            let names: Vec<&str> = scene.sounding.iter().map(|n| n.name()).collect();
            format!("playing: {}", names.join(" "))
        };
        self.draw_label(&readout, PIANO_X, VOL_Y + 24, 0xFFAADDFF);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 {
            return;
        }
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    fn fill_circle(&mut self, cx: usize, cy: usize, r: usize, color: u32) {
        let r = r as isize;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    let sx = cx as isize + dx;
                    let sy = cy as isize + dy;
                    if sx >= 0 && sy >= 0 {
                        self.set_pixel(sx as usize, sy as usize, color);
                    }
                }
            }
        }
    }

    /// Minimal bitmap font — 3×5 characters for labels.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        self.draw_label_scaled(text, x, y, 1, color);
    }

    fn draw_label_scaled(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Hit testing / coordinate mapping
// ────────────────────────────────────────────────────────────────────────────

/// Window pixel → normalized camera-frame point, if inside the panel.
fn camera_point(mx: f32, my: f32) -> Option<NormalizedPoint> {
    let x = (mx - CAM_X as f32) / CAM_W as f32;
    let y = (my - CAM_Y as f32) / CAM_H as f32;
    if (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y) {
        Some(NormalizedPoint::new(x, y))
    } else {
        None
    }
}

/// Window pixel → piano key under the cursor.
fn key_at(mx: f32, my: f32) -> Option<Note> {
    if my < KEYS_Y as f32 || my >= (KEYS_Y + KEY_H) as f32 {
        return None;
    }
    for (i, &note) in NOTES.iter().enumerate() {
        let kx = (PIANO_X + i * (KEY_W + KEY_GAP)) as f32;
        if mx >= kx && mx < kx + KEY_W as f32 {
            return Some(note);
        }
    }
    None
}

/// Normalized camera-frame point → panel pixel.
fn to_panel(x: f32, y: f32) -> (usize, usize) {
    let px = CAM_X as f32 + x.clamp(0.0, 1.0) * CAM_W as f32;
    let py = CAM_Y as f32 + y.clamp(0.0, 1.0) * CAM_H as f32;
    (px as usize, py as usize)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF;
    let br = (b >> 16) & 0xFF;
    let ag = (a >> 8) & 0xFF;
    let bg = (b >> 8) & 0xFF;
    let ab = a & 0xFF;
    let bb = b & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_point_maps_the_panel_corners() {
        let p = camera_point(CAM_X as f32, CAM_Y as f32).unwrap();
        assert!((p.x, p.y) == (0.0, 0.0));

        let p = camera_point((CAM_X + CAM_W) as f32, (CAM_Y + CAM_H) as f32).unwrap();
        assert!((p.x - 1.0).abs() < 1e-6 && (p.y - 1.0).abs() < 1e-6);

        assert!(camera_point(2.0, 2.0).is_none());
        assert!(camera_point((CAM_X + CAM_W + 10) as f32, CAM_Y as f32).is_none());
    }

    #[test]
    fn key_hit_testing_matches_the_layout() {
        // Centre of the first key is C, of the last is B.
        let first = (PIANO_X + KEY_W / 2) as f32;
        assert_eq!(key_at(first, (KEYS_Y + 10) as f32), Some(Note::C));

        let last = (PIANO_X + 6 * (KEY_W + KEY_GAP) + KEY_W / 2) as f32;
        assert_eq!(key_at(last, (KEYS_Y + 10) as f32), Some(Note::B));

        // The gap between keys is dead space.
        let gap = (PIANO_X + KEY_W + KEY_GAP / 2) as f32;
        assert_eq!(key_at(gap, (KEYS_Y + 10) as f32), None);

        // Above and below the keys is dead space.
        assert_eq!(key_at(first, (KEYS_Y - 5) as f32), None);
        assert_eq!(key_at(first, (KEYS_Y + KEY_H + 5) as f32), None);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 0.0), 0xFF000000);
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
    }
}
