//! air_piano — interactive entry point.

use std::io::{self, Write};
use std::time::Duration;

use air_piano::app::{run, AppConfig};
use air_piano::detector::DetectorOptions;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Air Piano — play notes with your hands                ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Camera: simulated  (mouse over the camera panel = one hand)");
    println!("  Audio:  first MIDI output port  (--silent for none)");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let silent = args.iter().any(|a| a == "--silent");

    let cfg = if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: 2 hands, full model, volume 70\n");
        AppConfig { silent, ..AppConfig::default() }
    } else {
        configure_interactively(silent)
    };

    println!();
    println!("  Opening window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn configure_interactively(silent: bool) -> AppConfig {
    let volume = {
        let v: u32 = read_line("  Volume 0-100 (default 70): ")
            .trim()
            .parse()
            .unwrap_or(70);
        v.min(100) as f32 / 100.0
    };

    let max_hands: usize = {
        let h = read_line("  Max hands 1-2 (default 2): ")
            .trim()
            .parse()
            .unwrap_or(2);
        h.clamp(1, 2)
    };

    let model_complexity: u8 = match read_line("  Model 0=light 1=full (default 1): ").trim() {
        "0" => 0,
        _ => 1,
    };

    let min_detection_confidence: f32 = {
        let c: f32 = read_line("  Detection confidence 0.0-1.0 (default 0.5): ")
            .trim()
            .parse()
            .unwrap_or(0.5);
        c.clamp(0.0, 1.0)
    };

    let watchdog_ms: u64 = {
        let ms: u64 = read_line("  No-hand tip delay ms (default 3000): ")
            .trim()
            .parse()
            .unwrap_or(3000);
        ms.clamp(500, 30_000)
    };

    AppConfig {
        detector: DetectorOptions {
            max_hands,
            model_complexity,
            min_detection_confidence,
            ..DetectorOptions::default()
        },
        volume,
        watchdog_delay: Duration::from_millis(watchdog_ms),
        silent,
    }
}

fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
