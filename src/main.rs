//! Peak Descent headless runner
//!
//! Seeds a run on the default mountain, drives a scripted descent and prints a
//! JSON summary. Useful for eyeballing balance changes without a renderer.
//!
//! Usage: `peak-descent [seed] [seconds] [tweaks.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(0x5EED_u64);
    let seconds: f32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let tweaks = match args.get(3) {
        Some(path) => match load_tweaks(path) {
            Ok(tweaks) => tweaks,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => peak_descent::TweakConfig::default(),
    };

    let summary = run(seed, seconds, tweaks);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives ticks itself; only route panics and logs to the console
    console_error_panic_hook::set_once();
    // Err only when the host page already installed a logger
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tweaks(path: &str) -> Result<peak_descent::TweakConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(peak_descent::TweakConfig::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, serde::Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    depth: f32,
    layer: u32,
    live_animals: usize,
    photos: u32,
    photo_score: f32,
    stamina: f32,
    last_photo: Option<peak_descent::sim::PhotoResult>,
}

#[cfg(not(target_arch = "wasm32"))]
fn run(seed: u64, seconds: f32, tweaks: peak_descent::TweakConfig) -> RunSummary {
    use peak_descent::consts::SIM_DT;
    use peak_descent::sim::{GameState, MountainLayout, TickInput, fauna, tick};

    let mut state = GameState::new(seed, MountainLayout::default(), fauna::default_registry(), tweaks);
    log::info!("Peak Descent (headless) starting, seed={seed}");

    let total_ticks = (seconds / SIM_DT).max(0.0) as u64;
    let mut photos = 0;

    for t in 0..total_ticks {
        // Weave left and right every two seconds, snap a photo every three
        let phase = (t as f32 * SIM_DT / 2.0) as u64;
        let input = TickInput {
            left: phase % 2 == 0,
            right: phase % 2 == 1,
            photograph: t % 180 == 179,
            ..Default::default()
        };
        let score_before = state.photo_score;
        tick(&mut state, &input, SIM_DT);
        if state.photo_score > score_before {
            photos += 1;
        }
    }

    log::info!(
        "Finished: depth={:.0}, layer={}, photo score={:.1}",
        state.player.abs_y,
        state.player.layer_index,
        state.photo_score
    );

    RunSummary {
        seed,
        ticks: state.time_ticks,
        depth: state.player.abs_y,
        layer: state.player.layer_index,
        live_animals: state.animals.len(),
        photos,
        photo_score: state.photo_score,
        stamina: state.stamina(),
        last_photo: state.last_photo,
    }
}
