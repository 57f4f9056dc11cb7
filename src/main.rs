//! Crowd Canvas entry point
//!
//! The browser build is a library (`CrowdCanvas` via wasm-bindgen). Natively
//! this runs the crowd headless against a synthetic scroll signal and logs
//! what a page would see.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use crowd_canvas::consts::FRAME_DT;
    use crowd_canvas::renderer::{RecordingSurface, paint};
    use crowd_canvas::sim::{Crowd, SpriteAtlas, Stage};
    use crowd_canvas::Settings;
    use glam::Vec2;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Crowd Canvas (native, headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(json) => match Settings::from_json(&json) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Bad settings: {}", e);
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };

    // Stand-in for the decoded sheet: 100x100 cells
    let sheet = Vec2::new(settings.rows as f32 * 100.0, settings.cols as f32 * 100.0);
    let atlas = match SpriteAtlas::new((), sheet, settings.rows, settings.cols) {
        Ok(atlas) => atlas,
        Err(e) => {
            log::error!("Crowd disabled: {}", e);
            return;
        }
    };

    let seed = settings.seed.unwrap_or(12345);
    let mut crowd = match Crowd::new(atlas, &settings, Stage::new(1280.0, 720.0, 2.0), 0.0, seed) {
        Ok(crowd) => crowd,
        Err(e) => {
            log::error!("Crowd disabled: {}", e);
            return;
        }
    };
    let mut surface = RecordingSurface::new();

    // Scroll down for 3 s, rest 2 s, resize, scroll back up for 2 s
    let mut scroll_y = 0.0f32;
    for frame in 0..600u32 {
        match frame {
            0..180 => scroll_y += 6.0,
            300 => crowd.resize(Stage::new(960.0, 720.0, 1.0)),
            480.. => scroll_y = (scroll_y - 12.0).max(0.0),
            _ => {}
        }

        let stats = crowd.tick(scroll_y, FRAME_DT);
        paint(&crowd, &mut surface);
        let draws = surface.draws().count();
        surface.take_commands();

        if frame % 60 == 0 || !stats.completed.is_empty() {
            log::info!(
                "frame {:>3}: scroll {:>6.1} vel {:>5.2} target {:>3} active {:>3} available {:>3} drawn {:>3} done {:?}",
                stats.frame,
                stats.scroll_y,
                stats.smoothed_velocity,
                stats.target,
                stats.active,
                stats.available,
                draws,
                stats.completed.iter().map(|id| id.0).collect::<Vec<_>>()
            );
        }
    }

    crowd.teardown();
    log::info!("Done");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start hook, this is just to satisfy the compiler
}
