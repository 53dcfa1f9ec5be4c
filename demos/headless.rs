//! Runs the comparison without a window and prints each pane's report.
//!
//! ```text
//! cargo run --example headless -- ./data/stage-10.geojson
//! ```

use std::sync::Arc;

use trackcam::{
    runtime::run_headless, Comparison, ComparisonPreset, LngLat, Side, Track, TrackLoader,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ComparisonPreset::Quick.resolve().with_env_token();
    if let Some(location) = std::env::args().nth(1) {
        config.track = location;
    }

    let track = match TrackLoader::new().load(&config.track).await {
        Ok(track) => track,
        Err(err) => {
            log::warn!("{}: {}; using a synthetic track", config.track, err);
            synthetic_track()?
        }
    };

    let mut comparison = Comparison::new(config, Arc::new(track))?;
    let frames = run_headless(&mut comparison, 60).await;

    println!("host frames: {}", frames);
    for side in [Side::Left, Side::Right] {
        let pane = comparison.pane(side);
        println!("{:>9}: {:?}", pane.label(), pane.status());
        if let Some(sample) = pane.last_sample() {
            println!(
                "           last phase {:.3}, camera at {:.5}, {:.5}",
                sample.phase, sample.camera_position.lng, sample.camera_position.lat
            );
        }
    }

    Ok(())
}

fn synthetic_track() -> trackcam::Result<Track> {
    let vertices = (0..100)
        .map(|i| {
            let t = i as f64 / 99.0;
            LngLat::new(6.1 + 0.4 * t, 45.9 - 0.1 * t + 0.02 * (t * 12.0).sin())
        })
        .collect();
    Track::new(vertices)
}
