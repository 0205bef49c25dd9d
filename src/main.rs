use std::path::{Path, PathBuf};

use log::{error, info, warn};
use pointsweep::prelude::*;

const USAGE: &str = "usage: pointsweep [MESH.obj] [--count N] [--snapshot OUT.png] [--seconds S]";

struct Args {
    mesh: Option<PathBuf>,
    count: Option<usize>,
    snapshot: Option<PathBuf>,
    seconds: f32,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        mesh: None,
        count: None,
        snapshot: None,
        seconds: 1.0,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" => {
                let value = iter.next().ok_or(USAGE)?;
                args.count = Some(value.parse::<usize>().map_err(|e| format!("--count: {e}"))?);
            }
            "--snapshot" => args.snapshot = Some(iter.next().ok_or(USAGE)?.into()),
            "--seconds" => {
                let value = iter.next().ok_or(USAGE)?;
                args.seconds = value.parse::<f32>().map_err(|e| format!("--seconds: {e}"))?;
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            path if !path.starts_with('-') && args.mesh.is_none() => {
                args.mesh = Some(path.into())
            }
            other => return Err(format!("unexpected argument {other}\n{USAGE}")),
        }
    }
    Ok(args)
}

fn mesh_source(args: &Args) -> MeshSource {
    match &args.mesh {
        Some(path) => MeshSource::Obj(path.clone()),
        None => MeshSource::InMemory(Mesh::cube()),
    }
}

/// Renders `seconds` of animation at the configured frame rate without a
/// window and writes the last frame to `out`.
fn run_headless(args: &Args, config: RevealConfig, out: &Path) -> Result<(), String> {
    let loader = MeshLoader::new();
    loader.request(mesh_source(args), config.sample_count, config.height_axis);
    let loaded = loader.wait().ok_or("load worker stopped")?;
    let cloud = loaded.result.map_err(|e| e.to_string())?;

    let frame_delta = config.frame_target_ms() as f32 / 1000.0;
    let frames = (args.seconds / frame_delta).ceil().max(1.0) as usize;
    let mut engine = Engine::new(config.window_width, config.window_height, config);
    engine.set_point_cloud(cloud);
    for _ in 0..frames {
        engine.update(frame_delta);
    }
    engine.render();

    engine.renderer().save(out).map_err(|e| e.to_string())?;
    info!("wrote {} after {frames} frames", out.display());
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let mut config = RevealConfig::default();
    if let Some(count) = args.count {
        config = config.with_sample_count(count);
    }

    if let Some(out) = &args.snapshot {
        return run_headless(&args, config, out);
    }

    let mut window = Window::new("Pointsweep", config.window_width, config.window_height)?;
    let mut engine = Engine::new(window.width(), window.height(), config.clone());
    let loader = MeshLoader::new();
    loader.request(mesh_source(&args), config.sample_count, config.height_axis);

    let mut clock = FrameClock::new(&window, config.frame_target_ms());
    let mut snapshots = 0;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                engine.resize(w, h);
            }
            WindowEvent::Reload => {
                loader.request(mesh_source(&args), config.sample_count, config.height_axis);
            }
            WindowEvent::Snapshot => {
                snapshots += 1;
                let path = format!("pointsweep-{snapshots:03}.png");
                match engine.renderer().save(&path) {
                    Ok(()) => info!("saved {path}"),
                    Err(e) => warn!("could not save {path}: {e}"),
                }
            }
            WindowEvent::None => {}
        }

        if let Some(loaded) = loader.poll() {
            match loaded.result {
                Ok(cloud) => engine.set_point_cloud(cloud),
                Err(e) => error!("load #{} failed, keeping previous cloud: {e}", loaded.generation),
            }
        }

        let delta = clock.wait_and_get_delta(&window);
        engine.update(delta);
        engine.render();
        window.present(engine.frame_buffer())?;
    }

    Ok(())
}
