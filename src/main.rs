use std::path::{Path, PathBuf};

use softshade::camera::CameraController;
use softshade::config::SceneConfig;
use softshade::light::orbit_position;
use softshade::window::{FpsCounter, FrameLimiter, Window, WindowEvent};
use softshade::Engine;

fn load_config(path: Option<&Path>) -> Result<(SceneConfig, PathBuf), String> {
    match path {
        Some(path) => {
            let config = SceneConfig::from_file(path).map_err(|e| e.to_string())?;
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            Ok((config, base))
        }
        None => {
            log::info!("no scene file given, using the built-in scene");
            Ok((SceneConfig::default(), PathBuf::new()))
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene_path = std::env::args_os().nth(1).map(PathBuf::from);
    let (config, base) = load_config(scene_path.as_deref())?;

    let mut scene = config.build_scene();
    let models = config.load_models(&base).map_err(|e| e.to_string())?;
    let controller = CameraController::default();

    let mut window = Window::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;
    let mut engine = Engine::new(window.width(), window.height());
    let mut limiter = FrameLimiter::new(&window, 0);
    let mut fps = FpsCounter::new();

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                engine.resize(w, h);
            }
            WindowEvent::None => {}
        }

        let delta_time = limiter.wait_and_get_delta(&window);
        controller.update(&mut scene.camera, &window.input(), delta_time);

        let time = window.ticks() as f32 / 1000.0;
        for light in &mut scene.lights {
            light.set_position(orbit_position(time));
        }

        engine.render(&scene, &models);
        window.present(engine.frame_buffer())?;

        if let Some(rate) = fps.tick(window.ticks()) {
            log::info!("FPS: {:.1}", rate);
        }
    }

    Ok(())
}
