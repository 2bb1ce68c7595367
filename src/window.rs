//! SDL2 window, input polling and frame timing for the interactive viewer.

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::camera::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Optional frame cap. Always reports the real time between frames.
pub struct FrameLimiter {
    previous_frame_time: u64,
    target_frame_ms: Option<u64>,
}

impl FrameLimiter {
    /// `fps = 0` disables the cap.
    pub fn new(window: &Window, fps: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            target_frame_ms: (fps > 0).then(|| 1000 / fps as u64),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in seconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> f32 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if let Some(target) = self.target_frame_ms {
            if delta_time < target {
                std::thread::sleep(std::time::Duration::from_millis(target - delta_time));
                current_time = window.timer().ticks64();
                delta_time = current_time.saturating_sub(self.previous_frame_time);
            }
        }

        self.previous_frame_time = current_time;
        delta_time as f32 / 1000.0
    }
}

/// Counts frames and yields the rate once per elapsed second.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<u64>,
    frames: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame at `now_ms`. Returns the frames per second when a full
    /// second has passed since the last report.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let start = *self.window_start.get_or_insert(now_ms);
        self.frames += 1;

        let elapsed = now_ms.saturating_sub(start);
        if elapsed < 1000 {
            return None;
        }
        let fps = self.frames as f32 * 1000.0 / elapsed as f32;
        self.window_start = Some(now_ms);
        self.frames = 0;
        Some(fps)
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // `texture` borrows from `texture_creator`; field order drops it first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    mouse_delta: (i32, i32),
    width: u32,
    height: u32,
}

impl Window {
    /// Opens a resizable window with the mouse captured in relative mode.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        sdl_context.mouse().set_relative_mouse_mode(true);

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::info!("opened {}x{} window", width, height);

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            mouse_delta: (0, 0),
            width,
            height,
        })
    }

    /// Drains pending events. Mouse motion is accumulated for the next
    /// [`Window::input`] call. Quit wins over resize.
    pub fn poll_events(&mut self) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } if w > 0 && h > 0 => result = WindowEvent::Resize(w as u32, h as u32),
                Event::MouseMotion { xrel, yrel, .. } => {
                    self.mouse_delta.0 += xrel;
                    self.mouse_delta.1 += yrel;
                }
                _ => {}
            }
        }
        result
    }

    /// Current movement keys plus the mouse motion gathered since the last call.
    pub fn input(&mut self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        let input = InputState {
            forward: keys.is_scancode_pressed(Scancode::W),
            back: keys.is_scancode_pressed(Scancode::S),
            left: keys.is_scancode_pressed(Scancode::A),
            right: keys.is_scancode_pressed(Scancode::D),
            up: keys.is_scancode_pressed(Scancode::Q),
            down: keys.is_scancode_pressed(Scancode::E),
            mouse_delta: self.mouse_delta,
        };
        self.mouse_delta = (0, 0);
        input
    }

    /// Uploads an ARGB8888 frame of the current size and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }

    /// Milliseconds since SDL was initialised.
    pub fn ticks(&self) -> u64 {
        self.timer_subsystem.ticks64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fps_reported_once_per_second() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.tick(0), None);
        for frame in 1..60 {
            assert_eq!(counter.tick(frame * 16), None);
        }
        let fps = counter.tick(1000).unwrap();
        assert_relative_eq!(fps, 61.0);
        assert_eq!(counter.tick(1016), None);
    }

    #[test]
    fn slow_frames_still_report() {
        let mut counter = FpsCounter::new();
        counter.tick(0);
        assert_relative_eq!(counter.tick(2000).unwrap(), 1.0);
    }
}
