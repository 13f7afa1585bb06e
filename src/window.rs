//! SDL2 platform layer: window, presentation, input decoding, frame pacing.
//!
//! Everything in this module is a collaborator of the rendering core, not
//! part of it. SDL is used only to put pixels on screen and to read the
//! keyboard; raw scancodes are decoded here into the semantic
//! [`InputState`] actions the core consumes.

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::scene::InputState;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Discrete keys surfaced to the application (mode switches).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Num1,
    Num2,
    Num3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
    KeyPressed(Key),
}

/// Caps the frame rate at [`FPS`] and reports per-frame delta time.
pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain the frame rate and returns the delta
    /// time in milliseconds since the previous call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let target = FRAME_TARGET_TIME as u64;
        let elapsed = window.timer().ticks64() - self.previous_frame_time;
        if elapsed < target {
            std::thread::sleep(std::time::Duration::from_millis(target - elapsed));
        }

        let now = window.timer().ticks64();
        let delta = now - self.previous_frame_time;
        self.previous_frame_time = now;
        delta
    }
}

/// Counts frames and logs the rate once per second at debug level.
pub struct FpsCounter {
    frames: u32,
    last_report: u64,
}

impl FpsCounter {
    pub fn new(window: &Window) -> Self {
        Self {
            frames: 0,
            last_report: window.timer().ticks64(),
        }
    }

    pub fn tick(&mut self, window: &Window) {
        self.frames += 1;
        let now = window.timer().ticks64();
        if now - self.last_report >= 1000 {
            log::debug!("{} fps", self.frames);
            self.frames = 0;
            self.last_report = now;
        }
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    texture: sdl2::render::Texture<'static>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
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

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as
        // Window. Struct field order ensures texture drops before
        // texture_creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::info!("window created: {width}x{height}");

        Ok(Self {
            canvas,
            texture_creator,
            texture,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains the event queue, returning the first event of interest.
    pub fn poll_events(&mut self) -> WindowEvent {
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
                } => return WindowEvent::Resize(w as u32, h as u32),
                Event::KeyDown {
                    keycode: Some(Keycode::Num1),
                    ..
                } => return WindowEvent::KeyPressed(Key::Num1),
                Event::KeyDown {
                    keycode: Some(Keycode::Num2),
                    ..
                } => return WindowEvent::KeyPressed(Key::Num2),
                Event::KeyDown {
                    keycode: Some(Keycode::Num3),
                    ..
                } => return WindowEvent::KeyPressed(Key::Num3),
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Decodes currently-held keys into the semantic actions the core
    /// understands.
    ///
    /// - W/S/A/D: move and strafe the camera
    /// - Arrow keys: look around
    /// - Q/E: rotate the scene objects
    pub fn input_state(&self) -> InputState {
        let keyboard = self.event_pump.keyboard_state();
        InputState {
            rotate_left: keyboard.is_scancode_pressed(Scancode::Q),
            rotate_right: keyboard.is_scancode_pressed(Scancode::E),
            move_forward: keyboard.is_scancode_pressed(Scancode::W),
            move_back: keyboard.is_scancode_pressed(Scancode::S),
            strafe_left: keyboard.is_scancode_pressed(Scancode::A),
            strafe_right: keyboard.is_scancode_pressed(Scancode::D),
            look_left: keyboard.is_scancode_pressed(Scancode::Left),
            look_right: keyboard.is_scancode_pressed(Scancode::Right),
            look_up: keyboard.is_scancode_pressed(Scancode::Up),
            look_down: keyboard.is_scancode_pressed(Scancode::Down),
        }
    }

    /// Uploads the caller's pixel buffer (0x00RRGGBB, 4 bytes per pixel) and
    /// presents it.
    pub fn present(&mut self, pixels: &[u32]) -> Result<(), String> {
        // SAFETY: reinterpreting &[u32] as &[u8] with 4x the length; u32 has
        // no padding and any byte pattern is a valid u8.
        let bytes = unsafe {
            std::slice::from_raw_parts(pixels.as_ptr() as *const u8, pixels.len() * 4)
        };

        self.texture
            .update(None, bytes, (self.width * 4) as usize)
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
        // SAFETY: same as in new() - texture_creator outlives texture.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        log::info!("window resized: {width}x{height}");
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
}
