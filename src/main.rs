use softrast::colors;
use softrast::prelude::*;

fn main() -> Result<(), String> {
    env_logger::init();

    let mut window = Window::new("softrast", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut engine = Engine::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    engine.load_demo_scene();

    // Optional texture path on the command line; the demo scene falls back
    // to a generated checkerboard without one. A malformed texture is a
    // configuration bug, so it aborts here instead of rendering garbage.
    if let Some(path) = std::env::args().nth(1) {
        let texture = Texture::from_file(&path).map_err(|e| {
            log::error!("failed to load texture {path}: {e}");
            e.to_string()
        })?;
        log::info!(
            "loaded texture {path}: {}x{}",
            texture.width(),
            texture.height()
        );
        engine.set_texture(texture);
    }

    let mut width = WINDOW_WIDTH;
    let mut height = WINDOW_HEIGHT;

    // The pixel and depth buffers are owned here, outside the engine; the
    // renderer only ever borrows them for the duration of a render call.
    let mut color_buffer = vec![colors::BACKGROUND; (width * height) as usize];
    let mut depth_buffer = vec![0.0f32; (width * height) as usize];

    let mut limiter = FrameLimiter::new(&window);
    let mut fps = FpsCounter::new(&window);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                width = w;
                height = h;
                window.resize(w, h)?;
                engine.resize(w, h);
                color_buffer = vec![colors::BACKGROUND; (width * height) as usize];
                depth_buffer = vec![0.0f32; (width * height) as usize];
            }
            WindowEvent::KeyPressed(Key::Num1) => engine.set_render_mode(RenderMode::Filled),
            WindowEvent::KeyPressed(Key::Num2) => {
                engine.set_render_mode(RenderMode::FilledWireframe)
            }
            WindowEvent::KeyPressed(Key::Num3) => engine.set_render_mode(RenderMode::Wireframe),
            WindowEvent::None => {}
        }

        let input = window.input_state();
        engine.update(&input);

        let mut fb = FrameBuffer::new(&mut color_buffer, &mut depth_buffer, width, height);
        engine.render(&mut fb);

        window.present(&color_buffer)?;
        limiter.wait_and_get_delta(&window);
        fps.tick(&window);
    }

    Ok(())
}
