//! Textured desk scene: a lamp, a monitor, a keyboard, a mouse, a phone
//! and a row of books on a wooden desk, lit by three point lights.
//!
//! Run with:
//!   cargo run --example desk_scene
//!   cargo run --example desk_scene -- --textures ./assets
//!
//! Scene textures are read from `--textures` (default `./textures`); any
//! file that fails to load is replaced by generated stripe pixels so the
//! demo runs without assets on disk.
//!
//! Controls:
//!   WASD        - Move camera
//!   Q/E         - Move down/up
//!   Mouse       - Look around (hold right mouse button)
//!   Scroll      - Adjust fly speed
//!   P/O         - Perspective / orthographic projection
//!   Escape      - Exit

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use glam::{Vec2, Vec3};
use winit::event::{DeviceEvent, ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::CursorGrabMode;

use scene_renderer::resources::Material;
use scene_renderer::scene::{Camera, CameraInput, FreeFlyController, PointLight, Projection};
use scene_renderer::{RendererConfig, SceneRenderer, WgpuBackend, Window};

const FOV_Y_DEGREES: f32 = 80.0;
const ORTHO_HEIGHT: f32 = 10.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Static desk scene with a free-fly camera.
#[derive(Parser, Debug)]
#[command(name = "desk-scene", about = "Textured desk scene rendered with wgpu")]
struct Args {
    /// Directory the scene textures are loaded from.
    #[arg(long, default_value = "./textures")]
    textures: PathBuf,

    /// Initial window width in pixels.
    #[arg(long, default_value = "1000")]
    width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value = "800")]
    height: u32,

    /// Disable vertical sync (may cause tearing).
    #[arg(long)]
    no_vsync: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = RendererConfig {
        title: "Desk Scene".to_string(),
        width: args.width,
        height: args.height,
        vsync: !args.no_vsync,
        ..Default::default()
    };

    println!("Starting Desk Scene Demo");
    println!();
    println!("Controls:");
    println!("  WASD        - Move camera");
    println!("  Q/E         - Move down/up");
    println!("  Right Mouse - Look around");
    println!("  Scroll      - Adjust fly speed");
    println!("  P/O         - Perspective / orthographic projection");
    println!("  Escape      - Exit");
    println!();

    let event_loop = EventLoop::new().expect("Failed to create event loop");

    let mut window = Window::new(&event_loop, &config.title, config.width, config.height);
    let winit_window = window.window_arc();
    let backend =
        WgpuBackend::new(window.window_arc(), config.vsync).expect("Failed to initialize graphics");
    let mut renderer = SceneRenderer::new(backend, config.flip_textures_on_load)
        .expect("Failed to upload primitive shapes");

    load_scene_textures(&mut renderer, &args.textures);
    define_object_materials(&mut renderer);
    setup_scene_lights(&mut renderer);

    let mut camera = Camera::new(Vec3::new(0.0, 6.0, 14.0), Vec3::new(0.0, 3.0, 0.0));
    camera.projection =
        Projection::perspective(FOV_Y_DEGREES, window.aspect(), NEAR_PLANE, FAR_PLANE);

    let mut controller = FreeFlyController::new();
    controller.sync_with_camera(&camera);
    let mut input = CameraInput::new();

    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt: &EventLoopWindowTarget<()>| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => {
                    window.handle_event(&event);
                    if window.should_close() {
                        elwt.exit();
                    }
                    match event {
                        WindowEvent::KeyboardInput { event: key, .. } => {
                            let pressed = key.state == ElementState::Pressed;

                            if let PhysicalKey::Code(code) = key.physical_key {
                                match code {
                                    KeyCode::Escape => elwt.exit(),
                                    KeyCode::KeyP if pressed && !key.repeat => {
                                        camera.projection = Projection::perspective(
                                            FOV_Y_DEGREES,
                                            window.aspect(),
                                            NEAR_PLANE,
                                            FAR_PLANE,
                                        );
                                        println!("Projection: perspective");
                                    }
                                    KeyCode::KeyO if pressed && !key.repeat => {
                                        camera.projection = Projection::orthographic(
                                            ORTHO_HEIGHT,
                                            window.aspect(),
                                            NEAR_PLANE,
                                            FAR_PLANE,
                                        );
                                        println!("Projection: orthographic");
                                    }
                                    KeyCode::KeyW => input.forward = pressed,
                                    KeyCode::KeyS => input.backward = pressed,
                                    KeyCode::KeyA => input.left = pressed,
                                    KeyCode::KeyD => input.right = pressed,
                                    KeyCode::KeyQ | KeyCode::ControlLeft => input.down = pressed,
                                    KeyCode::KeyE | KeyCode::Space => input.up = pressed,
                                    _ => {}
                                }
                            }
                        }
                        WindowEvent::MouseInput {
                            state,
                            button: MouseButton::Right,
                            ..
                        } => {
                            let pressed = state == ElementState::Pressed;
                            input.mouse_look_active = pressed;

                            if pressed {
                                let _ = winit_window.set_cursor_grab(CursorGrabMode::Confined);
                                winit_window.set_cursor_visible(false);
                            } else {
                                let _ = winit_window.set_cursor_grab(CursorGrabMode::None);
                                winit_window.set_cursor_visible(true);
                            }
                        }
                        WindowEvent::MouseWheel { delta, .. } => {
                            input.scroll_delta += match delta {
                                MouseScrollDelta::LineDelta(_, y) => y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                        }
                        WindowEvent::Focused(false) => {
                            // release all keys when the window loses focus
                            input = CameraInput::new();
                            let _ = winit_window.set_cursor_grab(CursorGrabMode::None);
                            winit_window.set_cursor_visible(true);
                        }
                        WindowEvent::RedrawRequested => {
                            render_frame(&mut renderer, &mut camera, &mut window);
                        }
                        _ => {}
                    }
                }
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => {
                    if input.mouse_look_active {
                        input.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
                    }
                }
                Event::AboutToWait => {
                    let now = Instant::now();
                    let dt = (now - last_frame).as_secs_f32();
                    last_frame = now;

                    controller.update(&mut camera, &input, dt);
                    input.reset_deltas();

                    window.request_redraw();
                }
                Event::LoopExiting => {
                    renderer.release_textures();
                }
                _ => {}
            }
        })
        .expect("Event loop failed");
}

fn render_frame(
    renderer: &mut SceneRenderer<WgpuBackend>,
    camera: &mut Camera,
    window: &mut Window,
) {
    if window.was_resized() {
        let (width, height) = window.dimensions();
        renderer.resize(width, height);
        camera.set_aspect(width as f32, height as f32);
        window.clear_resize_flag();
    }

    renderer.apply_camera(camera);
    match renderer.begin_frame() {
        Ok(()) => {
            draw_scene(renderer);
            if let Err(err) = renderer.end_frame() {
                log::error!("frame submission failed: {}", err);
            }
        }
        Err(err) => log::warn!("skipping frame: {}", err),
    }
}

/// Image files the scene expects, paired with the tag each is loaded under.
const SCENE_TEXTURES: &[(&str, &str)] = &[
    ("Porcelain.jpg", "cup"),
    ("Wood1.jpg", "table-top"),
    ("Wood2.png", "table-side"),
    ("Metal.jpg", "base"),
    ("Wood3.jpg", "WoodFloor"),
    ("BlackSteel.png", "lamp-rim"),
    ("WhiteCloth.jpg", "lamp-shade"),
    ("Wall.jpg", "wall"),
    ("WhitePlastic.jpg", "plastic"),
    ("BookSpine.png", "BookSpine"),
    ("BookBack.png", "BookBack"),
    ("BookFront.png", "BookFront"),
    ("Pages.png", "Pages"),
];

const PLACEHOLDER_SIZE: u32 = 64;

fn load_scene_textures(renderer: &mut SceneRenderer<WgpuBackend>, dir: &Path) {
    for (file, tag) in SCENE_TEXTURES {
        let path = dir.join(file);
        match renderer.load_texture(&path, tag) {
            Ok(()) => log::info!("loaded {} as '{}'", path.display(), tag),
            Err(err) => {
                log::warn!("{}: {}, substituting generated pixels", path.display(), err);
                let (a, b) = placeholder_colors(tag);
                let pixels = striped_pixels(a, b);
                if let Err(err) =
                    renderer.load_texture_data(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, &pixels, tag)
                {
                    log::error!("could not stage fallback pixels for '{}': {}", tag, err);
                }
            }
        }
    }
    renderer.bind_textures();
}

/// Stripe colors standing in for a missing texture file.
fn placeholder_colors(tag: &str) -> ([u8; 3], [u8; 3]) {
    match tag {
        "cup" => ([235, 230, 225], [214, 209, 204]),
        "table-top" => ([152, 106, 60], [132, 90, 48]),
        "table-side" => ([122, 82, 46], [106, 71, 39]),
        "base" => ([122, 122, 128], [98, 98, 104]),
        "WoodFloor" => ([172, 126, 80], [152, 110, 67]),
        "lamp-rim" => ([42, 42, 46], [28, 28, 32]),
        "lamp-shade" => ([246, 241, 230], [233, 227, 215]),
        "wall" => ([206, 196, 181], [199, 189, 173]),
        "plastic" => ([240, 240, 240], [226, 226, 226]),
        "BookSpine" | "BookBack" | "BookFront" => ([132, 32, 32], [112, 26, 26]),
        "Pages" => ([250, 248, 240], [240, 236, 227]),
        _ => ([200, 200, 200], [160, 160, 160]),
    }
}

fn striped_pixels(a: [u8; 3], b: [u8; 3]) -> Vec<u8> {
    let size = PLACEHOLDER_SIZE;
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        let color = if (y / 8) % 2 == 0 { a } else { b };
        for _ in 0..size {
            pixels.extend_from_slice(&[color[0], color[1], color[2], 255]);
        }
    }
    pixels
}

fn define_object_materials(renderer: &mut SceneRenderer<WgpuBackend>) {
    renderer.define_material(
        "plastic",
        Material::new(Vec3::new(0.9, 0.9, 0.9), Vec3::new(0.1, 0.1, 0.1), 1.0),
    );
    renderer.define_material(
        "wood",
        Material::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.1, 0.1, 0.1), 5.0),
    );
    renderer.define_material(
        "woodFloor",
        Material::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.1, 0.1, 0.1), 0.2),
    );
    renderer.define_material(
        "porcelain",
        Material::new(Vec3::new(0.2, 0.2, 0.2), Vec3::new(0.8, 0.8, 0.9), 32.0),
    );
    renderer.define_material(
        "metal",
        Material::new(Vec3::new(0.3, 0.3, 0.2), Vec3::new(0.7, 0.7, 0.8), 8.0),
    );
    // diffuse far above 1.0 makes the shade read as translucent
    renderer.define_material(
        "cloth",
        Material::new(Vec3::new(10.0, 10.0, 10.0), Vec3::new(0.3, 0.3, 0.3), 2.0),
    );
    renderer.define_material(
        "wall",
        Material::new(Vec3::new(0.4, 0.4, 0.4), Vec3::new(0.3, 0.3, 0.3), 1.0),
    );
    renderer.define_material(
        "BookCover",
        Material::new(Vec3::new(0.5, 0.1, 0.1), Vec3::new(0.6, 0.6, 0.6), 16.0),
    );
}

fn setup_scene_lights(renderer: &mut SceneRenderer<WgpuBackend>) {
    renderer.set_lighting(true);

    // room light high above and behind the camera spawn
    let room = PointLight::new(Vec3::new(0.0, 20.0, 20.0))
        .with_ambient(Vec3::new(0.1, 0.1, 0.1))
        .with_diffuse(Vec3::new(0.4, 0.4, 0.4))
        .with_specular(Vec3::new(0.01, 0.01, 0.01));
    renderer.set_point_light(0, &room);

    // two lights placed around the shade fake the lamp glowing
    let lamp_back = PointLight::new(Vec3::new(-4.0, 5.5, -2.5))
        .with_ambient(Vec3::new(0.4, 0.4, 0.4))
        .with_diffuse(Vec3::new(0.5, 0.5, 0.5))
        .with_specular(Vec3::new(0.01, 0.01, 0.01));
    renderer.set_point_light(1, &lamp_back);

    let lamp_side = PointLight::new(Vec3::new(-6.0, 5.5, -1.5))
        .with_ambient(Vec3::new(0.4, 0.4, 0.4))
        .with_diffuse(Vec3::new(0.5, 0.5, 0.5))
        .with_specular(Vec3::new(0.01, 0.01, 0.01));
    renderer.set_point_light(2, &lamp_side);
}

/// Draw every object in the scene. Call order matters: texture, UV scale
/// and color selections deliberately carry over from one object to the
/// next until something overwrites them.
fn draw_scene(renderer: &mut SceneRenderer<WgpuBackend>) {
    // floor
    renderer.set_transform(
        Vec3::new(20.0, 1.0, 10.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 7.0),
    );
    renderer.set_color(1.0, 1.0, 1.0, 1.0);
    renderer.set_texture("WoodFloor");
    renderer.set_uv_scale(4.0, 2.0);
    renderer.set_material("woodFloor");
    renderer.draw("plane");

    // back wall, reusing the floor's UV scale
    renderer.set_transform(
        Vec3::new(20.0, 1.0, 5.0),
        Vec3::new(90.0, 0.0, 0.0),
        Vec3::new(0.0, 5.0, -3.0),
    );
    renderer.set_texture("wall");
    renderer.set_material("wall");
    renderer.draw("plane");

    // coffee cup: flipped tapered cylinder, capped narrow end down
    renderer.set_transform(
        Vec3::new(0.25, 0.5, 0.25),
        Vec3::new(180.0, 0.0, 0.0),
        Vec3::new(-3.75, 4.45, 1.0),
    );
    renderer.set_texture("cup");
    renderer.set_uv_scale(2.0, 2.0);
    renderer.set_material("porcelain");
    renderer.draw("tapered_cylinder");

    // cup handle, half sunk into the body
    renderer.set_transform(
        Vec3::new(0.13, 0.15, 0.13),
        Vec3::new(90.0, -8.0, 90.0),
        Vec3::new(-3.75, 4.22, 1.17),
    );
    renderer.set_texture("cup");
    renderer.set_uv_scale(2.0, 2.0);
    renderer.set_material("porcelain");
    renderer.draw("half_torus");

    // desk tabletop: wood on top, a different grain on every side
    renderer.set_transform(
        Vec3::new(10.0, 0.5, 5.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(-0.4, 3.65, 0.0),
    );
    renderer.set_material("wood");
    renderer.set_texture("table-top");
    renderer.set_uv_scale(1.0, 0.75);
    renderer.draw("cube_top");
    renderer.set_texture("table-side");
    renderer.set_uv_scale(2.0, 0.25);
    renderer.draw("cube_left");
    renderer.draw("cube_right");
    renderer.set_uv_scale(4.0, 0.25);
    renderer.draw("cube_back");
    renderer.draw("cube_front");
    renderer.draw("cube_bottom");

    // steel base under the tabletop
    renderer.set_transform(
        Vec3::new(9.5, 0.5, 4.5),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(-0.4, 3.2, 0.0),
    );
    renderer.set_texture("base");
    renderer.set_material("metal");
    renderer.set_uv_scale(4.0, 1.0);
    renderer.draw("cube_back");
    renderer.draw("cube_front");
    renderer.draw("cube_bottom");
    renderer.set_uv_scale(2.0, 0.5);
    renderer.draw("cube_left");
    renderer.draw("cube_right");

    // lower connecting beams keep the steel texture
    renderer.set_transform(
        Vec3::new(4.5, 0.5, 0.25),
        Vec3::new(0.0, 90.0, 0.0),
        Vec3::new(-5.025, 0.75, 0.0),
    );
    renderer.set_uv_scale(2.0, 1.0);
    renderer.set_material("metal");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(4.5, 0.5, 0.25),
        Vec3::new(0.0, 90.0, 0.0),
        Vec3::new(4.21, 0.75, 0.0),
    );
    renderer.set_uv_scale(2.0, 1.0);
    renderer.set_material("metal");
    renderer.draw("cube");

    // desk legs, one per corner
    for corner in [
        Vec3::new(4.21, 1.52, -2.0),
        Vec3::new(4.21, 1.52, 2.0),
        Vec3::new(-5.025, 1.52, 2.0),
        Vec3::new(-5.025, 1.52, -2.0),
    ] {
        renderer.set_transform(Vec3::new(3.0, 0.25, 0.5), Vec3::new(0.0, 0.0, 90.0), corner);
        renderer.set_uv_scale(4.0, 1.0);
        renderer.set_material("metal");
        renderer.draw("cube");
    }

    draw_lamp(renderer, Vec3::new(0.25, 0.0, -0.2));
    draw_monitor(renderer, Vec3::new(-0.5, 1.4, -6.5));
    draw_keyboard(renderer, Vec3::new(-0.5, 0.0, -3.5));
    draw_mouse(renderer, Vec3::new(2.0, -0.1, -3.4));
    draw_phone(renderer, Vec3::new(2.7, 0.0, -3.9));

    // row of books standing on the desk
    let mut book_spacer = 2.0;
    for _ in 0..8 {
        draw_book(renderer, Vec3::new(book_spacer, 0.25, -6.35), Vec3::ZERO);
        book_spacer += 0.25;
    }
    // one more leaning against the row
    draw_book(
        renderer,
        Vec3::new(1.68, 0.25, -6.35),
        Vec3::new(0.0, 0.0, -7.5),
    );
}

fn draw_lamp(renderer: &mut SceneRenderer<WgpuBackend>, offset: Vec3) {
    // shade: open tapered cylinder, cloth over a glow
    renderer.set_transform(
        Vec3::new(0.75, 1.0, 0.75),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-4.2, 5.3, -1.6),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("lamp-shade");
    renderer.set_material("cloth");
    renderer.draw("tapered_cylinder_open");

    // rims above and below the shade
    renderer.set_transform(
        Vec3::new(0.35, 0.35, 0.1),
        Vec3::new(90.0, 0.0, 0.0),
        offset + Vec3::new(-4.2, 6.3, -1.6),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("lamp-rim");
    renderer.set_material("metal");
    renderer.draw("torus");

    renderer.set_transform(
        Vec3::new(0.65, 0.65, 0.1),
        Vec3::new(90.0, 0.0, 0.0),
        offset + Vec3::new(-4.2, 5.3, -1.6),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("lamp-rim");
    renderer.set_material("metal");
    renderer.draw("torus");

    // center pole
    renderer.set_transform(
        Vec3::new(0.05, 0.75, 0.05),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-4.2, 4.85, -1.6),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("lamp-rim");
    renderer.set_material("metal");
    renderer.draw("cylinder");

    // tripod: three splayed legs around the pole
    for yaw in [0.0, 120.0, 240.0] {
        renderer.set_transform(
            Vec3::new(0.025, 1.0, 0.025),
            Vec3::new(160.0, yaw, 0.0),
            offset + Vec3::new(-4.2, 4.85, -1.6),
        );
        renderer.set_uv_scale(4.0, 1.0);
        renderer.set_texture("lamp-rim");
        renderer.set_material("metal");
        renderer.draw("cylinder");
    }
}

fn draw_monitor(renderer: &mut SceneRenderer<WgpuBackend>, offset: Vec3) {
    // dark screen, flat color instead of a texture
    renderer.set_transform(
        Vec3::new(3.0, 2.0, 0.25),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 4.068, 5.005),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_color(0.1, 0.1, 0.1, 1.0);
    renderer.set_material("plastic");
    renderer.draw("cube");

    // bezel: bottom, top, right, left
    renderer.set_transform(
        Vec3::new(3.0, 0.25, 0.25),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 3.0, 5.0),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(3.0, 0.25, 0.25),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 5.0, 5.0),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(0.25, 1.9, 0.25),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(1.5, 4.0, 5.0),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(0.25, 1.9, 0.25),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-1.49, 4.0, 5.0),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    // rounded bezel corners
    for corner in [
        Vec3::new(-1.47, 4.878, 4.875),
        Vec3::new(-1.47, 3.12, 4.87),
        Vec3::new(1.4825, 3.125, 4.87),
        Vec3::new(1.4825, 4.878, 4.87),
    ] {
        renderer.set_transform(
            Vec3::new(0.15, 0.25, 0.25),
            Vec3::new(90.0, 0.0, 0.0),
            offset + corner,
        );
        renderer.set_uv_scale(4.0, 1.0);
        renderer.set_texture("plastic");
        renderer.set_material("plastic");
        renderer.draw("cylinder");
    }

    // stand: foot, tilted riser, hinge pin
    renderer.set_transform(
        Vec3::new(1.0, 0.05, 1.0),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 2.55, 5.0),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(1.0, 0.05, 1.0),
        Vec3::new(-65.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 3.025, 4.735),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(0.03, 1.0, 0.03),
        Vec3::new(0.0, 0.0, 90.0),
        offset + Vec3::new(0.5, 2.575, 4.53),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cylinder");

    // back panel
    renderer.set_transform(
        Vec3::new(1.55, 1.2, 1.0),
        Vec3::new(90.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 4.0, 4.855),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("plane");
}

fn draw_keyboard(renderer: &mut SceneRenderer<WgpuBackend>, offset: Vec3) {
    // tilted base plate
    renderer.set_transform(
        Vec3::new(2.0, 0.5, 0.05),
        Vec3::new(-80.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 4.068, 5.005),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    // three rows of nineteen keycaps
    let mut key_space = 0.0;
    let mut y_step = 0.0;
    let mut z_step = 0.0;
    for _ in 0..3 {
        for _ in 0..19 {
            draw_keycap(renderer, offset + Vec3::new(key_space, y_step, z_step));
            key_space += 0.1;
        }
        key_space = 0.0;
        y_step -= 0.025;
        z_step += 0.15;
    }

    // fold-out stand at the back
    renderer.set_transform(
        Vec3::new(2.0, 0.15, 0.005),
        Vec3::new(-120.0, 0.0, 0.0),
        offset + Vec3::new(0.0, 4.068, 4.8),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");
}

fn draw_keycap(renderer: &mut SceneRenderer<WgpuBackend>, offset: Vec3) {
    renderer.set_transform(
        Vec3::new(0.075, 0.075, 0.025),
        Vec3::new(-80.0, 0.0, 0.0),
        offset + Vec3::new(-0.9, 4.12, 4.85),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");
}

fn draw_mouse(renderer: &mut SceneRenderer<WgpuBackend>, offset: Vec3) {
    // body: squashed sphere
    renderer.set_transform(
        Vec3::new(0.15, 0.25, 0.1),
        Vec3::new(90.0, 0.0, 0.0),
        offset + Vec3::new(-0.9, 4.12, 4.85),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("sphere");

    // scroll wheel poking out of the front
    renderer.set_transform(
        Vec3::new(0.1, 0.08, 0.2),
        Vec3::new(0.0, 90.0, 0.0),
        offset + Vec3::new(-0.9, 4.14, 4.75),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("half_torus");
}

fn draw_phone(renderer: &mut SceneRenderer<WgpuBackend>, offset: Vec3) {
    // frame: left, right, top, bottom edges
    renderer.set_transform(
        Vec3::new(0.1, 0.03, 0.5),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-0.9, 4.12, 4.85),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(0.1, 0.03, 0.5),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-0.5, 4.12, 4.85),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(0.4, 0.03, 0.1),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-0.7, 4.12, 4.585),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    renderer.set_transform(
        Vec3::new(0.4, 0.03, 0.1),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-0.7, 4.12, 5.1),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_texture("plastic");
    renderer.set_material("plastic");
    renderer.draw("cube");

    // rounded corners
    for corner in [
        Vec3::new(-0.9, 4.1, 5.1),
        Vec3::new(-0.901, 4.1, 4.5875),
        Vec3::new(-0.5, 4.1, 4.59),
        Vec3::new(-0.5, 4.1, 5.1),
    ] {
        renderer.set_transform(
            Vec3::new(0.05, 0.03, 0.05),
            Vec3::new(0.0, 0.0, 0.0),
            offset + corner,
        );
        renderer.set_uv_scale(4.0, 1.0);
        renderer.set_texture("plastic");
        renderer.set_material("plastic");
        renderer.draw("cylinder");
    }

    // screen: flat dark color
    renderer.set_transform(
        Vec3::new(0.4, 0.025, 0.55),
        Vec3::new(0.0, 0.0, 0.0),
        offset + Vec3::new(-0.7, 4.125, 4.85),
    );
    renderer.set_uv_scale(4.0, 1.0);
    renderer.set_color(0.2, 0.2, 0.2, 1.0);
    renderer.set_material("plastic");
    renderer.draw("cube");
}

fn draw_book(renderer: &mut SceneRenderer<WgpuBackend>, offset: Vec3, rotation: Vec3) {
    // back cover
    renderer.set_transform(
        Vec3::new(0.05, 1.2, 1.0),
        rotation,
        offset + Vec3::new(-0.2, 4.3, 4.85),
    );
    renderer.set_uv_scale(1.0, 1.0);
    renderer.set_texture("BookBack");
    renderer.set_material("BookCover");
    renderer.draw("cube");

    // front cover
    renderer.set_transform(
        Vec3::new(0.05, 1.2, 1.0),
        rotation,
        offset + Vec3::new(0.0, 4.3, 4.85),
    );
    renderer.set_uv_scale(1.0, 1.0);
    renderer.set_texture("BookFront");
    renderer.set_material("BookCover");
    renderer.draw("cube");

    // spine
    renderer.set_transform(
        Vec3::new(0.25, 1.2, 0.05),
        rotation,
        offset + Vec3::new(-0.1025, 4.3, 5.33),
    );
    renderer.set_uv_scale(1.0, 1.0);
    renderer.set_texture("BookSpine");
    renderer.set_material("BookCover");
    renderer.draw("cube");

    // page block between the covers
    renderer.set_transform(
        Vec3::new(0.17, 1.1, 0.95),
        rotation,
        offset + Vec3::new(-0.09, 4.3, 4.85),
    );
    renderer.set_uv_scale(1.0, 1.0);
    renderer.set_texture("Pages");
    renderer.set_material("BookCover");
    renderer.draw("cube");
}
