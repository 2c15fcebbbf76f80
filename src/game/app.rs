use std::time::Instant;

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use crate::engine::audio::AudioSystem;
use crate::engine::config::Settings;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::graphics::draw::BLACK;
use crate::engine::graphics::{DrawList, Renderer};
use crate::engine::input::{Controller, InputHandler};
use crate::engine::timing::FrameClock;
use crate::engine::window::WindowManager;
use crate::game::assets::{Assets, Filtering};
use crate::game::demo::DemoKind;
use crate::game::demos::{Demos, FrameContext};
use crate::game::state::{AppRequest, DemoState};

pub struct App {
    settings: Settings,
    window_manager: WindowManager,
    renderer: Option<Renderer>,
    demos: Option<Demos>,
    audio: AudioSystem,
    controller: Option<Controller>,
    input: InputHandler,
    state: DemoState,
    clock: FrameClock,
    rng: StdRng,
    draw: DrawList,
    /// Set when startup failed; reported once the event loop has exited.
    error: Option<EngineError>,
}

impl App {
    pub fn new(settings: Settings) -> EngineResult<Self> {
        let start = DemoKind::from_name(&settings.demo.start).unwrap_or_else(|| {
            warn!("Unknown demo {:?}, starting with the default", settings.demo.start);
            DemoKind::default()
        });
        let state = DemoState::new(
            start,
            settings.audio.volume,
            settings.display.vsync,
            settings.demo.frame_rate,
        );
        let audio = AudioSystem::start(settings.demo.asset_dir.clone(), &settings.audio)?;
        info!("Starting with the {} demo", start.name());

        Ok(Self {
            window_manager: WindowManager::new(),
            renderer: None,
            demos: None,
            audio,
            controller: Controller::new(),
            input: InputHandler::new(),
            clock: FrameClock::new(state.frame_rate),
            state,
            rng: StdRng::from_entropy(),
            draw: DrawList::new(),
            error: None,
            settings,
        })
    }

    /// The error that stopped the application during startup, if any.
    pub fn take_error(&mut self) -> Option<EngineError> {
        self.error.take()
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> EngineResult<()> {
        let display = &self.settings.display;
        let (width, height) = display.resolution();
        let window = self
            .window_manager
            .create_window(event_loop, width, height, display.windowed)?;
        let mut renderer = pollster::block_on(Renderer::new(window, self.state.vsync))?;

        let assets = Assets::build(&self.settings.demo.asset_dir, |label, image, filtering| {
            let filter = match filtering {
                Filtering::Smooth => wgpu::FilterMode::Linear,
                Filtering::Pixelated => wgpu::FilterMode::Nearest,
            };
            renderer.register_texture(image, label, filter)
        });
        self.demos = Some(Demos::new(&assets, &mut self.rng));
        self.renderer = Some(renderer);
        Ok(())
    }

    fn handle_request(&mut self, request: AppRequest, event_loop: &ActiveEventLoop) {
        match request {
            AppRequest::Resize(width, height) => self.window_manager.request_resolution(width, height),
            AppRequest::ToggleFullscreen => self.window_manager.toggle_fullscreen(),
            AppRequest::SetVSync(vsync) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_vsync(vsync);
                }
                info!("VSync: {}", vsync);
            }
            AppRequest::SetBlending(blending) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_blending(blending);
                }
                info!("Blending: {}", blending);
            }
            AppRequest::SetFrameRate(fps) => {
                self.clock.set_target_fps(fps);
                info!("Frame cap: {}", if fps > 0.0 { format!("{} fps", fps) } else { "off".into() });
            }
            AppRequest::Quit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.clock.tick();

        if let Some(controller) = &mut self.controller {
            let input = &mut self.input;
            controller.poll(|button, pressed| input.handle_pad_button(button, pressed));
        }
        for command in self.input.take_commands() {
            if let Some(request) = self.state.apply(command, &mut self.audio) {
                self.handle_request(request, event_loop);
            }
        }

        let mut quit = false;
        if !self.state.is_focused() {
            self.draw.clear(BLACK);
        } else if let Some(demos) = &mut self.demos {
            let mut ctx = FrameContext::new(&self.input, &mut self.audio, &mut self.rng, self.clock.frame_time_ms());
            ctx.fps = self.clock.current_fps();
            ctx.paused = self.state.paused;
            ctx.lighting = self.state.lighting;
            demos.frame(self.state.current, &mut ctx, &mut self.draw);
            quit = ctx.quit_requested();
        }

        if let Some(renderer) = &mut self.renderer {
            match renderer.render(&self.draw) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("Out of GPU memory");
                    event_loop.exit();
                }
                Err(e) => warn!("Dropped frame: {:?}", e),
            }
        }

        if quit {
            info!("Quit from the menu");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            error!("Display initialisation failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    self.input.handle_keyboard_input_event(keycode, pressed, event.repeat);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(renderer) = &self.renderer {
                    self.input.handle_cursor_moved(position.x, position.y, &renderer.scaling());
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.input.handle_left_button(state == ElementState::Pressed);
            }
            WindowEvent::Focused(focused) => {
                self.state.set_focused(focused, &mut self.audio);
                if !focused {
                    self.input.release_all();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.clock.next_frame_deadline() {
            Some(deadline) if Instant::now() < deadline => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Poll);
                self.window_manager.request_redraw();
            }
        }
    }
}
