/// Window application: connects the winit window, wgpu renderer, command
/// runner, and prompt session.

use crate::config::Config;
use crate::core::{ascii_for_key, KeyPress, Session, Transition};
use crate::exec::CommandRunner;
use crate::renderer::atlas::GlyphAtlas;
use crate::renderer::cursor::CursorBlink;
use crate::renderer::pipeline::RenderState;
use crate::renderer::text::TextBatch;

use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey, PhysicalKey};
use winit::window::{Window, WindowId};

/// Left margin shared by the prompt and output lines.
const TEXT_MARGIN_X: f32 = 50.0;
/// Baseline of the prompt line, measured up from the window bottom.
const PROMPT_BASELINE_Y: f32 = 50.0;
/// The first output baseline sits this far below the window top.
const OUTPUT_TOP_OFFSET: f32 = 100.0;
const INITIAL_QUADS: usize = 2048;

pub struct App {
    window: Option<Arc<Window>>,
    render: Option<RenderState>,
    atlas: GlyphAtlas,
    session: Session,
    runner: CommandRunner,
    cursor: CursorBlink,
    modifiers: ModifiersState,
    config: Config,
}

impl App {
    pub fn new(config: Config, username: String, atlas: GlyphAtlas) -> Self {
        let runner = CommandRunner::new(&config.shell);
        Self {
            window: None,
            render: None,
            atlas,
            session: Session::new(username),
            runner,
            cursor: CursorBlink::new(Instant::now()),
            modifiers: ModifiersState::default(),
            config,
        }
    }

    fn init_renderer(&mut self, window: Arc<Window>) {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("No GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("quadterm-device"),
                ..Default::default()
            },
            None,
        ))
        .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let render =
            RenderState::new_with_surface(device, queue, surface, config, &self.atlas, INITIAL_QUADS);

        self.render = Some(render);
        self.window = Some(window);
    }

    fn render_frame(&mut self) {
        let Some(window) = &self.window else { return };
        let Some(render) = &mut self.render else { return };

        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.cursor.tick(Instant::now());

        let colors = &self.config.colors;
        let line_height = self.atlas.line_height();
        let mut batch = TextBatch::new();

        // Output fills from the top down; lines pushed past the bottom
        // edge stay in the session but are not drawn.
        let mut y = size.height as f32 - OUTPUT_TOP_OFFSET;
        let output_color = colors.output_color().to_f32();
        for line in self.session.output() {
            if y < -line_height {
                break;
            }
            batch.draw_text(&self.atlas, line, TEXT_MARGIN_X, y, 1.0, output_color);
            y -= line_height;
        }

        let prompt = self.session.prompt_line();
        let pen = batch.draw_text(
            &self.atlas,
            &prompt,
            TEXT_MARGIN_X,
            PROMPT_BASELINE_Y,
            1.0,
            colors.prompt_color().to_f32(),
        );

        if self.cursor.is_visible() {
            batch.draw_text(
                &self.atlas,
                "_",
                pen,
                PROMPT_BASELINE_Y,
                1.0,
                colors.cursor_color().to_f32(),
            );
        }

        render.draw_frame(&batch, colors.background_color());
    }

    fn handle_key_input(&mut self, event_loop: &ActiveEventLoop, event: &winit::event::KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }

        let press = match &event.logical_key {
            Key::Named(NamedKey::Backspace) => Some(KeyPress::Backspace),
            Key::Named(NamedKey::Enter) => Some(KeyPress::Enter),
            _ => match event.physical_key {
                PhysicalKey::Code(KeyCode::KeyC) if self.modifiers.control_key() => {
                    Some(KeyPress::Interrupt)
                }
                PhysicalKey::Code(code) => {
                    ascii_for_key(code, self.modifiers.shift_key()).map(KeyPress::Char)
                }
                _ => None,
            },
        };

        let Some(press) = press else { return };

        match self.session.handle_key(press) {
            Transition::None => {}
            Transition::Submit(cmd) => {
                // Blocks until the child exits; the window freezes for
                // long-running commands.
                let lines = self.runner.run(&cmd);
                self.session.append_output(lines);
            }
            Transition::Close => event_loop.exit(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );
        self.init_renderer(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                // The window is created non-resizable, but the compositor
                // may still deliver one initial resize.
                if size.width > 0 && size.height > 0 {
                    if let Some(render) = &mut self.render {
                        render.resize(size.width, size.height);
                    }
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key_input(event_loop, &event);
            }

            WindowEvent::RedrawRequested => {
                self.render_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
