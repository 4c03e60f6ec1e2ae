use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState, Key};
use crate::time::{FpsCounter, FrameClock};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Quit when Escape is pressed.
    pub escape_closes: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "orrery".to_string(),
            initial_size: LogicalSize::new(720.0, 720.0),
            escape_closes: true,
        }
    }
}

/// Entry point for the render loop.
pub struct Runtime;

impl Runtime {
    /// Opens the window and redraws it continuously until it is closed or the
    /// app returns [`AppControl::Exit`].
    pub fn run<A: App>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut lab = Lab {
            config,
            gpu_init,
            app,
            entry: None,
            failure: None,
        };

        event_loop
            .run_app(&mut lab)
            .context("winit event loop terminated with error")?;

        match lab.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window and everything bound to it. Timing and FPS state live here, so
/// they belong to this render loop and nothing else.
#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    fps: FpsCounter,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            fps: FpsCounter::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }
}

struct Lab<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    /// Set when window or GPU setup fails; returned from `Runtime::run`.
    failure: Option<anyhow::Error>,
}

impl<A: App> Lab<A> {
    /// Ticks the clocks, runs one app frame and returns whether to keep going.
    fn redraw(&mut self) -> AppControl {
        let (app, escape_closes) = (&mut self.app, self.config.escape_closes);
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let fps = fields.fps.frame(time.elapsed);

            let mut ctx = FrameCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
                input_frame: fields.input_frame,
                time,
                fps,
            };
            let mut control = app.on_frame(&mut ctx);

            // Checked after the frame so the app still sees the press.
            if escape_closes && fields.input_frame.key_pressed(Key::Escape) {
                log::info!("escape pressed, closing");
                control = AppControl::Exit;
            }

            fields.input_frame.clear();
            control
        })
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.entry = None;
        event_loop.exit();
    }
}

impl<A: App> ApplicationHandler for Lab<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match WindowEntry::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("failed to open the window: {err:#}");
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // The scene animates every frame.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let app = &mut self.app;
        let Some(entry) = self.entry.as_mut().filter(|e| e.id() == window_id) else {
            return;
        };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        if app.on_window_event(&event) == AppControl::Exit {
            self.close(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.close(event_loop);
                }
            }

            _ => {}
        }
    }
}
