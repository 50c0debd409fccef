//! # Windowed Host
//!
//! [`GalleryApp`] drives a [`SphereGallery`] from a winit event loop: it
//! forwards pointer and keyboard input, keeps the viewport in sync with the
//! window, and ticks the gallery once per redraw. Drawing is left to the
//! embedding renderer, which reads [`SphereGallery::instances`] each frame.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use cgmath::Vector2;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::GalleryConfig;
use crate::controls::InputEvent;
use crate::gallery::{GalleryItem, SelectCallback, SphereGallery};

const WINDOW_TITLE: &str = "Spherefolio";

/// Longest frame step fed to the gallery, in seconds.
const MAX_FRAME_DT: f32 = 0.1;

pub struct GalleryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    gallery: SphereGallery,
    cursor: Vector2<f32>,
    last_frame: Option<Instant>,
    select_callback: Option<SelectCallback>,
}

impl GalleryApp {
    /// Create a new gallery application showing `items`
    pub fn new(config: GalleryConfig, items: Vec<GalleryItem>) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let gallery =
            SphereGallery::with_items(config, items).context("failed to build gallery")?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                gallery,
                cursor: Vector2::new(0.0, 0.0),
                last_frame: None,
                select_callback: None,
            },
        })
    }

    /// Set the callback fired when the focused item changes
    pub fn on_select<F>(&mut self, callback: F)
    where
        F: FnMut(Option<&GalleryItem>) + 'static,
    {
        self.app_state.select_callback = Some(Box::new(callback));
    }

    pub fn gallery(&self) -> &SphereGallery {
        &self.app_state.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut SphereGallery {
        &mut self.app_state.gallery
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated with an error")
    }
}

impl AppState {
    /// Hooks the gallery's selection callback up to the window title, then
    /// forwards to any callback already registered on the gallery and to the
    /// host's own callback, in that order.
    fn install_select_callback<T>(&mut self, set_title: T)
    where
        T: FnMut(&str) + 'static,
    {
        let callbacks: Vec<SelectCallback> = self
            .gallery
            .take_on_select()
            .into_iter()
            .chain(self.select_callback.take())
            .collect();
        self.gallery.on_select(chain_select_callbacks(set_title, callbacks));
    }

    fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);
        dt.min(MAX_FRAME_DT)
    }
}

/// Window title for the focused item.
fn window_title(item: Option<&GalleryItem>) -> String {
    match item {
        Some(item) if item.meta.title.is_empty() => format!("{WINDOW_TITLE} | item {}", item.id),
        Some(item) => format!("{WINDOW_TITLE} | {}", item.meta.title),
        None => WINDOW_TITLE.to_string(),
    }
}

fn chain_select_callbacks<T>(mut set_title: T, mut callbacks: Vec<SelectCallback>) -> SelectCallback
where
    T: FnMut(&str) + 'static,
{
    Box::new(move |item: Option<&GalleryItem>| {
        set_title(&window_title(item));
        for callback in callbacks.iter_mut() {
            callback(item);
        }
    })
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1280, 800));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let window_handle = Arc::new(window);
                let PhysicalSize { width, height } = window_handle.inner_size();
                self.gallery.set_viewport(width as f32, height as f32);
                let title_window = window_handle.clone();
                self.install_select_callback(move |title| title_window.set_title(title));
                self.window = Some(window_handle);
                log::info!("window created at {width}x{height}");
            }
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                self.cursor = Vector2::new(x as f32, y as f32);
                self.gallery.push_event(InputEvent::PointerMove {
                    position: self.cursor,
                });
            }
            WindowEvent::CursorLeft { .. } => {
                self.gallery.push_event(InputEvent::PointerLeave);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let position = self.cursor;
                let input = match state {
                    ElementState::Pressed => InputEvent::PointerDown { position },
                    ElementState::Released => InputEvent::PointerUp { position },
                };
                self.gallery.push_event(input);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.gallery.push_event(InputEvent::Escape);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.gallery.set_viewport(width as f32, height as f32);
            }
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let dt = self.frame_dt();
                self.gallery.tick(dt);
                log::trace!(
                    "frame dt={dt:.4} selected={:?} settled={}",
                    self.gallery.selected_id(),
                    self.gallery.rotation().is_settled()
                );
                window.pre_present_notify();
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
