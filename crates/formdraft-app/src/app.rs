//! Core application state and lifecycle.

use std::sync::Arc;

use egui::Color32;
use formdraft_core::storage::create_default_storage;
use formdraft_core::{CanvasConfig, Confirmation, FormCanvas, LayoutStore, MemoryStorage, Notice, PointerOutcome};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::event_handler::EventHandler;
use crate::gpu::GpuState;
use crate::ui::{UiAction, UiState, render_ui};

/// Hand-off slot for the GPU state created asynchronously in the browser.
#[cfg(target_arch = "wasm32")]
mod pending {
    use std::cell::RefCell;

    use crate::gpu::{GpuError, GpuState};

    thread_local! {
        static PENDING_GPU: RefCell<Option<Result<GpuState, GpuError>>> = const { RefCell::new(None) };
    }

    pub fn set(result: Result<GpuState, GpuError>) {
        PENDING_GPU.with(|slot| *slot.borrow_mut() = Some(result));
    }

    pub fn take() -> Option<Result<GpuState, GpuError>> {
        PENDING_GPU.with(|slot| slot.borrow_mut().take())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background: Color32,
    pub canvas: CanvasConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "FormDraft".to_string(),
            width: 1280,
            height: 800,
            background: Color32::from_rgb(243, 244, 246),
            canvas: CanvasConfig::default(),
        }
    }
}

/// Runtime state for the application.
struct AppState {
    window: Arc<Window>,
    gpu: GpuState,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    canvas: FormCanvas,
    storage: Box<dyn LayoutStore>,
    event_handler: EventHandler,
    background: wgpu::Color,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    /// Window waiting for async GPU setup (WASM only).
    pending_window: Option<Arc<Window>>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            pending_window: None,
        }
    }

    /// Run the application.
    pub async fn run() {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                log::error!("Failed to create event loop: {e}");
                return;
            }
        };
        let app = App::new();

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            if let Err(e) = event_loop.run_app(&mut app) {
                log::error!("Event loop error: {e}");
            }
        }
    }

    /// Finish initialization once the GPU is ready.
    fn finish_init(&mut self, window: Arc<Window>, mut gpu: GpuState) {
        let size = window.inner_size();
        gpu.resize(size.width, size.height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, egui_wgpu::RendererOptions::default());

        log::info!("FormDraft initialized - {}x{}", gpu.config.width, gpu.config.height);

        self.state = Some(AppState {
            window: window.clone(),
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            canvas: FormCanvas::with_config(self.config.canvas.clone()),
            storage: open_storage(),
            event_handler: EventHandler::new(),
            background: clear_color(self.config.background),
        });
        self.pending_window = None;

        window.request_redraw();
    }

    /// Pick up the GPU state produced by the async setup task.
    #[cfg(target_arch = "wasm32")]
    fn poll_pending_init(&mut self) {
        let Some(result) = pending::take() else {
            return;
        };
        match (result, self.pending_window.take()) {
            (Ok(gpu), Some(window)) => self.finish_init(window, gpu),
            (Ok(_), None) => log::warn!("GPU ready but the window is gone"),
            (Err(e), _) => log::error!("Failed to initialize GPU: {e}"),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn open_storage() -> Box<dyn LayoutStore> {
    match create_default_storage() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("Layout storage unavailable ({e}), saves will not outlive this session");
            Box::new(MemoryStorage::new())
        }
    }
}

fn clear_color(color: Color32) -> wgpu::Color {
    wgpu::Color {
        r: color.r() as f64 / 255.0,
        g: color.g() as f64 / 255.0,
        b: color.b() as f64 / 255.0,
        a: color.a() as f64 / 255.0,
    }
}

/// Carry out a UI action against the canvas.
fn apply_action(canvas: &mut FormCanvas, ui_state: &mut UiState, storage: &dyn LayoutStore, action: UiAction) {
    match action {
        UiAction::AddWidget(kind) => {
            canvas.add_widget(kind);
        }
        UiAction::DeleteWidget(id) => {
            canvas.delete_widget(&id);
        }
        UiAction::ConfirmClear => {
            if canvas.clear(Confirmation::Confirmed) {
                ui_state.notice = Some(Notice::Cleared);
            }
        }
        UiAction::CancelClear => {
            canvas.clear(Confirmation::Declined);
        }
        UiAction::SaveLayout => {
            let notice = canvas.save(storage).unwrap_or_else(|e| {
                log::error!("Failed to save layout: {e}");
                Notice::SaveFailed { reason: e.to_string() }
            });
            ui_state.notice = Some(notice);
        }
        UiAction::LoadLayout => {
            ui_state.notice = Some(canvas.load(storage));
        }
        UiAction::DismissNotice => {
            ui_state.notice = None;
        }
        UiAction::CommitEdit => {
            canvas.commit_edit();
        }
        UiAction::CancelEdit => {
            canvas.cancel_edit();
        }
        UiAction::SetChecked(id, checked) => {
            canvas.set_checked(&id, checked);
        }
        UiAction::SelectOption(id, index) => {
            canvas.select_option(&id, index);
        }
    }
}

/// Carry out one frame's actions in order.
fn apply_actions(canvas: &mut FormCanvas, ui_state: &mut UiState, storage: &dyn LayoutStore, actions: Vec<UiAction>) {
    for action in actions {
        apply_action(canvas, ui_state, storage, action);
    }
}

impl AppState {
    fn redraw(&mut self) {
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut deferred_actions: Vec<UiAction> = Vec::new();
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            let output = render_ui(ctx, &mut self.ui_state, &mut self.canvas);
            deferred_actions = output.actions;

            if self.ui_state.modal_open() {
                // The dialog swallows the rest of any gesture, release included.
                self.event_handler.reset();
                self.canvas.cancel_pointer();
                return;
            }
            let events = ctx.input(|i| i.events.clone());
            for event in self.event_handler.translate(&events, output.canvas_rect) {
                if let PointerOutcome::EditStarted(_) = self.canvas.handle_pointer(event) {
                    self.ui_state.focus_edit = true;
                }
            }
        });

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);

        apply_actions(&mut self.canvas, &mut self.ui_state, self.storage.as_ref(), deferred_actions);

        let egui_primitives = self.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                self.window.request_redraw();
                return;
            }
            Err(e) => {
                log::warn!("Failed to get surface texture: {e:?}");
                return;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui encoder"),
        });
        let user_commands =
            self.egui_renderer
                .update_buffers(device, queue, &mut encoder, &egui_primitives, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static pass.
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
        }

        queue.submit(user_commands.into_iter().chain(std::iter::once(encoder.finish())));

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
        self.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.pending_window.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height));

        // On WASM the canvas element is appended to the page body.
        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;
            Window::default_attributes()
                .with_title(&self.config.title)
                .with_append(true)
        };

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {width}x{height}");

        #[cfg(not(target_arch = "wasm32"))]
        {
            match pollster::block_on(GpuState::new(window.clone(), width, height)) {
                Ok(gpu) => self.finish_init(window, gpu),
                Err(e) => {
                    log::error!("Failed to initialize GPU: {e}");
                    event_loop.exit();
                }
            }
        }

        // Adapter and device requests are async in the browser.
        #[cfg(target_arch = "wasm32")]
        {
            let task_window = window.clone();
            wasm_bindgen_futures::spawn_local(async move {
                log::info!("Creating surface asynchronously...");
                pending::set(GpuState::new(task_window.clone(), width, height).await);
                task_window.request_redraw();
            });
            self.pending_window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            self.poll_pending_init();
            if self.state.is_none() {
                if let Some(window) = &self.pending_window {
                    window.request_redraw();
                }
                return;
            }
        }

        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                state.redraw();
            }
            _ => {
                if egui_response.repaint {
                    state.window.request_redraw();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdraft_core::{StorageError, StorageResult, WidgetKind};

    struct ReadOnlyStorage;

    impl LayoutStore for ReadOnlyStorage {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn test_save_and_load_report_notices() {
        let storage = MemoryStorage::new();
        let mut canvas = FormCanvas::new();
        let mut ui_state = UiState::default();

        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::LoadLayout);
        assert_eq!(ui_state.notice, Some(Notice::NothingToLoad));

        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::AddWidget(WidgetKind::Button));
        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::AddWidget(WidgetKind::Checkbox));
        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::SaveLayout);
        assert_eq!(ui_state.notice, Some(Notice::Saved));

        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::DismissNotice);
        assert!(!ui_state.modal_open());

        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::ConfirmClear);
        assert!(canvas.document().is_empty());
        assert_eq!(ui_state.notice, Some(Notice::Cleared));

        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::LoadLayout);
        assert_eq!(ui_state.notice, Some(Notice::Loaded { count: 2 }));
        assert_eq!(canvas.document().len(), 2);
    }

    #[test]
    fn test_save_failure_becomes_notice() {
        let mut canvas = FormCanvas::new();
        let mut ui_state = UiState::default();
        apply_action(&mut canvas, &mut ui_state, &ReadOnlyStorage, UiAction::SaveLayout);
        assert!(matches!(ui_state.notice, Some(Notice::SaveFailed { .. })));
    }

    #[test]
    fn test_cancel_clear_keeps_widgets() {
        let storage = MemoryStorage::new();
        let mut canvas = FormCanvas::new();
        let mut ui_state = UiState::default();
        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::AddWidget(WidgetKind::Image));
        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::CancelClear);
        assert_eq!(canvas.document().len(), 1);
        assert!(ui_state.notice.is_none());
    }

    #[test]
    fn test_field_actions() {
        let storage = MemoryStorage::new();
        let mut canvas = FormCanvas::new();
        let mut ui_state = UiState::default();
        let checkbox = canvas.add_widget(WidgetKind::Checkbox);
        let dropdown = canvas.add_widget(WidgetKind::Dropdown);

        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::SetChecked(checkbox.clone(), true));
        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::SelectOption(dropdown.clone(), 2));
        apply_action(&mut canvas, &mut ui_state, &storage, UiAction::DeleteWidget(checkbox.clone()));

        assert!(canvas.widget(&checkbox).is_none());
        let selected = canvas.widget(&dropdown).and_then(|w| w.content.selected_option().map(str::to_string));
        assert_eq!(selected.as_deref(), Some("Option 3"));
    }

    #[test]
    fn test_frame_actions_apply_in_order() {
        let storage = MemoryStorage::new();
        let mut canvas = FormCanvas::new();
        let mut ui_state = UiState::default();
        let button = canvas.add_widget(WidgetKind::Button);
        assert!(canvas.begin_edit(&button));
        canvas.edit_session_mut().unwrap().draft = "Send".to_string();

        // Clicking Save takes focus from the editor in the same frame.
        let actions = vec![UiAction::CommitEdit, UiAction::SaveLayout];
        apply_actions(&mut canvas, &mut ui_state, &storage, actions);

        assert_eq!(ui_state.notice, Some(Notice::Saved));
        assert_eq!(canvas.widget(&button).unwrap().content.text(), Some("Send"));
        let blob = storage.read("componentLayout").unwrap().unwrap();
        assert!(blob.contains("\"Send\""));
    }

    #[test]
    fn test_clear_color() {
        let color = clear_color(Color32::from_rgb(255, 0, 51));
        assert_eq!((color.r, color.g, color.b, color.a), (1.0, 0.0, 0.2, 1.0));
    }
}
