//! Central application state.
//!
//! Rendering reads `&AppState`; input handling and the event loop mutate it.
//! The strips own their scroll surfaces; the orchestrator only ever sees weak
//! handles to them.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::rc::Rc;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::catalog::{self, Category, Subitem};
use crate::core::drag::DragController;
use crate::core::listeners::ListenerHost;
use crate::core::orchestrator::CarouselOrchestrator;
use crate::core::registry::InstanceId;
use crate::core::responsive::ResponsiveGate;
use crate::core::surface::{handle_of, SharedSurface};
use crate::ui::layout::AppLayout;

use super::hub::EventHub;
use super::strip::StripSurface;

/// One mounted category strip.
pub struct Strip {
    pub id: InstanceId,
    pub name: String,
    pub has_image: bool,
    pub items: Vec<Subitem>,
    pub surface: Rc<RefCell<StripSurface>>,
}

/// Where the catalog comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Demo,
    File(PathBuf),
}

pub struct AppState {
    pub config: AppConfig,
    pub source: CatalogSource,
    pub strips: Vec<Strip>,
    pub hub: Rc<EventHub>,
    pub orchestrator: CarouselOrchestrator,
    /// Index into `strips` of the keyboard-focused strip.
    pub focused: usize,
    /// First strip drawn (vertical scroll of the strip list).
    pub first_visible: usize,
    /// Strip currently under the pointer, for leave detection.
    pub hovered: Option<InstanceId>,
    /// Visible error banner from the last failed catalog load.
    pub load_error: Option<String>,
    pub status_message: Option<String>,
    pub terminal_area: Rect,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, source: CatalogSource, terminal_area: Rect) -> Self {
        let hub = Rc::new(EventHub::default());
        let host: Rc<dyn ListenerHost> = hub.clone();
        let orchestrator = CarouselOrchestrator::new(
            host,
            DragController::new(config.drag_sensitivity),
            ResponsiveGate::new(config.paging_breakpoint),
        );
        let mut state = Self {
            config,
            source,
            strips: Vec::new(),
            hub,
            orchestrator,
            focused: 0,
            first_visible: 0,
            hovered: None,
            load_error: None,
            status_message: None,
            terminal_area,
            should_quit: false,
        };
        state.resize(terminal_area);
        state
    }

    /// Window width in engine pixels.
    pub fn viewport_width_px(&self) -> f64 {
        f64::from(self.terminal_area.width) * self.config.cell_width
    }

    pub fn focused_id(&self) -> Option<&InstanceId> {
        self.strips.get(self.focused).map(|s| &s.id)
    }

    pub fn strip_index(&self, id: &InstanceId) -> Option<usize> {
        self.strips.iter().position(|s| &s.id == id)
    }

    // ── catalog ─────────────────────────────────────────────────

    /// (Re)load the catalog.  A failed read keeps the current strips and
    /// shows an error banner instead.
    pub fn reload(&mut self) {
        let result = match &self.source {
            CatalogSource::Demo => Ok(catalog::demo_catalog()),
            CatalogSource::File(path) => catalog::load_catalog(path),
        };
        match result {
            Ok(catalog) => {
                self.load_error = None;
                self.status_message = Some(format!("{} categories", catalog.len()));
                self.apply_catalog(catalog);
            }
            Err(err) => {
                tracing::error!(%err, "catalog load failed");
                self.load_error = Some(err.to_string());
            }
        }
    }

    /// Mount, update and unmount strips to match `catalog`.
    pub fn apply_catalog(&mut self, catalog: Vec<Category>) {
        // Vanished ids are unregistered here, before their surfaces drop.
        let to_mount: HashSet<InstanceId> = self.orchestrator.sync_catalog(&catalog).into_iter().collect();

        let mut previous: HashMap<InstanceId, Strip> =
            self.strips.drain(..).map(|s| (s.id.clone(), s)).collect();

        for category in catalog {
            let id = category.instance_id();
            let has_image = category.image_url.is_some();
            let items = category.subitems;

            let reused = previous.remove(&id).filter(|_| !to_mount.contains(&id));
            let strip = match reused {
                Some(mut strip) => {
                    if strip.surface.borrow_mut().set_item_count(items.len()) {
                        self.orchestrator.on_content_changed(&id);
                    }
                    strip.name = category.name;
                    strip.has_image = has_image;
                    strip.items = items;
                    strip
                }
                None => {
                    let surface = Rc::new(RefCell::new(StripSurface::new(
                        items.len(),
                        self.config.cell_width,
                        self.config.scroll_speed,
                    )));
                    let shared: SharedSurface = surface.clone();
                    self.orchestrator.register(id.clone(), handle_of(&shared));
                    Strip {
                        id,
                        name: category.name,
                        has_image,
                        items,
                        surface,
                    }
                }
            };
            self.strips.push(strip);
        }

        if let Some(hovered) = &self.hovered {
            if self.strip_index(hovered).is_none() {
                self.hovered = None;
            }
        }
        self.focused = self.focused.min(self.strips.len().saturating_sub(1));
        self.layout_strips();
    }

    // ── platform events ─────────────────────────────────────────

    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        if self.hub.listens_for_resize() {
            self.orchestrator.on_resize(self.viewport_width_px());
        }
    }

    /// Advance smooth-scroll animations.
    pub fn tick(&mut self) {
        for strip in &self.strips {
            strip.surface.borrow_mut().tick();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.strips.iter().any(|s| s.surface.borrow().is_animating())
    }

    /// Commit layout for the current terminal area: strip viewport widths
    /// and the vertical window of visible strips.
    pub fn layout_strips(&mut self) {
        let layout = AppLayout::from_area(self.terminal_area);
        let cols = layout.strip_viewport_cols();
        for strip in &self.strips {
            strip.surface.borrow_mut().set_viewport_cols(cols);
        }

        let visible = layout.visible_strip_count().max(1);
        if self.focused < self.first_visible {
            self.first_visible = self.focused;
        } else if self.focused >= self.first_visible + visible {
            self.first_visible = self.focused + 1 - visible;
        }
        self.first_visible = self.first_visible.min(self.strips.len().saturating_sub(1));
    }

    /// Deliver pending native scroll events to subscribed listeners.
    pub fn dispatch_scroll_events(&mut self) {
        for strip in &self.strips {
            let scrolled = strip.surface.borrow_mut().take_scrolled();
            if scrolled && self.hub.listens_for_scroll(&strip.id) {
                self.orchestrator.on_scroll(&strip.id);
            }
        }
    }

    /// One frame of the platform: commit layout, flush scroll events, then
    /// let the engine measure anything that was waiting on layout.
    pub fn settle_frame(&mut self) {
        self.layout_strips();
        self.dispatch_scroll_events();
        self.orchestrator.on_frame();
    }

    pub fn teardown(&mut self) {
        self.orchestrator.teardown();
        self.strips.clear();
        tracing::debug!(listeners = self.hub.listener_count(), "app torn down");
    }
}
