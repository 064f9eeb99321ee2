//! # Stage
//!
//! The host that stands in for the browser: it owns the scene, the viewport,
//! the scroll offset and the trigger service, and routes scroll, resize and
//! frame events to mounted orchestrators.
//!
//! ## Responsibilities
//! - **Lifecycle**: `mount`/`unmount`. Unmounting cancels every trigger and
//!   animation of the component before returning.
//! - **Input**: `scroll_to`, `scroll_end` (snapping), `resize`, `tick`.
//! - **Output**: `snapshot` for inspection and serialization.

use crate::scene::{ElementId, Rect, Scene};
use crate::style::{Style, Viewport};
use crate::trigger::{OwnerId, TriggerService, TriggerUpdate};
use serde::Serialize;
use tracing::{debug, info};

pub type ComponentId = OwnerId;

/// Snap requests closer than this to the current offset are ignored.
const SNAP_TOLERANCE_PX: f64 = 0.5;

/// Borrowed view of the stage handed to orchestrators.
pub struct StageContext<'a> {
    pub owner: ComponentId,
    pub scene: &'a mut Scene,
    pub triggers: &'a mut TriggerService,
    pub viewport: Viewport,
}

/// A component that animates part of the scene.
pub trait Orchestrator {
    fn name(&self) -> &str;

    /// Builds timelines and registers triggers.
    fn mount(&mut self, ctx: &mut StageContext<'_>);

    /// Reacts to one of this component's trigger updates.
    fn on_trigger(&mut self, update: &TriggerUpdate, ctx: &mut StageContext<'_>);

    /// Advances wall-clock animations.
    fn tick(&mut self, _dt: f64, _ctx: &mut StageContext<'_>) {}

    /// Offset to settle on once scrolling stops, if this component snaps.
    fn snap_target(&self, _offset: f64, _triggers: &TriggerService) -> Option<f64> {
        None
    }

    /// Cancels animations and restores the scene. Triggers owned by the
    /// component are killed by the stage right after this returns.
    fn unmount(&mut self, ctx: &mut StageContext<'_>);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageConfig {
    /// Re-resolve trigger ranges when the viewport changes. Off by default:
    /// ranges keep the viewport height they were mounted with.
    pub refresh_on_resize: bool,
}

pub struct Stage {
    scene: Scene,
    triggers: TriggerService,
    viewport: Viewport,
    offset: f64,
    config: StageConfig,
    components: Vec<(ComponentId, Box<dyn Orchestrator>)>,
    next_component: ComponentId,
}

impl Stage {
    pub fn new(mut scene: Scene, viewport: Viewport, config: StageConfig) -> Self {
        scene.layout(&viewport);
        Self {
            scene,
            triggers: TriggerService::new(),
            viewport,
            offset: 0.0,
            config,
            components: Vec::new(),
            next_component: 1,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn triggers(&self) -> &TriggerService {
        &self.triggers
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn page_height(&self) -> f64 {
        self.scene.page_height()
    }

    pub fn max_scroll(&self) -> f64 {
        (self.page_height() - self.viewport.height).max(0.0)
    }

    pub fn is_mounted(&self, id: ComponentId) -> bool {
        self.components.iter().any(|(c, _)| *c == id)
    }

    /// Finds a mounted component by name.
    pub fn find(&self, name: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .find(|(_, c)| c.name() == name)
            .map(|(id, _)| *id)
    }

    pub fn component_names(&self) -> Vec<String> {
        self.components.iter().map(|(_, c)| c.name().to_string()).collect()
    }

    pub fn mount(&mut self, mut component: Box<dyn Orchestrator>) -> ComponentId {
        let id = self.next_component;
        self.next_component += 1;
        {
            let mut ctx = StageContext {
                owner: id,
                scene: &mut self.scene,
                triggers: &mut self.triggers,
                viewport: self.viewport,
            };
            component.mount(&mut ctx);
        }
        info!(component = component.name(), id, "mounted");
        self.components.push((id, component));
        self.triggers.refresh(&mut self.scene, &self.viewport);
        self.clamp_offset();
        self.dispatch();
        id
    }

    /// Tears a component down. Returns `false` if it was not mounted.
    pub fn unmount(&mut self, id: ComponentId) -> bool {
        let Some(pos) = self.components.iter().position(|(c, _)| *c == id) else {
            return false;
        };
        let (_, mut component) = self.components.remove(pos);
        {
            let mut ctx = StageContext {
                owner: id,
                scene: &mut self.scene,
                triggers: &mut self.triggers,
                viewport: self.viewport,
            };
            component.unmount(&mut ctx);
        }
        let killed = self.triggers.kill_owned(id, &mut self.scene);
        info!(component = component.name(), id, killed, "unmounted");
        self.triggers.refresh(&mut self.scene, &self.viewport);
        self.clamp_offset();
        self.dispatch();
        true
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_scroll());
        self.dispatch();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.offset + delta);
    }

    /// Signals that scroll input stopped; applies the first snap request.
    pub fn scroll_end(&mut self) -> Option<f64> {
        let target = self
            .components
            .iter()
            .find_map(|(_, c)| c.snap_target(self.offset, &self.triggers))
            .filter(|t| (t - self.offset).abs() > SNAP_TOLERANCE_PX)?;
        debug!(from = self.offset, to = target, "snapping");
        self.scroll_to(target);
        Some(self.offset)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.config.refresh_on_resize {
            self.triggers.refresh(&mut self.scene, &self.viewport);
        } else {
            self.scene.layout(&self.viewport);
        }
        self.clamp_offset();
        self.dispatch();
    }

    pub fn tick(&mut self, dt: f64) {
        for (id, component) in self.components.iter_mut() {
            let mut ctx = StageContext {
                owner: *id,
                scene: &mut self.scene,
                triggers: &mut self.triggers,
                viewport: self.viewport,
            };
            component.tick(dt, &mut ctx);
        }
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_scroll());
    }

    fn dispatch(&mut self) {
        let updates = self.triggers.update(self.offset, &mut self.scene);
        for update in &updates {
            let Some((id, component)) = self
                .components
                .iter_mut()
                .find(|(id, _)| *id == update.owner)
            else {
                continue;
            };
            let mut ctx = StageContext {
                owner: *id,
                scene: &mut self.scene,
                triggers: &mut self.triggers,
                viewport: self.viewport,
            };
            component.on_trigger(update, &mut ctx);
        }
    }

    pub fn snapshot(&self) -> StageSnapshot {
        let elements = self
            .scene
            .ids()
            .filter_map(|id| {
                let el = self.scene.get(id)?;
                Some(ElementSnapshot {
                    id,
                    tag: el.tag.clone(),
                    classes: el.classes.clone(),
                    text: el.text.clone(),
                    rect: el.rect,
                    pin_translate: el.pin_translate,
                    style: el.style.clone(),
                })
            })
            .collect();
        StageSnapshot {
            offset: self.offset,
            viewport: self.viewport,
            page_height: self.page_height(),
            components: self.component_names(),
            elements,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ElementSnapshot {
    pub id: ElementId,
    pub tag: String,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub rect: Rect,
    pub pin_translate: f64,
    pub style: Style,
}

#[derive(Clone, Debug, Serialize)]
pub struct StageSnapshot {
    pub offset: f64,
    pub viewport: Viewport,
    pub page_height: f64,
    pub components: Vec<String>,
    pub elements: Vec<ElementSnapshot>,
}
