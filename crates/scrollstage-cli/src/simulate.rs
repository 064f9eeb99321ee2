//! Drives a stage through a list of steps and records a snapshot after each.

use crate::step::{Step, FRAME_SECONDS};
use anyhow::{bail, Context, Result};
use scrollstage::schema::StageRequest;
use scrollstage::{load_stage, Stage, StageSnapshot, Viewport};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub struct Frame {
    pub step: String,
    pub snapshot: StageSnapshot,
}

impl Frame {
    /// Keeps only elements carrying `class`.
    pub fn retain_class(&mut self, class: &str) {
        self.snapshot
            .elements
            .retain(|el| el.classes.iter().any(|c| c == class));
    }
}

pub fn load_request(path: &Path) -> Result<StageRequest> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    StageRequest::from_json(&json)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Mounts `request` and applies `steps` in order. The first frame is the
/// freshly mounted page.
pub fn simulate(request: &StageRequest, steps: &[Step]) -> Result<Vec<Frame>> {
    let mut stage = load_stage(request)?;
    let mut frames = Vec::with_capacity(steps.len() + 1);
    frames.push(Frame {
        step: "mount".to_string(),
        snapshot: stage.snapshot(),
    });

    for step in steps {
        apply(&mut stage, step)?;
        debug!(%step, offset = stage.offset(), "step applied");
        frames.push(Frame {
            step: step.to_string(),
            snapshot: stage.snapshot(),
        });
    }

    info!(frames = frames.len(), "simulation finished");
    Ok(frames)
}

fn apply(stage: &mut Stage, step: &Step) -> Result<()> {
    match step {
        Step::Scroll(offset) => stage.scroll_to(*offset),
        Step::ScrollBy(delta) => stage.scroll_by(*delta),
        Step::Tick(dt) => stage.tick(*dt),
        Step::Run(seconds) => {
            let mut remaining = *seconds;
            while remaining > 0.0 {
                let dt = remaining.min(FRAME_SECONDS);
                stage.tick(dt);
                remaining -= dt;
            }
        }
        Step::End => {
            if let Some(offset) = stage.scroll_end() {
                debug!(offset, "snapped");
            }
        }
        Step::Resize { width, height } => stage.resize(Viewport::new(*width, *height)),
        Step::Unmount(name) => {
            let Some(id) = stage.find(name) else {
                bail!(
                    "no mounted component named '{name}' (mounted: {})",
                    stage.component_names().join(", ")
                );
            };
            stage.unmount(id);
        }
    }
    Ok(())
}
