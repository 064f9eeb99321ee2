//! Style and text bookkeeping for teardown.
//!
//! An `AnimationContext` remembers the style and text every touched element had
//! before a component first changed it, so `revert` can put the scene back
//! exactly as the component found it.

use crate::scene::{ElementId, Scene};
use crate::style::{PropValue, Property, Style};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct AnimationContext {
    originals: BTreeMap<ElementId, Style>,
    texts: BTreeMap<ElementId, Option<String>>,
}

impl AnimationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id`'s current style unless it is already recorded.
    pub fn record(&mut self, scene: &Scene, id: ElementId) {
        if let Some(el) = scene.get(id) {
            self.originals.entry(id).or_insert_with(|| el.style.clone());
            self.texts.entry(id).or_insert_with(|| el.text.clone());
        }
    }

    pub fn record_all(&mut self, scene: &Scene, ids: impl IntoIterator<Item = ElementId>) {
        for id in ids {
            self.record(scene, id);
        }
    }

    /// Records then immediately sets `props` on every target.
    pub fn set(
        &mut self,
        scene: &mut Scene,
        targets: &[ElementId],
        props: &[(Property, PropValue)],
    ) {
        for &id in targets {
            self.record(scene, id);
            if let Some(el) = scene.get_mut(id) {
                for &(property, value) in props {
                    el.style.set(property, value);
                }
            }
        }
    }

    pub fn is_recorded(&self, id: ElementId) -> bool {
        self.originals.contains_key(&id)
    }

    /// Restores every recorded element and forgets them.
    pub fn revert(&mut self, scene: &mut Scene) {
        for (id, style) in std::mem::take(&mut self.originals) {
            if let Some(el) = scene.get_mut(id) {
                el.style = style;
            }
        }
        for (id, text) in std::mem::take(&mut self.texts) {
            if let Some(el) = scene.get_mut(id) {
                el.text = text;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Element;

    #[test]
    fn revert_restores_first_recorded_style() {
        let mut scene = Scene::new();
        let id = scene.add_element(Element::new("div").with_text("0"));
        let mut ctx = AnimationContext::new();

        ctx.set(
            &mut scene,
            &[id],
            &[(Property::Opacity, PropValue::Number(0.0))],
        );
        ctx.set(&mut scene, &[id], &[(Property::Y, PropValue::Number(40.0))]);
        scene.get_mut(id).unwrap().text = Some("150".into());

        ctx.revert(&mut scene);
        let el = scene.get(id).unwrap();
        assert_eq!(el.style, Style::default());
        assert_eq!(el.text.as_deref(), Some("0"));
        assert!(!ctx.is_recorded(id));
    }

    #[test]
    fn missing_targets_are_ignored() {
        let mut scene = Scene::new();
        let mut ctx = AnimationContext::new();
        ctx.set(
            &mut scene,
            &[3],
            &[(Property::Opacity, PropValue::Number(0.0))],
        );
        assert!(!ctx.is_recorded(3));
    }
}
