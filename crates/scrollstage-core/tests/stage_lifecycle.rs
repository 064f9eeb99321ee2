use scrollstage_core::{
    CardSpec, Element, IntegerText, LandingContent, LandingPage, Length, Palette, Scene,
    ScrollGallery, Stage, StageConfig, Viewport,
};

fn cards() -> Vec<CardSpec> {
    ["Beautiful Nature", "Urban Life", "Ocean Waves"]
        .iter()
        .enumerate()
        .map(|(i, title)| CardSpec {
            title: title.to_string(),
            image: format!("https://images.example.com/{i}.jpg"),
            alt: title.to_string(),
            palette_index: i,
        })
        .collect()
}

fn both() -> (Stage, u64, u64) {
    let mut scene = Scene::new();
    let main = scene.add_element(Element::new("main"));
    scene.append(main, Element::new("section").with_height(Length::screen()));
    let gallery = ScrollGallery::render(&mut scene, main, &cards());
    let landing = LandingPage::render(&mut scene, main, &LandingContent::default());

    let mut stage = Stage::new(scene, Viewport::new(1200.0, 600.0), StageConfig::default());
    let g = stage.mount(Box::new(ScrollGallery::new(gallery, Palette::default())));
    let l = stage.mount(Box::new(LandingPage::new(landing, Box::new(IntegerText))));
    (stage, g, l)
}

#[test]
fn components_are_found_by_name() {
    let (stage, g, l) = both();
    assert_eq!(stage.find("gallery"), Some(g));
    assert_eq!(stage.find("landing"), Some(l));
    assert_eq!(stage.find("hero"), None);
    assert_eq!(stage.component_names(), ["gallery", "landing"]);
}

#[test]
fn unmounting_one_component_leaves_the_other_running() {
    let (mut stage, g, l) = both();
    let landing_triggers = {
        let (mut only_landing, g2, _) = both();
        only_landing.unmount(g2);
        only_landing.triggers().len()
    };

    assert!(stage.unmount(g));
    assert!(!stage.is_mounted(g));
    assert!(stage.is_mounted(l));
    assert_eq!(stage.triggers().len(), landing_triggers);

    // Floaters keep moving.
    let floater = stage.scene().select(stage.scene().roots()[0], ".floating-element")[0];
    stage.tick(1.0);
    assert!(stage.scene().get(floater).unwrap().style.y > 0.0);
}

#[test]
fn snapshot_serializes_scene_state() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let (mut stage, _, _) = both();
    stage.scroll_to(300.0);
    let json = serde_json::to_value(stage.snapshot()).unwrap();

    assert_eq!(json["offset"], 300.0);
    assert_eq!(json["viewport"]["height"], 600.0);
    assert_eq!(json["components"], serde_json::json!(["gallery", "landing"]));
    let elements = json["elements"].as_array().unwrap();
    assert_eq!(elements.len(), stage.scene().ids().count());
    let card = elements
        .iter()
        .find(|e| e["classes"] == serde_json::json!(["card"]))
        .unwrap();
    assert!(card["style"]["opacity"].is_number());
    let panel = elements
        .iter()
        .find(|e| e["classes"] == serde_json::json!(["content-section"]))
        .unwrap();
    assert_eq!(panel["style"]["background"], "#f9d5e5");
}
