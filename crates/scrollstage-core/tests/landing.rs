use scrollstage_core::landing::StatSpec;
use scrollstage_core::{
    Element, ElementId, IntegerText, LandingContent, LandingPage, Length, Scene, Stage,
    StageConfig, Style, Viewport,
};

const FRAME: f64 = 1.0 / 60.0;

// Layout at 1000x800 with one screen of spacer above the landing page:
// hero text [800, 1016], service cards at 1712 / 2032 / 2352 (320 tall),
// stats [2672, 2992]. Hero trigger [160, 616], counters start at 2032.
fn landing(content: &LandingContent) -> (Stage, ElementId, u64) {
    let mut scene = Scene::new();
    let main = scene.add_element(Element::new("main"));
    scene.append(main, Element::new("section").with_height(Length::screen()));
    let root = LandingPage::render(&mut scene, main, content);
    let mut stage = Stage::new(scene, Viewport::new(1000.0, 800.0), StageConfig::default());
    let id = stage.mount(Box::new(LandingPage::new(root, Box::new(IntegerText))));
    (stage, root, id)
}

/// Same page with three screens of content below, so every service card
/// can be scrolled fully past.
fn landing_with_tail(content: &LandingContent) -> (Stage, ElementId) {
    let mut scene = Scene::new();
    let main = scene.add_element(Element::new("main"));
    scene.append(main, Element::new("section").with_height(Length::screen()));
    let root = LandingPage::render(&mut scene, main, content);
    scene.append(main, Element::new("section").with_height(Length::Vh(300.0)));
    let mut stage = Stage::new(scene, Viewport::new(1000.0, 800.0), StageConfig::default());
    stage.mount(Box::new(LandingPage::new(root, Box::new(IntegerText))));
    (stage, root)
}

fn one(stage: &Stage, root: ElementId, selector: &str) -> Style {
    let id = stage.scene().query_one(root, selector).unwrap();
    stage.scene().get(id).unwrap().style.clone()
}

fn all(stage: &Stage, root: ElementId, selector: &str) -> Vec<Style> {
    stage
        .scene()
        .select(root, selector)
        .into_iter()
        .map(|id| stage.scene().get(id).unwrap().style.clone())
        .collect()
}

fn counter_texts(stage: &Stage, root: ElementId) -> Vec<String> {
    stage
        .scene()
        .select(root, ".stat-number")
        .into_iter()
        .map(|id| stage.scene().get(id).unwrap().text.clone().unwrap_or_default())
        .collect()
}

fn run(stage: &mut Stage, seconds: f64) {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        stage.tick(FRAME);
    }
}

#[test]
fn hero_plays_on_enter_and_reverses_on_leave_back() {
    let (mut stage, root, _) = landing(&LandingContent::default());

    let left = one(&stage, root, ".hero-word-left");
    assert_eq!((left.x, left.opacity), (-1000.0, 0.0));
    assert_eq!(one(&stage, root, ".hero-word-right").x, 1000.0);
    assert_eq!(one(&stage, root, ".hero-subtitle").opacity, 0.0);

    stage.scroll_to(300.0);
    run(&mut stage, 4.0);
    let left = one(&stage, root, ".hero-word-left");
    assert_eq!((left.x, left.opacity), (0.0, 1.0));
    let subtitle = one(&stage, root, ".hero-subtitle");
    assert_eq!((subtitle.y, subtitle.opacity), (0.0, 1.0));
    let cta = one(&stage, root, ".hero-cta");
    assert_eq!((cta.scale, cta.opacity), (1.0, 1.0));

    // Moving inside the range fires nothing.
    stage.scroll_to(450.0);
    run(&mut stage, 1.0);
    assert_eq!(one(&stage, root, ".hero-word-left").opacity, 1.0);

    stage.scroll_to(0.0);
    run(&mut stage, 4.0);
    let left = one(&stage, root, ".hero-word-left");
    assert_eq!((left.x, left.opacity), (-1000.0, 0.0));
    assert_eq!(one(&stage, root, ".hero-cta").opacity, 0.0);
}

#[test]
fn words_slide_in_together() {
    let (mut stage, root, _) = landing(&LandingContent::default());
    stage.scroll_to(300.0);
    run(&mut stage, 0.5);
    let left = one(&stage, root, ".hero-word-left").x;
    let right = one(&stage, root, ".hero-word-right").x;
    assert!(left > -1000.0 && left < 0.0, "{left}");
    assert!((left + right).abs() < 1e-3, "{left} vs {right}");
}

#[test]
fn service_cards_enter_staggered_and_leave_back_reversed() {
    let (mut stage, root, _) = landing(&LandingContent::default());
    assert!(all(&stage, root, ".service-card")
        .iter()
        .all(|s| s.y == 100.0 && s.opacity == 0.0));

    // First two cards cross 85% of the viewport.
    stage.scroll_to(1400.0);
    stage.tick(0.05);
    assert!(all(&stage, root, ".service-card").iter().all(|s| s.opacity == 0.0));
    stage.tick(0.05);
    stage.tick(0.3);
    let cards = all(&stage, root, ".service-card");
    assert!(cards[0].opacity > cards[1].opacity, "{cards:?}");
    assert!(cards[1].opacity > 0.0);
    assert_eq!(cards[2].opacity, 0.0);

    run(&mut stage, 2.0);
    let cards = all(&stage, root, ".service-card");
    assert_eq!((cards[0].y, cards[0].opacity), (0.0, 1.0));
    assert_eq!((cards[1].y, cards[1].opacity), (0.0, 1.0));
    assert_eq!((cards[2].y, cards[2].opacity), (100.0, 0.0));

    stage.scroll_to(0.0);
    stage.tick(0.1);
    stage.tick(0.3);
    let cards = all(&stage, root, ".service-card");
    assert!(cards[1].opacity < cards[0].opacity, "{cards:?}");

    run(&mut stage, 2.0);
    let cards = all(&stage, root, ".service-card");
    assert_eq!((cards[0].y, cards[0].opacity), (50.0, 0.0));
    assert_eq!((cards[1].y, cards[1].opacity), (50.0, 0.0));
}

#[test]
fn counters_show_whole_numbers_up_and_back_down() {
    let (mut stage, root, _) = landing(&LandingContent::default());
    assert_eq!(counter_texts(&stage, root), ["0", "0", "0"]);
    let targets = [150, 500, 98];

    stage.scroll_to(2100.0);
    for _ in 0..150 {
        stage.tick(FRAME);
        for (text, target) in counter_texts(&stage, root).iter().zip(targets) {
            let value: i64 = text.parse().unwrap();
            assert!((0..=target).contains(&value), "{value} outside 0..={target}");
        }
        for style in all(&stage, root, ".stat-number") {
            assert_eq!(style.text_value, style.text_value.round());
        }
    }
    assert_eq!(counter_texts(&stage, root), ["150", "500", "98"]);

    stage.scroll_to(1000.0);
    run(&mut stage, 1.2);
    assert_eq!(counter_texts(&stage, root), ["0", "0", "0"]);
}

#[test]
fn invalid_counter_target_is_left_alone() {
    let content = LandingContent {
        stats: vec![
            StatSpec {
                target: "lots".into(),
                label: "Broken".into(),
            },
            StatSpec {
                target: "7".into(),
                label: "Fine".into(),
            },
        ],
        ..LandingContent::default()
    };
    let (mut stage, root, _) = landing(&content);
    stage.scroll_to(2100.0);
    run(&mut stage, 2.5);
    assert_eq!(counter_texts(&stage, root), ["0", "7"]);
}

#[test]
fn service_cards_leave_forward_and_enter_back_last_first() {
    let (mut stage, root) = landing_with_tail(&LandingContent::default());

    // Inside every card's range: [1032, 2032], [1352, 2352], [1672, 2672].
    stage.scroll_to(2000.0);
    run(&mut stage, 2.0);
    assert!(all(&stage, root, ".service-card")
        .iter()
        .all(|s| s.y == 0.0 && s.opacity == 1.0));

    // Past every card's end going down.
    stage.scroll_to(3000.0);
    stage.tick(0.1);
    stage.tick(0.3);
    let cards = all(&stage, root, ".service-card");
    assert!(cards[0].opacity < cards[1].opacity, "{cards:?}");
    assert!(cards[1].opacity < 1.0, "{cards:?}");
    assert_eq!(cards[2].opacity, 1.0);

    run(&mut stage, 2.0);
    assert!(all(&stage, root, ".service-card")
        .iter()
        .all(|s| s.y == -50.0 && s.opacity == 0.0));

    // Back up into the ranges from below: the last card leads.
    stage.scroll_to(2000.0);
    stage.tick(0.1);
    stage.tick(0.3);
    let cards = all(&stage, root, ".service-card");
    assert!(cards[2].opacity > cards[1].opacity, "{cards:?}");
    assert!(cards[1].opacity > 0.0, "{cards:?}");
    assert_eq!(cards[0].opacity, 0.0);

    run(&mut stage, 2.0);
    assert!(all(&stage, root, ".service-card")
        .iter()
        .all(|s| s.y == 0.0 && s.opacity == 1.0));
}

#[test]
fn counter_target_beyond_exact_float_range_is_skipped() {
    let content = LandingContent {
        stats: vec![
            StatSpec {
                target: "123456789".into(),
                label: "Too many".into(),
            },
            StatSpec {
                target: "16777216".into(),
                label: "Largest exact".into(),
            },
        ],
        ..LandingContent::default()
    };
    let (mut stage, root, _) = landing(&content);
    stage.scroll_to(2100.0);
    for _ in 0..200 {
        stage.tick(FRAME);
        let texts = counter_texts(&stage, root);
        assert_eq!(texts[0], "0");
        let value: i64 = texts[1].parse().unwrap();
        assert!((0..=16_777_216).contains(&value), "{value}");
    }
    assert_eq!(counter_texts(&stage, root), ["0", "16777216"]);
}

#[test]
fn floaters_yoyo_forever() {
    let (mut stage, root, _) = landing(&LandingContent::default());
    stage.tick(1.0);
    assert!(all(&stage, root, ".floating-element")
        .iter()
        .all(|s| (s.y - 10.0).abs() < 1e-3));
    stage.tick(1.0);
    assert!(all(&stage, root, ".floating-element").iter().all(|s| s.y == 20.0));
    stage.tick(2.0);
    assert!(all(&stage, root, ".floating-element").iter().all(|s| s.y.abs() < 1e-3));
}

#[test]
fn missing_sections_are_skipped() {
    let mut scene = Scene::new();
    let root = scene.add_element(Element::new("div").with_class("landing"));
    let mut stage = Stage::new(scene, Viewport::new(1000.0, 800.0), StageConfig::default());
    stage.mount(Box::new(LandingPage::new(root, Box::new(IntegerText))));
    assert!(stage.triggers().is_empty());
    stage.scroll_to(100.0);
    stage.tick(1.0);
}

#[test]
fn unmount_mid_animation_restores_markup() {
    let mut scene = Scene::new();
    let main = scene.add_element(Element::new("main"));
    scene.append(main, Element::new("section").with_height(Length::screen()));
    let root = LandingPage::render(&mut scene, main, &LandingContent::default());
    let mut stage = Stage::new(scene, Viewport::new(1000.0, 800.0), StageConfig::default());
    let pristine: Vec<_> = stage
        .scene()
        .ids()
        .map(|id| {
            let el = stage.scene().get(id).unwrap();
            (el.style.clone(), el.text.clone())
        })
        .collect();

    let id = stage.mount(Box::new(LandingPage::new(root, Box::new(IntegerText))));
    stage.scroll_to(2100.0);
    run(&mut stage, 0.5);
    assert!(stage.unmount(id));
    assert!(stage.triggers().is_empty());

    let restored: Vec<_> = stage
        .scene()
        .ids()
        .map(|id| {
            let el = stage.scene().get(id).unwrap();
            (el.style.clone(), el.text.clone())
        })
        .collect();
    assert_eq!(restored, pristine);

    stage.scroll_to(0.0);
    run(&mut stage, 2.0);
    stage.resize(Viewport::new(500.0, 500.0));
    let later: Vec<_> = stage
        .scene()
        .ids()
        .map(|id| {
            let el = stage.scene().get(id).unwrap();
            (el.style.clone(), el.text.clone())
        })
        .collect();
    assert_eq!(later, pristine);
}
