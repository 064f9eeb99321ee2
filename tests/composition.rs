use scrollstage::app::{demo_request, demo_stage, landing_request, DEMO_CARDS};
use scrollstage::{load_stage, Palette};

#[test]
fn demo_page_is_banner_gallery_banner() {
    let request = demo_request();
    let kinds: Vec<_> = request.sections.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, ["banner", "gallery", "banner"]);

    let stage = demo_stage().unwrap();
    assert_eq!(stage.component_names(), ["gallery"]);
    // Three screens of content plus three screens of pinned scrolling.
    assert_eq!(stage.page_height(), 900.0 * 6.0);
}

#[test]
fn demo_cards_render_in_order() {
    let stage = demo_stage().unwrap();
    let main = stage.scene().roots()[0];
    let titles: Vec<String> = stage
        .scene()
        .select(main, "h2")
        .into_iter()
        .filter_map(|id| stage.scene().get(id)?.text.clone())
        .collect();
    let expected: Vec<&str> = DEMO_CARDS.iter().map(|c| c.0).collect();
    assert_eq!(titles, expected);
}

#[test]
fn scrolling_the_demo_walks_the_palette() {
    let mut stage = demo_stage().unwrap();
    let main = stage.scene().roots()[0];
    let palette = Palette::default();

    // Each card rests one screen further down the pinned region.
    for (i, offset) in [900.0, 1800.0, 2700.0, 3600.0].into_iter().enumerate() {
        stage.scroll_to(offset);
        let cards = stage.scene().select(main, ".card");
        let visible: Vec<usize> = cards
            .iter()
            .enumerate()
            .filter(|(_, &id)| stage.scene().get(id).unwrap().style.opacity > 0.99)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(visible, vec![i], "at offset {offset}");

        let panel = stage.scene().query_one(cards[i], ".content-section").unwrap();
        assert_eq!(
            stage.scene().get(panel).unwrap().style.background,
            Some(palette.color_for(i))
        );
    }
}

#[test]
fn landing_request_mounts_the_landing_page() {
    let stage = load_stage(&landing_request()).unwrap();
    assert_eq!(stage.component_names(), ["landing"]);
    let main = stage.scene().roots()[0];
    assert_eq!(stage.scene().select(main, ".stat-number").len(), 3);
}
