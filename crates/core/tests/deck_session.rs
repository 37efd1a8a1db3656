//! Integration test: drive a full deck on a synthetic page the way a host
//! does (one tick per animation frame) and check navigation, the intro,
//! the Loki finale, and the celebration end to end.

use heartscroll_core::model::SectionId;
use heartscroll_core::scenes::SceneKind;
use heartscroll_core::tracker::{AnchorSource, StackedPage};
use heartscroll_core::{Deck, DeckConfig};
use heartscroll_protocol::Effect;

const FRAME: u64 = 16;

fn new_deck(config: DeckConfig) -> Deck {
    Deck::new(config, 0).expect("config is valid")
}

fn run(deck: &mut Deck, page: &mut StackedPage, from: u64, to: u64, effects: &mut Vec<Effect>) {
    let mut now = from;
    while now <= to {
        if let Some(y) = deck.scroll_position(now) {
            page.set_scroll(y);
        }
        deck.tick(now, page, effects);
        now += FRAME;
    }
}

fn confetti(effects: &[Effect]) -> Vec<f64> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Confetti(b) => Some(b.intensity),
            _ => None,
        })
        .collect()
}

#[test]
fn intro_types_every_line_then_dismisses() {
    let config = DeckConfig {
        intro_lines: vec!["Hi".into(), "you".into()],
        ..DeckConfig::default()
    };
    let mut deck = new_deck(config);
    let mut page = StackedPage::uniform(800.0, 600.0);
    let mut effects = Vec::new();

    run(&mut deck, &mut page, 0, 112, &mut effects);
    assert_eq!(deck.snapshot().intro.map(|i| i.text), Some("Hi".to_string()));

    // "Hi": 100 + 2500 hold; "you": 150 + 2500 hold; then 1000 pause.
    let done = 100 + 2500 + 150 + 2500 + 1000;
    run(&mut deck, &mut page, 128, done - FRAME, &mut effects);
    assert!(deck.intro_visible());
    run(&mut deck, &mut page, done, done + FRAME, &mut effects);
    assert!(!deck.intro_visible());
}

#[test]
fn dot_navigation_visits_every_panel() {
    let mut deck = new_deck(DeckConfig::default());
    let mut page = StackedPage::uniform(800.0, 600.0);
    let mut effects = Vec::new();
    deck.skip_intro();
    run(&mut deck, &mut page, 0, 0, &mut effects);
    assert_eq!(deck.active_section(), SectionId::Cheese);

    let mut now = FRAME;
    for id in SectionId::ALL.into_iter().rev() {
        assert!(deck.navigate_to(id, &page).is_some());
        run(&mut deck, &mut page, now, now + 1000, &mut effects);
        now += 1000 + FRAME;
        assert_eq!(deck.active_section(), id);
        let nav = deck.snapshot().nav;
        assert!(nav.iter().all(|item| item.active == (item.id == id)));
    }
}

#[test]
fn navigating_to_unmounted_panel_is_silent() {
    let mut deck = new_deck(DeckConfig::default());
    let page = StackedPage::new(vec![(SectionId::Cheese, 600.0)], 800.0, 600.0);
    assert!(deck.navigate_to(SectionId::Finale, &page).is_none());
    assert!(deck.scroll_position(0).is_none());
    assert_eq!(page.scroll_y(), 0.0);
}

#[test]
fn loki_finale_fires_once_per_activation() {
    let mut deck = new_deck(DeckConfig::default());
    let mut page = StackedPage::uniform(800.0, 600.0);
    let mut effects = Vec::new();

    run(&mut deck, &mut page, 0, 1000, &mut effects);
    deck.select_scene(SceneKind::Loki);
    let start = deck.now();

    run(&mut deck, &mut page, start, start + 5000, &mut effects);
    assert!(!deck.snapshot().loki_confirmed);
    run(&mut deck, &mut page, start + 5008, start + 5504, &mut effects);
    assert!(deck.snapshot().loki_confirmed);
    assert!(!deck.snapshot().loki_glorious);

    run(&mut deck, &mut page, start + 5520, start + 12_000, &mut effects);
    let volleys = effects.iter().filter(|e| matches!(e, Effect::Cannons(_))).count();
    assert_eq!(volleys, 1);
    assert!(deck.snapshot().loki_glorious);

    // Leave and come back: everything starts over.
    deck.next_scene();
    deck.prev_scene();
    let snap = deck.snapshot();
    assert_eq!(snap.scene, SceneKind::Loki);
    assert!(!snap.loki_confirmed && !snap.loki_glorious);
}

#[test]
fn celebration_bursts_fade_and_stop() {
    let mut deck = new_deck(DeckConfig::default());
    let mut page = StackedPage::uniform(800.0, 600.0);
    let mut effects = Vec::new();

    deck.accept_proposal(&mut effects);
    assert!(matches!(effects.first(), Some(Effect::PlayAudio(_))));
    run(&mut deck, &mut page, 0, 20_000, &mut effects);

    let levels = confetti(&effects);
    assert_eq!(levels.len(), 32);
    assert!(levels[31] < levels[0]);
}

#[test]
fn teardown_mid_celebration_silences_everything() {
    let mut deck = new_deck(DeckConfig::default());
    let mut page = StackedPage::uniform(800.0, 600.0);
    let mut effects = Vec::new();

    deck.select_scene(SceneKind::Loki);
    deck.accept_proposal(&mut effects);
    run(&mut deck, &mut page, 0, 3000, &mut effects);
    deck.dispose(&mut effects);
    let after_dispose = effects.len();

    // Longest configured offset is the 8 s burst loop.
    run(&mut deck, &mut page, 3000, 3000 + 8000 + 7000, &mut effects);
    assert_eq!(effects.len(), after_dispose);
    assert!(matches!(effects.last(), Some(Effect::StopAudio { .. })));
}

#[test]
fn effects_serialize_for_the_browser() {
    let mut deck = new_deck(DeckConfig::default());
    let mut effects = Vec::new();
    deck.accept_proposal(&mut effects);
    let page = StackedPage::uniform(800.0, 600.0);
    deck.tick(0, &page, &mut effects);

    let json = serde_json::to_string(&effects).expect("effects serialize");
    assert!(json.contains(r#""type":"play_audio""#));
    assert!(json.contains(r#""type":"confetti""#));

    let snapshot = serde_json::to_value(deck.snapshot()).expect("snapshot serializes");
    assert_eq!(snapshot["active"], "cheese");
    assert_eq!(snapshot["nav"].as_array().map(Vec::len), Some(7));
}
