mod table;

#[cfg(target_arch = "wasm32")]
mod logger;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use table::{parse_answer, to_millis};

pub use table::{BridgeError, DeckTable, FrameOutput};

thread_local! {
    static DECKS: RefCell<DeckTable> = RefCell::new(DeckTable::default());
}

fn with_table<R>(
    f: impl FnOnce(&mut DeckTable) -> Result<R, BridgeError>,
) -> Result<R, JsError> {
    DECKS.with(|decks| {
        let mut table = decks
            .try_borrow_mut()
            .map_err(|_| JsError::new("deck table is busy"))?;
        f(&mut table).map_err(JsError::from)
    })
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Raise console logging to debug level (navigation, activations).
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn enable_debug_logging() {
    logger::init(log::LevelFilter::Debug);
}

/// Create and mount a deck. `config_json` may be empty for defaults.
/// Returns a handle for later calls.
#[wasm_bindgen]
pub fn create_deck(config_json: &str, now_ms: f64) -> Result<usize, JsError> {
    with_table(|t| t.create(config_json, to_millis(now_ms)))
}

/// Tear a deck down. Returns the final effects (e.g. stopping audio) as JSON.
#[wasm_bindgen]
pub fn destroy_deck(handle: usize) -> Result<String, JsError> {
    let effects = with_table(|t| t.destroy(handle))?;
    Ok(serde_json::to_string(&effects)?)
}

/// Advance a deck to `now_ms` against the measured layout. Returns
/// `{"effects": [...], "scroll_y": number|null}` as JSON.
#[wasm_bindgen]
pub fn tick(handle: usize, now_ms: f64, layout_json: &str) -> Result<String, JsError> {
    let frame = with_table(|t| t.tick(handle, to_millis(now_ms), layout_json))?;
    Ok(serde_json::to_string(&frame)?)
}

/// Dot-navigation click. Returns the target offset, or `undefined` when the
/// panel is not mounted.
#[wasm_bindgen]
pub fn navigate_to(handle: usize, section: &str, layout_json: &str) -> Result<Option<f64>, JsError> {
    with_table(|t| t.navigate_to(handle, section, layout_json))
}

/// The user scrolled by hand; drop any running navigation.
#[wasm_bindgen]
pub fn cancel_scroll(handle: usize) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.cancel_scroll()))
}

#[wasm_bindgen]
pub fn snapshot(handle: usize) -> Result<String, JsError> {
    let snap = with_table(|t| Ok(t.deck_mut(handle)?.snapshot()))?;
    Ok(serde_json::to_string(&snap)?)
}

#[wasm_bindgen]
pub fn skip_intro(handle: usize) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.skip_intro()))
}

#[wasm_bindgen]
pub fn next_scene(handle: usize) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.next_scene()))
}

#[wasm_bindgen]
pub fn prev_scene(handle: usize) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.prev_scene()))
}

#[wasm_bindgen]
pub fn select_scene(handle: usize, scene: &str) -> Result<(), JsError> {
    with_table(|t| t.select_scene(handle, scene))
}

#[wasm_bindgen]
pub fn vibe_check(handle: usize) -> Result<String, JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.vibe_check().to_string()))
}

/// Either proposal button. Returns the effects of mounting the celebration.
#[wasm_bindgen]
pub fn accept_proposal(handle: usize) -> Result<String, JsError> {
    let effects = with_table(|t| t.accept_proposal(handle))?;
    Ok(serde_json::to_string(&effects)?)
}

/// Close the celebration overlay. Returns the effects of unmounting it.
#[wasm_bindgen]
pub fn dismiss_success(handle: usize) -> Result<String, JsError> {
    let effects = with_table(|t| {
        let mut effects = Vec::new();
        t.deck_mut(handle)?.dismiss_success(&mut effects);
        Ok(effects)
    })?;
    Ok(serde_json::to_string(&effects)?)
}

#[wasm_bindgen]
pub fn media_loaded(handle: usize, path: &str) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.media_loaded(path)))
}

#[wasm_bindgen]
pub fn media_error(handle: usize, path: &str) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.media_error(path)))
}

#[wasm_bindgen]
pub fn autoplay_blocked(handle: usize, path: &str) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.autoplay_blocked(path)))
}

/// `"cheese"` or `"vanuatu"`.
#[wasm_bindgen]
pub fn cheese_view(handle: usize, view: &str) -> Result<(), JsError> {
    use heartscroll_core::scenes::CheeseView;
    let view = match view {
        "vanuatu" => CheeseView::Vanuatu,
        _ => CheeseView::Cheese,
    };
    with_table(|t| Ok(t.deck_mut(handle)?.cheese_mut().set_view(view)))
}

#[wasm_bindgen]
pub fn show_deal(handle: usize, open: bool) -> Result<(), JsError> {
    with_table(|t| {
        let cheese = t.deck_mut(handle)?.cheese_mut();
        if open {
            cheese.open_deal();
        } else {
            cheese.close_deal();
        }
        Ok(())
    })
}

/// Answer letter `"a"`..`"d"`.
#[wasm_bindgen]
pub fn answer_deal(handle: usize, answer: &str) -> Result<(), JsError> {
    with_table(|t| {
        let answer = parse_answer(answer)?;
        t.deck_mut(handle)?.cheese_mut().answer(answer);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn faith_hover(handle: usize, card: usize, inside: bool) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.faith_mut().hover(card, inside)))
}

#[wasm_bindgen]
pub fn faith_toggle(handle: usize, card: usize) -> Result<(), JsError> {
    with_table(|t| Ok(t.deck_mut(handle)?.faith_mut().toggle(card)))
}

#[wasm_bindgen]
pub fn video_toggle_play(handle: usize, card: usize) -> Result<bool, JsError> {
    with_table(|t| {
        let video = t.video(handle, card)?;
        video.toggle_play();
        Ok(video.playing)
    })
}

#[wasm_bindgen]
pub fn video_toggle_mute(handle: usize, card: usize) -> Result<bool, JsError> {
    with_table(|t| {
        let video = t.video(handle, card)?;
        video.toggle_mute();
        Ok(video.muted)
    })
}

#[wasm_bindgen]
pub fn video_time_update(
    handle: usize,
    card: usize,
    current: f64,
    duration: f64,
) -> Result<f64, JsError> {
    with_table(|t| {
        let video = t.video(handle, card)?;
        video.time_update(current, duration);
        Ok(video.progress)
    })
}

/// Seek to `percent`; returns the position in seconds to assign to
/// `currentTime`, or `undefined` before the duration is known.
#[wasm_bindgen]
pub fn video_seek(handle: usize, card: usize, percent: f64) -> Result<Option<f64>, JsError> {
    with_table(|t| Ok(t.video(handle, card)?.seek(percent)))
}

#[wasm_bindgen]
pub fn video_ended(handle: usize, card: usize) -> Result<(), JsError> {
    with_table(|t| Ok(t.video(handle, card)?.ended()))
}
