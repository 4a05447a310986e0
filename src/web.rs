//! Browser bindings
//!
//! The page owns the canvas and the animation frame loop; it calls
//! [`WebGame::tick`] once per frame and draws from [`WebGame::snapshot_json`].
//! Input handlers queue one-shot commands that the next tick consumes.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioBuffer, AudioContext, Response};

use crate::assets::{AssetBundle, AssetId, AssetSource, load_assets};
use crate::audio::{AudioManager, SoundEffect, play_events};
use crate::error::AssetError;
use crate::sim::{GameState, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Cat Flap starting...");
}

/// Fetches assets over HTTP relative to `base`
struct FetchSource {
    base: String,
}

impl AssetSource for FetchSource {
    async fn fetch(&self, asset: AssetId) -> Result<Vec<u8>, AssetError> {
        let url = format!("{}/{}", self.base.trim_end_matches('/'), asset.path());
        fetch_bytes(&url).await.map_err(|e| AssetError::Fetch {
            asset,
            reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
        })
    }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

async fn decode_sample(ctx: &AudioContext, bytes: &[u8]) -> Result<AudioBuffer, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let promise = ctx.decode_audio_data(&array.buffer())?;
    JsFuture::from(promise).await?.dyn_into()
}

/// Swap procedural tones for the recorded samples that loaded
async fn attach_samples(audio: &mut AudioManager, bundle: &AssetBundle) {
    let Some(ctx) = audio.context().cloned() else {
        return;
    };
    for effect in [SoundEffect::Jump, SoundEffect::Score, SoundEffect::Hit] {
        let Some(bytes) = bundle.get(effect.asset()) else {
            continue;
        };
        match decode_sample(&ctx, bytes).await {
            Ok(buffer) => audio.attach_sample(effect, buffer),
            Err(e) => log::warn!("Could not decode {}: {e:?}", effect.asset().path()),
        }
    }
}

/// Load assets, then build a game ready to start.
///
/// `tuning_json` overrides the default constants; missing fields keep their
/// defaults.
#[wasm_bindgen]
pub async fn create_game(
    base_url: String,
    tuning_json: Option<String>,
) -> Result<WebGame, JsValue> {
    let tuning = match tuning_json {
        Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => Tuning::default(),
    };

    let seed = js_sys::Date::now() as u64;
    let mut state =
        GameState::with_tuning(seed, tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let source = FetchSource { base: base_url };
    let bundle = load_assets(&source)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    state.mark_assets_ready();

    let mut audio = AudioManager::new();
    attach_samples(&mut audio, &bundle).await;

    log::info!("Game initialized with seed: {seed}");
    Ok(WebGame {
        state,
        audio,
        input: TickInput::default(),
        missing: bundle
            .missing()
            .iter()
            .map(|a| a.path().to_string())
            .collect(),
    })
}

/// Game instance owned by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    audio: AudioManager,
    input: TickInput,
    missing: Vec<String>,
}

#[wasm_bindgen]
impl WebGame {
    /// Run one simulation frame and play the sounds it produced.
    ///
    /// Returns the frame's outcome as JSON: `{ score, phase, game_over }`.
    pub fn tick(&mut self) -> Result<String, JsValue> {
        let out = tick(&mut self.state, &self.input);

        // Clear one-shot inputs after processing
        self.input.start = false;
        self.input.pause = false;
        self.input.jump = false;
        self.input.dive = false;

        let events = self.state.drain_events();
        play_events(&self.audio, &events);
        serde_json::to_string(&out).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Jump on the next tick, or start a run from the title/game-over screen
    pub fn jump(&mut self) {
        self.audio.resume();
        if self.state.phase() == crate::sim::GamePhase::Playing {
            self.input.jump = true;
        } else {
            self.input.start = true;
        }
    }

    pub fn dive(&mut self) {
        self.input.dive = true;
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Start a new run right away with a fresh seed
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.state.reseed(js_sys::Date::now() as u64);
        self.input = TickInput {
            autopilot: self.input.autopilot,
            ..Default::default()
        };
        self.state
            .reset()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.state.drain_events();
        Ok(())
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
        log::info!("Autopilot: {on}");
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_master_volume(volume);
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase() == crate::sim::GamePhase::GameOver
    }

    pub fn can_pause(&self) -> bool {
        self.state.can_pause()
    }

    /// Paths of optional assets that failed to load; the page draws
    /// placeholders for these
    pub fn missing_assets(&self) -> Vec<String> {
        self.missing.clone()
    }

    /// Everything the page needs to draw a frame
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn tuning_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.state.tuning()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
