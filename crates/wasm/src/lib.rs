use glam::Vec2;
use platstep_core::{Body, Grounded, KeyState, Keys, Params, Physical, PhysicsError, Scene};
use thiserror::Error;
use wasm_bindgen::prelude::*;

const KIND_CHARACTER: f32 = 0.0;
const KIND_BLOCK: f32 = 1.0;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("platstep wasm module initialized");
}

#[derive(Debug, Error, PartialEq)]
enum BlockListError {
    #[error("packed block list needs 4 floats per block, got {0}")]
    Ragged(usize),

    #[error("block {index}: {source}")]
    Block { index: usize, source: PhysicsError },
}

/// Unpacks `[cx,cy,w,h, ...]` into blocks.
fn parse_blocks(rects: &[f32]) -> Result<Vec<Body>, BlockListError> {
    if rects.len() % 4 != 0 {
        return Err(BlockListError::Ragged(rects.len()));
    }
    rects
        .chunks_exact(4)
        .enumerate()
        .map(|(index, c)| {
            Body::block(Vec2::new(c[0], c[1]), c[2], c[3])
                .map_err(|source| BlockListError::Block { index, source })
        })
        .collect()
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Top-left screen rectangle for a body. Simulation space is y-up, the
/// canvas is y-down.
fn screen_rect(body: &Body, canvas_height: f32) -> [f32; 4] {
    let aabb = body.aabb();
    let w = body.dimensions.width();
    let h = body.dimensions.height();
    [aabb.left(), canvas_height - aabb.top(), w, h]
}

fn set(obj: &js_sys::Object, key: &str, value: JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), &value).map(|_| ())
}

#[wasm_bindgen]
pub struct Core {
    scene: Scene,
    keys: Keys,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Core {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Core {
        Core {
            scene: Scene::default(),
            keys: Keys::empty(),
        }
    }

    pub fn load_scene_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.scene = Scene::from_json(json).map_err(js_err)?;
        self.keys = Keys::empty();
        Ok(())
    }

    /// Partial documents only override the fields they name.
    pub fn set_params_json(&mut self, json: &str) -> Result<(), JsValue> {
        let mut value = serde_json::to_value(self.scene.params).map_err(js_err)?;
        let patch: serde_json::Value = serde_json::from_str(json).map_err(js_err)?;
        if let (Some(base), Some(patch)) = (value.as_object_mut(), patch.as_object()) {
            for (k, v) in patch {
                base.insert(k.clone(), v.clone());
            }
        }
        let params: Params = serde_json::from_value(value).map_err(js_err)?;
        params.validate().map_err(js_err)?;
        self.scene.params = params;
        Ok(())
    }

    /// Packed rects: [cx,cy,w,h, cx,cy,w,h, ...] in simulation space.
    pub fn set_blocks(&mut self, rects: Box<[f32]>) -> Result<(), JsValue> {
        self.scene.blocks = parse_blocks(&rects).map_err(js_err)?;
        Ok(())
    }

    pub fn key_down(&mut self, code: u32) {
        self.keys = self.keys.apply_key_code(code, KeyState::Pressed);
    }

    pub fn key_up(&mut self, code: u32) {
        self.keys = self.keys.apply_key_code(code, KeyState::NotPressed);
    }

    /// Step once with the elapsed milliseconds since the previous call and
    /// return state+events as a JS object.
    pub fn step(&mut self, elapsed_ms: f32) -> Result<JsValue, JsValue> {
        let ev = self.scene.advance(self.keys, elapsed_ms).map_err(js_err)?;
        let body = self.scene.character.body();

        let obj = js_sys::Object::new();
        set(&obj, "x", JsValue::from_f64(body.position.x as f64))?;
        set(&obj, "y", JsValue::from_f64(body.position.y as f64))?;
        set(&obj, "vx", JsValue::from_f64(body.velocity.x as f64))?;
        set(&obj, "vy", JsValue::from_f64(body.velocity.y as f64))?;
        set(&obj, "landing", JsValue::from_bool(self.scene.character.is_landing()))?;
        set(&obj, "landed", JsValue::from_bool(ev.landed != 0))?;
        set(&obj, "tookOff", JsValue::from_bool(ev.took_off != 0))?;
        set(&obj, "contacts", JsValue::from_f64(ev.contacts.bits() as f64))?;

        Ok(JsValue::from(obj))
    }

    /// Packed draw list: [x,y,w,h,kind, ...] in canvas pixels, character
    /// first. `kind` is 0 for the character, 1 for blocks.
    pub fn drawables(&self, canvas_height: f32) -> Box<[f32]> {
        drawables(&self.scene, canvas_height).into_boxed_slice()
    }

    pub fn sprite_key(&self) -> String {
        self.scene.character.sprite_key().to_string()
    }
}

fn drawables(scene: &Scene, canvas_height: f32) -> Vec<f32> {
    let mut out = Vec::with_capacity((scene.blocks.len() + 1) * 5);
    out.extend(screen_rect(scene.character.body(), canvas_height));
    out.push(KIND_CHARACTER);
    for block in &scene.blocks {
        out.extend(screen_rect(block, canvas_height));
        out.push(KIND_BLOCK);
    }
    out
}
