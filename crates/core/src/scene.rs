use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::{Body, Dimensions};
use crate::character::Character;
use crate::error::{PhysicsError, SceneError};
use crate::input::Keys;
use crate::params::Params;
use crate::{step, Events};

/// Everything a host needs to drive one simulation: tunables, the player
/// and the static block list. Block order matters for collision resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub params: Params,
    pub character: Character,
    #[serde(default)]
    pub blocks: Vec<Body>,
}

const CHARACTER_SIZE: Dimensions = match Dimensions::checked(80.0, 40.0) {
    Some(d) => d,
    None => panic!("character size must be positive"),
};

const GROUND_SIZE: Dimensions = match Dimensions::checked(300.0, 100.0) {
    Some(d) => d,
    None => panic!("ground size must be positive"),
};

impl Default for Scene {
    /// A character resting on a single wide block.
    fn default() -> Self {
        let character = Body::new(Vec2::new(20.0, 120.0), CHARACTER_SIZE)
            .with_max_velocity(Vec2::new(0.25, 0.5));
        let ground = Body::new(Vec2::new(200.0, 50.0), GROUND_SIZE);

        Self {
            params: Params::default(),
            character: Character::new(character),
            blocks: vec![ground],
        }
    }
}

impl Scene {
    pub fn from_json(src: &str) -> Result<Self, SceneError> {
        let scene: Scene = serde_json::from_str(src)?;
        scene.params.validate()?;
        log::debug!("loaded scene with {} blocks", scene.blocks.len());
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Runs one tick and swaps in the resulting character. Blocks never move.
    /// On error the scene is left as it was.
    pub fn advance(&mut self, keys: Keys, elapsed: f32) -> Result<Events, PhysicsError> {
        let tick = step(&self.params, &self.character, &self.blocks, keys, elapsed)?;
        self.character = tick.character;
        Ok(tick.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Physical;
    use crate::gravity::Grounded;

    #[test]
    fn default_scene_starts_on_the_block() {
        let mut scene = Scene::default();
        let events = scene.advance(Keys::empty(), 25.0).unwrap();
        assert!(scene.character.is_landing());
        assert_eq!(events.landed, 1);
        assert_eq!(scene.character.body().position, Vec2::new(20.0, 120.0));
        assert_eq!(scene.character.body().velocity, Vec2::ZERO);

        let events = scene.advance(Keys::empty(), 25.0).unwrap();
        assert_eq!(events.took_off, 0);
        assert_eq!(scene.character.body().position, Vec2::new(20.0, 120.0));
    }

    #[test]
    fn json_round_trip_keeps_geometry() {
        let scene = Scene::default();
        let back = Scene::from_json(&scene.to_json().unwrap()).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn minimal_document_uses_default_params() {
        let scene = Scene::from_json(
            r#"{
                "character": {
                    "position": [0, 10],
                    "dimensions": { "width": 4, "height": 4 }
                },
                "blocks": [
                    { "position": [0, 0], "dimensions": { "width": 100, "height": 2 } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scene.params, Params::default());
        assert_eq!(scene.blocks.len(), 1);
    }

    #[test]
    fn rejects_bad_params_and_geometry() {
        let bad_params = r#"{
            "params": { "vertical_restitution": 2.0 },
            "character": { "position": [0, 0], "dimensions": { "width": 1, "height": 1 } }
        }"#;
        assert!(matches!(
            Scene::from_json(bad_params),
            Err(SceneError::Physics(PhysicsError::InvalidParam { .. }))
        ));

        let bad_dims = r#"{
            "character": { "position": [0, 0], "dimensions": { "width": 0, "height": 1 } }
        }"#;
        assert!(matches!(Scene::from_json(bad_dims), Err(SceneError::Json(_))));
    }

    #[test]
    fn failed_tick_leaves_scene_untouched() {
        let mut scene = Scene::default();
        let before = scene.clone();
        assert!(scene.advance(Keys::RIGHT, -1.0).is_err());
        assert_eq!(scene, before);
    }
}
