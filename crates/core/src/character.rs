use serde::{Deserialize, Serialize};

use crate::body::{Body, Physical};
use crate::gravity::{GravityBody, Grounded};

/// Which sprite the render boundary draws for a character.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacterKind {
    #[default]
    MainCharacter,
}

impl CharacterKind {
    pub fn sprite_key(self) -> &'static str {
        match self {
            CharacterKind::MainCharacter => "mainCharacter",
        }
    }
}

/// The player-controlled body.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(flatten)]
    pub state: GravityBody,
    #[serde(default)]
    pub key: CharacterKind,
}

impl Character {
    pub fn new(body: Body) -> Self {
        Self {
            state: GravityBody::new(body),
            key: CharacterKind::MainCharacter,
        }
    }

    pub fn sprite_key(&self) -> &'static str {
        self.key.sprite_key()
    }
}

impl Physical for Character {
    fn body(&self) -> &Body {
        &self.state.body
    }

    fn with_body(self, body: Body) -> Self {
        Self {
            state: self.state.with_body(body),
            ..self
        }
    }
}

impl Grounded for Character {
    fn is_landing(&self) -> bool {
        self.state.is_landing
    }

    fn with_landing(self, is_landing: bool) -> Self {
        Self {
            state: self.state.with_landing(is_landing),
            ..self
        }
    }
}
