//! Menu and pause-screen buttons
//!
//! Layout and hit testing only. Drawing is left to the renderer, which reads
//! the button rectangles and hover flags.

use serde::{Deserialize, Serialize};

use crate::sim::{Arena, GameMode};

/// What a button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonKind {
    Play,
    /// Cycle one player / two players / demo
    GameType,
    Resume,
    Exit,
}

/// Axis-aligned rectangle in arena coordinates (y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub kind: ButtonKind,
    pub rect: Rect,
    pub hovered: bool,
}

/// Buttons shown for the current game mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    buttons: Vec<Button>,
}

impl Menu {
    /// Two stacked buttons centered in the arena; none while playing
    pub fn for_mode(mode: GameMode, arena: &Arena) -> Self {
        let kinds = match mode {
            GameMode::Menu => [ButtonKind::Play, ButtonKind::GameType],
            GameMode::Paused => [ButtonKind::Resume, ButtonKind::Exit],
            GameMode::Playing => return Self::default(),
        };

        let w = arena.width / 4.0;
        let h = arena.height / 12.0;
        let x = (arena.width - w) / 2.0;
        let center = arena.height / 2.0;
        let ys = [center + h * 0.25, center - h * 1.25];

        let buttons = kinds
            .into_iter()
            .zip(ys)
            .map(|(kind, y)| Button {
                kind,
                rect: Rect { x, y, w, h },
                hovered: false,
            })
            .collect();

        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button_at(&self, x: f32, y: f32) -> Option<ButtonKind> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(x, y))
            .map(|b| b.kind)
    }

    /// Update hover flags. Returns true if any flag changed.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> bool {
        let mut changed = false;
        for button in &mut self.buttons {
            let hovered = button.rect.contains(x, y);
            changed |= hovered != button.hovered;
            button.hovered = hovered;
        }
        changed
    }

    pub fn hovered(&self) -> Vec<ButtonKind> {
        self.buttons
            .iter()
            .filter(|b| b.hovered)
            .map(|b| b.kind)
            .collect()
    }
}
