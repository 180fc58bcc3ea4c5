//! The selector: selection highlight plus confirm button.
//!
//! It always trails the volume entries in the picker's child list, sits
//! centred under the selected entry and is never navigated to.

use bootpick_core::{Image, Rect};

use crate::assets::ClickImage;
use crate::hit::is_hit;
use crate::input::PointerEvent;
use crate::metrics::{
    BOOT_SELECTOR_BUTTON_DIMENSION, BOOT_SELECTOR_BUTTON_X, BOOT_SELECTOR_BUTTON_Y,
};

/// Which button image the selector currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonState {
    /// Idle.
    #[default]
    Base,
    /// Pressed and held on the button.
    Hold,
}

/// What a pointer event did to the selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorResponse {
    /// The button was released over its painted area.
    pub confirmed: bool,
    /// The shown button image changed and the selector needs a redraw.
    pub changed: bool,
}

/// Scene payload of the selector object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selector {
    state: ButtonState,
}

impl Selector {
    /// Creates a selector showing the base image.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ButtonState::Base,
        }
    }

    /// Current button state.
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// The image matching the current state.
    #[must_use]
    pub fn current_image<'a>(&self, images: &'a ClickImage) -> &'a Image {
        match self.state {
            ButtonState::Base => &images.base,
            ButtonState::Hold => &images.hold,
        }
    }

    /// Button rectangle in selector space.
    #[must_use]
    pub const fn button_bounds() -> Rect {
        Rect::new(
            BOOT_SELECTOR_BUTTON_X as i64,
            BOOT_SELECTOR_BUTTON_Y as i64,
            BOOT_SELECTOR_BUTTON_DIMENSION,
            BOOT_SELECTOR_BUTTON_DIMENSION,
        )
    }

    /// Handles a pointer event at selector-local `(x, y)`.
    ///
    /// Down and hold over the painted part of the base button show the hold
    /// image; anything else, including the confirming up, shows the base
    /// image again.
    pub fn pointer_event(
        &mut self,
        images: &ClickImage,
        event: PointerEvent,
        x: i64,
        y: i64,
    ) -> SelectorResponse {
        let button = Self::button_bounds();
        let on_button = x >= button.x
            && y >= button.y
            && is_hit(&images.base, x - button.x, y - button.y);

        let mut response = SelectorResponse::default();
        let next = if on_button && event.ends_gesture() {
            response.confirmed = true;
            ButtonState::Base
        } else if on_button {
            ButtonState::Hold
        } else {
            ButtonState::Base
        };

        if next != self.state {
            self.state = next;
            response.changed = true;
        }
        response
    }
}
