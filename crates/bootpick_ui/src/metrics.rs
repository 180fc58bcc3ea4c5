//! Fixed layout metrics.
//!
//! Reference assets are validated against these at startup, so they are
//! constants rather than configuration.

/// Cursor image edge length.
pub const CURSOR_DIMENSION: u32 = 24;

/// Edge length of the square region an entry's icon sits in.
pub const BOOT_ENTRY_DIMENSION: u32 = 144;
/// Icon edge length.
pub const BOOT_ENTRY_ICON_DIMENSION: u32 = 128;
/// Gap between the icon square and the label.
pub const BOOT_ENTRY_LABEL_SPACE: u32 = 4;
/// Label line height; the font must match it.
pub const BOOT_ENTRY_LABEL_HEIGHT: u32 = 13;
/// Horizontal gap between two entries.
pub const BOOT_ENTRY_SPACE: u32 = 8;

/// Entry object width.
pub const BOOT_ENTRY_WIDTH: u32 = BOOT_ENTRY_DIMENSION;
/// Entry object height.
pub const BOOT_ENTRY_HEIGHT: u32 =
    BOOT_ENTRY_DIMENSION + BOOT_ENTRY_LABEL_SPACE + BOOT_ENTRY_LABEL_HEIGHT;
/// Horizontal distance between the origins of neighbouring entries.
pub const BOOT_ENTRY_STRIDE: u32 = BOOT_ENTRY_WIDTH + BOOT_ENTRY_SPACE;
/// Icon offset inside its entry, on both axes.
pub const BOOT_ENTRY_ICON_INSET: u32 = (BOOT_ENTRY_DIMENSION - BOOT_ENTRY_ICON_DIMENSION) / 2;

/// Selector object width.
pub const BOOT_SELECTOR_WIDTH: u32 = 144;
/// Edge length of the selection highlight behind the icon.
pub const BOOT_SELECTOR_BACKGROUND_DIMENSION: u32 = BOOT_SELECTOR_WIDTH;
/// Confirm button edge length.
pub const BOOT_SELECTOR_BUTTON_DIMENSION: u32 = 40;
/// Vertical gap between highlight and button.
pub const BOOT_SELECTOR_BUTTON_SPACE: u32 = BOOT_ENTRY_LABEL_SPACE + BOOT_ENTRY_LABEL_HEIGHT + 3;
/// Selector object height, and therefore the picker's height.
pub const BOOT_SELECTOR_HEIGHT: u32 =
    BOOT_SELECTOR_BACKGROUND_DIMENSION + BOOT_SELECTOR_BUTTON_SPACE + BOOT_SELECTOR_BUTTON_DIMENSION;
/// Button origin inside the selector.
pub const BOOT_SELECTOR_BUTTON_X: u32 =
    (BOOT_SELECTOR_BACKGROUND_DIMENSION - BOOT_SELECTOR_BUTTON_DIMENSION) / 2;
/// Button origin inside the selector.
pub const BOOT_SELECTOR_BUTTON_Y: u32 = BOOT_SELECTOR_BACKGROUND_DIMENSION + BOOT_SELECTOR_BUTTON_SPACE;

/// Frames in the icon-poof sequence.
pub const POOF_FRAME_COUNT: usize = 5;
