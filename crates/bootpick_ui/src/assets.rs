//! # Reference Assets
//!
//! Images and collaborators supplied by the firmware before the view is
//! built. Their dimensions are checked against [`crate::metrics`] once; a
//! mismatch is a configuration error and the picker refuses to start.

use std::rc::Rc;

use bootpick_core::Image;

use crate::error::{PickerError, PickerResult};
use crate::metrics::{
    BOOT_ENTRY_ICON_DIMENSION, BOOT_ENTRY_LABEL_HEIGHT, BOOT_SELECTOR_BACKGROUND_DIMENSION,
    BOOT_SELECTOR_BUTTON_DIMENSION, CURSOR_DIMENSION, POOF_FRAME_COUNT,
};

/// Rasterizes label text with the firmware's bitmap font.
pub trait LabelRenderer {
    /// Line height of the font in pixels.
    fn line_height(&self) -> u32;

    /// Renders `text` into a label image, or `None` if it cannot.
    fn render_label(&self, text: &str) -> Option<Image>;
}

/// Decodes a volume's custom icon file.
pub trait IconDecoder {
    /// Decodes `data` into a square icon image.
    ///
    /// # Errors
    ///
    /// [`PickerError::InvalidImageData`] for malformed input.
    fn decode_icon(&self, data: &[u8]) -> PickerResult<Image>;
}

/// Supplies the pointer image drawn over the scene.
pub trait CursorProvider {
    /// The cursor image to draw this frame.
    fn cursor_image<'a>(&self, assets: &'a GuiAssets) -> &'a Image;
}

/// Cursor provider that always draws [`GuiAssets::cursor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCursor;

impl CursorProvider for StaticCursor {
    fn cursor_image<'a>(&self, assets: &'a GuiAssets) -> &'a Image {
        &assets.cursor
    }
}

/// Base and pressed variants of a clickable image.
#[derive(Debug, Clone)]
pub struct ClickImage {
    /// Idle image; also the hit-test mask.
    pub base: Rc<Image>,
    /// Image shown while pressed.
    pub hold: Rc<Image>,
}

/// Pre-rendered per-category labels.
#[derive(Debug)]
pub struct GenericLabels {
    /// Generic EFI loaders and unknown entries.
    pub efi_boot: Image,
    /// Apple recovery.
    pub recovery: Image,
    /// Windows.
    pub windows: Image,
    /// Tools and system actions.
    pub tool: Image,
    /// macOS.
    pub macos: Image,
    /// The NVRAM reset action.
    pub reset_nvram: Image,
}

/// Everything the picker draws that it does not create itself.
pub struct GuiAssets {
    /// Pointer image.
    pub cursor: Rc<Image>,
    /// Highlight behind the selected entry's icon.
    pub entry_back_selected: Image,
    /// Confirm button images.
    pub selector: ClickImage,
    /// Default icon for internal volumes.
    pub icon_internal: Rc<Image>,
    /// Default icon for external volumes.
    pub icon_external: Rc<Image>,
    /// Icon for tools and system actions.
    pub icon_tool: Rc<Image>,
    /// Frames of the icon-poof sequence.
    pub poof: Vec<Rc<Image>>,
    /// Generic category labels.
    pub labels: GenericLabels,
    /// Bitmap font used for text labels.
    pub font: Box<dyn LabelRenderer>,
    /// Decoder for custom volume icons.
    pub icon_decoder: Box<dyn IconDecoder>,
}

impl GuiAssets {
    /// Checks every reference asset against the layout metrics.
    ///
    /// # Errors
    ///
    /// [`PickerError::ConfigurationMismatch`] naming the first dimension that
    /// is off.
    pub fn validate(&self) -> PickerResult<()> {
        check_square("cursor", &self.cursor, CURSOR_DIMENSION)?;
        check_square(
            "selected entry background",
            &self.entry_back_selected,
            BOOT_SELECTOR_BACKGROUND_DIMENSION,
        )?;
        check_square("selector button", &self.selector.base, BOOT_SELECTOR_BUTTON_DIMENSION)?;
        check_square(
            "selector button hold image",
            &self.selector.hold,
            BOOT_SELECTOR_BUTTON_DIMENSION,
        )?;
        check_square("internal icon", &self.icon_internal, BOOT_ENTRY_ICON_DIMENSION)?;
        check_square("external icon", &self.icon_external, BOOT_ENTRY_ICON_DIMENSION)?;
        check_square("tool icon", &self.icon_tool, BOOT_ENTRY_ICON_DIMENSION)?;

        let expected = u32::try_from(POOF_FRAME_COUNT).unwrap_or(u32::MAX);
        let frames = u32::try_from(self.poof.len()).unwrap_or(u32::MAX);
        check("poof frame count", expected, frames)?;
        for frame in &self.poof {
            check_square("poof frame", frame, BOOT_ENTRY_ICON_DIMENSION)?;
        }

        check("font line height", BOOT_ENTRY_LABEL_HEIGHT, self.font.line_height())
    }
}

fn check_square(asset: &'static str, image: &Image, side: u32) -> PickerResult<()> {
    check(asset, side, image.width())?;
    check(asset, side, image.height())
}

fn check(asset: &'static str, expected: u32, actual: u32) -> PickerResult<()> {
    if expected == actual {
        return Ok(());
    }
    tracing::error!(asset, expected, actual, "reference asset does not match layout");
    Err(PickerError::ConfigurationMismatch {
        asset,
        expected,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{square, test_assets};
    use bootpick_core::Pixel;

    #[test]
    fn test_poof_frame_count_must_match() {
        assert!(test_assets().validate().is_ok());

        let mut assets = test_assets();
        assets.poof.push(square(BOOT_ENTRY_ICON_DIMENSION, Pixel::BLACK));
        assert_eq!(
            assets.validate(),
            Err(PickerError::ConfigurationMismatch {
                asset: "poof frame count",
                expected: 5,
                actual: 6,
            })
        );
    }
}
