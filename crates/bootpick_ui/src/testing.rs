//! Test doubles shared by the unit tests.

use std::rc::Rc;

use bootpick_core::{Image, ImageError, Pixel, Rect};

use crate::assets::{ClickImage, GenericLabels, GuiAssets, IconDecoder, LabelRenderer};
use crate::error::PickerResult;
use crate::metrics::{
    BOOT_ENTRY_ICON_DIMENSION, BOOT_ENTRY_LABEL_HEIGHT, BOOT_SELECTOR_BACKGROUND_DIMENSION,
    BOOT_SELECTOR_BUTTON_DIMENSION, CURSOR_DIMENSION, POOF_FRAME_COUNT,
};
use crate::render::{Blit, Canvas};

/// Renders six pixels per character.
pub struct TestFont;

impl LabelRenderer for TestFont {
    fn line_height(&self) -> u32 {
        BOOT_ENTRY_LABEL_HEIGHT
    }

    fn render_label(&self, text: &str) -> Option<Image> {
        let width = u32::try_from(text.chars().count()).ok()? * 6;
        Image::filled(width, BOOT_ENTRY_LABEL_HEIGHT, Pixel::WHITE).ok()
    }
}

/// Font that cannot render anything.
pub struct FailingFont;

impl LabelRenderer for FailingFont {
    fn line_height(&self) -> u32 {
        BOOT_ENTRY_LABEL_HEIGHT
    }

    fn render_label(&self, _text: &str) -> Option<Image> {
        None
    }
}

/// Accepts exactly four bytes and yields a grey icon.
pub struct TestDecoder;

impl IconDecoder for TestDecoder {
    fn decode_icon(&self, data: &[u8]) -> PickerResult<Image> {
        if data.len() != 4 {
            return Err(ImageError::Truncated(data.len()).into());
        }
        let side = BOOT_ENTRY_ICON_DIMENSION;
        Ok(Image::filled(side, side, Pixel::grey(0x44))?)
    }
}

pub fn square(side: u32, pixel: Pixel) -> Rc<Image> {
    Rc::new(Image::filled(side, side, pixel).unwrap())
}

fn label(width: u32) -> Image {
    Image::filled(width, BOOT_ENTRY_LABEL_HEIGHT, Pixel::WHITE).unwrap()
}

/// Assets matching every layout metric.
pub fn test_assets() -> GuiAssets {
    let icon = BOOT_ENTRY_ICON_DIMENSION;
    let button = BOOT_SELECTOR_BUTTON_DIMENSION;
    let background = BOOT_SELECTOR_BACKGROUND_DIMENSION;
    GuiAssets {
        cursor: square(CURSOR_DIMENSION, Pixel::WHITE),
        entry_back_selected: Image::filled(background, background, Pixel::grey(0x20)).unwrap(),
        selector: ClickImage {
            base: square(button, Pixel::grey(0xA0)),
            hold: square(button, Pixel::grey(0x60)),
        },
        icon_internal: square(icon, Pixel::grey(0x10)),
        icon_external: square(icon, Pixel::grey(0x11)),
        icon_tool: square(icon, Pixel::grey(0x12)),
        poof: (0..POOF_FRAME_COUNT)
            .map(|i| square(icon, Pixel::grey(u8::try_from(i).unwrap() + 1)))
            .collect(),
        labels: GenericLabels {
            efi_boot: label(10),
            recovery: label(11),
            windows: label(12),
            tool: label(13),
            macos: label(14),
            reset_nvram: label(15),
        },
        font: Box::new(TestFont),
        icon_decoder: Box::new(TestDecoder),
    }
}

/// What a canvas was asked to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBlit {
    pub image: (u32, u32),
    pub first_pixel: Pixel,
    pub opacity: u8,
    pub is_background: bool,
    pub request_draw: bool,
    pub target: Rect,
    pub source: (u32, u32),
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub blits: Vec<RecordedBlit>,
}

impl Canvas for RecordingCanvas {
    fn draw_to_buffer(&mut self, blit: &Blit<'_>) {
        self.blits.push(RecordedBlit {
            image: blit.image.dimensions(),
            first_pixel: blit.image.pixels()[0],
            opacity: blit.opacity,
            is_background: blit.is_background,
            request_draw: blit.request_draw,
            target: blit.target(),
            source: (blit.offset_x, blit.offset_y),
        });
    }
}
