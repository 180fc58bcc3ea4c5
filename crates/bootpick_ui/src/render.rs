//! # Rendering
//!
//! The picker never touches a framebuffer. Drawing walks the scene in paint
//! order, clips every image against the requested region and hands the
//! result to a [`Canvas`] as a [`Blit`]. Compositing and alpha blending
//! belong to the canvas.
//!
//! Redraw requests raised by input handling and animations are collected in
//! a [`DamageQueue`] for the outer loop to repaint.

use bootpick_core::{clip_child_bounds, Image, Rect};

use crate::assets::GuiAssets;
use crate::error::PickerResult;
use crate::metrics::{
    BOOT_ENTRY_DIMENSION, BOOT_ENTRY_HEIGHT, BOOT_ENTRY_ICON_INSET, BOOT_SELECTOR_BUTTON_X,
    BOOT_SELECTOR_BUTTON_Y, POOF_FRAME_COUNT,
};
use crate::scene::{ObjectId, ObjectKind, SceneTree, VolumeEntry};
use crate::selector::Selector;

/// One clipped image copy requested from the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Blit<'a> {
    /// Source image.
    pub image: &'a Image,
    /// Global opacity, 255 is fully opaque.
    pub opacity: u8,
    /// The image is a fill pattern stretched over the region.
    pub is_background: bool,
    /// Absolute X of the image origin.
    pub base_x: i64,
    /// Absolute Y of the image origin.
    pub base_y: i64,
    /// First source column to copy.
    pub offset_x: u32,
    /// First source row to copy.
    pub offset_y: u32,
    /// Columns to copy.
    pub width: u32,
    /// Rows to copy.
    pub height: u32,
    /// Present the region once composited.
    pub request_draw: bool,
}

impl Blit<'_> {
    /// Screen rectangle this blit covers.
    #[must_use]
    pub const fn target(&self) -> Rect {
        Rect::new(
            self.base_x + self.offset_x as i64,
            self.base_y + self.offset_y as i64,
            self.width,
            self.height,
        )
    }
}

/// Compositing backend.
pub trait Canvas {
    /// Composites `blit` into the back buffer.
    fn draw_to_buffer(&mut self, blit: &Blit<'_>);
}

/// Values the animations feed into drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Opacity applied to everything the picker draws.
    pub opacity: u8,
    /// Current frame of the icon poof sequence.
    pub poof_frame: usize,
}

impl RenderStyle {
    /// Style before any animation has run.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            opacity: 0,
            poof_frame: 0,
        }
    }

    /// The poof frame every entry shows instead of its icon, if the sweep
    /// is still running.
    #[must_use]
    pub const fn poof_override(&self) -> Option<usize> {
        if self.poof_frame < POOF_FRAME_COUNT {
            Some(self.poof_frame)
        } else {
            None
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending redraw regions in screen coordinates.
#[derive(Debug, Default)]
pub struct DamageQueue {
    regions: Vec<Rect>,
}

impl DamageQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Records a region; empty regions are ignored.
    pub fn push(&mut self, region: Rect) {
        if !region.is_empty() {
            self.regions.push(region);
        }
    }

    /// Drains every pending region.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.regions)
    }

    /// Returns true if nothing needs repainting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of pending regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Pending regions in request order.
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.regions.iter()
    }

    /// Returns true if a single pending region fully contains `area`.
    #[must_use]
    pub fn covers(&self, area: &Rect) -> bool {
        self.regions.iter().any(|region| region.contains_rect(area))
    }
}

impl<'a> IntoIterator for &'a DamageQueue {
    type Item = &'a Rect;
    type IntoIter = std::slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// A region of one object to draw, in that object's local space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DrawRequest {
    pub base_x: i64,
    pub base_y: i64,
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: u32,
    pub height: u32,
    pub request_draw: bool,
}

impl DrawRequest {
    /// Narrows the request to a child placed at `(x, y)` with the given
    /// size, re-expressed in the child's space.
    fn child(self, x: i64, y: i64, width: u32, height: u32) -> Option<Self> {
        let (offset_x, width) = clip_child_bounds(x, width, self.offset_x, self.width)?;
        let (offset_y, height) = clip_child_bounds(y, height, self.offset_y, self.height)?;
        Some(Self {
            base_x: self.base_x + x,
            base_y: self.base_y + y,
            offset_x,
            offset_y,
            width,
            height,
            request_draw: self.request_draw,
        })
    }

    fn blit(self, image: &Image, opacity: u8, is_background: bool) -> Blit<'_> {
        Blit {
            image,
            opacity,
            is_background,
            base_x: self.base_x,
            base_y: self.base_y,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            width: self.width,
            height: self.height,
            request_draw: self.request_draw,
        }
    }
}

/// Draws `image` placed at `(x, y)` inside the object `request` targets.
fn draw_child_image(
    canvas: &mut dyn Canvas,
    image: &Image,
    opacity: u8,
    request: DrawRequest,
    x: i64,
    y: i64,
) {
    if let Some(clipped) = request.child(x, y, image.width(), image.height()) {
        canvas.draw_to_buffer(&clipped.blit(image, opacity, false));
    }
}

/// Walks the scene and emits blits.
pub(crate) struct Painter<'a, E> {
    pub tree: &'a SceneTree<E>,
    pub assets: &'a GuiAssets,
    pub background: &'a Image,
    pub style: RenderStyle,
}

impl<E> Painter<'_, E> {
    /// Draws `id` and its subtree.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        id: ObjectId,
        request: DrawRequest,
    ) -> PickerResult<()> {
        match &self.tree.object(id)?.kind {
            ObjectKind::ViewRoot => {
                canvas.draw_to_buffer(&DrawRequest {
                    request_draw: true,
                    ..request
                }
                .blit(self.background, u8::MAX, true));
                self.draw_children(
                    canvas,
                    id,
                    DrawRequest {
                        request_draw: false,
                        ..request
                    },
                )
            }
            ObjectKind::Picker => self.draw_children(canvas, id, request),
            ObjectKind::Entry(entry) => {
                self.draw_entry(canvas, entry, request);
                Ok(())
            }
            ObjectKind::Selector(selector) => {
                self.draw_selector(canvas, selector, request);
                Ok(())
            }
        }
    }

    fn draw_children(
        &self,
        canvas: &mut dyn Canvas,
        id: ObjectId,
        request: DrawRequest,
    ) -> PickerResult<()> {
        for &child in self.tree.children(id) {
            let object = self.tree.object(child)?;
            if let Some(child_request) =
                request.child(object.offset_x, object.offset_y, object.width, object.height)
            {
                self.draw(canvas, child, child_request)?;
            }
        }
        Ok(())
    }

    fn draw_entry(&self, canvas: &mut dyn Canvas, entry: &VolumeEntry<E>, request: DrawRequest) {
        let opacity = self.style.opacity;
        let icon = match self.style.poof_override().and_then(|i| self.assets.poof.get(i)) {
            Some(frame) => frame,
            None => &entry.icon,
        };
        let inset = i64::from(BOOT_ENTRY_ICON_INSET);
        draw_child_image(canvas, icon, opacity, request, inset, inset);

        let label = &entry.label;
        let label_x = (i64::from(BOOT_ENTRY_DIMENSION) - i64::from(label.width())) / 2;
        let label_y = i64::from(BOOT_ENTRY_HEIGHT) - i64::from(label.height());
        draw_child_image(canvas, label, opacity, request, label_x, label_y);
    }

    fn draw_selector(&self, canvas: &mut dyn Canvas, selector: &Selector, request: DrawRequest) {
        let opacity = self.style.opacity;
        draw_child_image(canvas, &self.assets.entry_back_selected, opacity, request, 0, 0);
        draw_child_image(
            canvas,
            selector.current_image(&self.assets.selector),
            opacity,
            request,
            i64::from(BOOT_SELECTOR_BUTTON_X),
            i64::from(BOOT_SELECTOR_BUTTON_Y),
        );
    }
}

/// Draws the region `area` (screen coordinates) of the tree rooted at `root`.
pub(crate) fn paint<E>(
    painter: &Painter<'_, E>,
    canvas: &mut dyn Canvas,
    root: ObjectId,
    area: Rect,
) -> PickerResult<()> {
    let object = painter.tree.object(root)?;
    // Clip the screen area to the root, then restate it in root space.
    let Some(screen) = area.intersection(&object.local_bounds()) else {
        return Ok(());
    };
    let screen_request = DrawRequest {
        base_x: 0,
        base_y: 0,
        offset_x: u32::try_from(screen.x.max(0)).unwrap_or(0),
        offset_y: u32::try_from(screen.y.max(0)).unwrap_or(0),
        width: screen.width,
        height: screen.height,
        request_draw: true,
    };
    match screen_request.child(object.offset_x, object.offset_y, object.width, object.height) {
        Some(request) => painter.draw(canvas, root, request),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::scene::{AttachAt, SceneObject};
    use crate::testing::{test_assets, RecordingCanvas};
    use bootpick_core::Pixel;

    #[test]
    fn test_damage_queue() {
        let mut damage = DamageQueue::new();
        damage.push(Rect::ZERO);
        assert!(damage.is_empty());

        damage.push(Rect::new(0, 0, 296, 204));
        damage.push(Rect::new(10, 10, 4, 4));
        assert_eq!(damage.len(), 2);
        assert!(damage.covers(&Rect::new(152, 0, 144, 204)));
        assert!(!damage.covers(&Rect::new(152, 0, 145, 204)));

        assert_eq!(damage.take().len(), 2);
        assert!(damage.is_empty());
    }

    #[test]
    fn test_poof_override_ends_at_frame_count() {
        let mut style = RenderStyle::new();
        assert_eq!(style.poof_override(), Some(0));
        style.poof_frame = POOF_FRAME_COUNT - 1;
        assert_eq!(style.poof_override(), Some(POOF_FRAME_COUNT - 1));
        style.poof_frame = POOF_FRAME_COUNT;
        assert_eq!(style.poof_override(), None);
    }

    #[test]
    fn test_child_clipping() {
        let request = DrawRequest {
            base_x: 100,
            base_y: 50,
            offset_x: 10,
            offset_y: 0,
            width: 20,
            height: 100,
            request_draw: false,
        };
        let child = request.child(8, 8, 128, 128).unwrap();
        assert_eq!((child.base_x, child.base_y), (108, 58));
        assert_eq!((child.offset_x, child.width), (2, 18));
        assert_eq!((child.offset_y, child.height), (0, 92));

        assert!(request.child(40, 0, 10, 10).is_none());
    }

    fn entry_scene() -> (SceneTree<u32>, ObjectId) {
        let mut tree = SceneTree::with_capacity(4);
        let root = tree
            .insert(SceneObject::new(0, 0, 800, 600, ObjectKind::ViewRoot))
            .unwrap();
        let icon = Rc::new(Image::filled(128, 128, Pixel::WHITE).unwrap());
        let label = Image::filled(40, 13, Pixel::WHITE).unwrap();
        let entry = tree
            .insert(SceneObject::new(
                300,
                200,
                BOOT_ENTRY_DIMENSION,
                BOOT_ENTRY_HEIGHT,
                ObjectKind::Entry(VolumeEntry {
                    icon,
                    label,
                    context: 7,
                }),
            ))
            .unwrap();
        tree.attach(root, entry, AttachAt::Tail).unwrap();
        (tree, root)
    }

    #[test]
    fn test_full_paint_places_icon_and_label() {
        let assets = test_assets();
        let background = Image::filled(1, 1, Pixel::BLACK).unwrap();
        let (tree, root) = entry_scene();
        let painter = Painter {
            tree: &tree,
            assets: &assets,
            background: &background,
            style: RenderStyle {
                opacity: 200,
                poof_frame: POOF_FRAME_COUNT,
            },
        };

        let mut canvas = RecordingCanvas::default();
        paint(&painter, &mut canvas, root, Rect::new(0, 0, 800, 600)).unwrap();

        assert_eq!(canvas.blits.len(), 3);
        let back = &canvas.blits[0];
        assert!(back.is_background && back.request_draw);
        assert_eq!(back.target, Rect::new(0, 0, 800, 600));

        let icon = &canvas.blits[1];
        assert_eq!(icon.image, (128, 128));
        assert_eq!(icon.opacity, 200);
        assert!(!icon.request_draw);
        assert_eq!(icon.target, Rect::new(308, 208, 128, 128));

        let label = &canvas.blits[2];
        assert_eq!(label.target, Rect::new(352, 348, 40, 13));
    }

    #[test]
    fn test_partial_paint_clips_children() {
        let assets = test_assets();
        let background = Image::filled(1, 1, Pixel::BLACK).unwrap();
        let (tree, root) = entry_scene();
        let painter = Painter {
            tree: &tree,
            assets: &assets,
            background: &background,
            style: RenderStyle::new(),
        };

        let mut canvas = RecordingCanvas::default();
        paint(&painter, &mut canvas, root, Rect::new(400, 190, 100, 20)).unwrap();

        // Background plus the icon's top-right corner; the label is clipped.
        assert_eq!(canvas.blits.len(), 2);
        let icon = &canvas.blits[1];
        assert_eq!(icon.image, (128, 128));
        assert_eq!(icon.target, Rect::new(400, 208, 36, 2));
        assert_eq!(icon.source, (92, 0));
    }

    #[test]
    fn test_poof_frame_replaces_icon() {
        let assets = test_assets();
        let background = Image::filled(1, 1, Pixel::BLACK).unwrap();
        let (tree, root) = entry_scene();
        let painter = Painter {
            tree: &tree,
            assets: &assets,
            background: &background,
            style: RenderStyle {
                opacity: 255,
                poof_frame: 2,
            },
        };

        let mut canvas = RecordingCanvas::default();
        paint(&painter, &mut canvas, root, Rect::new(0, 0, 800, 600)).unwrap();
        assert_eq!(canvas.blits[1].first_pixel, assets.poof[2].pixels()[0]);
    }
}
