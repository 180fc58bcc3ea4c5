//! # Boot Picker View
//!
//! The root of one picker session. It owns the scene, the assets and every
//! piece of state the poll loop drives:
//!
//! ```text
//! BootPickerView
//! ├── ViewRoot (full screen, black background)
//! │   └── Picker (centred row)
//! │       ├── Entry 0 .. Entry N-1
//! │       └── Selector
//! ├── PointerRouter   (gesture capture)
//! ├── AnimationScheduler (slide, fade, poof)
//! └── DamageQueue     (regions to repaint)
//! ```
//!
//! A typical loop feeds input, calls [`BootPickerView::tick`], repaints
//! every rectangle from [`BootPickerView::take_damage`] and stops once
//! [`BootPickerView::should_exit`] holds.

use bootpick_core::{Image, Pixel, Rect};

use crate::animation::{
    Animate, Animation, AnimationKind, AnimationScheduler, Interpolation, Interpolator,
};
use crate::assets::{CursorProvider, GuiAssets};
use crate::config::PickerConfig;
use crate::error::{PickerError, PickerResult};
use crate::input::{Key, PointerEvent};
use crate::label::{build_label, select_icon, EntryDescriptor};
use crate::metrics::POOF_FRAME_COUNT;
use crate::picker::{PickerOutput, VolumePicker};
use crate::render::{paint, Blit, Canvas, DamageQueue, Painter, RenderStyle};
use crate::router::PointerRouter;
use crate::scene::{ObjectId, ObjectKind, SceneObject, SceneTree, VolumeEntry};

/// Objects the view creates besides the entries: root, picker, selector.
const FIXED_OBJECTS: usize = 3;

/// Screen size reported by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The whole screen.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// One boot picker session.
pub struct BootPickerView<E> {
    tree: SceneTree<E>,
    root: ObjectId,
    picker: VolumePicker,
    router: PointerRouter,
    animations: AnimationScheduler,
    style: RenderStyle,
    damage: DamageQueue,
    output: PickerOutput<E>,
    assets: GuiAssets,
    config: PickerConfig,
    cursor: Box<dyn CursorProvider>,
    pointer: (i64, i64),
    background: Image,
    viewport: Viewport,
}

impl<E: Clone> BootPickerView<E> {
    /// Validates the assets and builds the empty scene.
    ///
    /// The picker starts centred and transparent, with the slide-in, fade-in
    /// and poof animations scheduled. The whole screen is queued for the
    /// first repaint.
    ///
    /// # Errors
    ///
    /// [`crate::PickerError::ConfigurationMismatch`] if any reference asset
    /// has the wrong size; the session must not start.
    /// [`crate::PickerError::Config`] for out-of-range configuration values
    /// and [`crate::PickerError::OutOfMemory`] if the scene cannot be
    /// reserved.
    pub fn new(
        viewport: Viewport,
        assets: GuiAssets,
        config: PickerConfig,
        cursor: Box<dyn CursorProvider>,
    ) -> PickerResult<Self> {
        config.validate()?;
        assets.validate()?;

        let capacity = config
            .picker
            .max_entries
            .checked_add(FIXED_OBJECTS)
            .ok_or(PickerError::OutOfMemory)?;
        let mut tree = SceneTree::try_with_capacity(capacity)?;
        let root = tree.insert(SceneObject::new(
            0,
            0,
            viewport.width,
            viewport.height,
            ObjectKind::ViewRoot,
        ))?;
        let picker = VolumePicker::new(&mut tree, root, viewport.width, viewport.height)?;

        let mut damage = DamageQueue::new();
        damage.push(viewport.bounds());

        let view = Self {
            tree,
            root,
            picker,
            router: PointerRouter::new(),
            animations: intro_animations(&config),
            style: RenderStyle::new(),
            damage,
            output: PickerOutput::new(),
            assets,
            config,
            cursor,
            pointer: (i64::from(viewport.width / 2), i64::from(viewport.height / 2)),
            background: Image::filled(1, 1, Pixel::BLACK)?,
            viewport,
        };
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            "boot picker initialized"
        );
        Ok(view)
    }

    /// Adds a discovered boot entry.
    ///
    /// # Errors
    ///
    /// [`crate::PickerError::OutOfMemory`] if the scene is full and
    /// [`crate::PickerError::UnsupportedEntryKind`] if no label could be
    /// built. Either way the picker is unchanged and the caller should skip
    /// the device.
    pub fn add_entry(
        &mut self,
        context: E,
        entry: &EntryDescriptor<'_>,
        make_default: bool,
    ) -> PickerResult<ObjectId> {
        let label = build_label(&self.assets, self.config.labels, entry)?;
        let icon = select_icon(&self.assets, entry);
        let id = self.picker.add_entry(
            &mut self.tree,
            VolumeEntry {
                icon,
                label,
                context,
            },
            make_default,
        )?;
        tracing::debug!(name = entry.name, kind = ?entry.kind, make_default, "entry added");
        Ok(id)
    }

    /// Removes every entry and hands their contexts back.
    ///
    /// # Errors
    ///
    /// [`crate::PickerError::StructuralViolation`] for an inconsistent scene.
    pub fn clear_entries(&mut self) -> PickerResult<Vec<E>> {
        if let Some(captured) = self.router.captured() {
            if self.picker.entries(&self.tree).contains(&captured) {
                self.router.release();
            }
        }
        let removed = self.picker.clear_entries(&mut self.tree)?;
        self.damage.push(self.viewport.bounds());
        Ok(removed)
    }

    /// Feeds a pointer event at screen position `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`crate::PickerError::StructuralViolation`] for an inconsistent scene.
    pub fn dispatch_pointer_event(&mut self, event: PointerEvent, x: i64, y: i64) -> PickerResult<()> {
        self.move_pointer(x, y);

        let Some(target) = self.router.route(&self.tree, self.root, event, x, y)? else {
            return Ok(());
        };
        let at = (target.x, target.y);
        let kind = &self.tree.object(target.id)?.kind;
        if matches!(kind, ObjectKind::Entry(_)) {
            self.picker.entry_pointer_event(
                &mut self.tree,
                &mut self.damage,
                &mut self.output,
                target.id,
                event,
                at,
            )
        } else if matches!(kind, ObjectKind::Selector(_)) {
            self.picker.selector_pointer_event(
                &mut self.tree,
                &mut self.damage,
                &mut self.output,
                &self.assets.selector,
                event,
                at,
            )
        } else {
            Ok(())
        }
    }

    /// Feeds a key stroke.
    ///
    /// # Errors
    ///
    /// [`crate::PickerError::StructuralViolation`] for an inconsistent scene.
    pub fn dispatch_key_event(&mut self, key: Key) -> PickerResult<()> {
        self.picker
            .key_event(&mut self.tree, &mut self.damage, &mut self.output, key)
    }

    /// Advances the animations to tick `now` and returns how many finished.
    pub fn tick(&mut self, now: u64) -> usize {
        let mut stage = Stage {
            tree: &mut self.tree,
            picker: self.picker.id(),
            style: &mut self.style,
            damage: &mut self.damage,
        };
        self.animations.tick(now, &mut stage)
    }
}

impl<E> BootPickerView<E> {
    /// Returns true once an entry was chosen or a refresh was requested.
    #[must_use]
    pub const fn should_exit(&self) -> bool {
        self.output.should_exit()
    }

    /// Chosen entry and auxiliary flags.
    #[must_use]
    pub const fn output(&self) -> &PickerOutput<E> {
        &self.output
    }

    /// Consumes the view and returns its output.
    #[must_use]
    pub fn into_output(self) -> PickerOutput<E> {
        self.output
    }

    /// Drains the pending repaint regions.
    pub fn take_damage(&mut self) -> Vec<Rect> {
        self.damage.take()
    }

    /// Pending repaint regions.
    #[must_use]
    pub const fn damage(&self) -> &DamageQueue {
        &self.damage
    }

    /// The scene graph.
    #[must_use]
    pub const fn tree(&self) -> &SceneTree<E> {
        &self.tree
    }

    /// The root object.
    #[must_use]
    pub const fn root(&self) -> ObjectId {
        self.root
    }

    /// The picker's selection state.
    #[must_use]
    pub const fn picker(&self) -> &VolumePicker {
        &self.picker
    }

    /// Current animation-driven drawing values.
    #[must_use]
    pub const fn style(&self) -> RenderStyle {
        self.style
    }

    /// Animations still running.
    #[must_use]
    pub const fn animations(&self) -> &AnimationScheduler {
        &self.animations
    }

    /// The screen the view was built for.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last known pointer position.
    #[must_use]
    pub const fn pointer(&self) -> (i64, i64) {
        self.pointer
    }

    /// Repaints `area` (screen coordinates), cursor included.
    ///
    /// # Errors
    ///
    /// [`crate::PickerError::StructuralViolation`] for an inconsistent scene.
    pub fn render(&self, canvas: &mut dyn Canvas, area: Rect) -> PickerResult<()> {
        let painter = Painter {
            tree: &self.tree,
            assets: &self.assets,
            background: &self.background,
            style: self.style,
        };
        paint(&painter, canvas, self.root, area)?;

        let cursor = self.cursor.cursor_image(&self.assets);
        let (x, y) = self.pointer;
        let Some(visible) = area.intersection(&cursor_bounds(cursor, x, y)) else {
            return Ok(());
        };
        canvas.draw_to_buffer(&Blit {
            image: cursor,
            opacity: u8::MAX,
            is_background: false,
            base_x: x,
            base_y: y,
            offset_x: u32::try_from(visible.x - x).unwrap_or(0),
            offset_y: u32::try_from(visible.y - y).unwrap_or(0),
            width: visible.width,
            height: visible.height,
            request_draw: true,
        });
        Ok(())
    }

    fn move_pointer(&mut self, x: i64, y: i64) {
        if self.pointer == (x, y) {
            return;
        }
        let cursor = self.cursor.cursor_image(&self.assets);
        let (old_x, old_y) = self.pointer;
        self.damage.push(cursor_bounds(cursor, old_x, old_y));
        self.damage.push(cursor_bounds(cursor, x, y));
        self.pointer = (x, y);
    }
}

fn cursor_bounds(cursor: &Image, x: i64, y: i64) -> Rect {
    Rect::new(x, y, cursor.width(), cursor.height())
}

/// The slide-in, fade-in and poof sweep every session opens with.
fn intro_animations(config: &PickerConfig) -> AnimationScheduler {
    let timing = config.animation;
    let motion = if timing.smooth_motion {
        Interpolation::Smooth
    } else {
        Interpolation::Linear
    };

    let mut scheduler = AnimationScheduler::new();
    scheduler.push(Animation::new(
        AnimationKind::HorizontalSlide {
            distance: timing.slide_distance,
            shift: 0,
        },
        Interpolator {
            kind: motion,
            start_time: 0,
            duration: timing.slide_duration,
            start_value: 0,
            end_value: timing.slide_distance,
        },
    ));
    scheduler.push(Animation::new(
        AnimationKind::Opacity,
        Interpolator {
            kind: motion,
            start_time: 0,
            duration: timing.fade_duration,
            start_value: 0,
            end_value: u32::from(u8::MAX),
        },
    ));
    scheduler.push(Animation::new(
        AnimationKind::ImageIndexSweep,
        Interpolator {
            kind: Interpolation::Linear,
            start_time: timing.poof_start,
            duration: timing.poof_duration,
            start_value: 0,
            end_value: u32::try_from(POOF_FRAME_COUNT).unwrap_or(u32::MAX),
        },
    ));
    scheduler
}

/// The parts of the view the animations write to.
struct Stage<'a, E> {
    tree: &'a mut SceneTree<E>,
    picker: ObjectId,
    style: &'a mut RenderStyle,
    damage: &'a mut DamageQueue,
}

impl<E> Stage<'_, E> {
    fn picker_bounds(&self) -> Option<Rect> {
        self.tree.absolute_bounds(self.picker).ok()
    }
}

impl<E> Animate for Stage<'_, E> {
    fn animate(&mut self, kind: &mut AnimationKind, value: u32) {
        match kind {
            AnimationKind::Opacity => {
                self.style.opacity = u8::try_from(value).unwrap_or(u8::MAX);
            }
            AnimationKind::ImageIndexSweep => {
                self.style.poof_frame = usize::try_from(value).unwrap_or(usize::MAX);
            }
            AnimationKind::HorizontalSlide { distance, shift } => {
                let before = self.picker_bounds();
                let Some(picker) = self.tree.get_mut(self.picker) else {
                    return;
                };
                let next = i64::from(*distance) - i64::from(value);
                picker.offset_x += next - *shift;
                *shift = next;
                if let (Some(before), Some(after)) = (before, self.picker_bounds()) {
                    self.damage.push(before.union(&after));
                }
                return;
            }
        }
        if let Some(bounds) = self.picker_bounds() {
            self.damage.push(bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticCursor;
    use crate::config::MAX_ENTRIES_LIMIT;
    use crate::label::EntryKind;
    use crate::testing::{square, test_assets, RecordingCanvas};

    fn view() -> BootPickerView<u32> {
        BootPickerView::new(
            Viewport::new(1024, 768),
            test_assets(),
            PickerConfig::default(),
            Box::new(StaticCursor),
        )
        .unwrap()
    }

    #[test]
    fn test_bad_assets_refuse_to_start() {
        let mut assets = test_assets();
        assets.icon_tool = square(64, Pixel::WHITE);
        let result = BootPickerView::<u32>::new(
            Viewport::new(1024, 768),
            assets,
            PickerConfig::default(),
            Box::new(StaticCursor),
        );
        assert!(matches!(
            result,
            Err(PickerError::ConfigurationMismatch {
                asset: "tool icon",
                expected: 128,
                actual: 64
            })
        ));

        let mut assets = test_assets();
        assets.poof.pop();
        let result = BootPickerView::<u32>::new(
            Viewport::new(1024, 768),
            assets,
            PickerConfig::default(),
            Box::new(StaticCursor),
        );
        assert!(matches!(result, Err(PickerError::ConfigurationMismatch { .. })));
    }

    #[test]
    fn test_initial_state() {
        let mut view = view();
        assert_eq!(view.style(), RenderStyle::new());
        assert_eq!(view.animations().len(), 3);
        assert!(!view.should_exit());
        assert_eq!(view.take_damage(), vec![Rect::new(0, 0, 1024, 768)]);

        let picker = view.tree().get(view.picker().id()).unwrap();
        assert_eq!((picker.offset_x, picker.offset_y), (512, 282));
    }

    #[test]
    fn test_scene_capacity_limits_entries() {
        let config = PickerConfig::from_toml_str("[picker]\nmax_entries = 1").unwrap();
        let mut view = BootPickerView::new(
            Viewport::new(800, 600),
            test_assets(),
            config,
            Box::new(StaticCursor),
        )
        .unwrap();

        let entry = EntryDescriptor::new(EntryKind::AppleOs, "Macintosh HD");
        view.add_entry(1, &entry, false).unwrap();
        assert_eq!(view.add_entry(2, &entry, false), Err(PickerError::OutOfMemory));
        assert_eq!(view.picker().entries(view.tree()).len(), 1);
    }

    #[test]
    fn test_oversized_entry_limit_is_refused() {
        for max_entries in [0, MAX_ENTRIES_LIMIT + 1, usize::MAX] {
            let mut config = PickerConfig::default();
            config.picker.max_entries = max_entries;
            let result: PickerResult<BootPickerView<u32>> = BootPickerView::new(
                Viewport::new(800, 600),
                test_assets(),
                config,
                Box::new(StaticCursor),
            );
            assert!(matches!(result, Err(PickerError::Config(_))));
        }
    }

    #[test]
    fn test_intro_animations_run_to_completion() {
        let mut view = view();
        view.add_entry(1, &EntryDescriptor::new(EntryKind::AppleOs, "Macintosh HD"), true)
            .unwrap();
        let resting_x = view.tree().get(view.picker().id()).unwrap().offset_x;
        view.take_damage();

        assert_eq!(view.tick(0), 0);
        let picker = view.tree().get(view.picker().id()).unwrap();
        assert_eq!(picker.offset_x, resting_x + 35);
        assert_eq!(view.style().opacity, 0);
        assert_eq!(view.style().poof_override(), Some(0));
        assert_eq!(view.damage().len(), 3);

        let mut finished = 0;
        for now in 1..=50 {
            finished += view.tick(now);
        }
        assert_eq!(finished, 3);
        assert!(view.animations().is_empty());
        assert_eq!(view.tree().get(view.picker().id()).unwrap().offset_x, resting_x);
        assert_eq!(view.style().opacity, 255);
        assert_eq!(view.style().poof_override(), None);

        view.take_damage();
        assert_eq!(view.tick(51), 0);
        assert!(view.damage().is_empty());
    }

    #[test]
    fn test_render_draws_cursor_last() {
        let mut view = view();
        view.add_entry(1, &EntryDescriptor::new(EntryKind::AppleOs, "Macintosh HD"), true)
            .unwrap();
        view.dispatch_pointer_event(PointerEvent::PrimaryHold, 10, 20).unwrap();

        let mut canvas = RecordingCanvas::default();
        view.render(&mut canvas, Rect::new(0, 0, 1024, 768)).unwrap();

        let cursor = canvas.blits.last().unwrap();
        assert_eq!(cursor.image, (24, 24));
        assert_eq!(cursor.target, Rect::new(10, 20, 24, 24));
        assert!(canvas.blits[0].is_background);
        // Background, icon, label, highlight, button, cursor.
        assert_eq!(canvas.blits.len(), 6);
    }

    #[test]
    fn test_pointer_move_damages_cursor_trail() {
        let mut view = view();
        view.take_damage();

        view.dispatch_pointer_event(PointerEvent::PrimaryHold, 5, 5).unwrap();
        assert_eq!(
            view.take_damage(),
            vec![Rect::new(512, 384, 24, 24), Rect::new(5, 5, 24, 24)]
        );

        view.dispatch_pointer_event(PointerEvent::PrimaryHold, 5, 5).unwrap();
        assert!(view.damage().is_empty());
    }

    #[test]
    fn test_clear_releases_capture() {
        let mut view = view();
        view.add_entry(1, &EntryDescriptor::new(EntryKind::AppleOs, "A"), false)
            .unwrap();
        let entry = view.picker().entries(view.tree())[0];
        let (x, y) = view.tree().absolute_origin(entry).unwrap();

        view.dispatch_pointer_event(PointerEvent::PrimaryDown, x + 60, y + 60)
            .unwrap();
        assert_eq!(view.clear_entries().unwrap(), vec![1]);

        view.dispatch_pointer_event(PointerEvent::PrimaryUp, x + 60, y + 60)
            .unwrap();
        assert!(view.output().chosen.is_none());
    }
}
