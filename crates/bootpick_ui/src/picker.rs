//! # Volume Picker
//!
//! The horizontally centred row of volume entries and the selection state
//! machine behind it.
//!
//! The picker's children are the entries in navigation order followed by
//! the selector, which always stays last and is never selected. Once an
//! entry exists exactly one entry is selected; the selector sits centred
//! under it.

use std::mem;

use bootpick_core::Rect;

use crate::assets::ClickImage;
use crate::error::{PickerError, PickerResult};
use crate::hit::is_hit;
use crate::input::{Key, PointerEvent};
use crate::metrics::{
    BOOT_ENTRY_HEIGHT, BOOT_ENTRY_ICON_INSET, BOOT_ENTRY_STRIDE, BOOT_ENTRY_WIDTH,
    BOOT_SELECTOR_HEIGHT, BOOT_SELECTOR_WIDTH,
};
use crate::render::DamageQueue;
use crate::scene::{AttachAt, ObjectId, ObjectKind, SceneObject, SceneTree, VolumeEntry};
use crate::selector::Selector;

/// Navigation direction along the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the first entry.
    Left,
    /// Towards the last entry.
    Right,
}

/// What the picker hands back to the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOutput<E> {
    /// Context of the activated entry.
    pub chosen: Option<E>,
    /// The loop should leave this view and rebuild it.
    pub refresh_requested: bool,
    /// Auxiliary entries stay hidden.
    pub hide_auxiliary: bool,
}

impl<E> PickerOutput<E> {
    /// Fresh output with auxiliary entries hidden.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chosen: None,
            refresh_requested: false,
            hide_auxiliary: true,
        }
    }

    /// Returns true once the poll loop should stop running the picker.
    #[must_use]
    pub const fn should_exit(&self) -> bool {
        self.chosen.is_some() || self.refresh_requested
    }
}

impl<E> Default for PickerOutput<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Selection state of the picker container.
#[derive(Debug)]
pub struct VolumePicker {
    id: ObjectId,
    selector: ObjectId,
    selected: Option<ObjectId>,
    /// The current gesture's down already moved the selection.
    selected_this_gesture: bool,
}

impl VolumePicker {
    /// Builds the empty picker under `parent`, centred in a view of the
    /// given size.
    ///
    /// # Errors
    ///
    /// [`PickerError::OutOfMemory`] if the scene is full.
    pub fn new<E>(
        tree: &mut SceneTree<E>,
        parent: ObjectId,
        view_width: u32,
        view_height: u32,
    ) -> PickerResult<Self> {
        let offset_x = i64::from(view_width / 2);
        let offset_y = (i64::from(view_height) - i64::from(BOOT_SELECTOR_HEIGHT)) / 2;
        let id = tree.insert(SceneObject::new(
            offset_x,
            offset_y,
            0,
            BOOT_SELECTOR_HEIGHT,
            ObjectKind::Picker,
        ))?;
        let selector = tree.insert(SceneObject::new(
            0,
            0,
            BOOT_SELECTOR_WIDTH,
            BOOT_SELECTOR_HEIGHT,
            ObjectKind::Selector(Selector::new()),
        ))?;
        tree.attach(id, selector, AttachAt::Tail)?;
        tree.attach(parent, id, AttachAt::Tail)?;

        Ok(Self {
            id,
            selector,
            selected: None,
            selected_this_gesture: false,
        })
    }

    /// The picker container object.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// The selector object.
    #[must_use]
    pub const fn selector(&self) -> ObjectId {
        self.selector
    }

    /// The selected entry, `None` only while the picker is empty.
    #[must_use]
    pub const fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Entries in navigation order.
    #[must_use]
    pub fn entries<'a, E>(&self, tree: &'a SceneTree<E>) -> &'a [ObjectId] {
        let children = tree.children(self.id);
        children.split_last().map_or(children, |(_, entries)| entries)
    }

    /// Context of the selected entry.
    #[must_use]
    pub fn selected_context<'a, E>(&self, tree: &'a SceneTree<E>) -> Option<&'a E> {
        Some(&tree.get(self.selected?)?.as_entry()?.context)
    }

    /// Appends an entry before the selector and recentres the row.
    ///
    /// The first entry added, or any entry added as `make_default`, becomes
    /// the selection without a redraw request.
    ///
    /// # Errors
    ///
    /// [`PickerError::OutOfMemory`] if the scene is full.
    pub fn add_entry<E>(
        &mut self,
        tree: &mut SceneTree<E>,
        entry: VolumeEntry<E>,
        make_default: bool,
    ) -> PickerResult<ObjectId> {
        let offset_x = match tree.prev_sibling(self.selector) {
            Some(prev) => tree.object(prev)?.offset_x + i64::from(BOOT_ENTRY_STRIDE),
            None => 0,
        };
        let id = tree.insert(SceneObject::new(
            offset_x,
            0,
            BOOT_ENTRY_WIDTH,
            BOOT_ENTRY_HEIGHT,
            ObjectKind::Entry(entry),
        ))?;
        tree.attach(self.id, id, AttachAt::Before(self.selector))?;

        let picker = tree.object_mut(self.id)?;
        picker.width += BOOT_ENTRY_STRIDE;
        picker.offset_x -= i64::from(BOOT_ENTRY_STRIDE / 2);

        if make_default || self.selected.is_none() {
            self.select(tree, id)?;
        }
        Ok(id)
    }

    /// Destroys every entry and restores the empty-row geometry.
    ///
    /// Returns the contexts of the removed entries in row order.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] if the child list is
    /// inconsistent.
    pub fn clear_entries<E>(&mut self, tree: &mut SceneTree<E>) -> PickerResult<Vec<E>> {
        let entries = self.entries(tree).to_vec();
        let mut contexts = Vec::with_capacity(entries.len());
        for &id in &entries {
            tree.detach(id)?;
            if let ObjectKind::Entry(entry) = tree.destroy(id)?.kind {
                contexts.push(entry.context);
            }
        }

        let count = i64::try_from(entries.len()).unwrap_or(i64::MAX);
        let picker = tree.object_mut(self.id)?;
        picker.width = 0;
        picker.offset_x += count * i64::from(BOOT_ENTRY_STRIDE / 2);
        tree.object_mut(self.selector)?.offset_x = 0;

        self.selected = None;
        self.selected_this_gesture = false;
        tracing::debug!(removed = entries.len(), "picker emptied");
        Ok(contexts)
    }

    /// Makes `entry` the selection and centres the selector under it.
    ///
    /// Does not request a redraw.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] if `entry` is not one of this
    /// picker's entries.
    pub fn select<E>(&mut self, tree: &mut SceneTree<E>, entry: ObjectId) -> PickerResult<()> {
        let object = tree.object(entry)?;
        if object.parent() != Some(self.id) || object.as_entry().is_none() {
            return Err(PickerError::structural("selected object is not an entry of the picker"));
        }
        let center = object.offset_x + (i64::from(object.width) - i64::from(BOOT_SELECTOR_WIDTH)) / 2;

        tree.object_mut(self.selector)?.offset_x = center;
        self.selected = Some(entry);
        Ok(())
    }

    /// Moves the selection one entry left or right.
    ///
    /// Returns false at either end of the row, where nothing changes.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] for an inconsistent tree.
    pub fn navigate<E>(
        &mut self,
        tree: &mut SceneTree<E>,
        damage: &mut DamageQueue,
        direction: Direction,
    ) -> PickerResult<bool> {
        let Some(current) = self.selected else {
            return Ok(false);
        };
        let next = match direction {
            Direction::Left => tree.prev_sibling(current),
            Direction::Right => tree.next_sibling(current),
        };
        match next {
            Some(next) if next != self.selector => {
                self.change_entry(tree, damage, next)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Selects `next` and damages the old and new columns, from the entry
    /// tops down to the bottom of the selector.
    fn change_entry<E>(
        &mut self,
        tree: &mut SceneTree<E>,
        damage: &mut DamageQueue,
        next: ObjectId,
    ) -> PickerResult<()> {
        let previous = self.selected;
        self.select(tree, next)?;

        let (picker_x, picker_y) = tree.absolute_origin(self.id)?;
        let height = tree.object(self.id)?.height;
        let column = |id: ObjectId| -> PickerResult<Rect> {
            let object = tree.object(id)?;
            Ok(Rect::new(
                picker_x + object.offset_x,
                picker_y + object.offset_y,
                object.width,
                height,
            ))
        };

        let mut region = column(next)?;
        if let Some(previous) = previous {
            region = region.union(&column(previous)?);
        }
        damage.push(region);
        tracing::debug!(?next, "selection changed");
        Ok(())
    }

    /// Surfaces the selected entry's context as the chosen boot entry.
    ///
    /// Returns false if nothing is selected.
    pub fn activate<E: Clone>(&self, tree: &SceneTree<E>, output: &mut PickerOutput<E>) -> bool {
        let Some(context) = self.selected_context(tree) else {
            return false;
        };
        tracing::info!(entry = ?self.selected, "boot entry chosen");
        output.chosen = Some(context.clone());
        true
    }

    /// Handles a key stroke.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] for an inconsistent tree.
    pub fn key_event<E: Clone>(
        &mut self,
        tree: &mut SceneTree<E>,
        damage: &mut DamageQueue,
        output: &mut PickerOutput<E>,
        key: Key,
    ) -> PickerResult<()> {
        match key {
            Key::Right => {
                self.navigate(tree, damage, Direction::Right)?;
            }
            Key::Left => {
                self.navigate(tree, damage, Direction::Left)?;
            }
            Key::Enter => {
                self.activate(tree, output);
            }
            Key::Space => {
                output.hide_auxiliary = false;
                output.refresh_requested = true;
            }
            Key::Escape => output.refresh_requested = true,
            Key::Up | Key::Down | Key::Char(_) => {}
        }
        Ok(())
    }

    /// Handles a pointer event routed to `entry` at entry-local `at`.
    ///
    /// Only points on the painted part of the icon count. A down there
    /// selects the entry; an up there activates it, unless the down of the
    /// same gesture is what selected it.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] for an inconsistent tree.
    pub fn entry_pointer_event<E: Clone>(
        &mut self,
        tree: &mut SceneTree<E>,
        damage: &mut DamageQueue,
        output: &mut PickerOutput<E>,
        entry: ObjectId,
        event: PointerEvent,
        at: (i64, i64),
    ) -> PickerResult<()> {
        if event == PointerEvent::PrimaryHold {
            return Ok(());
        }
        let same_gesture = event.ends_gesture() && mem::take(&mut self.selected_this_gesture);

        let inset = i64::from(BOOT_ENTRY_ICON_INSET);
        let (x, y) = (at.0 - inset, at.1 - inset);
        let icon = match tree.object(entry)?.as_entry() {
            Some(volume) => &volume.icon,
            None => return Err(PickerError::structural("entry event on a non-entry object")),
        };
        if x < 0 || y < 0 || !is_hit(icon, x, y) {
            return Ok(());
        }

        match event {
            PointerEvent::PrimaryDown if self.selected != Some(entry) => {
                self.change_entry(tree, damage, entry)?;
                self.selected_this_gesture = true;
            }
            PointerEvent::PrimaryUp if !same_gesture && self.selected == Some(entry) => {
                self.activate(tree, output);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handles a pointer event routed to the selector at selector-local
    /// `at`. Releasing on the button activates the selection.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] for an inconsistent tree.
    pub fn selector_pointer_event<E: Clone>(
        &mut self,
        tree: &mut SceneTree<E>,
        damage: &mut DamageQueue,
        output: &mut PickerOutput<E>,
        images: &ClickImage,
        event: PointerEvent,
        at: (i64, i64),
    ) -> PickerResult<()> {
        let response = match &mut tree.object_mut(self.selector)?.kind {
            ObjectKind::Selector(selector) => selector.pointer_event(images, event, at.0, at.1),
            _ => return Err(PickerError::structural("selector slot holds another object")),
        };

        if response.confirmed {
            self.activate(tree, output);
        }
        if response.changed {
            damage.push(tree.absolute_bounds(self.selector)?);
        }
        Ok(())
    }
}
