//! # Scene Object Tree
//!
//! Scene objects live in a fixed-capacity [`Pool`] and refer to each other by
//! [`ObjectId`]. Each object knows its parent and owns an ordered list of
//! children; that order is paint order (back to front) and navigation order
//! at the same time.
//!
//! Geometry composes additively: an object's absolute origin is the sum of
//! its own offset and every ancestor's offset. Detaching a child never
//! relayouts the parent; packing containers fix their own size.

use std::rc::Rc;

use bootpick_core::{Handle, Image, Pool, Rect};

use crate::error::{PickerError, PickerResult};
use crate::selector::Selector;

/// Stable handle of a scene object.
pub type ObjectId = Handle;

/// Where [`SceneTree::attach`] inserts a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachAt {
    /// First child: painted first, navigated first.
    Head,
    /// Last child.
    Tail,
    /// Immediately before an existing child.
    Before(ObjectId),
}

/// One discovered bootable volume.
#[derive(Debug)]
pub struct VolumeEntry<E> {
    /// Icon, usually shared with other entries.
    pub icon: Rc<Image>,
    /// Label bitmap owned by this entry alone.
    pub label: Image,
    /// Caller's boot entry handle, surfaced on activation.
    pub context: E,
}

/// Behaviour attached to a scene object.
///
/// Containers route pointer events to their children; leaves hit-test
/// themselves.
#[derive(Debug)]
pub enum ObjectKind<E> {
    /// Top-level object spanning the whole screen.
    ViewRoot,
    /// The row of volume entries plus the selector.
    Picker,
    /// A volume entry leaf.
    Entry(VolumeEntry<E>),
    /// The selection highlight and confirm button.
    Selector(Selector),
}

impl<E> ObjectKind<E> {
    /// Returns true if pointer events are delegated to children.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::ViewRoot | Self::Picker)
    }
}

/// A node of the scene graph.
#[derive(Debug)]
pub struct SceneObject<E> {
    /// Horizontal position relative to the parent.
    pub offset_x: i64,
    /// Vertical position relative to the parent.
    pub offset_y: i64,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
    /// Behaviour and payload.
    pub kind: ObjectKind<E>,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

impl<E> SceneObject<E> {
    /// Creates a detached object.
    #[must_use]
    pub fn new(offset_x: i64, offset_y: i64, width: u32, height: u32, kind: ObjectKind<E>) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The object's rectangle in its parent's space.
    #[must_use]
    pub const fn local_bounds(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.width, self.height)
    }

    /// Parent, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Children in paint order.
    #[must_use]
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    /// The entry payload, if this is a volume entry.
    #[must_use]
    pub fn as_entry(&self) -> Option<&VolumeEntry<E>> {
        match &self.kind {
            ObjectKind::Entry(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Arena-backed scene graph.
pub struct SceneTree<E> {
    objects: Pool<SceneObject<E>>,
}

impl<E> SceneTree<E> {
    /// Creates a tree that can hold `capacity` objects.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Pool::new(capacity),
        }
    }

    /// Creates a tree that can hold `capacity` objects.
    ///
    /// # Errors
    ///
    /// [`PickerError::OutOfMemory`] if the slots cannot be reserved.
    pub fn try_with_capacity(capacity: usize) -> PickerResult<Self> {
        Pool::try_new(capacity)
            .map(|objects| Self { objects })
            .ok_or(PickerError::OutOfMemory)
    }

    /// Number of live objects, attached or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the tree holds no objects.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Stores a detached object.
    ///
    /// # Errors
    ///
    /// [`PickerError::OutOfMemory`] when every slot is taken.
    pub fn insert(&mut self, object: SceneObject<E>) -> PickerResult<ObjectId> {
        debug_assert!(object.parent.is_none() && object.children.is_empty());
        self.objects.insert(object).ok_or(PickerError::OutOfMemory)
    }

    /// Looks up a live object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject<E>> {
        self.objects.get(id)
    }

    /// Looks up a live object mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject<E>> {
        self.objects.get_mut(id)
    }

    /// Looks up an object that must exist.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] for a stale handle.
    pub fn object(&self, id: ObjectId) -> PickerResult<&SceneObject<E>> {
        self.objects
            .get(id)
            .ok_or_else(|| PickerError::structural("stale scene object handle"))
    }

    /// Mutable variant of [`SceneTree::object`].
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] for a stale handle.
    pub fn object_mut(&mut self, id: ObjectId) -> PickerResult<&mut SceneObject<E>> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| PickerError::structural("stale scene object handle"))
    }

    /// Children of `id` in paint order; empty for stale handles.
    #[must_use]
    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        match self.objects.get(id) {
            Some(object) => &object.children,
            None => &[],
        }
    }

    /// Inserts `child` into `parent`'s child list and links it back.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] if the child is already attached,
    /// either handle is stale, or the `Before` sibling is not a child of
    /// `parent`.
    pub fn attach(&mut self, parent: ObjectId, child: ObjectId, at: AttachAt) -> PickerResult<()> {
        if parent == child {
            return Err(PickerError::structural("object attached to itself"));
        }
        if self.object(child)?.parent.is_some() {
            return Err(PickerError::structural("object is already attached"));
        }

        let siblings = &mut self.object_mut(parent)?.children;
        let index = match at {
            AttachAt::Head => 0,
            AttachAt::Tail => siblings.len(),
            AttachAt::Before(sibling) => siblings
                .iter()
                .position(|&id| id == sibling)
                .ok_or_else(|| PickerError::structural("anchor sibling is not a child of parent"))?,
        };
        siblings.insert(index, child);

        self.object_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlinks `child` from its parent.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] if the child is not attached or
    /// its parent does not list it.
    pub fn detach(&mut self, child: ObjectId) -> PickerResult<()> {
        let parent = self
            .object(child)?
            .parent
            .ok_or_else(|| PickerError::structural("detaching an unattached object"))?;

        let siblings = &mut self.object_mut(parent)?.children;
        let index = siblings
            .iter()
            .position(|&id| id == child)
            .ok_or_else(|| PickerError::structural("child missing from its parent's list"))?;
        siblings.remove(index);

        self.object_mut(child)?.parent = None;
        Ok(())
    }

    /// Frees a detached, childless object and hands it back.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] if the object is still attached
    /// or still has children.
    pub fn destroy(&mut self, id: ObjectId) -> PickerResult<SceneObject<E>> {
        let object = self.object(id)?;
        if object.parent.is_some() || !object.children.is_empty() {
            return Err(PickerError::structural("destroying a linked object"));
        }
        self.objects
            .remove(id)
            .ok_or_else(|| PickerError::structural("stale scene object handle"))
    }

    /// The sibling painted right after `id`.
    #[must_use]
    pub fn next_sibling(&self, id: ObjectId) -> Option<ObjectId> {
        let siblings = self.children(self.get(id)?.parent?);
        let index = siblings.iter().position(|&s| s == id)?;
        siblings.get(index + 1).copied()
    }

    /// The sibling painted right before `id`.
    #[must_use]
    pub fn prev_sibling(&self, id: ObjectId) -> Option<ObjectId> {
        let siblings = self.children(self.get(id)?.parent?);
        let index = siblings.iter().position(|&s| s == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Absolute origin of `id`: its offset plus every ancestor's offset.
    ///
    /// # Errors
    ///
    /// [`PickerError::StructuralViolation`] for a stale handle anywhere on
    /// the parent chain.
    pub fn absolute_origin(&self, id: ObjectId) -> PickerResult<(i64, i64)> {
        let mut object = self.object(id)?;
        let (mut x, mut y) = (object.offset_x, object.offset_y);
        while let Some(parent) = object.parent {
            object = self.object(parent)?;
            x += object.offset_x;
            y += object.offset_y;
        }
        Ok((x, y))
    }

    /// Absolute rectangle of `id`.
    ///
    /// # Errors
    ///
    /// Same as [`SceneTree::absolute_origin`].
    pub fn absolute_bounds(&self, id: ObjectId) -> PickerResult<Rect> {
        let (x, y) = self.absolute_origin(id)?;
        let object = self.object(id)?;
        Ok(Rect::new(x, y, object.width, object.height))
    }
}
