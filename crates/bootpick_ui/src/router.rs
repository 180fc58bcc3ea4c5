//! # Pointer Routing
//!
//! A `PrimaryDown` is resolved by walking the scene from the root: each
//! container tries its children in paint order, restating the point in the
//! child's space, and the first leaf whose bounds contain the point claims
//! it. Leaves claim every point inside their bounds, even where their own
//! hit test later rejects it, so siblings never see the same gesture.
//!
//! The claiming leaf is captured for the rest of the gesture. Every
//! `PrimaryHold` and the closing `PrimaryUp` go to it regardless of where
//! the pointer has moved.

use crate::error::PickerResult;
use crate::input::PointerEvent;
use crate::scene::{ObjectId, SceneTree};

/// A pointer event resolved to its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTarget {
    /// Receiving object.
    pub id: ObjectId,
    /// Pointer X in the receiver's space.
    pub x: i64,
    /// Pointer Y in the receiver's space.
    pub y: i64,
}

/// Routes pointer events and holds the gesture capture.
#[derive(Debug, Default)]
pub struct PointerRouter {
    captured: Option<ObjectId>,
}

impl PointerRouter {
    /// Creates a router with no gesture in progress.
    #[must_use]
    pub const fn new() -> Self {
        Self { captured: None }
    }

    /// Object holding the current gesture.
    #[must_use]
    pub const fn captured(&self) -> Option<ObjectId> {
        self.captured
    }

    /// Drops the capture, e.g. because its object is being destroyed.
    pub fn release(&mut self) {
        self.captured = None;
    }

    /// Resolves `event` at screen position `(x, y)`.
    ///
    /// Returns `None` when nothing claims a down, or for hold and up events
    /// outside a gesture.
    ///
    /// # Errors
    ///
    /// [`crate::PickerError::StructuralViolation`] if the tree is
    /// inconsistent while walking it.
    pub fn route<E>(
        &mut self,
        tree: &SceneTree<E>,
        root: ObjectId,
        event: PointerEvent,
        x: i64,
        y: i64,
    ) -> PickerResult<Option<PointerTarget>> {
        let id = match event {
            PointerEvent::PrimaryDown => {
                let (root_x, root_y) = match tree.object(root)?.parent() {
                    Some(parent) => tree.absolute_origin(parent)?,
                    None => (0, 0),
                };
                self.captured = pick(tree, root, x - root_x, y - root_y)?;
                match self.captured {
                    Some(id) => id,
                    None => return Ok(None),
                }
            }
            PointerEvent::PrimaryHold | PointerEvent::PrimaryUp => {
                let captured = if event.ends_gesture() {
                    self.captured.take()
                } else {
                    self.captured
                };
                let Some(id) = captured else {
                    tracing::trace!(?event, "pointer event outside a gesture");
                    return Ok(None);
                };
                if tree.get(id).is_none() {
                    tracing::warn!(?event, "captured object is gone, dropping gesture");
                    self.captured = None;
                    return Ok(None);
                }
                id
            }
        };

        let (origin_x, origin_y) = tree.absolute_origin(id)?;
        Ok(Some(PointerTarget {
            id,
            x: x - origin_x,
            y: y - origin_y,
        }))
    }
}

/// Finds the leaf claiming `(x, y)`, given in the parent space of `id`.
fn pick<E>(tree: &SceneTree<E>, id: ObjectId, x: i64, y: i64) -> PickerResult<Option<ObjectId>> {
    let object = tree.object(id)?;
    if !object.local_bounds().contains(x, y) {
        return Ok(None);
    }
    if !object.kind.is_container() {
        return Ok(Some(id));
    }

    let (local_x, local_y) = (x - object.offset_x, y - object.offset_y);
    for &child in object.children() {
        if let Some(hit) = pick(tree, child, local_x, local_y)? {
            return Ok(Some(hit));
        }
    }
    Ok(None)
}
