//! # Boot Picker UI
//!
//! The interactive boot-device picker of a firmware-resident bootloader:
//! - A retained scene graph of volume entries plus a trailing selector
//! - Pointer and key routing with gesture capture
//! - Pixel-accurate hit testing against icon transparency
//! - Tick-driven slide, fade and icon-poof animations
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      PICKER PIPELINE                        │
//! ├────────────────────────────────────────────────────────────┤
//! │  Poll loop → Router → VolumePicker → Damage → Canvas blits  │
//! │      ↓          ↓           ↓            ↑                  │
//! │    tick()   Hit Testing  Selection   Animations             │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Philosophy
//!
//! There is no operating system underneath. Nothing blocks, nothing runs
//! concurrently, and every call returns before the next poll iteration.
//! Compositing, image decoding and glyph rasterization belong to the
//! firmware; this crate decides *what* to draw and *where*.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod assets;
pub mod config;
pub mod error;
pub mod hit;
pub mod input;
pub mod label;
pub mod metrics;
pub mod picker;
pub mod render;
pub mod router;
pub mod scene;
pub mod selector;
pub mod view;

#[cfg(test)]
mod testing;

pub use animation::{
    Animate, Animation, AnimationKind, AnimationScheduler, Interpolation, Interpolator,
};
pub use assets::{
    ClickImage, CursorProvider, GenericLabels, GuiAssets, IconDecoder, LabelRenderer, StaticCursor,
};
pub use config::{AnimationConfig, LabelPolicy, PickerConfig, MAX_ENTRIES_LIMIT};
pub use error::{PickerError, PickerResult};
pub use hit::is_hit;
pub use input::{Key, PointerEvent};
pub use label::{decode_disk_label, EntryDescriptor, EntryKind};
pub use picker::{Direction, PickerOutput, VolumePicker};
pub use render::{Blit, Canvas, DamageQueue, RenderStyle};
pub use router::{PointerRouter, PointerTarget};
pub use scene::{AttachAt, ObjectId, ObjectKind, SceneObject, SceneTree, VolumeEntry};
pub use selector::{ButtonState, Selector};
pub use view::{BootPickerView, Viewport};
