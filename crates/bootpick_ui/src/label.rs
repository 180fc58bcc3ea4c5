//! # Entry Labels and Icons
//!
//! Builds the label bitmap and picks the icon for a discovered boot entry.
//! Labels are tried in a fixed order and each failure falls through to the
//! next strategy:
//!
//! 1. the volume's own disk label image (if enabled and present)
//! 2. the generic label for the entry's category (if enabled)
//! 3. the entry name rendered with the bitmap font
//!
//! Only when the font cannot render the name does construction fail.

use std::rc::Rc;

use bootpick_core::{Image, ImageError, Pixel};

use crate::assets::{GenericLabels, GuiAssets};
use crate::config::LabelPolicy;
use crate::error::{PickerError, PickerResult};
use crate::metrics::BOOT_ENTRY_ICON_DIMENSION;

/// Name the firmware gives its NVRAM reset action.
pub const RESET_NVRAM_ENTRY: &str = "Reset NVRAM";

/// Category of a discovered boot entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Unclassified loader.
    Unknown,
    /// macOS.
    AppleOs,
    /// macOS recovery.
    AppleRecovery,
    /// Time Machine restore.
    AppleTimeMachine,
    /// Windows.
    Windows,
    /// Some other operating system.
    ExternalOs,
    /// A user-configured tool.
    ExternalTool,
    /// A built-in system action.
    System,
}

/// What discovery knows about an entry, borrowed for the duration of
/// [`BootPickerView::add_entry`](crate::view::BootPickerView::add_entry).
#[derive(Debug, Clone, Copy)]
pub struct EntryDescriptor<'a> {
    /// Category.
    pub kind: EntryKind,
    /// Display name.
    pub name: &'a str,
    /// The volume sits on a removable device.
    pub is_external: bool,
    /// Encoded disk label image read from the volume.
    pub disk_label: Option<&'a [u8]>,
    /// Encoded custom icon read from the volume.
    pub icon: Option<&'a [u8]>,
}

impl<'a> EntryDescriptor<'a> {
    /// Creates a descriptor with no volume-provided images.
    #[must_use]
    pub const fn new(kind: EntryKind, name: &'a str) -> Self {
        Self {
            kind,
            name,
            is_external: false,
            disk_label: None,
            icon: None,
        }
    }
}

/// Disk label header: version byte, big-endian width and height.
const DISK_LABEL_HEADER: usize = 5;

/// Palette entry per disk label index; unlisted indices are zero.
const DISK_LABEL_PALETTE: [u8; 256] = {
    let mut palette = [0u8; 256];
    palette[0x00] = 255;
    palette[0xf6] = 238;
    palette[0xf7] = 221;
    palette[0x2a] = 204;
    palette[0xf8] = 187;
    palette[0xf9] = 170;
    palette[0x55] = 153;
    palette[0xfa] = 136;
    palette[0xfb] = 119;
    palette[0x80] = 102;
    palette[0xfc] = 85;
    palette[0xfd] = 68;
    palette[0xab] = 51;
    palette[0xfe] = 34;
    palette[0xff] = 17;
    palette[0xd6] = 0;
    palette
};

/// Decodes a palettized disk label image.
///
/// Every decoded pixel is painted; the grey level is the inverted palette
/// entry of its index.
///
/// # Errors
///
/// [`PickerError::InvalidImageData`] if the data is shorter than the header
/// or its length is not exactly header plus `width * height`.
pub fn decode_disk_label(data: &[u8]) -> PickerResult<Image> {
    if data.len() < DISK_LABEL_HEADER {
        return Err(ImageError::HeaderTruncated(data.len()).into());
    }

    let width = u32::from(u16::from_be_bytes([data[1], data[2]]));
    let height = u32::from(u16::from_be_bytes([data[3], data[4]]));
    let indices = &data[DISK_LABEL_HEADER..];
    let expected = width as usize * height as usize;
    if indices.len() != expected {
        return Err(ImageError::LengthMismatch {
            width,
            height,
            expected,
            actual: indices.len(),
        }
        .into());
    }

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(expected)
        .map_err(|_| PickerError::OutOfMemory)?;
    pixels.extend(
        indices
            .iter()
            .map(|&index| Pixel::grey(255 - DISK_LABEL_PALETTE[usize::from(index)])),
    );
    Ok(Image::new(width, height, pixels)?)
}

/// The generic label for an entry category, if it has one.
#[must_use]
pub fn generic_label<'a>(labels: &'a GenericLabels, kind: EntryKind, name: &str) -> Option<&'a Image> {
    match kind {
        EntryKind::Unknown | EntryKind::ExternalOs => Some(&labels.efi_boot),
        EntryKind::AppleRecovery => Some(&labels.recovery),
        EntryKind::Windows => Some(&labels.windows),
        EntryKind::ExternalTool => Some(&labels.tool),
        EntryKind::AppleOs => Some(&labels.macos),
        EntryKind::System if name == RESET_NVRAM_ENTRY => Some(&labels.reset_nvram),
        EntryKind::System => Some(&labels.tool),
        EntryKind::AppleTimeMachine => None,
    }
}

/// Builds the label an entry will own.
///
/// # Errors
///
/// [`PickerError::OutOfMemory`] if a generic label cannot be copied, and
/// [`PickerError::UnsupportedEntryKind`] if no strategy produced a label.
pub fn build_label(
    assets: &GuiAssets,
    policy: LabelPolicy,
    entry: &EntryDescriptor<'_>,
) -> PickerResult<Image> {
    if policy.use_disk_label {
        match entry.disk_label.map(decode_disk_label) {
            Some(Ok(label)) => {
                tracing::debug!(name = entry.name, "using disk label");
                return Ok(label);
            }
            Some(Err(err)) => {
                tracing::warn!(name = entry.name, %err, "disk label unusable, falling back");
            }
            None => tracing::debug!(name = entry.name, "volume has no disk label"),
        }
    }

    if policy.use_generic_label {
        if let Some(label) = generic_label(&assets.labels, entry.kind, entry.name) {
            tracing::debug!(name = entry.name, kind = ?entry.kind, "using generic label");
            return Ok(label.try_clone()?);
        }
        tracing::warn!(kind = ?entry.kind, "entry kind has no generic label");
    }

    assets.font.render_label(entry.name).ok_or_else(|| {
        tracing::warn!(name = entry.name, "label rendering failed");
        PickerError::UnsupportedEntryKind(entry.kind)
    })
}

/// Picks the icon an entry will show.
///
/// Tools and system actions share the tool icon. Other entries use their
/// custom icon when it decodes to the right size, else the internal or
/// external default.
#[must_use]
pub fn select_icon(assets: &GuiAssets, entry: &EntryDescriptor<'_>) -> Rc<Image> {
    if matches!(entry.kind, EntryKind::ExternalTool | EntryKind::System) {
        return Rc::clone(&assets.icon_tool);
    }

    if let Some(data) = entry.icon {
        match assets.icon_decoder.decode_icon(data) {
            Ok(icon)
                if icon.dimensions() == (BOOT_ENTRY_ICON_DIMENSION, BOOT_ENTRY_ICON_DIMENSION) =>
            {
                return Rc::new(icon);
            }
            Ok(icon) => {
                tracing::warn!(name = entry.name, dimensions = ?icon.dimensions(), "custom icon has wrong size");
            }
            Err(err) => tracing::warn!(name = entry.name, %err, "custom icon unusable"),
        }
    }

    if entry.is_external {
        Rc::clone(&assets.icon_external)
    } else {
        Rc::clone(&assets.icon_internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_assets, FailingFont};

    fn disk_label(width: u16, height: u16, indices: &[u8]) -> Vec<u8> {
        let mut data = vec![1];
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(indices);
        data
    }

    #[test]
    fn test_decode_disk_label_palette() {
        let image = decode_disk_label(&disk_label(3, 1, &[0x00, 0xd6, 0x2a])).unwrap();

        assert_eq!(image.dimensions(), (3, 1));
        assert_eq!(image.pixel(0, 0), Some(Pixel::grey(0)));
        assert_eq!(image.pixel(1, 0), Some(Pixel::grey(255)));
        assert_eq!(image.pixel(2, 0), Some(Pixel::grey(51)));
        // Unlisted palette indices decode as white.
        let image = decode_disk_label(&disk_label(1, 1, &[0x01])).unwrap();
        assert_eq!(image.pixel(0, 0), Some(Pixel::grey(255)));
    }

    #[test]
    fn test_decode_disk_label_rejects_bad_lengths() {
        assert!(matches!(
            decode_disk_label(&[1, 0, 1]),
            Err(PickerError::InvalidImageData(ImageError::HeaderTruncated(3)))
        ));
        assert!(matches!(
            decode_disk_label(&disk_label(2, 2, &[0; 3])),
            Err(PickerError::InvalidImageData(ImageError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_generic_label_mapping() {
        let assets = test_assets();
        let labels = &assets.labels;

        assert!(std::ptr::eq(
            generic_label(labels, EntryKind::System, RESET_NVRAM_ENTRY).unwrap(),
            &labels.reset_nvram
        ));
        assert!(std::ptr::eq(
            generic_label(labels, EntryKind::System, "Shell").unwrap(),
            &labels.tool
        ));
        assert!(std::ptr::eq(
            generic_label(labels, EntryKind::ExternalOs, "Linux").unwrap(),
            &labels.efi_boot
        ));
        assert!(generic_label(labels, EntryKind::AppleTimeMachine, "TM").is_none());
    }

    #[test]
    fn test_label_fallback_chain() {
        let assets = test_assets();
        let policy = LabelPolicy {
            use_disk_label: true,
            use_generic_label: true,
        };

        // Corrupt disk label falls through to the generic Windows label.
        let bad = [1, 0, 2, 0, 2, 0];
        let entry = EntryDescriptor {
            disk_label: Some(&bad),
            ..EntryDescriptor::new(EntryKind::Windows, "Windows")
        };
        let label = build_label(&assets, policy, &entry).unwrap();
        assert_eq!(label, assets.labels.windows);

        // No generic label for Time Machine, so the font renders the name.
        let entry = EntryDescriptor::new(EntryKind::AppleTimeMachine, "Backups");
        let label = build_label(&assets, policy, &entry).unwrap();
        assert_eq!(label.width(), 7 * 6);

        // A valid disk label wins over everything else.
        let good = disk_label(2, 1, &[0, 0]);
        let entry = EntryDescriptor {
            disk_label: Some(&good),
            ..EntryDescriptor::new(EntryKind::Windows, "Windows")
        };
        assert_eq!(build_label(&assets, policy, &entry).unwrap().dimensions(), (2, 1));
    }

    #[test]
    fn test_label_failure_escalates_only_at_the_end() {
        let mut assets = test_assets();
        assets.font = Box::new(FailingFont);

        let entry = EntryDescriptor::new(EntryKind::AppleTimeMachine, "Backups");
        let generic_only = LabelPolicy {
            use_disk_label: false,
            use_generic_label: true,
        };
        assert_eq!(
            build_label(&assets, generic_only, &entry),
            Err(PickerError::UnsupportedEntryKind(EntryKind::AppleTimeMachine))
        );

        let entry = EntryDescriptor::new(EntryKind::AppleOs, "Macintosh HD");
        assert!(build_label(&assets, generic_only, &entry).is_ok());
    }

    #[test]
    fn test_icon_selection() {
        let assets = test_assets();

        let tool = EntryDescriptor::new(EntryKind::System, RESET_NVRAM_ENTRY);
        assert!(Rc::ptr_eq(&select_icon(&assets, &tool), &assets.icon_tool));

        let external = EntryDescriptor {
            is_external: true,
            ..EntryDescriptor::new(EntryKind::ExternalOs, "USB")
        };
        assert!(Rc::ptr_eq(&select_icon(&assets, &external), &assets.icon_external));

        // The test decoder accepts 4-byte inputs only; anything else falls back.
        let junk = [0u8; 3];
        let internal = EntryDescriptor {
            icon: Some(&junk),
            ..EntryDescriptor::new(EntryKind::AppleOs, "Macintosh HD")
        };
        assert!(Rc::ptr_eq(&select_icon(&assets, &internal), &assets.icon_internal));

        let valid = [0u8; 4];
        let custom = EntryDescriptor {
            icon: Some(&valid),
            ..EntryDescriptor::new(EntryKind::AppleOs, "Macintosh HD")
        };
        let icon = select_icon(&assets, &custom);
        assert!(!Rc::ptr_eq(&icon, &assets.icon_internal));
        assert_eq!(icon.width(), BOOT_ENTRY_ICON_DIMENSION);
    }
}
