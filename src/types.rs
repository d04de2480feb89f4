//! Core types for raw gesture notifications.
//!
//! - [`GestureKind`] - Which gesture a notification belongs to
//! - [`GestureFlags`] - Begin/inertia/end state bits
//! - [`RawGestureInfo`] - Untyped fields as the platform delivers them
//! - [`GestureRecord`] - Validated, typed notification

use crate::error::GestureError;

// =============================================================================
// GESTURE KIND
// =============================================================================

/// Gesture identifier, using the platform's raw numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GestureKind {
    /// Start-of-sequence marker. Carries no data.
    Begin = 1,
    /// End-of-sequence marker. Carries no data.
    End = 2,
    Zoom = 3,
    Pan = 4,
    Rotate = 5,
    TwoFingerTap = 6,
    PressAndTap = 7,
}

impl GestureKind {
    /// The kinds that decode into a [`GestureEvent`](crate::GestureEvent).
    pub const DATA_KINDS: [GestureKind; 5] = [
        GestureKind::Pan,
        GestureKind::Zoom,
        GestureKind::Rotate,
        GestureKind::TwoFingerTap,
        GestureKind::PressAndTap,
    ];

    /// Map a raw platform id to a kind.
    pub fn from_raw(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Begin),
            2 => Some(Self::End),
            3 => Some(Self::Zoom),
            4 => Some(Self::Pan),
            5 => Some(Self::Rotate),
            6 => Some(Self::TwoFingerTap),
            7 => Some(Self::PressAndTap),
            _ => None,
        }
    }

    /// Raw platform id.
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// False for the Begin/End sequence markers.
    pub fn is_data_bearing(self) -> bool {
        !matches!(self, Self::Begin | Self::End)
    }
}

// =============================================================================
// GESTURE FLAGS
// =============================================================================

bitflags::bitflags! {
    /// Gesture state bits.
    ///
    /// `BEGIN` and `END` never appear together in a well-formed record. A
    /// record with neither is a mid-gesture update.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GestureFlags: u32 {
        const BEGIN   = 0x1;
        const INERTIA = 0x2;
        const END     = 0x4;
    }
}

impl GestureFlags {
    /// Parse the raw flags word, dropping unknown bits.
    pub fn from_raw(raw: i32) -> Self {
        Self::from_bits_truncate(raw as u32)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Gesture information exactly as read from the native notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawGestureInfo {
    pub id: i32,
    pub flags: i32,
    /// Screen coordinates.
    pub location: (i32, i32),
    pub arguments: u64,
    pub extra_arguments: u32,
}

impl RawGestureInfo {
    pub fn new(
        id: i32,
        flags: i32,
        location: (i32, i32),
        arguments: u64,
        extra_arguments: u32,
    ) -> Self {
        Self {
            id,
            flags,
            location,
            arguments,
            extra_arguments,
        }
    }
}

/// A typed gesture notification. Immutable per delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureRecord {
    pub kind: GestureKind,
    pub flags: GestureFlags,
    /// Screen (not client) coordinates.
    pub location: (i32, i32),
    /// Kind-specific packed payload.
    pub argument: u64,
    /// Size of an out-of-band payload. Only zero is decodable.
    pub extra_argument_size: u32,
}

impl GestureRecord {
    /// Create a record with no extra arguments.
    pub fn new(
        kind: GestureKind,
        flags: GestureFlags,
        location: (i32, i32),
        argument: u64,
    ) -> Self {
        Self {
            kind,
            flags,
            location,
            argument,
            extra_argument_size: 0,
        }
    }

    pub fn is_begin(&self) -> bool {
        self.flags.contains(GestureFlags::BEGIN)
    }

    pub fn is_end(&self) -> bool {
        self.flags.contains(GestureFlags::END)
    }

    pub fn is_inertia(&self) -> bool {
        self.flags.contains(GestureFlags::INERTIA)
    }
}

impl TryFrom<RawGestureInfo> for GestureRecord {
    type Error = GestureError;

    fn try_from(raw: RawGestureInfo) -> Result<Self, Self::Error> {
        let kind =
            GestureKind::from_raw(raw.id).ok_or(GestureError::UnrecognizedGestureKind(raw.id))?;
        Ok(Self {
            kind,
            flags: GestureFlags::from_raw(raw.flags),
            location: raw.location,
            argument: raw.arguments,
            extra_argument_size: raw.extra_arguments,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
