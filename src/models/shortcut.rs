//! Quick-switch shortcut keys and their assignment to custom layouts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// One of the shortcut keys a custom layout can be bound to: "none" or a
/// digit `0`..=`9`.
///
/// Ordering puts "none" first, then the digits ascending, which is the order
/// the shortcut display list uses. Serialized as the host's quick-key number
/// (`-1` for none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ShortcutKey(Option<u8>);

impl ShortcutKey {
    /// The "no shortcut" sentinel.
    pub const NONE: Self = Self(None);

    /// Creates a digit key. Returns `None` for anything above 9.
    #[must_use]
    pub const fn digit(digit: u8) -> Option<Self> {
        if digit <= 9 {
            Some(Self(Some(digit)))
        } else {
            None
        }
    }

    /// Every key in display order: "none", then `0`..=`9`.
    pub fn all() -> impl Iterator<Item = Self> {
        std::iter::once(Self::NONE).chain((0..=9).map(|d| Self(Some(d))))
    }

    /// Whether this is the "no shortcut" sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0.is_none()
    }

    /// The bound digit, if any.
    #[must_use]
    pub const fn as_digit(self) -> Option<u8> {
        self.0
    }

    /// Sort rank: the digit for assigned keys, `usize::MAX` for none.
    #[must_use]
    pub fn rank(self) -> usize {
        self.0.map_or(usize::MAX, usize::from)
    }

    /// Display label, using `none_label` for the sentinel.
    #[must_use]
    pub fn label(self, none_label: &str) -> String {
        match self.0 {
            Some(digit) => digit.to_string(),
            None => none_label.to_string(),
        }
    }
}

impl TryFrom<i32> for ShortcutKey {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::NONE),
            0..=9 => Ok(Self(Some(value as u8))),
            other => Err(format!("Invalid quick key {other}: expected -1 or 0-9")),
        }
    }
}

impl From<ShortcutKey> for i32 {
    fn from(key: ShortcutKey) -> Self {
        key.0.map_or(-1, Self::from)
    }
}

impl fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(digit) => write!(f, "{digit}"),
            None => f.write_str("none"),
        }
    }
}

/// Digit-key to layout-id assignments.
///
/// Each key holds at most one layout and each layout holds at most one key.
/// The "none" key is never stored: assigning it removes the layout's key.
/// Ids do not have to belong to a live custom layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutMap {
    assignments: BTreeMap<ShortcutKey, Uuid>,
}

impl ShortcutMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `layout_id`.
    ///
    /// Any previous key of `layout_id` is released. Returns the layout that
    /// previously held `key`, if it was a different one.
    pub fn assign(&mut self, key: ShortcutKey, layout_id: Uuid) -> Option<Uuid> {
        self.remove_layout(layout_id);
        if key.is_none() {
            return None;
        }
        self.assignments.insert(key, layout_id)
    }

    /// Releases whatever key `layout_id` holds. Returns that key.
    pub fn remove_layout(&mut self, layout_id: Uuid) -> Option<ShortcutKey> {
        let key = self.key_for(layout_id);
        if key.is_none() {
            return None;
        }
        self.assignments.remove(&key);
        Some(key)
    }

    /// Layout bound to `key`.
    #[must_use]
    pub fn get(&self, key: ShortcutKey) -> Option<Uuid> {
        self.assignments.get(&key).copied()
    }

    /// Key bound to `layout_id`, or [`ShortcutKey::NONE`].
    #[must_use]
    pub fn key_for(&self, layout_id: Uuid) -> ShortcutKey {
        self.assignments
            .iter()
            .find(|(_, id)| **id == layout_id)
            .map_or(ShortcutKey::NONE, |(key, _)| *key)
    }

    /// Assignments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ShortcutKey, Uuid)> + '_ {
        self.assignments.iter().map(|(key, id)| (*key, *id))
    }

    /// Number of assigned keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no key is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
