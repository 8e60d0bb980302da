use egui::Pos2;
use std::fmt;
use std::ops::BitOr;

pub mod egui_adapter;

pub use egui_adapter::{PointerSample, PointerTranslator};

/// Modifier keys and pointer attributes attached to a pointer event
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierFlags(u8);

impl ModifierFlags {
    pub const NONE: Self = Self(0);
    /// The secondary (right) button caused or is holding the gesture
    pub const RIGHT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const SHIFT: Self = Self(1 << 2);
    pub const ALT: Self = Self(1 << 3);
    pub const META: Self = Self(1 << 4);
    /// More than one touch point is down
    pub const MULTITOUCH: Self = Self(1 << 5);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn with(self, other: Self, on: bool) -> Self {
        if on { self | other } else { Self(self.0 & !other.0) }
    }

    pub fn from_egui(modifiers: &egui::Modifiers) -> Self {
        Self::NONE
            .with(Self::CTRL, modifiers.ctrl)
            .with(Self::SHIFT, modifiers.shift)
            .with(Self::ALT, modifiers.alt)
            .with(Self::META, modifiers.mac_cmd)
    }
}

impl BitOr for ModifierFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::RIGHT, "RIGHT"),
            (Self::CTRL, "CTRL"),
            (Self::SHIFT, "SHIFT"),
            (Self::ALT, "ALT"),
            (Self::META, "META"),
            (Self::MULTITOUCH, "MULTITOUCH"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "ModifierFlags({})", set.join("|"))
    }
}

/// What happened to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Synthetic event used to request a refresh
    None,
    Down,
    Drag,
    Up,
    /// Pointer moved with no button held
    Move,
    /// The pointer left the canvas or input was cancelled
    Stop,
}

/// A pointer event in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub location: Option<Pos2>,
    pub modifiers: ModifierFlags,
}

impl PointerEvent {
    pub fn new(kind: EventKind, location: Option<Pos2>, modifiers: ModifierFlags) -> Self {
        Self {
            kind,
            location,
            modifiers,
        }
    }

    pub fn down(location: Pos2) -> Self {
        Self::new(EventKind::Down, Some(location), ModifierFlags::NONE)
    }

    pub fn drag(location: Pos2) -> Self {
        Self::new(EventKind::Drag, Some(location), ModifierFlags::NONE)
    }

    pub fn up(location: Pos2) -> Self {
        Self::new(EventKind::Up, Some(location), ModifierFlags::NONE)
    }

    pub fn moved(location: Pos2) -> Self {
        Self::new(EventKind::Move, Some(location), ModifierFlags::NONE)
    }

    /// The synthetic refresh event sent after a one-shot operation runs
    pub fn none() -> Self {
        Self::new(EventKind::None, None, ModifierFlags::NONE)
    }

    pub fn stop() -> Self {
        Self::new(EventKind::Stop, None, ModifierFlags::NONE)
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_right(&self) -> bool {
        self.modifiers.contains(ModifierFlags::RIGHT)
    }

    pub fn is_shift(&self) -> bool {
        self.modifiers.contains(ModifierFlags::SHIFT)
    }
}
