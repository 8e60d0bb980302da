use egui::CursorIcon;

/// One of the eight grab handles of a box.
///
/// Indices 0..4 are the corners clockwise from the top-left; 4..8 are the edges, where edge
/// `i + 4` runs from corner `i` to corner `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxHandle {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Top,
    Right,
    Bottom,
    Left,
}

impl BoxHandle {
    pub const ALL: [BoxHandle; 8] = [
        BoxHandle::TopLeft,
        BoxHandle::TopRight,
        BoxHandle::BottomRight,
        BoxHandle::BottomLeft,
        BoxHandle::Top,
        BoxHandle::Right,
        BoxHandle::Bottom,
        BoxHandle::Left,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index & 7]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The box corner that moves with this handle
    pub fn corner_index(self) -> usize {
        self.index() & 3
    }

    /// The box corner that stays put while this handle is dragged
    pub fn fixed_corner_index(self) -> usize {
        Self::from_index(self.index() + 2).corner_index()
    }

    pub fn is_corner(self) -> bool {
        self.index() < 4
    }

    pub fn moves_x(self) -> bool {
        !matches!(self, BoxHandle::Top | BoxHandle::Bottom)
    }

    pub fn moves_y(self) -> bool {
        !matches!(self, BoxHandle::Left | BoxHandle::Right)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoxHandle::TopLeft => "top_left",
            BoxHandle::TopRight => "top_right",
            BoxHandle::BottomRight => "bottom_right",
            BoxHandle::BottomLeft => "bottom_left",
            BoxHandle::Top => "top",
            BoxHandle::Right => "right",
            BoxHandle::Bottom => "bottom",
            BoxHandle::Left => "left",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            BoxHandle::TopLeft | BoxHandle::BottomRight => CursorIcon::ResizeNwSe,
            BoxHandle::TopRight | BoxHandle::BottomLeft => CursorIcon::ResizeNeSw,
            BoxHandle::Top | BoxHandle::Bottom => CursorIcon::ResizeVertical,
            BoxHandle::Left | BoxHandle::Right => CursorIcon::ResizeHorizontal,
        }
    }
}

/// What part of an element is under the pointer, if it can be edited directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditHandle {
    Resize(BoxHandle),
    Rotate,
    Vertex(usize),
}
