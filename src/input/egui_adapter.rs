use egui::Pos2;

use super::{EventKind, ModifierFlags, PointerEvent};

/// The pointer as seen in one egui frame, already mapped to world coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub primary_down: bool,
    pub secondary_down: bool,
    pub modifiers: egui::Modifiers,
    pub touch_count: usize,
}

impl PointerSample {
    /// Read the pointer from egui input; `to_world` maps screen points into the canvas
    pub fn from_input(input: &egui::InputState, to_world: impl Fn(Pos2) -> Pos2) -> Self {
        Self {
            position: input.pointer.latest_pos().map(to_world),
            primary_down: input.pointer.primary_down(),
            secondary_down: input.pointer.secondary_down(),
            modifiers: input.modifiers,
            touch_count: input.multi_touch().map_or(0, |touch| touch.num_touches),
        }
    }

    fn flags(&self) -> ModifierFlags {
        ModifierFlags::from_egui(&self.modifiers).with(ModifierFlags::MULTITOUCH, self.touch_count > 1)
    }
}

/// Turns successive pointer samples into down/drag/up/move events
#[derive(Debug, Clone, Default)]
pub struct PointerTranslator {
    // Some(true) when the secondary button started the current press.
    pressed: Option<bool>,
    last_position: Option<Pos2>,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    /// Events implied by the change from the previous sample to `sample`
    pub fn translate(&mut self, sample: &PointerSample) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let flags = sample.flags();

        let Some(position) = sample.position else {
            // Pointer gone: finish any press where it was last seen.
            if let Some(secondary) = self.pressed.take() {
                let flags = flags.with(ModifierFlags::RIGHT, secondary);
                events.push(PointerEvent::new(EventKind::Up, self.last_position, flags));
            }
            events.push(PointerEvent::new(EventKind::Stop, None, flags));
            self.last_position = None;
            return events;
        };

        let held = sample.primary_down || sample.secondary_down;
        let moved = self.last_position != Some(position);

        match (self.pressed, held) {
            (None, true) => {
                let secondary = !sample.primary_down;
                self.pressed = Some(secondary);
                let flags = flags.with(ModifierFlags::RIGHT, secondary);
                events.push(PointerEvent::new(EventKind::Down, Some(position), flags));
            }
            (Some(secondary), true) => {
                if moved {
                    let flags = flags.with(ModifierFlags::RIGHT, secondary);
                    events.push(PointerEvent::new(EventKind::Drag, Some(position), flags));
                }
            }
            (Some(secondary), false) => {
                self.pressed = None;
                let flags = flags.with(ModifierFlags::RIGHT, secondary);
                events.push(PointerEvent::new(EventKind::Up, Some(position), flags));
            }
            (None, false) => {
                if moved {
                    events.push(PointerEvent::new(EventKind::Move, Some(position), flags));
                }
            }
        }

        self.last_position = Some(position);
        events
    }

    /// Read the pointer from an egui context and translate it
    pub fn process_input(
        &mut self,
        ctx: &egui::Context,
        to_world: impl Fn(Pos2) -> Pos2,
    ) -> Vec<PointerEvent> {
        let sample = ctx.input(|input| PointerSample::from_input(input, to_world));
        self.translate(&sample)
    }
}
