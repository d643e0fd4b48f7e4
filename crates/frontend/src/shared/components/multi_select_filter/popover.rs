//! State machine of a screen-anchored popover (closed ⇄ open).
//!
//! The anchor rectangle is measured by the caller on every open and is
//! dropped on close, so a stale measurement is never reused. The menu is
//! positioned in viewport coordinates (`position: fixed`) right under the
//! trigger, which lets it escape any `overflow` container of the trigger.

/// Viewport rectangle of the trigger element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Fixed position of the menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPosition {
    pub top: f64,
    pub left: f64,
    pub min_width: f64,
}

impl MenuPosition {
    pub fn below(anchor: &Rect, gap: f64) -> Self {
        Self {
            top: anchor.bottom() + gap,
            left: anchor.left,
            min_width: anchor.width,
        }
    }

    pub fn to_style(&self) -> String {
        format!(
            "position: fixed; top: {}px; left: {}px; min-width: {}px; z-index: 1000;",
            self.top, self.left, self.min_width
        )
    }
}

/// Where a pointer-down landed relative to the popover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Trigger,
    Menu,
    Outside,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopoverState {
    #[default]
    Closed,
    Open { anchor: Rect, position: MenuPosition },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopoverController {
    state: PopoverState,
    gap: f64,
    mounted: bool,
}

impl PopoverController {
    pub fn new(gap: f64) -> Self {
        Self {
            state: PopoverState::Closed,
            gap,
            mounted: false,
        }
    }

    /// The host can now render layered content (set once, after mount)
    pub fn mark_mounted(&mut self) {
        self.mounted = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PopoverState::Open { .. })
    }

    pub fn state(&self) -> &PopoverState {
        &self.state
    }

    pub fn anchor(&self) -> Option<Rect> {
        match &self.state {
            PopoverState::Open { anchor, .. } => Some(*anchor),
            PopoverState::Closed => None,
        }
    }

    pub fn menu_position(&self) -> Option<MenuPosition> {
        match &self.state {
            PopoverState::Open { position, .. } => Some(*position),
            PopoverState::Closed => None,
        }
    }

    /// Open and mounted
    pub fn should_render_menu(&self) -> bool {
        self.mounted && self.is_open()
    }

    /// Opens against a fresh measurement of the trigger
    pub fn open(&mut self, anchor: Rect) {
        let position = MenuPosition::below(&anchor, self.gap);
        log::debug!("popover open at {:?}", position);
        self.state = PopoverState::Open { anchor, position };
    }

    /// Returns true if the popover was open
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        if was_open {
            log::debug!("popover closed");
        }
        self.state = PopoverState::Closed;
        was_open
    }

    /// Trigger click. `anchor` is only used when opening.
    pub fn toggle_open(&mut self, anchor: Rect) {
        if self.is_open() {
            self.close();
        } else {
            self.open(anchor);
        }
    }

    /// Pointer-down anywhere in the document. Closes on outside targets;
    /// returns true if that happened.
    pub fn on_pointer_down(&mut self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Outside => self.close(),
            PointerTarget::Trigger | PointerTarget::Menu => false,
        }
    }

    /// Key-down anywhere in the document. Escape closes.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        if key == "Escape" {
            self.close()
        } else {
            false
        }
    }
}

impl Default for PopoverController {
    fn default() -> Self {
        Self::new(4.0)
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Input {
        Toggle,
        Pointer(PointerTarget),
        Key(&'static str),
    }

    fn input() -> impl Strategy<Value = Input> {
        prop_oneof![
            Just(Input::Toggle),
            Just(Input::Pointer(PointerTarget::Trigger)),
            Just(Input::Pointer(PointerTarget::Menu)),
            Just(Input::Pointer(PointerTarget::Outside)),
            Just(Input::Key("Escape")),
            Just(Input::Key("Enter")),
            Just(Input::Key("a")),
        ]
    }

    proptest! {
        #[test]
        fn prop_only_outside_pointer_or_escape_dismisses(inputs in prop::collection::vec(input(), 0..40)) {
            let anchor = Rect { top: 10.0, left: 20.0, width: 100.0, height: 24.0 };
            let mut p = PopoverController::new(4.0);
            let mut open = false;
            for inp in inputs {
                match inp {
                    Input::Toggle => {
                        p.toggle_open(anchor);
                        open = !open;
                    }
                    Input::Pointer(target) => {
                        let closed = p.on_pointer_down(target);
                        let dismisses = open && target == PointerTarget::Outside;
                        prop_assert_eq!(closed, dismisses);
                        if dismisses {
                            open = false;
                        }
                    }
                    Input::Key(key) => {
                        let closed = p.on_key_down(key);
                        let dismisses = open && key == "Escape";
                        prop_assert_eq!(closed, dismisses);
                        if dismisses {
                            open = false;
                        }
                    }
                }
                prop_assert_eq!(p.is_open(), open);
                prop_assert_eq!(p.anchor().is_some(), open);
            }
        }
    }
}
