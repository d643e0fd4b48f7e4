pub mod popover;
pub mod selection;
pub mod widget;

pub use popover::{MenuPosition, PointerTarget, PopoverController, PopoverState, Rect};
pub use widget::MultiSelectFilter;
