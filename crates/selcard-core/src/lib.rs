pub mod card;
pub mod drag;
pub mod geometry;
pub mod menu;
pub mod selection;


pub use card::{CardServices, MouseUpOutcome, SelectionCardController, SelectionSession};
pub use drag::{DragController, Propagation};
pub use menu::{MenuController, TOGGLE_MENU_ID};
pub use selection::{SelectionSource, TrackedSelection};
