pub mod messages;
pub mod view;

pub use messages::Messages;
pub use view::{Chip, QuickPick, RenderAdapter, SelectionView};
