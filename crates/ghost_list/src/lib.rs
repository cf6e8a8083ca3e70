mod ghost;
mod gesture;
mod list;
mod model;
mod preview;
mod style;

pub use ghost::{GhostItem, GhostLayer, SwapDirection};
pub use gesture::{
    ActiveDrag, GestureMachine, GestureState, GhostListReorder, InputSource, MoveOutcome,
};
pub use list::{GhostList, GhostListRowRole, GhostListRowState, GhostListState, ghost_list};
pub use model::{GhostListItem, ItemLayout, ItemList};
pub use preview::{DragPreview, RevealToken};
pub use style::{GhostListSettings, GhostListStyles};
