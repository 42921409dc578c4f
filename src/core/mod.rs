//! Pure, host-testable logic: registry, evaluators, interaction state and
//! motion rules. Nothing in here touches a web API.

pub mod items;
pub mod motion;
pub mod pick;
pub mod proximity;
pub mod records;
pub mod state;

pub use items::{InteractiveItem, ItemId, ItemKind, ItemMeta, Registry};
pub use pick::PickNode;
pub use records::{ProfileRecord, RepoRecord};
pub use state::{CardHover, CursorMode, Emphasis, InteractionState, InteractionTuning, OverlaySink};
