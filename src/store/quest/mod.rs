//! Quest slice: the active quest and the completion history.
//!
//! Session-only by default; nothing here survives a restart unless the
//! persistence whitelist names `quest`.

mod intent;
mod reducer;
mod state;

pub use intent::QuestIntent;
pub use reducer::QuestReducer;
pub use state::QuestState;
