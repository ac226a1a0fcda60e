//! Session slice: the signed-in user.
//!
//! A non-null `current_user` is the only authentication signal the rest of
//! the client consumes. Only `current_user` is persisted; the request flags
//! start clean on every launch.

mod intent;
mod reducer;
mod state;

pub use intent::UserIntent;
pub use reducer::UserReducer;
pub use state::UserState;
