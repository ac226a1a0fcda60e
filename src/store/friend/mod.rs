//! Friends slice: the friend list and a selected friend's achievements.

mod intent;
mod reducer;
mod state;

pub use intent::FriendIntent;
pub use reducer::FriendReducer;
pub use state::FriendState;
