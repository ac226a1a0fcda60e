//! Routing and session enforcement.

pub mod guard;
pub mod navigator;
pub mod route;

pub use guard::{guard_route, Guarded, Protected, Redirect};
pub use navigator::Navigator;
pub use route::Route;
