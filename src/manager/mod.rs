//! Capability session lifecycle management
//!
//! Provides `LifecycleManager` for creating, caching, invalidating and
//! tearing down the single engine session of one capability.
//!
//! # Module Structure
//!
//! - `core` - Core `LifecycleManager` with public API
//! - `session` - Session handle and cached state structures
//! - `commands` - Command protocol for the lifecycle worker
//! - `background` - Lifecycle worker spawning and request handling
//! - `helpers` - Observer bookkeeping and best-effort teardown

mod background;
mod commands;
mod core;
mod helpers;
mod session;

pub use self::core::LifecycleManager;
pub use session::SessionHandle;
