//! Strip interaction engine – scroll flags, instance registry, drag and
//! paging logic, and the orchestrator that binds them to platform events.
//!
//! Nothing in this module depends on any TUI or rendering crate; the
//! terminal front end is just one implementation of [`surface::ScrollSurface`]
//! and [`listeners::ListenerHost`].

pub mod catalog;
pub mod drag;
pub mod error;
pub mod listeners;
pub mod orchestrator;
pub mod paging;
pub mod registry;
pub mod responsive;
pub mod scroll_state;
pub mod surface;
