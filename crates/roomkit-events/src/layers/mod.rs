//! Reusable layers, each owning one group of wire keys.

pub mod base;
pub mod call;
pub mod room;
pub mod state;
pub mod typing;

pub use base::EventBase;
pub use call::CallLayer;
pub use room::RoomLayer;
pub use state::StateLayer;
pub use typing::TypingLayer;
