//! Built-in pipeline phases.

mod patch;
mod resolve;
mod verify;

pub use patch::PatchPhase;
pub use resolve::{ResolvePhase, resolve_registry};
pub use verify::VerifyPhase;
