mod editor_state;
pub mod context;
mod autosave;

pub use editor_state::EditorState;
pub use context::{EditorContext, PointerOutcome, StateTransitionError, finalize_shape};
pub use autosave::{Autosave, AutosaveSettings, timestamp_secs};
