pub mod recorder;
pub mod source;

pub use recorder::{Phase, SessionRecorder, SessionSummary};
pub use source::{FileSource, LineSource, ScriptedSource};
