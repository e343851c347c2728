pub mod reconstruct;

pub use reconstruct::{ArrayTrack, ReconstructionOutput, Reconstructor};
