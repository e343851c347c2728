pub mod array;
pub mod utm;

pub use array::{project_array, PlanarPoint};
pub use utm::{to_utm, zone_for};
