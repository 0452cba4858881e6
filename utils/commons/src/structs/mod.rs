use super::*;

pub use basis_points::*;

mod basis_points;
