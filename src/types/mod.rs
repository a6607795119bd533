pub mod controls;
pub mod surface;
