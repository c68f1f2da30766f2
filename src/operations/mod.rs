pub mod roll;
pub mod turtle;
