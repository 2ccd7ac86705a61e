pub mod scroll;
pub mod globe;
pub mod cloud;
