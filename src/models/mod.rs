pub mod director;
pub mod movie;
