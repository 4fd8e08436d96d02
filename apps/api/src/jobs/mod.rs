// Jobs: posting creation, listing and startup sample data.

pub mod handlers;
pub mod seed;
