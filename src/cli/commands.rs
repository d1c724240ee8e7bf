pub mod check;
pub mod serve;

pub use check::check_data;
pub use serve::serve;
