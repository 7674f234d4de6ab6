pub mod feedback;
pub mod serve;
