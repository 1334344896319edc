pub mod natal;

pub use natal::BirthChart;
