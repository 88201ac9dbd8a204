pub mod percentiles;
pub mod stream;

pub use percentiles::PercentileSet;
