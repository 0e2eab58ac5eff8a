pub mod analyze;
mod hints;
#[cfg(test)]
mod tests;

pub use analyze::*;
pub use hints::*;
