// Library exports for testing
// The binary (main.rs) imports these as well

pub mod error;
pub mod logger;
pub mod paths;
pub mod signal;

#[cfg(test)]
mod tests;
