pub mod distress;
pub mod lifecycle;
pub mod manipulation;
pub mod ratios;
pub mod scoring;

#[cfg(feature = "strength")]
pub mod strength;
