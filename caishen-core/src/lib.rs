pub mod date;
pub mod generator;
pub mod models;
pub mod prize;
pub mod rng;
pub mod sampler;
