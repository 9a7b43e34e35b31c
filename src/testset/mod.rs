// src/testset/mod.rs

pub mod generator;

pub use generator::{generate, uniform_random_integer, TestNumberNature};
