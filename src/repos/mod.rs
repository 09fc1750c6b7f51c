//! Repository layer: keyed game storage and the joinable index.

pub mod games;
