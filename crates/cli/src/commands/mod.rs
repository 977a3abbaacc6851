pub mod config;
pub mod evaluate;
pub mod genomes;
pub mod reads;
pub mod verify;
