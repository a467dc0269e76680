#![allow(dead_code)]

pub mod collector;

pub use collector::{Collector, Envelope, decode, socket_dir};
