// Domain layer: backend payloads, view shapes and ports. No I/O beyond reading an upload from disk.

pub mod model;
pub mod ports;
pub mod view;
