//! Transport boundary between query logic and the network

pub mod ports;
