pub mod latest;
pub mod share;
pub mod webhook;
