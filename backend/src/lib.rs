//! Development server exposing the remote-store shape over HTTP, backed
//! by the core's in-memory store.

pub mod rest;
