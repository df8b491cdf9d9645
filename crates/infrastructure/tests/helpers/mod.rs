#![allow(dead_code)]

mod origin_server;

pub use origin_server::MockOrigin;
