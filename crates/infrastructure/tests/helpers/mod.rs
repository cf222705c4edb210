#![allow(dead_code)]

mod http_stub;
mod mocks;
mod wire;

#[allow(unused_imports)]
pub use http_stub::*;
#[allow(unused_imports)]
pub use mocks::*;
#[allow(unused_imports)]
pub use wire::*;
