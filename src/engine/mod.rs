// engine module: backend engine thread

pub mod backend;
mod interface;
pub mod stub;

pub use backend::BackendEngine;
pub use interface::{Engine, EngineHandle, Event, Request};
pub use stub::StubEngine;
