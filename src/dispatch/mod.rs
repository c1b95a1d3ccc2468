pub mod ranking;
pub mod dispatcher;

pub use dispatcher::Dispatcher;
pub use ranking::{select_elevator, DispatchRule, Selection};
