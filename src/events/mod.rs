mod pointer;

pub use pointer::{wire_input_handlers, DragState, InputWiring, MouseState};
