#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]
//! Toolkit independent editing surface: coordinate mapping, draw-list
//! compositing and redraw scheduling on top of `pixie_engine_edit`.

mod transform;
pub use transform::*;

mod mapper;
pub use mapper::*;

mod compositor;
pub use compositor::*;

mod marching_ants;
pub use marching_ants::*;

mod scheduler;
pub use scheduler::*;

mod options;
pub use options::*;

mod canvas;
pub use canvas::*;
