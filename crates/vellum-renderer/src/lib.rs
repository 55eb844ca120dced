//! Vellum renderer
//!
//! Maps the typed node tree produced by `vellum-markdown` onto a tree of
//! presentation instructions. Dispatch goes through a per-node-kind strategy
//! registry, which is the pipeline's sole extension point: syntax-highlighted
//! code, typeset math, asset-rooted images, and styled tables are all just
//! strategies installed for their kinds.

pub mod highlight;
pub mod html;
pub mod instruction;
pub mod math;
pub mod pipeline;
pub mod registry;
pub mod strategies;

pub use instruction::RenderInstruction;
pub use pipeline::Pipeline;
pub use registry::{Registry, RenderStrategy};
