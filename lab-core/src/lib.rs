pub mod binders;
pub mod chart;
pub mod error;
pub mod generation;
pub mod region;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

pub use chart::{ChartBoard, ChartHandle, ChartKind, ChartSlot, ChartSpec, ChartSurface, Palette};
pub use error::BinderError;
pub use generation::{Generations, Ticket};
pub use region::{Region, RegionState};
pub use selector::{DatasetSelector, SelectorId};
