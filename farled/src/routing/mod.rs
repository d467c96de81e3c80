//! Router implementations: path patterns, leaf tables, and composition.

mod composite;
mod leaf;
mod pattern;

pub use composite::CompositeRouter;
pub use leaf::{RouteTable, RouteTableBuilder};
pub use pattern::MatchitPattern;
