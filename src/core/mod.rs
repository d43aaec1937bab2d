pub mod config;
pub mod paths;
pub mod selection;
pub mod taxid_input;

pub use config::Config;
pub use selection::{open_graph, GraphSource, SelectionOptions, TaxonSelection};
