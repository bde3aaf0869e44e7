//! Rule resolution: from a rule and a document to an extracted value.

mod anchor;
mod batch;
mod heading;
mod resolver;

pub use anchor::{find_anchor_page, locate_anchor};
pub use batch::{BatchDriver, RuleEvent};
pub use heading::resolve_table_by_heading;
pub use resolver::RuleResolver;
