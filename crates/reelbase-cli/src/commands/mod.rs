//! One module per subcommand.

pub mod add;
pub mod delete;
pub mod flag;
pub mod list;
pub mod random;
pub mod search;
pub mod sorted;
pub mod stats;
pub mod update;
