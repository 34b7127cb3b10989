pub mod roster;

pub use roster::{builtin_roster, load_roster};
