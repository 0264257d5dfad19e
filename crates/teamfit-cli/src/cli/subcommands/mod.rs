pub mod suggest;

pub use suggest::SuggestCommands;
