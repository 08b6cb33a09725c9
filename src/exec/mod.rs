mod runner;

pub use runner::{CommandRunner, LineAssembler, SPAWN_ERROR_LINE};
