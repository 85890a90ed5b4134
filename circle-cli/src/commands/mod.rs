pub mod agenda;
pub mod export;
pub mod leaders;
pub mod status;
