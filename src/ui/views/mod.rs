pub mod deploy;
pub mod recover;
pub mod scan;
