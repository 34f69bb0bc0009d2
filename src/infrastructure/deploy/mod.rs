//! Deployment engines

mod sf_cli;

pub use sf_cli::SfDeployEngine;
