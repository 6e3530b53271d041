//! Generation orchestration: validate, call the remote, normalize, fall back.

mod generator;

pub use generator::Generator;
