mod config;
pub mod logging;

pub use config::{
    BETWEEN_BOUNDS_ENV, PROGRAM_LOG_LEVEL, PROGRAM_NAME, lax_between_from_env,
    parse_between_bounds,
};

pub use logging::init;
