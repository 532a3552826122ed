pub mod config;
pub mod csv;
pub mod energy_log;
pub mod json;

pub use config::{load_config, parse_config, write_config};
pub use energy_log::{
    read_energy_log, read_energy_log_file, write_energy_log, write_energy_log_file,
};
pub use json::{write_summary, write_summary_file, RunSummary};
