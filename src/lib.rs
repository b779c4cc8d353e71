pub mod process {
    pub mod config;
    pub mod drainer;
    pub mod error;
    pub mod invocation;
    pub mod runner;
}

pub mod service {
    pub mod config_service;
    pub mod transcode;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod conversion;
    pub mod transcode;
}

pub mod utils {
    pub mod utils;
}

pub use process::config::ProcessConfig;
pub use process::drainer::{DrainReport, StreamDrainer};
pub use process::error::RunnerError;
pub use process::invocation::Invocation;
pub use process::runner::{ProcessRunner, RunOutcome, RunResult};
