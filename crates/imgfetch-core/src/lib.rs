pub mod config;
pub mod logging;

pub mod console;
pub mod download;
pub mod error;
pub mod fingerprint;
pub mod ledger;
pub mod pipeline;
pub mod probe;
pub mod storage;
pub mod url_model;
