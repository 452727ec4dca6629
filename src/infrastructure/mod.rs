//! Infrastructure layer - Key generation, key stores and process setup

pub mod api_key;
pub mod logging;
pub mod storage;
