//! Common test utilities for cmip6kit.

pub mod assertions;
pub mod test_data;
