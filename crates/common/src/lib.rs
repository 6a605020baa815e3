//! Wire types shared by the mock license server and its tests.

pub mod protocol;
