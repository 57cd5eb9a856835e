//! Filesystem and hashing helpers shared by the bundle builder and packager.

pub mod checksum;
pub mod fs;
