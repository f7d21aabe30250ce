#![deny(warnings)]
#![deny(missing_docs)]
//! Parsing library for hosts files common on Linux/UNIX systems. A file is decoded into an ordered
//! [`Hostsfile`] of [`Record`]s, each mapping one IP address to a set of hostnames, which can be
//! modified in memory and encoded again.
//!
//! Encoding is canonical rather than faithful: comments and blank lines are dropped on decode and
//! every record is written as a single line of `<ip> <hostname> [<alias> ...]`.
//!
//! ```
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! let mut hosts = hostsfile::decode("127.0.0.1 localhost\n# comment\n".as_bytes()).unwrap();
//! hosts.set(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), "tendot");
//!
//! let mut out = Vec::new();
//! hostsfile::encode(&mut out, &hosts).unwrap();
//! assert_eq!(out, b"127.0.0.1 localhost\n10.0.0.1 tendot\n");
//! ```

mod error;
mod hosts;
mod parse;
mod render;

pub use error::HostsError;
pub use hosts::{HostnameSet, Hostsfile, Record};
pub use parse::decode;
pub use render::encode;
