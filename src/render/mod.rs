use crate::error::HostsError;
use crate::hosts::Hostsfile;
use log::debug;
use std::io::Write;

/// Writes `hosts` to `write`, one line per record in table order: the address followed by its
/// hostnames, all separated by a single space. No comments or blank lines are emitted.
///
/// Fails only if writing to the stream fails, returning that error as [`HostsError::Io`].
pub fn encode<W: Write>(mut write: W, hosts: &Hostsfile) -> Result<(), HostsError> {
    for record in hosts {
        writeln!(write, "{}", record)?;
    }
    write.flush()?;
    debug!("encoded {} hosts file records", hosts.len());
    Ok(())
}
