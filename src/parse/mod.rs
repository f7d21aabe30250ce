use crate::error::HostsError;
use crate::hosts::{HostnameSet, Hostsfile, Record};
use log::{debug, trace};
use nom::bytes::complete::{take_till1, take_while1};
use nom::combinator::{all_consuming, map_res};
use nom::multi::many1;
use nom::sequence::{preceded, tuple};
use nom::IResult;
use std::io::BufRead;
use std::net::IpAddr;
use std::str::FromStr;

fn is_space(chr: char) -> bool {
    chr.is_whitespace()
}

fn comb_ipaddr(input: &str) -> IResult<&str, IpAddr> {
    map_res(take_till1(is_space), |str_ip| {
        IpAddr::from_str(str_ip).map(|ip| ip.to_canonical())
    })(input)
}

/// Parses a single trimmed line into address and hostnames. Every whitespace separated token
/// after the address is a hostname, whatever characters it contains.
fn comb_record(input: &str) -> IResult<&str, (IpAddr, Vec<&str>)> {
    all_consuming(tuple((
        comb_ipaddr,
        many1(preceded(take_while1(is_space), take_till1(is_space))),
    )))(input)
}

fn try_parse_record(line: &str) -> Result<Record, HostsError> {
    comb_record(line)
        .map(|(_, (ip, hosts))| Record::new(ip, hosts.into_iter().collect::<HostnameSet>()))
        .map_err(|_| HostsError::MalformedEntry(line.to_string()))
}

/// Decodes a hosts file from `read`, line by line.
///
/// Blank lines and lines starting with `#` are skipped. Every other line must consist of an IP
/// address followed by at least one hostname, separated by whitespace; otherwise decoding stops at
/// that line with [`HostsError::MalformedEntry`] and nothing is returned. Repeated hostnames on one
/// line are kept once.
///
/// Input must be UTF-8. Invalid bytes surface as [`HostsError::Io`] with
/// [`std::io::ErrorKind::InvalidData`], like any other read failure.
pub fn decode<R: BufRead>(read: R) -> Result<Hostsfile, HostsError> {
    let mut hosts = Hostsfile::new();
    for (idx, line) in read.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            trace!("line {}: empty", idx + 1);
            continue;
        }
        if line.starts_with('#') {
            trace!("line {}: comment", idx + 1);
            continue;
        }
        let record = try_parse_record(line)?;
        trace!("line {}: {}", idx + 1, record);
        hosts.push(record);
    }
    debug!("decoded {} hosts file records", hosts.len());
    Ok(hosts)
}

impl FromStr for Hostsfile {
    type Err = HostsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s.as_bytes())
    }
}
