use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FromIterator;
use std::net::IpAddr;
use std::slice;

/// Unique hostnames of a single record. Iterates in order of first insertion, so rendering a set
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HostnameSet {
    names: Vec<String>,
}

impl HostnameSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hostname. Returns `false` if it was already present, leaving the set unchanged.
    pub fn insert<S: Into<String>>(&mut self, hostname: S) -> bool {
        let hostname = hostname.into();
        if self.contains(&hostname) {
            return false;
        }
        self.names.push(hostname);
        true
    }

    /// Checks whether the set contains the provided hostname.
    pub fn contains(&self, hostname: &str) -> bool {
        self.names.iter().any(|name| name == hostname)
    }

    /// Number of hostnames.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks whether the set holds no hostname.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates hostnames in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for HostnameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HostnameSet::new();
        for hostname in iter {
            set.insert(hostname);
        }
        set
    }
}

impl From<Vec<String>> for HostnameSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<HostnameSet> for Vec<String> {
    fn from(set: HostnameSet) -> Self {
        set.names
    }
}

/// A single line of a hosts file: an IP address (v4 or v6) followed by one or more hostnames. The
/// first name is usually the canonical hostname, any further ones are aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    address: IpAddr,
    hostnames: HostnameSet,
}

impl Record {
    /// Creates a record. IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are stored as plain IPv4.
    pub fn new(address: IpAddr, hostnames: HostnameSet) -> Self {
        Record {
            address: address.to_canonical(),
            hostnames,
        }
    }

    /// IP address of the record, IPv4-mapped addresses already reduced to IPv4.
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Hostname and aliases, in order of appearance.
    pub fn hostnames(&self) -> &HostnameSet {
        &self.hostnames
    }

    /// Checks whether the record is for the provided IP address.
    pub fn matches_ip(&self, ip_needle: &IpAddr) -> bool {
        self.address == ip_needle.to_canonical()
    }

    /// Checks whether the record contains the provided hostname, aliases included.
    pub fn matches_hostname(&self, host_needle: &str) -> bool {
        self.hostnames.contains(host_needle)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.address)?;
        for host in self.hostnames.iter() {
            write!(f, " {}", host)?;
        }
        Ok(())
    }
}

/// Contents of a hosts file as an ordered list of records.
///
/// Order matches the lines of the decoded file and is kept when encoding. Several records may
/// share an address, as the file format allows it. All contents are owned, so a clone is
/// independent of the original and mutating one never affects the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hostsfile {
    records: Vec<Record>,
}

impl Hostsfile {
    /// Creates an empty hosts file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `hostname` with `address`.
    ///
    /// The hostname is added to the first record for that address, if any. Later records with the
    /// same address are left alone, duplicates are never merged. Without a match, a new record is
    /// appended at the end. Setting a pair that is already present changes nothing.
    pub fn set<S: Into<String>>(&mut self, address: IpAddr, hostname: S) {
        let address = address.to_canonical();
        let hostname = hostname.into();
        match self.records.iter_mut().find(|rec| rec.address == address) {
            Some(record) => {
                record.hostnames.insert(hostname);
            }
            None => {
                let mut hostnames = HostnameSet::new();
                hostnames.insert(hostname);
                self.records.push(Record {
                    address,
                    hostnames,
                });
            }
        }
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates records in file order.
    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks whether there are no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}

impl From<Vec<Record>> for Hostsfile {
    fn from(records: Vec<Record>) -> Self {
        Hostsfile { records }
    }
}

impl FromIterator<Record> for Hostsfile {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Hostsfile {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Hostsfile {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for Hostsfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::hosts::{HostnameSet, Hostsfile, Record};
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    use std::str::FromStr;

    fn sample_hostsfile() -> Hostsfile {
        Hostsfile::from(vec![
            Record::new(
                IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
                vec!["foobar"].into_iter().collect(),
            ),
            Record::new(
                IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1)),
                vec!["bazbaz"].into_iter().collect(),
            ),
        ])
    }

    #[test]
    fn test_set_appends_to_copy_only() {
        let sample = sample_hostsfile();
        let mut copy = sample.clone();
        copy.set(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), "tendot");
        assert_eq!(3, copy.len());
        assert_eq!(2, sample.len());
        assert_eq!(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), copy.records()[2].address());
        assert!(copy.records()[2].matches_hostname("tendot"));
    }

    #[test]
    fn test_set_existing_address() {
        let mut hosts = sample_hostsfile();
        hosts.set(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1)), "router");
        assert_eq!(2, hosts.len());
        let names: Vec<&str> = hosts.records()[1].hostnames().iter().collect();
        assert_eq!(vec!["bazbaz", "router"], names);
    }

    #[test]
    fn test_set_idempotent() {
        let mut once = sample_hostsfile();
        once.set(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), "tendot");
        once.set(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), "extra");
        let mut twice = once.clone();
        twice.set(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), "tendot");
        twice.set(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), "extra");
        assert_eq!(once, twice);
        assert_eq!(2, once.records()[0].hostnames().len());
    }

    #[test]
    fn test_set_first_match_only() {
        let local = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
        let mut hosts = Hostsfile::from(vec![
            Record::new(local, vec!["first"].into_iter().collect()),
            Record::new(local, vec!["second"].into_iter().collect()),
        ]);
        hosts.set(local, "third");
        assert_eq!(2, hosts.len());
        assert!(hosts.records()[0].matches_hostname("third"));
        assert!(!hosts.records()[1].matches_hostname("third"));
    }

    #[test]
    fn test_set_mapped_ipv4() {
        let mut hosts = sample_hostsfile();
        hosts.set(IpAddr::V6(Ipv6Addr::from_str("::ffff:127.0.0.1").unwrap()), "mapped");
        assert_eq!(2, hosts.len());
        assert!(hosts.records()[0].matches_hostname("mapped"));
    }

    #[test]
    fn test_set_ipv6_appends() {
        let mut hosts = sample_hostsfile();
        hosts.set(IpAddr::V6(Ipv6Addr::LOCALHOST), "foobar");
        assert_eq!(3, hosts.len());
        assert!(hosts.records()[2].matches_ip(&IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert!(hosts.records()[2].matches_hostname("foobar"));
    }

    #[test]
    fn test_hostname_set_dedup() {
        let set: HostnameSet = vec!["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(3, set.len());
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(vec!["b", "a", "c"], names);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "127.0.0.1 foobar\n192.168.0.1 bazbaz\n",
            sample_hostsfile().to_string()
        );
    }

    #[test]
    fn test_serde_yaml() {
        let hosts = sample_hostsfile();
        let yaml = serde_yaml::to_string(&hosts).expect("unable to serialize hosts");
        let back: Hostsfile = serde_yaml::from_str(&yaml).expect("unable to deserialize hosts");
        assert_eq!(hosts, back);
    }
}
