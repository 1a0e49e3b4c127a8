use std::fmt::Display;

pub const DEFAULT_ALLOWED_HOSTS: [&str; 3] = [
    "review.openstack.org",
    "review.gerrithub.io",
    "review.rdoproject.org",
];

/// Ordered list of review servers that may be queried.
///
/// Order is significant: shorthand tokens resolve to the first host that
/// contains them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllowList {
    hosts: Vec<String>,
}

impl HostAllowList {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for host in hosts.into_iter().map(Into::into) {
            let host = host.trim().to_ascii_lowercase();
            if !host.is_empty() && !unique.contains(&host) {
                unique.push(host);
            }
        }
        HostAllowList { hosts: unique }
    }

    /// Resolves a host shorthand by substring containment.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        if token.is_empty() {
            return None;
        }
        let token = token.to_ascii_lowercase();
        self.hosts
            .iter()
            .find(|host| host.contains(&token))
            .map(String::as_str)
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl Default for HostAllowList {
    fn default() -> Self {
        HostAllowList::new(DEFAULT_ALLOWED_HOSTS)
    }
}

impl Display for HostAllowList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hosts.join(", "))
    }
}
