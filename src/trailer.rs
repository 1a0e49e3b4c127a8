use std::sync::OnceLock;

use log::{debug, warn};
use regex_lite::Regex;

use crate::model::{
    change::{ChangeId, DependencyReference},
    hosts::HostAllowList,
};

fn depends_on_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Depends-On:[ \t]*(?P<change_id>I[0-9a-f]+)\b(?:@(?P<host>[0-9a-z.\-:]+))?")
            .unwrap()
    })
}

/// Extracts `Depends-On: <change-id>[@<host-shorthand>]` trailers from commit
/// messages.
pub struct TrailerParser<'a> {
    hosts: &'a HostAllowList,
}

impl<'a> TrailerParser<'a> {
    pub fn new(hosts: &'a HostAllowList) -> Self {
        TrailerParser { hosts }
    }

    /// Trailers without a host shorthand inherit `current_host`. Lines that
    /// would end up on a host outside the allowed list are skipped.
    pub fn parse(&self, current_host: &str, message: &str) -> Vec<DependencyReference> {
        message
            .lines()
            .filter_map(|line| self.parse_line(current_host, line))
            .collect()
    }

    fn parse_line(&self, current_host: &str, line: &str) -> Option<DependencyReference> {
        let captures = depends_on_regex().captures(line)?;
        let change_id = ChangeId::new(captures.name("change_id")?.as_str());
        let host = match captures.name("host").map(|m| m.as_str()) {
            None if self.hosts.contains(current_host) => current_host,
            None => {
                warn!(
                    "Ignoring dependency {} inherited from {}, which is not in the allowed hosts list ({})",
                    change_id, current_host, self.hosts
                );
                return None;
            }
            Some(token) => match self.hosts.resolve(token) {
                Some(host) => host,
                None => {
                    warn!(
                        "Cannot resolve \"{}\" to a host from the allowed hosts list ({})",
                        token, self.hosts
                    );
                    return None;
                }
            },
        };
        debug!("Valid tag found. Change-Id: {}, host: {}", change_id, host);
        Some(DependencyReference::new(host, change_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn hosts() -> HostAllowList {
        HostAllowList::new(["review.openstack.org", "review.gerrithub.io"])
    }

    #[test]
    fn shorthand_host() {
        let hosts = hosts();
        let parser = TrailerParser::new(&hosts);
        assert_eq!(
            parser.parse("review.gerrithub.io", "Depends-On: Iabc123@openstack"),
            vec![DependencyReference::new("review.openstack.org", "Iabc123")]
        );
    }

    #[test]
    fn inherit_current_host() {
        let hosts = hosts();
        let parser = TrailerParser::new(&hosts);
        assert_eq!(
            parser.parse("review.gerrithub.io", "Depends-On: Iabc123"),
            vec![DependencyReference::new("review.gerrithub.io", "Iabc123")]
        );
    }

    #[test]
    fn multiple_trailers_in_order() {
        let hosts = hosts();
        let parser = TrailerParser::new(&hosts);
        let message = "Add the thing\n\
            \n\
            Some body text mentioning Depends-On in prose.\n\
            Depends-On: I0001@gerrithub\n\
            depends-on:Iabcdef\n\
            Depends-On:   IAAA@review.openstack.org\n\
            Change-Id: I387b6bfd763d2d86cad68a3119b0edd0caa237b0\n";
        assert_eq!(
            parser.parse("review.openstack.org", message),
            vec![
                DependencyReference::new("review.gerrithub.io", "I0001"),
                DependencyReference::new("review.openstack.org", "Iabcdef"),
                DependencyReference::new("review.openstack.org", "IAAA"),
            ]
        );
    }

    #[test]
    fn unknown_host_skips_only_that_line() {
        let hosts = hosts();
        let parser = TrailerParser::new(&hosts);
        let message = "Depends-On: I111@example.com\nDepends-On: I222@gerrithub";
        assert_eq!(
            parser.parse("review.openstack.org", message),
            vec![DependencyReference::new("review.gerrithub.io", "I222")]
        );
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let hosts = hosts();
        let parser = TrailerParser::new(&hosts);
        let message = "Depends-On: 1234\nDepends-On: Ixyz\nDepends-On: I12zz\nDepends-On:";
        assert_eq!(parser.parse("review.openstack.org", message), vec![]);
    }

    #[test]
    fn parsed_hosts_are_allowed() {
        let hosts = hosts();
        let parser = TrailerParser::new(&hosts);
        let message = "Depends-On: I1@openstack\n\
            Depends-On: I2@evil.example.org\n\
            Depends-On: I3@review\n\
            Depends-On: I4@:\n\
            Depends-On: I5";
        for current_host in hosts.iter().chain(["evil.example.org", ""]) {
            for reference in parser.parse(current_host, message) {
                assert!(hosts.contains(&reference.host), "{}", reference);
                assert_eq!(reference.revision, None);
            }
        }
    }

    #[test]
    fn current_host_outside_allowed_hosts() {
        let hosts = HostAllowList::new(["review.openstack.org"]);
        let parser = TrailerParser::new(&hosts);
        let message = "Depends-On: Iabc\nDepends-On: Idef@openstack";
        assert_eq!(
            parser.parse("evil.example.org", message),
            vec![DependencyReference::new("review.openstack.org", "Idef")]
        );
    }
}
