use std::{error::Error, io::Write};

use log::info;
use serde::Serialize;

use crate::{
    model::change::{ChangeId, DependencyReference},
    CrossDeps,
};

/// Handler to resolve command
pub fn do_resolve(
    crossdeps: &CrossDeps,
    host: &str,
    change_id: &str,
    revision: Option<String>,
    require_root: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let change_id: ChangeId = change_id.parse()?;
    let root = DependencyReference {
        host: host.to_string(),
        change_id,
        revision,
    };
    info!("Resolving dependencies of {}", root);

    let resolved = if require_root {
        crossdeps.resolve_root(root)?
    } else {
        crossdeps.resolve(vec![root])
    };
    info!("Resolved {} change(s)", resolved.len());

    write_json(out, &resolved)
}

/// Handler to gated command
pub fn do_gated(
    host: &str,
    changes: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let changes = CrossDeps::gated_changes(host, changes)?;
    write_json(out, &changes)
}

/// Handler to local command
pub fn do_local(changes: &str, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let changes = CrossDeps::local_changes(changes)?;
    write_json(out, &changes)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn crossdeps() -> CrossDeps {
        CrossDeps::builder()
            .allowed_hosts(["review.gerrithub.io"])
            .try_build()
            .unwrap()
    }

    #[test]
    fn gated_output() {
        let mut out = Vec::new();
        do_gated(
            "review.gerrithub.io",
            "redhat-openstack/ansible-role-tripleo-ci:master:refs/changes/11/311/2",
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "host": "review.gerrithub.io",
                "project": "redhat-openstack/ansible-role-tripleo-ci",
                "branch": "master",
                "refspec": "refs/changes/11/311/2"
            }])
        );
    }

    #[test]
    fn local_output() {
        let mut out = Vec::new();
        do_local("org/repo:main:/src/repo", &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"project": "org/repo", "branch": "main", "path": "/src/repo"}])
        );
    }

    #[test]
    fn local_malformed() {
        let mut out = Vec::new();
        assert!(do_local("org/repo", &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn resolve_rejects_invalid_change_id() {
        let mut out = Vec::new();
        assert!(do_resolve(&crossdeps(), "review.gerrithub.io", "1234", None, false, &mut out).is_err());
    }

    #[test]
    fn resolve_unresolvable_root() {
        // Not allowed, so the client never reaches the network.
        let mut out = Vec::new();
        do_resolve(&crossdeps(), "review.openstack.org", "Iabc", None, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");

        let mut out = Vec::new();
        assert!(
            do_resolve(&crossdeps(), "review.openstack.org", "Iabc", None, true, &mut out).is_err()
        );
    }
}
