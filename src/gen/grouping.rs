//! Grouping Engine: flat record catalogs into deterministic Group trees
//!
//! Converts an unordered collection of [`CatalogRecord`]s into a
//! Group → Version → records tree. Group and version order is lexicographic;
//! record order within a version is first-seen. The output is a pure
//! function of the input set, so two passes over the same catalog always
//! produce the same tree.

use crate::gen::catalog::CatalogRecord;
use std::collections::HashMap;
use std::fmt;

/// Error raised while grouping records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// Two records registered the same kind under one (group, version).
    DuplicateKind {
        group: String,
        version: String,
        kind: String,
    },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::DuplicateKind {
                group,
                version,
                kind,
            } => write!(
                f,
                "duplicate kind '{kind}' registered under group '{group}' version '{version}'"
            ),
        }
    }
}

impl std::error::Error for GroupError {}

/// The records declared under one version of a group, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRecords<R> {
    name: String,
    records: Vec<R>,
}

impl<R> VersionRecords<R> {
    fn new(name: String) -> Self {
        VersionRecords {
            name,
            records: Vec::new(),
        }
    }

    /// The version name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The records declared under this version, in first-seen order.
    pub fn records(&self) -> &[R] {
        &self.records
    }
}

/// One API group and its versioned records.
///
/// Built by a [`Grouper`]; not mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<R> {
    name: String,
    versions: Vec<VersionRecords<R>>,
}

impl<R: CatalogRecord> Group<R> {
    fn new(name: String) -> Self {
        Group {
            name,
            versions: Vec::new(),
        }
    }

    /// The group name. Empty for the core/ungrouped group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group's versions, sorted lexicographically by name.
    pub fn versions(&self) -> &[VersionRecords<R>] {
        &self.versions
    }

    fn add_record(&mut self, record: R) -> Result<(), GroupError> {
        let slot = match self
            .versions
            .iter()
            .position(|v| v.name == record.version())
        {
            Some(index) => index,
            None => {
                self.versions
                    .push(VersionRecords::new(record.version().to_string()));
                self.versions.len() - 1
            }
        };
        let version = &mut self.versions[slot];

        if version.records.iter().any(|r| r.kind() == record.kind()) {
            return Err(GroupError::DuplicateKind {
                group: self.name.clone(),
                version: version.name.clone(),
                kind: record.kind().to_string(),
            });
        }

        version.records.push(record);
        Ok(())
    }

    fn sort_versions(&mut self) {
        self.versions.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// Strategy seam for the grouping stage.
///
/// [`KindGrouper`] is the canonical implementation; test doubles substitute
/// it through [`Document`](crate::gen::document::Document) construction.
pub trait Grouper<R: CatalogRecord> {
    /// Partition records into groups, sorted lexicographically by name.
    fn group(&self, records: Vec<R>) -> Result<Vec<Group<R>>, GroupError>;
}

/// Canonical grouping implementation.
pub struct KindGrouper;

impl<R: CatalogRecord> Grouper<R> for KindGrouper {
    fn group(&self, records: Vec<R>) -> Result<Vec<Group<R>>, GroupError> {
        let mut by_name: HashMap<String, Group<R>> = HashMap::new();

        for record in records {
            let group = by_name
                .entry(record.group().to_string())
                .or_insert_with_key(|name| Group::new(name.clone()));
            group.add_record(record)?;
        }

        // Group emission order must not depend on hash iteration order.
        let mut names: Vec<String> = by_name.keys().cloned().collect();
        names.sort();

        let mut groups = Vec::with_capacity(names.len());
        for name in names {
            if let Some(mut group) = by_name.remove(&name) {
                group.sort_versions();
                groups.push(group);
            }
        }

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::catalog::ApiResource;

    fn record(group: &str, version: &str, kind: &str) -> ApiResource {
        ApiResource {
            kind: kind.to_string(),
            group: group.to_string(),
            version: version.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_groups_sorted_with_core_first() {
        let records = vec![
            record("b", "v1", "B"),
            record("a", "v1", "A1"),
            record("a", "v1", "A2"),
            record("", "v1", "Core"),
        ];

        let groups = KindGrouper.group(records).expect("grouping succeeds");

        let names: Vec<_> = groups.iter().map(|g| g.name().to_string()).collect();
        assert_eq!(names, vec!["", "a", "b"]);
        assert_eq!(groups[1].versions()[0].records().len(), 2);
    }

    #[test]
    fn test_versions_sorted_records_in_first_seen_order() {
        let records = vec![
            record("apps", "v1beta2", "Deployment"),
            record("apps", "v1", "StatefulSet"),
            record("apps", "v1", "Deployment"),
            record("apps", "v1beta1", "Deployment"),
        ];

        let groups = KindGrouper.group(records).expect("grouping succeeds");
        assert_eq!(groups.len(), 1);

        let versions: Vec<_> = groups[0]
            .versions()
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        assert_eq!(versions, vec!["v1", "v1beta1", "v1beta2"]);

        let v1_kinds: Vec<_> = groups[0].versions()[0]
            .records()
            .iter()
            .map(|r| r.kind.clone())
            .collect();
        assert_eq!(v1_kinds, vec!["StatefulSet", "Deployment"]);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let groups = KindGrouper
            .group(Vec::<ApiResource>::new())
            .expect("empty input is not an error");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_duplicate_kind_is_an_error() {
        let records = vec![
            record("apps", "v1", "Deployment"),
            record("apps", "v1", "Deployment"),
        ];

        let err = KindGrouper.group(records).expect_err("duplicate must fail");
        assert_eq!(
            err,
            GroupError::DuplicateKind {
                group: "apps".to_string(),
                version: "v1".to_string(),
                kind: "Deployment".to_string(),
            }
        );
    }

    #[test]
    fn test_same_kind_in_different_versions_is_fine() {
        let records = vec![
            record("apps", "v1", "Deployment"),
            record("apps", "v1beta1", "Deployment"),
        ];

        let groups = KindGrouper.group(records).expect("grouping succeeds");
        assert_eq!(groups[0].versions().len(), 2);
    }
}
