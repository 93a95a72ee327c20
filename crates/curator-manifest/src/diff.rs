//! Manifest diffing
//!
//! Classifies a freshly scanned entry set against the previously persisted
//! manifest into disjoint added/updated/removed sets. Unchanged entries are
//! not reported.

use crate::entry::{Manifest, ManifestEntry};

/// One classified change, carrying the old and new entry snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryChange {
    pub filename: String,
    pub old: Option<ManifestEntry>,
    pub new: Option<ManifestEntry>,
}

/// Structured change report; the three sets partition by filename.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResult {
    pub added: Vec<EntryChange>,
    pub updated: Vec<EntryChange>,
    pub removed: Vec<EntryChange>,
}

impl DiffResult {
    pub fn total(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Compare the prior manifest against the new entry set.
///
/// Equality is structural: semantic fields plus fingerprint, never the
/// rendered form. Both manifests keep natural order, so each change set
/// comes out naturally ordered as well.
pub fn diff_entries(before: &Manifest, after: &Manifest) -> DiffResult {
    let mut diff = DiffResult::default();

    for entry in after.entries() {
        match before.get(&entry.filename) {
            None => diff.added.push(EntryChange {
                filename: entry.filename.clone(),
                old: None,
                new: Some(entry.clone()),
            }),
            Some(prior) if prior != entry => diff.updated.push(EntryChange {
                filename: entry.filename.clone(),
                old: Some(prior.clone()),
                new: Some(entry.clone()),
            }),
            Some(_) => {}
        }
    }

    for entry in before.entries() {
        if after.get(&entry.filename).is_none() {
            diff.removed.push(EntryChange {
                filename: entry.filename.clone(),
                old: Some(entry.clone()),
                new: None,
            });
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use pretty_assertions::assert_eq;

    fn entry(name: &str, version: Option<&str>) -> ManifestEntry {
        let mut e = ManifestEntry::minimal(name, EntryKind::Json);
        e.version = version.map(str::to_string);
        e
    }

    fn manifest(entries: Vec<ManifestEntry>) -> Manifest {
        Manifest::from_entries("/data", entries).0
    }

    fn names(changes: &[EntryChange]) -> Vec<&str> {
        changes.iter().map(|c| c.filename.as_str()).collect()
    }

    #[test]
    fn addition_is_classified() {
        let before = manifest(vec![entry("a.json", Some("1"))]);
        let after = manifest(vec![entry("a.json", Some("1")), entry("b.json", Some("1"))]);

        let diff = diff_entries(&before, &after);
        assert_eq!(names(&diff.added), vec!["b.json"]);
        assert!(diff.updated.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn version_change_is_an_update() {
        let before = manifest(vec![entry("a.json", Some("1"))]);
        let after = manifest(vec![entry("a.json", Some("2"))]);

        let diff = diff_entries(&before, &after);
        assert_eq!(names(&diff.updated), vec!["a.json"]);
        let change = &diff.updated[0];
        assert_eq!(change.old.as_ref().unwrap().version.as_deref(), Some("1"));
        assert_eq!(change.new.as_ref().unwrap().version.as_deref(), Some("2"));
    }

    #[test]
    fn removal_is_classified() {
        let before = manifest(vec![entry("a.json", None), entry("b.json", None)]);
        let after = manifest(vec![entry("a.json", None)]);

        let diff = diff_entries(&before, &after);
        assert_eq!(names(&diff.removed), vec!["b.json"]);
        assert_eq!(diff.total(), 1);
    }

    #[test]
    fn identical_manifests_produce_empty_diff() {
        let before = manifest(vec![entry("a.json", Some("1")), entry("b.json", None)]);
        let after = manifest(vec![entry("a.json", Some("1")), entry("b.json", None)]);

        assert!(diff_entries(&before, &after).is_empty());
    }

    #[test]
    fn change_sets_are_naturally_ordered() {
        let before = manifest(vec![]);
        let after = manifest(vec![
            entry("item10.json", None),
            entry("item2.json", None),
            entry("item1.json", None),
        ]);

        let diff = diff_entries(&before, &after);
        assert_eq!(names(&diff.added), vec!["item1.json", "item2.json", "item10.json"]);
    }

    #[test]
    fn fingerprint_change_is_an_update() {
        let mut old = entry("img.png", None);
        old.kind = EntryKind::Binary;
        old.fingerprint = Some("b3:aa:3".into());
        let mut new = old.clone();
        new.fingerprint = Some("b3:bb:3".into());

        let diff = diff_entries(&manifest(vec![old]), &manifest(vec![new]));
        assert_eq!(names(&diff.updated), vec!["img.png"]);
    }
}
