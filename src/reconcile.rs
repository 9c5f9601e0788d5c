//! Employee snapshot reconciliation.
//!
//! Local and remote snapshots in, added/updated/deleted out. Fetching,
//! caching and asking the user happen elsewhere.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Role given to remote users without one.
pub const DEFAULT_ROLE: &str = "service_technician";

/// An employee as cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,

    // Not compared during reconciliation.
    #[serde(default, rename = "mitarbeiterID", skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,

    /// Cached keys this crate does not model (address, projectId, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// An active employee with the default role and no names.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            phone: String::new(),
            role: default_role(),
            is_active: true,
            employee_number: None,
            start_date: None,
            created_at: None,
            birthday: None,
            is_deleted: false,
            extra: Map::new(),
        }
    }

    /// `self` with local-only data of `local` carried over.
    ///
    /// Remote documents know nothing of keys kept only in the cache, so an
    /// update must not wipe them.
    fn merged_over(&self, local: &Employee) -> Employee {
        let mut merged = self.clone();
        if merged.birthday.is_none() {
            merged.birthday = local.birthday.clone();
        }
        for (key, value) in &local.extra {
            merged
                .extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        merged
    }

    /// Whether any reconciled field differs from `other`.
    pub fn differs_from(&self, other: &Employee) -> bool {
        self.first_name != other.first_name
            || self.last_name != other.last_name
            || self.email != other.email
            || self.phone != other.phone
            || self.role != other.role
            || self.is_active != other.is_active
    }
}

/// A user document as stored in the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteUser {
    pub uid: String,
    pub vorname: Option<String>,
    pub nachname: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
    pub is_demo_user: Option<bool>,
    #[serde(rename = "mitarbeiterID")]
    pub mitarbeiter_id: Option<u32>,
    #[serde(rename = "concernID")]
    pub concern_id: Option<String>,
    pub start_date: Option<String>,
    pub date_created: Option<String>,
    pub date_of_birth: Option<String>,
}

impl RemoteUser {
    fn is_demo(&self) -> bool {
        self.is_demo_user.unwrap_or(false)
    }

    fn belongs_to(&self, concern_id: Option<&str>) -> bool {
        match concern_id {
            Some(concern) => self.concern_id.as_deref() == Some(concern),
            None => true,
        }
    }
}

impl From<RemoteUser> for Employee {
    fn from(user: RemoteUser) -> Self {
        Employee {
            id: user.uid,
            first_name: user.vorname.unwrap_or_default(),
            last_name: user.nachname.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            phone: user.tel.unwrap_or_default(),
            role: user
                .role
                .filter(|role| !role.is_empty())
                .unwrap_or_else(default_role),
            is_active: user.is_active.unwrap_or(true),
            employee_number: user.mitarbeiter_id,
            start_date: user.start_date,
            created_at: user.date_created,
            birthday: user
                .date_of_birth
                .as_deref()
                .and_then(|value| value.split('T').next())
                .filter(|date| !date.is_empty())
                .map(str::to_string),
            is_deleted: user.is_deleted.unwrap_or(false),
            extra: Map::new(),
        }
    }
}

/// Employees from remote user documents, without demo users.
///
/// With a `concern_id`, users of other concerns are left out as well.
pub fn remote_employees(users: Vec<RemoteUser>, concern_id: Option<&str>) -> Vec<Employee> {
    users
        .into_iter()
        .filter(|user| !user.is_demo() && user.belongs_to(concern_id))
        .map(Employee::from)
        .collect()
}

/// Poll signal: has the number of relevant remote users changed?
///
/// Cheaper and looser than [`reconcile`]; a `true` only warrants a reload.
pub fn count_changed(local_len: usize, remote: &[RemoteUser], concern_id: Option<&str>) -> bool {
    let remote_len = remote
        .iter()
        .filter(|user| !user.is_demo() && user.belongs_to(concern_id))
        .count();
    remote_len != local_len
}

/// Differences between a local snapshot and a fresh remote snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncChanges {
    /// Remote employees unknown locally.
    pub added: Vec<Employee>,
    /// Remote versions of employees whose reconciled fields changed.
    pub updated: Vec<Employee>,
    /// Ids of local employees missing remotely.
    pub deleted: Vec<String>,
}

/// What the user chose to do with a [`SyncChanges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    Apply,
    Reject,
}

impl SyncChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// One-line count summary.
    pub fn summary(&self) -> String {
        format!(
            "{} added, {} updated, {} deleted",
            self.added.len(),
            self.updated.len(),
            self.deleted.len()
        )
    }

    /// Merge all changes into `local`.
    ///
    /// Added employees are appended, updated ones replace the local record
    /// with the same id (keeping keys only the cache has), deleted ids are
    /// removed. Untouched records come back as they were.
    pub fn apply(&self, local: &[Employee]) -> Vec<Employee> {
        let updates: HashMap<&str, &Employee> = self
            .updated
            .iter()
            .map(|employee| (employee.id.as_str(), employee))
            .collect();
        let deleted: HashSet<&str> = self.deleted.iter().map(String::as_str).collect();

        local
            .iter()
            .chain(self.added.iter())
            .filter(|employee| !deleted.contains(employee.id.as_str()))
            .map(|employee| {
                updates
                    .get(employee.id.as_str())
                    .map_or_else(|| employee.clone(), |update| update.merged_over(employee))
            })
            .collect()
    }

    /// The resulting snapshot for the user's all-or-nothing choice.
    pub fn resolve(&self, local: &[Employee], decision: SyncDecision) -> Vec<Employee> {
        match decision {
            SyncDecision::Apply => {
                log::info!("applying sync: {}", self.summary());
                self.apply(local)
            }
            SyncDecision::Reject => {
                log::info!("rejected sync: {}", self.summary());
                local.to_vec()
            }
        }
    }
}

/// Compare a local snapshot against a fresh remote one.
///
/// Records are matched by id. A matched record is updated only when one of
/// first name, last name, email, phone, role or active flag differs.
pub fn reconcile(local: &[Employee], remote: &[Employee]) -> SyncChanges {
    let mut local_by_id: HashMap<&str, &Employee> = HashMap::new();
    for employee in local {
        local_by_id.entry(employee.id.as_str()).or_insert(employee);
    }
    let remote_ids: HashSet<&str> = remote.iter().map(|employee| employee.id.as_str()).collect();

    let mut changes = SyncChanges::default();

    for employee in remote {
        match local_by_id.get(employee.id.as_str()) {
            None => changes.added.push(employee.clone()),
            Some(existing) if existing.differs_from(employee) => {
                changes.updated.push(employee.clone())
            }
            Some(_) => {}
        }
    }

    changes.deleted = local
        .iter()
        .filter(|employee| !remote_ids.contains(employee.id.as_str()))
        .map(|employee| employee.id.clone())
        .collect();

    log::info!("reconciled {} local / {} remote: {}", local.len(), remote.len(), changes.summary());
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn employee(id: &str, email: &str) -> Employee {
        Employee::new(id, email)
    }

    #[test]
    fn test_email_change_is_update() {
        let local = vec![employee("1", "a@x.com")];
        let remote = vec![employee("1", "b@x.com")];

        let changes = reconcile(&local, &remote);
        assert_eq!(changes.updated, remote);
        assert!(changes.added.is_empty());
        assert!(changes.deleted.is_empty());
    }

    #[test]
    fn test_untracked_change_is_not_update() {
        let local = vec![employee("1", "a@x.com")];
        let mut changed = employee("1", "a@x.com");
        changed.employee_number = Some(12);
        changed.start_date = Some("2024-01-01".into());

        assert!(reconcile(&local, &[changed]).is_empty());
    }

    #[test]
    fn test_added_and_deleted() {
        let local = vec![employee("1", "a@x.com"), employee("2", "b@x.com")];
        let remote = vec![employee("2", "b@x.com"), employee("3", "c@x.com")];

        let changes = reconcile(&local, &remote);
        assert_eq!(changes.added, vec![employee("3", "c@x.com")]);
        assert!(changes.updated.is_empty());
        assert_eq!(changes.deleted, vec!["1".to_string()]);
        assert_eq!(changes.summary(), "1 added, 0 updated, 1 deleted");
    }

    #[test]
    fn test_tracked_fields() {
        let base = employee("1", "a@x.com");
        let mut variants = Vec::new();
        for change in 0..6 {
            let mut other = base.clone();
            match change {
                0 => other.first_name = "Anna".into(),
                1 => other.last_name = "Berg".into(),
                2 => other.email = "z@x.com".into(),
                3 => other.phone = "0171".into(),
                4 => other.role = "admin".into(),
                _ => other.is_active = false,
            }
            variants.push(other);
        }
        for other in variants {
            assert!(base.differs_from(&other));
        }
    }

    #[test]
    fn test_apply_merges_everything() {
        let local = vec![employee("1", "a@x.com"), employee("2", "b@x.com")];
        let remote = vec![employee("2", "new@x.com"), employee("3", "c@x.com")];

        let changes = reconcile(&local, &remote);
        let merged = changes.apply(&local);

        assert_eq!(merged, vec![employee("2", "new@x.com"), employee("3", "c@x.com")]);
        assert!(reconcile(&merged, &remote).is_empty());
    }

    #[test]
    fn test_reject_keeps_local() {
        let local = vec![employee("1", "a@x.com")];
        let changes = reconcile(&local, &[]);
        assert_eq!(changes.resolve(&local, SyncDecision::Reject), local);
        assert!(changes.resolve(&local, SyncDecision::Apply).is_empty());
    }

    #[test]
    fn test_remote_user_conversion() {
        let user: RemoteUser = serde_json::from_str(
            r#"{"uid":"u1","vorname":"Anna","nachname":"Berg","tel":"0171","mitarbeiterID":1557,"concernID":"C1"}"#,
        )
        .unwrap();
        let employee = Employee::from(user);

        assert_eq!(employee.id, "u1");
        assert_eq!(employee.first_name, "Anna");
        assert_eq!(employee.last_name, "Berg");
        assert_eq!(employee.email, "");
        assert_eq!(employee.phone, "0171");
        assert_eq!(employee.role, DEFAULT_ROLE);
        assert!(employee.is_active);
        assert_eq!(employee.employee_number, Some(1557));
        assert_eq!(employee.birthday, None);
    }

    #[test]
    fn test_remote_birthday_is_date_only() {
        let user: RemoteUser = serde_json::from_str(
            r#"{"uid":"u1","dateOfBirth":"1990-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(Employee::from(user).birthday.as_deref(), Some("1990-01-01"));
    }

    #[test]
    fn test_apply_keeps_cached_keys_of_untouched_records() {
        let local_json = r#"[{"id":"1","firstName":"Anna","email":"a@x.com","birthday":"1990-01-01","address":"Hauptstr. 1","projectId":"P7"}]"#;
        let local: Vec<Employee> = serde_json::from_str(local_json).unwrap();
        let remote = vec![Employee {
            first_name: "Anna".into(),
            ..Employee::new("1", "a@x.com")
        }];

        let changes = reconcile(&local, &remote);
        assert!(changes.is_empty());

        let merged = changes.resolve(&local, SyncDecision::Apply);
        let written: Value = serde_json::to_value(&merged).unwrap();
        let record = &written[0];

        assert_eq!(record["birthday"], "1990-01-01");
        assert_eq!(record["address"], "Hauptstr. 1");
        assert_eq!(record["projectId"], "P7");
        assert_eq!(merged, local);
    }

    #[test]
    fn test_update_keeps_cache_only_keys() {
        let local: Vec<Employee> = serde_json::from_str(
            r#"[{"id":"1","email":"a@x.com","birthday":"1990-01-01","address":"Hauptstr. 1"}]"#,
        )
        .unwrap();
        let remote = vec![Employee::new("1", "b@x.com")];

        let merged = reconcile(&local, &remote).apply(&local);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].email, "b@x.com");
        assert_eq!(merged[0].birthday.as_deref(), Some("1990-01-01"));
        assert_eq!(merged[0].extra["address"], "Hauptstr. 1");
    }

    #[test]
    fn test_remote_employees_filters() {
        let users = vec![
            RemoteUser {
                uid: "u1".into(),
                concern_id: Some("C1".into()),
                ..RemoteUser::default()
            },
            RemoteUser {
                uid: "demo".into(),
                concern_id: Some("C1".into()),
                is_demo_user: Some(true),
                ..RemoteUser::default()
            },
            RemoteUser {
                uid: "u2".into(),
                concern_id: Some("C2".into()),
                ..RemoteUser::default()
            },
        ];

        assert!(count_changed(2, &users, Some("C1")));
        assert!(!count_changed(1, &users, Some("C1")));
        assert!(!count_changed(2, &users, None));

        let employees = remote_employees(users, Some("C1"));
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, "u1");
    }

    #[test]
    fn test_employee_json_defaults() {
        let employee: Employee = serde_json::from_str(r#"{"id":"9"}"#).unwrap();
        assert_eq!(employee, Employee::new("9", ""));
    }
}
