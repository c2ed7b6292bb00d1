//! Access report
//!
//! One entry per profile: role, groups, derived capabilities, completeness
//! and what the role is expected to be able to do.

use crate::auth::groups::GroupStore;
use crate::auth::rbac::{
    Capabilities, Operation, ProfileField, Role, RoleCatalog, VisibilityScope,
};
use crate::core::models::profile::Profile;
use crate::storage::Database;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Report line for one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessReportEntry {
    pub account_id: Uuid,
    pub role: Role,
    pub role_display_name: String,
    pub groups: Vec<String>,
    pub department: Option<String>,
    pub license_number: Option<String>,
    pub capabilities: Capabilities,
    pub complete: bool,
    pub missing_fields: Vec<ProfileField>,
    /// Grants carried by the role group
    pub group_grants: Vec<Operation>,
    /// Which profiles the account can see
    pub visibility: String,
    /// Holds something other than exactly its role group
    pub group_drift: bool,
}

/// Access report across all profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessReport {
    pub generated_at: DateTime<Utc>,
    pub role_counts: BTreeMap<Role, usize>,
    pub entries: Vec<AccessReportEntry>,
}

impl AccessReport {
    /// Build the report from the database
    pub async fn build(database: &Database) -> Result<Self> {
        let profiles = database.list_profiles(VisibilityScope::All).await?;
        Self::from_profiles(profiles, database).await
    }

    /// Build the report for the given profiles, reading groups from `store`
    pub async fn from_profiles<S: GroupStore + ?Sized>(
        profiles: Vec<Profile>,
        store: &S,
    ) -> Result<Self> {
        let mut role_counts = BTreeMap::new();
        let mut entries = Vec::with_capacity(profiles.len());

        for profile in profiles {
            let groups = store.memberships(profile.owner_id).await?;
            *role_counts.entry(profile.role).or_insert(0) += 1;
            entries.push(entry_for(profile, groups));
        }

        Ok(Self {
            generated_at: Utc::now(),
            role_counts,
            entries,
        })
    }

    pub fn incomplete(&self) -> impl Iterator<Item = &AccessReportEntry> {
        self.entries.iter().filter(|e| !e.complete)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn entry_for(profile: Profile, groups: Vec<String>) -> AccessReportEntry {
    let role = profile.role;
    let expected = RoleCatalog::group_name_of(role);
    let role_groups: Vec<&String> = groups
        .iter()
        .filter(|g| RoleCatalog::is_role_group(g))
        .collect();
    let group_drift = role_groups.len() != 1 || role_groups[0] != expected;
    let missing_fields = profile.missing_fields();

    AccessReportEntry {
        account_id: profile.owner_id,
        role,
        role_display_name: RoleCatalog::display_name(role).to_string(),
        groups,
        department: profile.department,
        license_number: profile.license_number,
        capabilities: role.capabilities(),
        complete: missing_fields.is_empty(),
        missing_fields,
        group_grants: RoleCatalog::group_grants(role).to_vec(),
        visibility: visibility_of(role).to_string(),
        group_drift,
    }
}

fn visibility_of(role: Role) -> &'static str {
    match role {
        Role::Admin => "all profiles",
        Role::Doctor | Role::Nurse | Role::Pharmacy => "patient profiles and own",
        Role::Patient => "own profile only",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

impl fmt::Display for AccessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Access Report ({}) ===", self.generated_at.to_rfc3339())?;

        for entry in &self.entries {
            writeln!(f)?;
            writeln!(f, "Account: {}", entry.account_id)?;
            writeln!(f, "  Role: {} ({})", entry.role_display_name, entry.role)?;
            writeln!(f, "  Groups: {:?}", entry.groups)?;
            writeln!(f, "  Department: {}", entry.department.as_deref().unwrap_or("N/A"))?;
            writeln!(f, "  License: {}", entry.license_number.as_deref().unwrap_or("N/A"))?;
            writeln!(f, "  Visibility: {}", entry.visibility)?;
            writeln!(
                f,
                "  Medical staff: {}, patient records: {}, prescribe: {}, manage users: {}",
                yes_no(entry.capabilities.is_medical_staff),
                yes_no(entry.capabilities.can_access_patient_records),
                yes_no(entry.capabilities.can_prescribe_medication),
                yes_no(entry.capabilities.can_manage_users),
            )?;
            let grants: Vec<&str> = entry.group_grants.iter().map(Operation::as_str).collect();
            writeln!(f, "  Group grants: {}", grants.join(", "))?;
            if !entry.complete {
                let missing: Vec<&str> =
                    entry.missing_fields.iter().map(ProfileField::as_str).collect();
                writeln!(f, "  Incomplete, missing: {}", missing.join(", "))?;
            }
            if entry.group_drift {
                writeln!(f, "  Group drift: expected only {}", entry.role.group_name())?;
            }
        }

        writeln!(f)?;
        for (role, count) in &self.role_counts {
            writeln!(f, "{}: {}", RoleCatalog::display_name(*role), count)?;
        }
        write!(f, "Total profiles: {}", self.entries.len())
    }
}
