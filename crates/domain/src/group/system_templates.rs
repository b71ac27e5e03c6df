use std::collections::BTreeSet;

use crate::{PermissionCatalog, PermissionCode, PermissionScope};

const EMPLOYEE_BASIC_CODES: &[&str] = &[
    "employees:view:own",
    "employees:edit:own",
    "documents:view:own",
    "documents:upload:own",
    "document-requests:view:own",
    "leaves:create:own",
    "leaves:view:own",
    "timesheets:submit:own",
    "timesheets:view:own",
    "payroll:view:own",
];

const ORG_HR_EXTRA_CODES: &[&str] = &[
    "employees:view:department",
    "employees:edit:department",
    "documents:view:department",
    "documents:upload:team",
    "document-requests:create:department",
    "document-requests:view:department",
    "document-requests:approve:department",
    "leaves:view:department",
    "leaves:approve:department",
    "timesheets:view:department",
    "timesheets:approve:department",
];

/// Groups provisioned for every organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemGroupTemplate {
    /// Self-service codes every employee gets.
    EmployeeBasic,
    /// Department-level HR codes.
    OrgHr,
    /// Every organization-scope code plus every own-scope code.
    OrgAdminFull,
}

impl SystemGroupTemplate {
    /// Returns all templates in provisioning order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[SystemGroupTemplate] = &[
            SystemGroupTemplate::EmployeeBasic,
            SystemGroupTemplate::OrgHr,
            SystemGroupTemplate::OrgAdminFull,
        ];

        ALL
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmployeeBasic => "EMPLOYEE_BASIC",
            Self::OrgHr => "ORG_HR",
            Self::OrgAdminFull => "ORG_ADMIN_FULL",
        }
    }

    /// Returns the group description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::EmployeeBasic => "Basic employee permissions",
            Self::OrgHr => "HR permissions for department management",
            Self::OrgAdminFull => "Full organization admin permissions",
        }
    }

    /// Returns the template's codes restricted to what the catalog declares.
    #[must_use]
    pub fn permissions(&self, catalog: &PermissionCatalog) -> BTreeSet<PermissionCode> {
        match self {
            Self::EmployeeBasic => declared(catalog, EMPLOYEE_BASIC_CODES.iter()),
            Self::OrgHr => declared(
                catalog,
                EMPLOYEE_BASIC_CODES.iter().take(5).chain(ORG_HR_EXTRA_CODES),
            ),
            Self::OrgAdminFull => catalog
                .codes_with_scope(PermissionScope::Organization)
                .chain(catalog.codes_with_scope(PermissionScope::Own))
                .cloned()
                .collect(),
        }
    }
}

fn declared<'a>(
    catalog: &PermissionCatalog,
    values: impl Iterator<Item = &'a &'static str>,
) -> BTreeSet<PermissionCode> {
    values
        .filter_map(|value| catalog.parse(value).ok())
        .collect()
}
