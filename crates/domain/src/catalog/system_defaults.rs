use crate::{PermissionAction, PermissionScope};

/// Codes declared by `PermissionCatalog::system_default`.
pub(super) const SYSTEM_PERMISSIONS: &[(&str, PermissionAction, PermissionScope, &str)] = &[
    (
        "employees",
        PermissionAction::View,
        PermissionScope::Own,
        "View own employee profile",
    ),
    (
        "employees",
        PermissionAction::View,
        PermissionScope::Team,
        "View direct reports",
    ),
    (
        "employees",
        PermissionAction::View,
        PermissionScope::Department,
        "View department employees",
    ),
    (
        "employees",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all employees in organization",
    ),
    (
        "employees",
        PermissionAction::Edit,
        PermissionScope::Own,
        "Edit own employee profile",
    ),
    (
        "employees",
        PermissionAction::Edit,
        PermissionScope::Team,
        "Edit direct reports",
    ),
    (
        "employees",
        PermissionAction::Edit,
        PermissionScope::Department,
        "Edit department employees",
    ),
    (
        "employees",
        PermissionAction::Edit,
        PermissionScope::Organization,
        "Edit all employees",
    ),
    (
        "employees",
        PermissionAction::Create,
        PermissionScope::Organization,
        "Create new employees",
    ),
    (
        "employees",
        PermissionAction::Delete,
        PermissionScope::Organization,
        "Delete employees",
    ),
    (
        "probation",
        PermissionAction::View,
        PermissionScope::Team,
        "View probation status of direct reports",
    ),
    (
        "probation",
        PermissionAction::View,
        PermissionScope::Department,
        "View probation status of department employees",
    ),
    (
        "probation",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all employee probation status",
    ),
    (
        "probation",
        PermissionAction::Manage,
        PermissionScope::Team,
        "Manage probation periods for direct reports",
    ),
    (
        "probation",
        PermissionAction::Manage,
        PermissionScope::Department,
        "Manage probation periods for department",
    ),
    (
        "probation",
        PermissionAction::Manage,
        PermissionScope::Organization,
        "Manage all probation periods (extend, complete, terminate)",
    ),
    (
        "documents",
        PermissionAction::View,
        PermissionScope::Own,
        "View own documents",
    ),
    (
        "documents",
        PermissionAction::View,
        PermissionScope::Team,
        "View team documents",
    ),
    (
        "documents",
        PermissionAction::View,
        PermissionScope::Department,
        "View department documents",
    ),
    (
        "documents",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all organization documents",
    ),
    (
        "documents",
        PermissionAction::Upload,
        PermissionScope::Own,
        "Upload own documents",
    ),
    (
        "documents",
        PermissionAction::Upload,
        PermissionScope::Team,
        "Upload documents for team members",
    ),
    (
        "documents",
        PermissionAction::Upload,
        PermissionScope::Organization,
        "Upload documents for any employee",
    ),
    (
        "documents",
        PermissionAction::Delete,
        PermissionScope::Own,
        "Delete own documents",
    ),
    (
        "documents",
        PermissionAction::Delete,
        PermissionScope::Organization,
        "Delete any documents",
    ),
    (
        "documents",
        PermissionAction::Approve,
        PermissionScope::Organization,
        "Approve/reject document submissions",
    ),
    (
        "documents",
        PermissionAction::Approve,
        PermissionScope::Team,
        "Approve/reject document submissions of direct reports",
    ),
    (
        "document-requests",
        PermissionAction::Create,
        PermissionScope::Team,
        "Request documents from direct reports",
    ),
    (
        "document-requests",
        PermissionAction::Create,
        PermissionScope::Department,
        "Request documents from department members",
    ),
    (
        "document-requests",
        PermissionAction::Create,
        PermissionScope::Organization,
        "Request documents from anyone",
    ),
    (
        "document-requests",
        PermissionAction::View,
        PermissionScope::Own,
        "View requests you created or received",
    ),
    (
        "document-requests",
        PermissionAction::View,
        PermissionScope::Team,
        "View team document requests",
    ),
    (
        "document-requests",
        PermissionAction::View,
        PermissionScope::Department,
        "View department document requests",
    ),
    (
        "document-requests",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all document requests",
    ),
    (
        "document-requests",
        PermissionAction::Approve,
        PermissionScope::Team,
        "Approve/reject team document requests",
    ),
    (
        "document-requests",
        PermissionAction::Approve,
        PermissionScope::Department,
        "Approve/reject department document requests",
    ),
    (
        "document-requests",
        PermissionAction::Approve,
        PermissionScope::Organization,
        "Approve/reject any document requests",
    ),
    (
        "departments",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all departments",
    ),
    (
        "departments",
        PermissionAction::Create,
        PermissionScope::Organization,
        "Create departments",
    ),
    (
        "departments",
        PermissionAction::Edit,
        PermissionScope::Organization,
        "Edit departments",
    ),
    (
        "departments",
        PermissionAction::Delete,
        PermissionScope::Organization,
        "Delete departments",
    ),
    (
        "positions",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all positions",
    ),
    (
        "positions",
        PermissionAction::Create,
        PermissionScope::Organization,
        "Create positions",
    ),
    (
        "positions",
        PermissionAction::Edit,
        PermissionScope::Organization,
        "Edit positions",
    ),
    (
        "positions",
        PermissionAction::Delete,
        PermissionScope::Organization,
        "Delete positions",
    ),
    (
        "roles",
        PermissionAction::View,
        PermissionScope::Organization,
        "View organization roles",
    ),
    (
        "roles",
        PermissionAction::Create,
        PermissionScope::Organization,
        "Create custom roles",
    ),
    (
        "roles",
        PermissionAction::Edit,
        PermissionScope::Organization,
        "Edit roles",
    ),
    (
        "roles",
        PermissionAction::Delete,
        PermissionScope::Organization,
        "Delete roles",
    ),
    (
        "roles",
        PermissionAction::Assign,
        PermissionScope::Organization,
        "Assign roles to users",
    ),
    (
        "permissions",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all permissions",
    ),
    (
        "permissions",
        PermissionAction::Grant,
        PermissionScope::Organization,
        "Grant permissions to employees",
    ),
    (
        "permissions",
        PermissionAction::Revoke,
        PermissionScope::Organization,
        "Revoke permissions from employees",
    ),
    (
        "permission-groups",
        PermissionAction::View,
        PermissionScope::Organization,
        "View permission groups",
    ),
    (
        "permission-groups",
        PermissionAction::Assign,
        PermissionScope::Organization,
        "Assign permission groups to employees",
    ),
    (
        "permission-groups",
        PermissionAction::Revoke,
        PermissionScope::Organization,
        "Revoke permission groups from employees",
    ),
    (
        "permission-groups",
        PermissionAction::Create,
        PermissionScope::Organization,
        "Create permission groups",
    ),
    (
        "permission-groups",
        PermissionAction::Edit,
        PermissionScope::Organization,
        "Edit permission groups",
    ),
    (
        "permission-groups",
        PermissionAction::Delete,
        PermissionScope::Organization,
        "Delete permission groups",
    ),
    (
        "users",
        PermissionAction::View,
        PermissionScope::Organization,
        "View organization users",
    ),
    (
        "users",
        PermissionAction::Create,
        PermissionScope::Organization,
        "Create new users",
    ),
    (
        "users",
        PermissionAction::Edit,
        PermissionScope::Organization,
        "Edit user accounts",
    ),
    (
        "users",
        PermissionAction::Delete,
        PermissionScope::Organization,
        "Delete user accounts",
    ),
    (
        "users",
        PermissionAction::ResetPassword,
        PermissionScope::Organization,
        "Reset user passwords",
    ),
    (
        "organization",
        PermissionAction::View,
        PermissionScope::Organization,
        "View organization details",
    ),
    (
        "organization",
        PermissionAction::Edit,
        PermissionScope::Organization,
        "Edit organization settings",
    ),
    (
        "audit-logs",
        PermissionAction::View,
        PermissionScope::Organization,
        "View organization audit logs",
    ),
    (
        "email-logs",
        PermissionAction::View,
        PermissionScope::Organization,
        "View email logs",
    ),
    (
        "leaves",
        PermissionAction::Create,
        PermissionScope::Own,
        "Request own leave",
    ),
    (
        "leaves",
        PermissionAction::View,
        PermissionScope::Own,
        "View own leave requests",
    ),
    (
        "leaves",
        PermissionAction::View,
        PermissionScope::Team,
        "View team leave requests",
    ),
    (
        "leaves",
        PermissionAction::View,
        PermissionScope::Department,
        "View department leave requests",
    ),
    (
        "leaves",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all leave requests",
    ),
    (
        "leaves",
        PermissionAction::Approve,
        PermissionScope::Team,
        "Approve team leave requests",
    ),
    (
        "leaves",
        PermissionAction::Approve,
        PermissionScope::Department,
        "Approve department leave requests",
    ),
    (
        "leaves",
        PermissionAction::Approve,
        PermissionScope::Organization,
        "Approve all leave requests",
    ),
    (
        "leaves",
        PermissionAction::Cancel,
        PermissionScope::Own,
        "Cancel own leave requests",
    ),
    (
        "timesheets",
        PermissionAction::Submit,
        PermissionScope::Own,
        "Submit own timesheet",
    ),
    (
        "timesheets",
        PermissionAction::View,
        PermissionScope::Own,
        "View own timesheets",
    ),
    (
        "timesheets",
        PermissionAction::View,
        PermissionScope::Team,
        "View team timesheets",
    ),
    (
        "timesheets",
        PermissionAction::View,
        PermissionScope::Department,
        "View department timesheets",
    ),
    (
        "timesheets",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all timesheets",
    ),
    (
        "timesheets",
        PermissionAction::Approve,
        PermissionScope::Team,
        "Approve team timesheets",
    ),
    (
        "timesheets",
        PermissionAction::Approve,
        PermissionScope::Department,
        "Approve department timesheets",
    ),
    (
        "timesheets",
        PermissionAction::Approve,
        PermissionScope::Organization,
        "Approve all timesheets",
    ),
    (
        "payroll",
        PermissionAction::View,
        PermissionScope::Own,
        "View own payroll information",
    ),
    (
        "payroll",
        PermissionAction::View,
        PermissionScope::Team,
        "View team payroll",
    ),
    (
        "payroll",
        PermissionAction::View,
        PermissionScope::Organization,
        "View all payroll",
    ),
    (
        "payroll",
        PermissionAction::Run,
        PermissionScope::Organization,
        "Run payroll processing",
    ),
    (
        "payroll",
        PermissionAction::Approve,
        PermissionScope::Organization,
        "Approve payroll runs",
    ),
];
