use std::collections::BTreeMap;

use scopegate_domain::PermissionCode;

use super::*;

impl PostgresAccessStateRepository {
    pub(super) async fn load_snapshot_impl(&self) -> AppResult<AccessStateSnapshot> {
        let organizations = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM organizations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load organizations: {error}")))?
        .into_iter()
        .map(OrganizationId::from_uuid)
        .collect();

        let employee_rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, organization_id, email, department_id, reports_to_employee_id
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load employees: {error}")))?;

        let employees = employee_rows
            .into_iter()
            .map(|row| {
                let employee = Employee::new(
                    EmployeeId::from_uuid(row.id),
                    OrganizationId::from_uuid(row.organization_id),
                    row.email,
                )
                .map_err(|error| {
                    AppError::Internal(format!("failed to decode employee '{}': {error}", row.id))
                })?;

                Ok(employee
                    .with_department(row.department_id.map(DepartmentId::from_uuid))
                    .with_manager(row.reports_to_employee_id.map(EmployeeId::from_uuid)))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let groups = self.load_groups().await?;

        let memberships = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT employee_id, group_id
            FROM employee_group_assignments
            ORDER BY employee_id, group_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load memberships: {error}")))?
        .into_iter()
        .map(|row| {
            (
                EmployeeId::from_uuid(row.employee_id),
                GroupId::from_uuid(row.group_id),
            )
        })
        .collect();

        let matrices = sqlx::query_as::<_, MatrixRow>(
            r#"
            SELECT employee_id, resource, view_own, edit_own, view_team, edit_team, view_org, edit_org
            FROM employee_resource_matrix
            ORDER BY employee_id, resource
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load resource matrices: {error}")))?
        .into_iter()
        .map(|row| {
            (
                EmployeeId::from_uuid(row.employee_id),
                ResourceMatrixEntry {
                    resource: row.resource,
                    view_own: row.view_own,
                    edit_own: row.edit_own,
                    view_team: row.view_team,
                    edit_team: row.edit_team,
                    view_org: row.view_org,
                    edit_org: row.edit_org,
                },
            )
        })
        .collect();

        Ok(AccessStateSnapshot {
            organizations,
            employees,
            groups,
            memberships,
            matrices,
        })
    }

    async fn load_groups(&self) -> AppResult<Vec<PermissionGroup>> {
        let group_rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, organization_id, name, description, is_system, created_at
            FROM permission_groups
            ORDER BY organization_id, name_key
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load permission groups: {error}")))?;

        let permission_rows = sqlx::query_as::<_, GroupPermissionRow>(
            r#"
            SELECT group_id, permission_code
            FROM group_permissions
            ORDER BY group_id, permission_code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load group permissions: {error}")))?;

        let mut permissions: BTreeMap<Uuid, BTreeSet<PermissionCode>> = BTreeMap::new();
        for row in permission_rows {
            // Codes are checked against the catalog when the engine hydrates.
            let code = row.permission_code.parse::<PermissionCode>()?;
            permissions.entry(row.group_id).or_default().insert(code);
        }

        group_rows
            .into_iter()
            .map(|row| {
                let group = PermissionGroup::new(
                    GroupId::from_uuid(row.id),
                    OrganizationId::from_uuid(row.organization_id),
                    row.name,
                    row.description,
                )
                .map_err(|error| {
                    AppError::Internal(format!("failed to decode group '{}': {error}", row.id))
                })?;

                Ok(group
                    .with_permissions(permissions.remove(&row.id).unwrap_or_default())
                    .with_system_flag(row.is_system)
                    .with_created_at(row.created_at))
            })
            .collect()
    }
}
