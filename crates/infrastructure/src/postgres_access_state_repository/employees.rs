use super::*;

impl PostgresAccessStateRepository {
    pub(super) async fn save_employee_impl(&self, employee: &Employee) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, organization_id, email, department_id, reports_to_employee_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email,
                department_id = EXCLUDED.department_id,
                reports_to_employee_id = EXCLUDED.reports_to_employee_id,
                updated_at = NOW()
            "#,
        )
        .bind(employee.id().as_uuid())
        .bind(employee.organization_id().as_uuid())
        .bind(employee.email().as_str())
        .bind(employee.department_id().map(|department_id| department_id.as_uuid()))
        .bind(employee.reports_to().map(|manager_id| manager_id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save employee '{}': {error}",
                employee.id()
            ))
        })?;

        Ok(())
    }

    pub(super) async fn delete_employee_impl(&self, employee_id: EmployeeId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM employees
            WHERE id = $1
            "#,
        )
        .bind(employee_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete employee '{employee_id}': {error}"
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::EmployeeNotFound(format!(
                "employee '{employee_id}' does not exist"
            )));
        }

        Ok(())
    }

    pub(super) async fn save_reporting_line_impl(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE employees
            SET reports_to_employee_id = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(employee_id.as_uuid())
        .bind(manager_id.map(|manager_id| manager_id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save reporting line of '{employee_id}': {error}"
            ))
        })?;

        Ok(())
    }

    pub(super) async fn replace_employee_groups_impl(
        &self,
        employee_id: EmployeeId,
        group_ids: &BTreeSet<GroupId>,
    ) -> AppResult<()> {
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM employee_group_assignments
            WHERE employee_id = $1
            "#,
        )
        .bind(employee_id.as_uuid())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to clear memberships of '{employee_id}': {error}"
            ))
        })?;

        for group_id in group_ids {
            sqlx::query(
                r#"
                INSERT INTO employee_group_assignments (employee_id, group_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(employee_id.as_uuid())
            .bind(group_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to assign group '{group_id}' to '{employee_id}': {error}"
                ))
            })?;
        }

        commit(transaction).await
    }

    pub(super) async fn replace_resource_matrix_impl(
        &self,
        employee_id: EmployeeId,
        entries: &[ResourceMatrixEntry],
    ) -> AppResult<()> {
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM employee_resource_matrix
            WHERE employee_id = $1
            "#,
        )
        .bind(employee_id.as_uuid())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to clear resource matrix of '{employee_id}': {error}"
            ))
        })?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO employee_resource_matrix (
                    employee_id,
                    resource,
                    view_own,
                    edit_own,
                    view_team,
                    edit_team,
                    view_org,
                    edit_org
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(employee_id.as_uuid())
            .bind(entry.resource.as_str())
            .bind(entry.view_own)
            .bind(entry.edit_own)
            .bind(entry.view_team)
            .bind(entry.edit_team)
            .bind(entry.view_org)
            .bind(entry.edit_org)
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to save matrix row '{}' of '{employee_id}': {error}",
                    entry.resource
                ))
            })?;
        }

        commit(transaction).await
    }
}
