use super::*;

impl PostgresAccessStateRepository {
    pub(super) async fn save_group_impl(&self, group: &PermissionGroup) -> AppResult<()> {
        let group_id = group.id();
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO permission_groups (
                id,
                organization_id,
                name,
                name_key,
                description,
                is_system,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                name_key = EXCLUDED.name_key,
                description = EXCLUDED.description,
                is_system = EXCLUDED.is_system
            "#,
        )
        .bind(group_id.as_uuid())
        .bind(group.organization_id().as_uuid())
        .bind(group.name())
        .bind(group.name_key())
        .bind(group.description())
        .bind(group.is_system())
        .bind(group.created_at())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to save group '{group_id}': {error}"))
        })?;

        sqlx::query(
            r#"
            DELETE FROM group_permissions
            WHERE group_id = $1
            "#,
        )
        .bind(group_id.as_uuid())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to clear permissions of group '{group_id}': {error}"
            ))
        })?;

        for code in group.permissions() {
            sqlx::query(
                r#"
                INSERT INTO group_permissions (group_id, permission_code)
                VALUES ($1, $2)
                "#,
            )
            .bind(group_id.as_uuid())
            .bind(code.to_string())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to save permission '{code}' of group '{group_id}': {error}"
                ))
            })?;
        }

        commit(transaction).await
    }

    pub(super) async fn delete_group_impl(&self, group_id: GroupId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM permission_groups
            WHERE id = $1
            "#,
        )
        .bind(group_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete group '{group_id}': {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::GroupNotFound(format!(
                "group '{group_id}' does not exist"
            )));
        }

        Ok(())
    }
}
