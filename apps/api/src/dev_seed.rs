use scopegate_core::{AppError, AppResult, DepartmentId, EmployeeId, OrganizationId};
use scopegate_domain::{Employee, ResourceMatrixEntry, SystemGroupTemplate};
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

const DEV_SEED_ORGANIZATION_ID: &str = "11111111-1111-1111-1111-111111111111";
const DEV_SEED_ENGINEERING_ID: &str = "22222222-2222-2222-2222-222222222222";

const DEV_SEED_ADMIN_ID: &str = "a2c8ea5f-4f39-4724-97f5-932f97f54f76";
const DEV_SEED_ADMIN_EMAIL: &str = "admin@scopegate.local";
const DEV_SEED_HR_ID: &str = "5b0f3c1e-8d4a-4c2b-9e6f-1a7d3c9b2e40";
const DEV_SEED_HR_EMAIL: &str = "hr@scopegate.local";
const DEV_SEED_LEAD_ID: &str = "c4e1a9d2-3f6b-4e8a-b1c7-5d2f8e0a6b13";
const DEV_SEED_LEAD_EMAIL: &str = "lead@scopegate.local";
const DEV_SEED_ENGINEER_ID: &str = "96d11e90-7403-4654-9727-cb1043f8bd31";
const DEV_SEED_ENGINEER_EMAIL: &str = "engineer@scopegate.local";

/// Seeds a small demo organization: admin, HR, a team lead and one engineer.
pub async fn run(app_state: &AppState) -> AppResult<()> {
    let service = &app_state.access_admin_service;
    let engine = service.engine();

    let organization_id = OrganizationId::from_uuid(parse_uuid_const(
        DEV_SEED_ORGANIZATION_ID,
        "DEV_SEED_ORGANIZATION_ID",
    )?);
    let engineering = DepartmentId::from_uuid(parse_uuid_const(
        DEV_SEED_ENGINEERING_ID,
        "DEV_SEED_ENGINEERING_ID",
    )?);
    let admin_id = seed_employee_id(DEV_SEED_ADMIN_ID, "DEV_SEED_ADMIN_ID")?;
    let hr_id = seed_employee_id(DEV_SEED_HR_ID, "DEV_SEED_HR_ID")?;
    let lead_id = seed_employee_id(DEV_SEED_LEAD_ID, "DEV_SEED_LEAD_ID")?;
    let engineer_id = seed_employee_id(DEV_SEED_ENGINEER_ID, "DEV_SEED_ENGINEER_ID")?;

    service.provision_organization(organization_id).await?;

    let employees = [
        Employee::new(admin_id, organization_id, DEV_SEED_ADMIN_EMAIL)?,
        Employee::new(hr_id, organization_id, DEV_SEED_HR_EMAIL)?.with_manager(Some(admin_id)),
        Employee::new(lead_id, organization_id, DEV_SEED_LEAD_EMAIL)?
            .with_department(Some(engineering))
            .with_manager(Some(admin_id)),
        Employee::new(engineer_id, organization_id, DEV_SEED_ENGINEER_EMAIL)?
            .with_department(Some(engineering))
            .with_manager(Some(lead_id)),
    ];
    for employee in employees {
        engine.upsert_employee(employee).await?;
    }

    let groups = engine.list_groups(organization_id);
    let system_group = |template: SystemGroupTemplate| {
        groups
            .iter()
            .find(|group| group.name() == template.name())
            .map(|group| group.id())
            .ok_or_else(|| {
                AppError::Internal(format!("system group '{}' is missing", template.name()))
            })
    };
    let basic = system_group(SystemGroupTemplate::EmployeeBasic)?;
    let hr = system_group(SystemGroupTemplate::OrgHr)?;
    let admin = system_group(SystemGroupTemplate::OrgAdminFull)?;

    engine.set_employee_groups(admin_id, [admin, basic]).await?;
    engine.set_employee_groups(hr_id, [hr, basic]).await?;
    engine.set_employee_groups(lead_id, [basic]).await?;
    engine.set_employee_groups(engineer_id, [basic]).await?;

    engine
        .set_matrix(
            lead_id,
            vec![ResourceMatrixEntry {
                view_team: true,
                edit_team: true,
                ..ResourceMatrixEntry::new("employees")
            }],
        )
        .await?;

    info!(
        organization_id = %organization_id,
        admin_id = %admin_id,
        engineer_id = %engineer_id,
        "dev seed applied"
    );
    Ok(())
}

fn seed_employee_id(value: &str, name: &str) -> AppResult<EmployeeId> {
    parse_uuid_const(value, name).map(EmployeeId::from_uuid)
}

fn parse_uuid_const(value: &str, name: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|error| {
        AppError::Internal(format!("invalid static uuid '{name}={value}': {error}"))
    })
}
