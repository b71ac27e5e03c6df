use super::*;

impl AccessEngine {
    /// Returns one employee.
    pub fn employee(&self, employee_id: EmployeeId) -> AppResult<Employee> {
        self.require_employee(employee_id)
    }

    /// Creates or updates an employee; a changed manager is cycle-checked.
    pub async fn upsert_employee(&self, employee: Employee) -> AppResult<Option<Employee>> {
        self.require_organization(employee.organization_id())?;
        self.hierarchy.upsert_employee(employee).await
    }

    /// Removes an employee without direct reports together with its grants.
    pub async fn remove_employee(&self, employee_id: EmployeeId) -> AppResult<Employee> {
        let removed = self.hierarchy.remove_employee(employee_id).await?;
        self.groups.forget_employee(employee_id).await;
        self.matrices.forget_employee(employee_id).await;
        self.permissions.evict(employee_id);
        Ok(removed)
    }

    /// Replaces the employee's manager; `None` makes the employee a root.
    pub async fn set_manager(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> AppResult<ReportingLineChange> {
        self.hierarchy.set_manager(employee_id, manager_id).await
    }

    /// Returns the direct manager of an employee.
    pub fn get_manager(&self, employee_id: EmployeeId) -> AppResult<Option<EmployeeId>> {
        Ok(self.require_employee(employee_id)?.reports_to())
    }

    /// Returns the direct reports of an employee.
    pub fn direct_reports(&self, employee_id: EmployeeId) -> AppResult<Vec<EmployeeId>> {
        self.require_employee(employee_id)?;
        Ok(self.hierarchy.direct_reports(employee_id))
    }

    /// Returns the reporting structure of an organization.
    pub fn org_chart(&self, organization_id: OrganizationId) -> AppResult<OrgChart> {
        let snapshot = self.hierarchy.snapshot(organization_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "organization '{organization_id}' is not provisioned"
            ))
        })?;
        let index = snapshot.index();

        let mut nodes = Vec::with_capacity(snapshot.len());
        for root in index.roots() {
            let subtree = std::iter::once(root).chain(index.descendants(*root));
            for employee_id in subtree {
                let Some(employee) = snapshot.employee(*employee_id) else {
                    continue;
                };
                nodes.push(OrgChartNode {
                    employee_id: *employee_id,
                    email: employee.email().as_str().to_owned(),
                    department_id: employee.department_id(),
                    reports_to: employee.reports_to(),
                    direct_report_count: index.direct_reports(*employee_id).len(),
                });
            }
        }

        Ok(OrgChart {
            organization_id,
            version: snapshot.version(),
            root_employee_ids: index.roots().to_vec(),
            nodes,
        })
    }
}
