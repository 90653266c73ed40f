//! 授权策略
//!
//! 角色 → 可访问的视图/操作，以及每个角色可见的员工数据。
//!
//! | resource             | admin | manager | employee |
//! |----------------------|-------|---------|----------|
//! | dashboard            | ✓     | ✓       | ✓        |
//! | ownProfile           | ✓     | ✓       | ✓        |
//! | timeOffRequest       | ✓     | ✓       | ✓        |
//! | employees            | ✓     | ✓       |          |
//! | teams                | ✓     | ✓       |          |
//! | activity             | ✓     | ✓       |          |
//! | timeOffAdjudication  | ✓     | ✓       |          |
//! | employeeManagement   | ✓     |         |          |
//! | teamManagement       | ✓     |         |          |

use serde::{Deserialize, Serialize};
use shared::error::AuthzError;
use shared::models::{Employee, Role};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;

use crate::auth::CurrentUser;
use crate::db::repository::{RepoResult, employee};
use crate::utils::AppResult;

/// 拒绝访问时的默认落地页
pub const DEFAULT_VIEW: &str = "/dashboard";

/// Guarded views and actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Dashboard,
    OwnProfile,
    Employees,
    EmployeeManagement,
    Teams,
    TeamManagement,
    TimeOffRequest,
    TimeOffAdjudication,
    Activity,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Dashboard,
        Resource::OwnProfile,
        Resource::Employees,
        Resource::EmployeeManagement,
        Resource::Teams,
        Resource::TeamManagement,
        Resource::TimeOffRequest,
        Resource::TimeOffAdjudication,
        Resource::Activity,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::OwnProfile => "ownProfile",
            Resource::Employees => "employees",
            Resource::EmployeeManagement => "employeeManagement",
            Resource::Teams => "teams",
            Resource::TeamManagement => "teamManagement",
            Resource::TimeOffRequest => "timeOffRequest",
            Resource::TimeOffAdjudication => "timeOffAdjudication",
            Resource::Activity => "activity",
        }
    }

    /// Lowest role that may access the resource
    const fn minimum_role(&self) -> Role {
        match self {
            Resource::Dashboard | Resource::OwnProfile | Resource::TimeOffRequest => {
                Role::Employee
            }
            Resource::Employees
            | Resource::Teams
            | Resource::Activity
            | Resource::TimeOffAdjudication => Role::Manager,
            Resource::EmployeeManagement | Resource::TeamManagement => Role::Admin,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResource(pub String);

impl fmt::Display for UnknownResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource: {}", self.0)
    }
}

impl std::error::Error for UnknownResource {}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

fn rank(role: Role) -> u8 {
    match role {
        Role::Employee => 0,
        Role::Manager => 1,
        Role::Admin => 2,
    }
}

/// 角色是否可访问资源
pub fn can_access(role: Role, resource: Resource) -> bool {
    rank(role) >= rank(resource.minimum_role())
}

/// [`can_access`] 的错误形式, 拒绝时带原因和默认落地页
pub fn authorize(role: Role, resource: Resource) -> Result<(), AuthzError> {
    if can_access(role, resource) {
        return Ok(());
    }
    let reason = match resource.minimum_role() {
        Role::Admin => format!("{resource} is restricted to administrators"),
        _ => format!("{resource} requires a manager or administrator role"),
    };
    Err(AuthzError::Denied {
        reason,
        redirect: DEFAULT_VIEW.to_string(),
    })
}

/// 当前用户可见的员工列表
///
/// admin/manager 看到全部；employee 只看到邮箱与自己一致的那一条。
pub async fn visible_employees(pool: &SqlitePool, user: &CurrentUser) -> RepoResult<Vec<Employee>> {
    if can_access(user.role, Resource::Employees) {
        return employee::find_all(pool).await;
    }
    Ok(employee::find_by_email(pool, &user.email)
        .await?
        .into_iter()
        .collect())
}

/// Single-record form of [`visible_employees`]
///
/// 没有 `employees` 权限时先判断归属：别人的 id 和不存在的 id 同样被拒绝。
pub async fn find_visible_employee(
    pool: &SqlitePool,
    user: &CurrentUser,
    id: i64,
) -> AppResult<Option<Employee>> {
    if can_access(user.role, Resource::Employees) {
        return Ok(employee::find_by_id(pool, id).await?);
    }
    match employee::find_by_email(pool, &user.email).await? {
        Some(own) if own.id == id => Ok(Some(own)),
        _ => Err(AuthzError::Denied {
            reason: "You can only view your own employee record".to_string(),
            redirect: DEFAULT_VIEW.to_string(),
        }
        .into()),
    }
}
