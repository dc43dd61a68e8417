use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Student,    // 学员
    Instructor, // 讲师
    Admin,      // 管理员
}

/// 角色授予的操作权限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    AddCourse,
    ChangeCourse,
    DeleteCourse,
    ManageSubjects,
}

impl Permission {
    pub fn codename(&self) -> &'static str {
        match self {
            Permission::AddCourse => "courses.add_course",
            Permission::ChangeCourse => "courses.change_course",
            Permission::DeleteCourse => "courses.delete_course",
            Permission::ManageSubjects => "courses.manage_subjects",
        }
    }
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const INSTRUCTOR: &'static str = "instructor";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn instructor_roles() -> &'static [&'static UserRole] {
        &[&Self::Instructor, &Self::Admin]
    }

    /// 角色是否拥有指定权限
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Instructor => matches!(
                permission,
                Permission::AddCourse | Permission::ChangeCourse | Permission::DeleteCourse
            ),
            UserRole::Student => false,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, instructor, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Instructor => write!(f, "{}", UserRole::INSTRUCTOR),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::INSTRUCTOR => Ok(UserRole::Instructor),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.status == UserStatus::Active && self.role.has_permission(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in [UserRole::Student, UserRole::Instructor, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("teacher".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_instructor_permissions() {
        let role = UserRole::Instructor;
        assert!(role.has_permission(Permission::AddCourse));
        assert!(role.has_permission(Permission::ChangeCourse));
        assert!(role.has_permission(Permission::DeleteCourse));
        assert!(!role.has_permission(Permission::ManageSubjects));
    }

    #[test]
    fn test_student_has_no_course_permissions() {
        let role = UserRole::Student;
        assert!(!role.has_permission(Permission::AddCourse));
        assert!(!role.has_permission(Permission::ChangeCourse));
        assert!(!role.has_permission(Permission::DeleteCourse));
    }

    #[test]
    fn test_admin_has_every_permission() {
        for permission in [
            Permission::AddCourse,
            Permission::ChangeCourse,
            Permission::DeleteCourse,
            Permission::ManageSubjects,
        ] {
            assert!(UserRole::Admin.has_permission(permission));
        }
    }

    #[test]
    fn test_permission_codenames() {
        assert_eq!(Permission::AddCourse.codename(), "courses.add_course");
        assert_eq!(Permission::DeleteCourse.codename(), "courses.delete_course");
    }
}
