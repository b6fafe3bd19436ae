/// Environment entity module
pub mod environment;
/// Environment type entity module
pub mod environment_type;
/// Organization entity module
pub mod organization;
/// Project entity module
pub mod project;
/// Project member entity module
pub mod project_member;
/// Role entity module
pub mod role;
/// Rights matrix entity module
pub mod roles_environment_type;
/// User entity module
pub mod user;

pub use environment::Entity as Environment;
pub use environment_type::Entity as EnvironmentType;
pub use organization::Entity as Organization;
pub use project::Entity as Project;
pub use project_member::Entity as ProjectMember;
pub use role::Entity as Role;
pub use roles_environment_type::Entity as RolesEnvironmentType;
pub use user::Entity as User;
