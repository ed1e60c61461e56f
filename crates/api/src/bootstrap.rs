//! Startup seeding.
//!
//! Seeding is an explicit startup step invoked from `main`, not a side
//! effect of loading some module; it runs after migrations and before the
//! server accepts traffic.

use warraq_core::permissions::{superadmin_matrix, user_matrix, ROLE_SUPER_ADMIN, ROLE_USER};
use warraq_db::repositories::RoleRepo;
use warraq_db::DbPool;

/// Ensure the two built-in roles exist, by name. Re-running is a no-op, so
/// every boot converges to the same seeded state.
pub async fn seed_roles(pool: &DbPool) -> Result<(), sqlx::Error> {
    for (name, matrix) in [
        (ROLE_SUPER_ADMIN, superadmin_matrix()),
        (ROLE_USER, user_matrix()),
    ] {
        if RoleRepo::find_by_name(pool, name).await?.is_none() {
            RoleRepo::create_immutable(pool, name, &matrix).await?;
            tracing::info!(role = name, "Seeded built-in role");
        }
    }
    Ok(())
}

/// Look up the id of the default role assigned to new registrations.
pub async fn default_role_id(pool: &DbPool) -> Result<Option<i64>, sqlx::Error> {
    Ok(RoleRepo::find_by_name(pool, ROLE_USER).await?.map(|r| r.id))
}
