use crate::auth::password::hash_password;
use crate::auth::provider::IdentityProvider;
use crate::domain::auth::CurrentUser;
use crate::domain::user::{NewUser, User, UserListQuery, UserRole};
use crate::forms::users::{CreateUserForm, UpdateUserForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// List every user. Admin only.
pub fn list_users<R>(repo: &R, user: &CurrentUser) -> ServiceResult<(usize, Vec<User>)>
where
    R: UserReader + ?Sized,
{
    ensure_admin(user)?;

    repo.list_users(UserListQuery::new())
        .map_err(ServiceError::from)
}

/// Fetch one user with their store-access list. Admin only.
pub fn get_user<R>(repo: &R, user: &CurrentUser, user_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    ensure_admin(user)?;

    repo.get_user_by_id(user_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Create a user: register with the identity provider first, then mirror
/// the local record with an argon2-hashed fallback credential and the
/// requested store grants.
pub async fn create_user<R>(
    repo: &R,
    provider: &IdentityProvider,
    user: &CurrentUser,
    form: CreateUserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(user)?;

    let name = form
        .normalized_name()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_user_by_email(&form.email)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    provider.admin_create_user(&form.email, &form.password).await?;

    let password_hash =
        hash_password(&form.password).map_err(|err| ServiceError::Internal(err.to_string()))?;

    let new_user = NewUser::new(form.email, password_hash, name).with_role(form.role);
    let mut created = repo.create_user(&new_user).map_err(ServiceError::from)?;

    if form.role == UserRole::User && !form.store_ids.is_empty() {
        created.store_ids = repo
            .set_store_access(created.id, &form.store_ids)
            .map_err(ServiceError::from)?;
    }

    Ok(created)
}

/// Update a user's profile, role and store-access list. The grant list is
/// replaced wholesale. Admin only.
pub fn update_user<R>(
    repo: &R,
    user: &CurrentUser,
    user_id: i32,
    form: UpdateUserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(user)?;

    let (update, store_ids) = form
        .into_update_user()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut updated = repo
        .update_user(user_id, &update)
        .map_err(ServiceError::from)?;

    let grants = if updated.role == UserRole::Admin {
        // Admins carry no grants; membership would be dead data.
        Vec::new()
    } else {
        store_ids
    };

    updated.store_ids = repo
        .set_store_access(user_id, &grants)
        .map_err(ServiceError::from)?;

    Ok(updated)
}

/// Delete a user's local record (cascading grants), then best-effort remove
/// the provider account. Admin only; self-deletion is refused.
pub async fn delete_user<R>(
    repo: &R,
    provider: &IdentityProvider,
    user: &CurrentUser,
    user_id: i32,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(user)?;

    if user.id == user_id {
        return Err(ServiceError::Form(
            "you cannot delete your own account".to_string(),
        ));
    }

    let target = repo
        .get_user_by_id(user_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_user(user_id).map_err(ServiceError::from)?;

    // The local row is already gone; a provider failure is logged, never
    // surfaced.
    if let Err(err) = provider.admin_delete_user(&target.email).await {
        log::warn!("provider account cleanup failed for {}: {err}", target.email);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::user::{
        NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, UserListQuery,
    };
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockUserReader, MockUserWriter};

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2026, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    struct MockRepo {
        reader: MockUserReader,
        writer: MockUserWriter,
    }

    impl MockRepo {
        fn new() -> Self {
            Self {
                reader: MockUserReader::new(),
                writer: MockUserWriter::new(),
            }
        }
    }

    impl UserReader for MockRepo {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
            self.reader.get_user_by_id(id)
        }

        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
            self.reader.get_user_by_email(email)
        }

        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
            self.reader.list_users(query)
        }
    }

    impl UserWriter for MockRepo {
        fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<User> {
            self.writer.create_user(new_user)
        }

        fn update_user(
            &self,
            user_id: i32,
            updates: &DomainUpdateUser,
        ) -> RepositoryResult<User> {
            self.writer.update_user(user_id, updates)
        }

        fn delete_user(&self, user_id: i32) -> RepositoryResult<()> {
            self.writer.delete_user(user_id)
        }

        fn set_store_access(&self, user_id: i32, store_ids: &[i32]) -> RepositoryResult<Vec<i32>> {
            self.writer.set_store_access(user_id, store_ids)
        }
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: 1,
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            store_ids: Vec::new(),
        }
    }

    fn member() -> CurrentUser {
        CurrentUser {
            id: 2,
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            role: UserRole::User,
            store_ids: vec![1],
        }
    }

    fn sample_user(id: i32, role: UserRole) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            name: format!("User {id}"),
            role,
            store_ids: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn list_users_requires_admin() {
        let repo = MockRepo::new();

        let result = list_users(&repo, &member());

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn update_user_replaces_store_access_wholesale() {
        let mut repo = MockRepo::new();

        repo.writer
            .expect_update_user()
            .times(1)
            .returning(|id, _| Ok(sample_user(id, UserRole::User)));
        repo.writer
            .expect_set_store_access()
            .times(1)
            .withf(|user_id, store_ids| {
                assert_eq!(*user_id, 5);
                assert_eq!(store_ids, [2, 4]);
                true
            })
            .returning(|_, store_ids| Ok(store_ids.to_vec()));

        let form = UpdateUserForm {
            name: "Renamed".to_string(),
            role: UserRole::User,
            store_ids: vec![2, 4],
        };

        let updated = update_user(&repo, &admin(), 5, form).expect("expected success");

        assert_eq!(updated.store_ids, vec![2, 4]);
    }

    #[test]
    fn update_user_promoted_to_admin_drops_grants() {
        let mut repo = MockRepo::new();

        repo.writer
            .expect_update_user()
            .times(1)
            .returning(|id, _| Ok(sample_user(id, UserRole::Admin)));
        repo.writer
            .expect_set_store_access()
            .times(1)
            .withf(|_, store_ids| store_ids.is_empty())
            .returning(|_, store_ids| Ok(store_ids.to_vec()));

        let form = UpdateUserForm {
            name: "Promoted".to_string(),
            role: UserRole::Admin,
            store_ids: vec![2, 4],
        };

        let updated = update_user(&repo, &admin(), 5, form).expect("expected success");

        assert!(updated.store_ids.is_empty());
    }
}
