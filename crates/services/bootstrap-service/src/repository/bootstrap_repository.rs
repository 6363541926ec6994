//! Bootstrap repository: idempotent "get or create" access to every record
//! kind the installation defaults need.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::base::get_or_create;
use super::entities::{
    content_type, directory, language, permission, permission_set, permission_set_grant,
    project, revision, static_page, user,
};
use common::{AppError, AppResult};
use domain::{
    Announcement, ContentType, Directory, Ensured, Language, NewAnnouncement, NewContentType,
    NewDirectory, NewLanguage, NewPermission, NewPermissionSet, NewProject, NewUser, Permission,
    PermissionSet, Project, Revision, User, REVISION_KEY,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Bootstrap repository trait for dependency injection.
///
/// Every `ensure_*` method looks a record up by its natural key and creates
/// it only when missing. Existing records are returned unchanged.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BootstrapRepository: Send + Sync {
    /// Create the global revision counter at zero if absent
    async fn initialize_revision(&self) -> AppResult<Ensured<Revision>>;

    /// Ensure a user keyed by username
    async fn ensure_user(&self, user: NewUser) -> AppResult<Ensured<User>>;

    /// Find user by username
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Ensure a directory keyed by path
    async fn ensure_directory(&self, directory: NewDirectory) -> AppResult<Ensured<Directory>>;

    /// Find directory by path (e.g. `/templates/`)
    async fn find_directory_by_path(&self, pootle_path: &str) -> AppResult<Option<Directory>>;

    /// Ensure a language keyed by code together with the directory it owns.
    ///
    /// Both rows are written in one transaction: a language that cannot be
    /// stored leaves no directory behind.
    async fn ensure_language(
        &self,
        language: NewLanguage,
        directory: NewDirectory,
    ) -> AppResult<(Ensured<Directory>, Ensured<Language>)>;

    /// Find language by code
    async fn find_language_by_code(&self, code: &str) -> AppResult<Option<Language>>;

    /// Ensure a project keyed by code, owning `directory_id`
    async fn ensure_project(
        &self,
        project: NewProject,
        directory_id: Uuid,
    ) -> AppResult<Ensured<Project>>;

    /// Ensure a content type keyed by (app_label, model)
    async fn ensure_content_type(
        &self,
        content_type: NewContentType,
    ) -> AppResult<Ensured<ContentType>>;

    /// Ensure a permission keyed by (content type, codename)
    async fn ensure_permission(&self, permission: NewPermission) -> AppResult<Ensured<Permission>>;

    /// Find permission by content type and codename
    async fn find_permission(
        &self,
        content_type_id: Uuid,
        codename: &str,
    ) -> AppResult<Option<Permission>>;

    /// Ensure a permission set keyed by (user, directory); grants apply only on creation
    async fn ensure_permission_set(
        &self,
        permission_set: NewPermissionSet,
    ) -> AppResult<Ensured<PermissionSet>>;

    /// Find the permission set of a user over a directory
    async fn find_permission_set(
        &self,
        user_id: Uuid,
        directory_id: Uuid,
    ) -> AppResult<Option<PermissionSet>>;

    /// Ensure an announcement keyed by virtual path
    async fn ensure_announcement(
        &self,
        announcement: NewAnnouncement,
    ) -> AppResult<Ensured<Announcement>>;
}

/// Concrete implementation of BootstrapRepository over SeaORM
pub struct BootstrapStore {
    db: DatabaseConnection,
}

impl BootstrapStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BootstrapRepository for BootstrapStore {
    async fn initialize_revision(&self) -> AppResult<Ensured<Revision>> {
        let lookup = Condition::all().add(revision::Column::Key.eq(REVISION_KEY));
        let model = revision::ActiveModel {
            key: Set(REVISION_KEY.to_string()),
            value: Set(0),
        };

        let ensured = get_or_create(&self.db, lookup, model).await?;
        Ok(ensured.map(|m| Revision { value: m.value }))
    }

    async fn ensure_user(&self, new: NewUser) -> AppResult<Ensured<User>> {
        let lookup = Condition::all().add(user::Column::Username.eq(new.username.as_str()));
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new.username),
            full_name: Set(new.full_name),
            is_active: Set(new.is_active),
            password_hash: Set(new.password.into_inner()),
            date_joined: Set(chrono::Utc::now()),
        };

        let ensured = get_or_create(&self.db, lookup, model).await?;
        Ok(ensured.map(User::from))
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn ensure_directory(&self, new: NewDirectory) -> AppResult<Ensured<Directory>> {
        ensure_directory_in(&self.db, new).await
    }

    async fn find_directory_by_path(&self, pootle_path: &str) -> AppResult<Option<Directory>> {
        let result = directory::Entity::find()
            .filter(directory::Column::PootlePath.eq(pootle_path))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Directory::from))
    }

    async fn ensure_language(
        &self,
        new: NewLanguage,
        directory: NewDirectory,
    ) -> AppResult<(Ensured<Directory>, Ensured<Language>)> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        match ensure_language_in(&txn, new, directory).await {
            Ok(ensured) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(ensured)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn find_language_by_code(&self, code: &str) -> AppResult<Option<Language>> {
        let result = language::Entity::find()
            .filter(language::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Language::from))
    }

    async fn ensure_project(
        &self,
        new: NewProject,
        directory_id: Uuid,
    ) -> AppResult<Ensured<Project>> {
        let lookup = Condition::all().add(project::Column::Code.eq(new.code.as_str()));
        let model = project::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(new.code),
            fullname: Set(new.fullname),
            source_language_id: Set(new.source_language_id),
            checkstyle: Set(new.checkstyle),
            localfiletype: Set(new.localfiletype),
            treestyle: Set(new.treestyle),
            directory_id: Set(directory_id),
        };

        let ensured = get_or_create(&self.db, lookup, model).await?;
        Ok(ensured.map(Project::from))
    }

    async fn ensure_content_type(&self, new: NewContentType) -> AppResult<Ensured<ContentType>> {
        let lookup = Condition::all()
            .add(content_type::Column::AppLabel.eq(new.app_label.as_str()))
            .add(content_type::Column::ModelName.eq(new.model.as_str()));
        let model = content_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            app_label: Set(new.app_label),
            model_name: Set(new.model),
            name: Set(new.name),
        };

        let ensured = get_or_create(&self.db, lookup, model).await?;
        Ok(ensured.map(ContentType::from))
    }

    async fn ensure_permission(&self, new: NewPermission) -> AppResult<Ensured<Permission>> {
        let lookup = Condition::all()
            .add(permission::Column::ContentTypeId.eq(new.content_type_id))
            .add(permission::Column::Codename.eq(new.codename.as_str()));
        let model = permission::ActiveModel {
            id: Set(Uuid::new_v4()),
            content_type_id: Set(new.content_type_id),
            codename: Set(new.codename),
            name: Set(new.name),
        };

        let ensured = get_or_create(&self.db, lookup, model).await?;
        Ok(ensured.map(Permission::from))
    }

    async fn find_permission(
        &self,
        content_type_id: Uuid,
        codename: &str,
    ) -> AppResult<Option<Permission>> {
        let result = permission::Entity::find()
            .filter(permission::Column::ContentTypeId.eq(content_type_id))
            .filter(permission::Column::Codename.eq(codename))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Permission::from))
    }

    async fn ensure_permission_set(
        &self,
        new: NewPermissionSet,
    ) -> AppResult<Ensured<PermissionSet>> {
        // The set and its grants become visible together
        let txn = self.db.begin().await.map_err(AppError::from)?;

        match ensure_permission_set_in(&txn, new).await {
            Ok(ensured) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(ensured)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn find_permission_set(
        &self,
        user_id: Uuid,
        directory_id: Uuid,
    ) -> AppResult<Option<PermissionSet>> {
        let model = permission_set::Entity::find()
            .filter(permission_set::Column::UserId.eq(user_id))
            .filter(permission_set::Column::DirectoryId.eq(directory_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match model {
            Some(model) => Ok(Some(load_permission_set(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn ensure_announcement(
        &self,
        new: NewAnnouncement,
    ) -> AppResult<Ensured<Announcement>> {
        let lookup =
            Condition::all().add(static_page::Column::VirtualPath.eq(new.virtual_path.as_str()));
        let model = static_page::ActiveModel {
            id: Set(Uuid::new_v4()),
            virtual_path: Set(new.virtual_path),
            title: Set(new.title),
            body: Set(new.body),
            active: Set(new.active),
        };

        let ensured = get_or_create(&self.db, lookup, model).await?;
        Ok(ensured.map(Announcement::from))
    }
}

async fn ensure_directory_in<C>(db: &C, new: NewDirectory) -> AppResult<Ensured<Directory>>
where
    C: ConnectionTrait,
{
    let lookup = Condition::all().add(directory::Column::PootlePath.eq(new.pootle_path.as_str()));
    let model = directory::ActiveModel {
        id: Set(Uuid::new_v4()),
        parent_id: Set(new.parent_id),
        name: Set(new.name),
        pootle_path: Set(new.pootle_path),
    };

    let ensured = get_or_create(db, lookup, model).await?;
    Ok(ensured.map(Directory::from))
}

async fn ensure_language_in(
    txn: &DatabaseTransaction,
    new: NewLanguage,
    directory: NewDirectory,
) -> AppResult<(Ensured<Directory>, Ensured<Language>)> {
    let directory = ensure_directory_in(txn, directory).await?;

    let nplurals = i32::try_from(new.nplurals).map_err(|_| {
        AppError::validation(format!("nplurals {} out of range for {}", new.nplurals, new.code))
    })?;
    let lookup = Condition::all().add(language::Column::Code.eq(new.code.as_str()));
    let model = language::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(new.code),
        fullname: Set(new.fullname),
        nplurals: Set(nplurals),
        pluralequation: Set(new.pluralequation),
        specialchars: Set(new.specialchars),
        directory_id: Set(directory.record.id),
    };

    let language = get_or_create(txn, lookup, model).await?;
    Ok((directory, language.map(Language::from)))
}

async fn ensure_permission_set_in(
    txn: &DatabaseTransaction,
    new: NewPermissionSet,
) -> AppResult<Ensured<PermissionSet>> {
    let lookup = Condition::all()
        .add(permission_set::Column::UserId.eq(new.user_id))
        .add(permission_set::Column::DirectoryId.eq(new.directory_id));
    let model = permission_set::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        directory_id: Set(new.directory_id),
    };

    let ensured = get_or_create(txn, lookup, model).await?;

    let mut granted = new.positive_permissions;
    granted.sort();
    granted.dedup();
    if ensured.created && !granted.is_empty() {
        let set_id = ensured.record.id;
        let grants = granted
            .into_iter()
            .map(|permission_id| permission_set_grant::ActiveModel {
                permission_set_id: Set(set_id),
                permission_id: Set(permission_id),
            });
        permission_set_grant::Entity::insert_many(grants)
            .exec_without_returning(txn)
            .await
            .map_err(AppError::from)?;
    }

    let created = ensured.created;
    let record = load_permission_set(txn, ensured.record).await?;
    Ok(Ensured { record, created })
}

async fn load_permission_set<C>(db: &C, model: permission_set::Model) -> AppResult<PermissionSet>
where
    C: ConnectionTrait,
{
    let grants = permission_set_grant::Entity::find()
        .filter(permission_set_grant::Column::PermissionSetId.eq(model.id))
        .find_also_related(permission::Entity)
        .all(db)
        .await
        .map_err(AppError::from)?;

    let mut positive_permissions: Vec<String> = grants
        .into_iter()
        .filter_map(|(_, permission)| permission.map(|p| p.codename))
        .collect();
    positive_permissions.sort();

    Ok(PermissionSet {
        id: model.id,
        user_id: model.user_id,
        directory_id: model.directory_id,
        positive_permissions,
    })
}
