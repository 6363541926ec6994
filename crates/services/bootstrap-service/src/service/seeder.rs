//! Seeder - Creates the records every installation needs.
//!
//! Each step only adds what is missing, so running the seeder again after a
//! partial failure finishes the job without touching existing records.

use std::fmt::Display;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use common::{AppResult, OptionExt};
use domain::{
    Directory, Ensured, Language, NewAnnouncement, NewContentType, NewDirectory, NewLanguage,
    NewPermission, NewPermissionSet, NewProject, NewUser, Permission, DIRECTORY_PERMISSIONS,
    LANGUAGE_TEMPLATES, PERMISSION_SUGGEST, PERMISSION_TRANSLATE, PERMISSION_VIEW,
    PROJECTS_DIRECTORY_NAME, PROJECT_TUTORIAL, USERNAME_DEFAULT, USERNAME_NOBODY, USERNAME_SYSTEM,
};

use crate::catalog::LanguageCatalog;
use crate::repository::BootstrapRepository;

/// What to seed besides the records that are always required.
#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    /// Seed the terminology and tutorial projects
    pub create_projects: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            create_projects: true,
        }
    }
}

/// Created vs. already present records of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub created: u32,
    pub existing: u32,
}

impl Tally {
    pub fn total(&self) -> u32 {
        self.created + self.existing
    }

    fn count<T>(&mut self, ensured: &Ensured<T>) {
        if ensured.created {
            self.created += 1;
        } else {
            self.existing += 1;
        }
    }
}

/// A catalog entry the bulk import could not store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLanguage {
    pub code: String,
    pub reason: String,
}

/// Outcome of the bulk language import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageImport {
    pub created: u32,
    pub existing: u32,
    pub skipped: Vec<SkippedLanguage>,
}

/// Summary of one seeder run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub revision_initialized: bool,
    pub users: Tally,
    pub directories: Tally,
    pub languages: Tally,
    pub projects: Tally,
    pub content_types: Tally,
    pub permissions: Tally,
    pub permission_sets: Tally,
    pub announcements: Tally,
    pub language_import: LanguageImport,
}

impl SeedReport {
    /// Records created by this run, bulk import included
    pub fn created(&self) -> u32 {
        let tallies = [
            self.users,
            self.directories,
            self.languages,
            self.projects,
            self.content_types,
            self.permissions,
            self.permission_sets,
            self.announcements,
        ];
        tallies.iter().map(|t| t.created).sum::<u32>()
            + self.language_import.created
            + u32::from(self.revision_initialized)
    }
}

/// Log the outcome of one ensure call.
fn log_ensured<T: Display>(kind: &str, ensured: &Ensured<T>) {
    if ensured.created {
        debug!("Created {}: '{}'", kind, ensured.record);
    } else {
        debug!("{} already exists - skipping: '{}'", kind, ensured.record);
    }
}

/// Runs the ordered seeding steps against a repository.
pub struct Seeder {
    repo: Arc<dyn BootstrapRepository>,
    catalog: Arc<dyn LanguageCatalog>,
}

impl Seeder {
    /// Create new seeder with repository and language catalog
    pub fn new(repo: Arc<dyn BootstrapRepository>, catalog: Arc<dyn LanguageCatalog>) -> Self {
        Self { repo, catalog }
    }

    /// Seed every default record.
    ///
    /// # Errors
    /// Any failure before the bulk language import aborts the run. Failures
    /// for single catalog entries are reported in
    /// [`SeedReport::language_import`] instead.
    #[instrument(skip(self))]
    pub async fn seed(&self, options: SeedOptions) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        info!("Initializing revision counter");
        let revision = self.repo.initialize_revision().await?;
        log_ensured("Revision", &revision);
        report.revision_initialized = revision.created;

        info!("Creating essential users");
        self.create_essential_users(&mut report).await?;

        info!("Creating root directories");
        let (root, projects_dir) = self.create_root_directories(&mut report).await?;

        info!("Creating template languages");
        let english = self.create_template_languages(&root, &mut report).await?;

        if options.create_projects {
            info!("Creating terminology project");
            self.ensure_project(NewProject::terminology(english.id), &projects_dir, &mut report)
                .await?;
        }

        info!("Creating permissions");
        let permissions = self.create_permissions(&mut report).await?;

        info!("Creating permission sets");
        self.create_permission_sets(&root, &permissions, &mut report)
            .await?;

        if options.create_projects {
            info!("Creating default projects");
            self.create_default_projects(&english, &projects_dir, &mut report)
                .await?;
        }

        info!("Importing default languages");
        self.import_languages(&root, &mut report).await;

        info!(
            created = report.created(),
            skipped = report.language_import.skipped.len(),
            "Bootstrap complete"
        );
        Ok(report)
    }

    async fn create_essential_users(&self, report: &mut SeedReport) -> AppResult<()> {
        let users = [
            (USERNAME_NOBODY, "any anonymous user"),
            (USERNAME_DEFAULT, "any authenticated user"),
            (USERNAME_SYSTEM, "system user"),
        ];

        for (username, full_name) in users {
            let user = self
                .repo
                .ensure_user(NewUser::service_account(username, full_name))
                .await?;
            log_ensured("User", &user);
            report.users.count(&user);
        }
        Ok(())
    }

    async fn ensure_directory(
        &self,
        new: NewDirectory,
        report: &mut SeedReport,
    ) -> AppResult<Directory> {
        let directory = self.repo.ensure_directory(new).await?;
        log_ensured("Directory", &directory);
        report.directories.count(&directory);
        Ok(directory.into_record())
    }

    async fn create_root_directories(
        &self,
        report: &mut SeedReport,
    ) -> AppResult<(Directory, Directory)> {
        let root = self.ensure_directory(NewDirectory::root(), report).await?;
        let projects = NewDirectory::child_of(&root, PROJECTS_DIRECTORY_NAME)?;
        let projects = self.ensure_directory(projects, report).await?;
        Ok((root, projects))
    }

    /// Ensure a language together with its `/<code>/` directory.
    async fn ensure_language(
        &self,
        language: NewLanguage,
        root: &Directory,
    ) -> AppResult<(Ensured<Directory>, Ensured<Language>)> {
        let directory = NewDirectory::child_of(root, language.code.as_str())?;
        let (directory, language) = self.repo.ensure_language(language, directory).await?;
        log_ensured("Directory", &directory);
        log_ensured("Language", &language);
        Ok((directory, language))
    }

    /// Returns English, the source language of the default projects.
    async fn create_template_languages(
        &self,
        root: &Directory,
        report: &mut SeedReport,
    ) -> AppResult<Language> {
        let mut english = None;
        for language in [NewLanguage::templates(), NewLanguage::english()] {
            let (directory, language) = self.ensure_language(language, root).await?;
            report.directories.count(&directory);
            report.languages.count(&language);
            english = Some(language.into_record());
        }
        english.ok_or_not_found("Language")
    }

    async fn ensure_project(
        &self,
        project: NewProject,
        projects_dir: &Directory,
        report: &mut SeedReport,
    ) -> AppResult<()> {
        let directory = NewDirectory::child_of(projects_dir, project.code.as_str())?;
        let directory = self.ensure_directory(directory, report).await?;

        let project = self.repo.ensure_project(project, directory.id).await?;
        log_ensured("Project", &project);
        report.projects.count(&project);
        Ok(())
    }

    async fn create_permissions(&self, report: &mut SeedReport) -> AppResult<Vec<Permission>> {
        let content_type = self
            .repo
            .ensure_content_type(NewContentType::directory())
            .await?;
        log_ensured("ContentType", &content_type);
        report.content_types.count(&content_type);
        let content_type_id = content_type.record.id;

        let mut permissions = Vec::with_capacity(DIRECTORY_PERMISSIONS.len());
        for (codename, name) in DIRECTORY_PERMISSIONS {
            let permission = self
                .repo
                .ensure_permission(NewPermission {
                    content_type_id,
                    codename: codename.to_string(),
                    name: name.to_string(),
                })
                .await?;
            log_ensured("Permission", &permission);
            report.permissions.count(&permission);
            permissions.push(permission.into_record());
        }
        Ok(permissions)
    }

    async fn create_permission_sets(
        &self,
        root: &Directory,
        permissions: &[Permission],
        report: &mut SeedReport,
    ) -> AppResult<()> {
        let nobody = self
            .repo
            .find_user_by_username(USERNAME_NOBODY)
            .await?
            .ok_or_not_found("User 'nobody'")?;
        let default = self
            .repo
            .find_user_by_username(USERNAME_DEFAULT)
            .await?
            .ok_or_not_found("User 'default'")?;
        let templates_path = root.child_path(LANGUAGE_TEMPLATES);
        let templates = self
            .repo
            .find_directory_by_path(&templates_path)
            .await?
            .ok_or_not_found(format!("Directory '{}'", templates_path))?;

        let pick = |codenames: &[&str]| -> AppResult<Vec<uuid::Uuid>> {
            codenames
                .iter()
                .map(|codename| {
                    permissions
                        .iter()
                        .find(|p| p.codename == *codename)
                        .map(|p| p.id)
                        .ok_or_not_found(format!("Permission '{}'", codename))
                })
                .collect()
        };

        let sets = [
            (nobody.id, root.id, pick(&[PERMISSION_VIEW, PERMISSION_SUGGEST])?),
            (
                default.id,
                root.id,
                pick(&[PERMISSION_VIEW, PERMISSION_SUGGEST, PERMISSION_TRANSLATE])?,
            ),
            (nobody.id, templates.id, Vec::new()),
            (default.id, templates.id, Vec::new()),
        ];

        for (user_id, directory_id, positive_permissions) in sets {
            let set = self
                .repo
                .ensure_permission_set(NewPermissionSet {
                    user_id,
                    directory_id,
                    positive_permissions,
                })
                .await?;
            log_ensured("PermissionSet", &set);
            report.permission_sets.count(&set);
        }
        Ok(())
    }

    async fn create_default_projects(
        &self,
        english: &Language,
        projects_dir: &Directory,
        report: &mut SeedReport,
    ) -> AppResult<()> {
        self.ensure_project(NewProject::tutorial(english.id), projects_dir, report)
            .await?;

        let announcement = self
            .repo
            .ensure_announcement(NewAnnouncement::tutorial_instructions(PROJECT_TUTORIAL))
            .await?;
        log_ensured("StaticPage", &announcement);
        report.announcements.count(&announcement);
        Ok(())
    }

    /// Import every catalog language. Never fails: entries that cannot be
    /// resolved or stored are reported as skipped.
    async fn import_languages(&self, root: &Directory, report: &mut SeedReport) {
        let mut import = LanguageImport::default();

        for code in self.catalog.codes() {
            let outcome = match self.catalog.resolve(&code) {
                Ok(language) => self
                    .ensure_language(language, root)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok((directory, language)) => {
                    report.directories.count(&directory);
                    if language.created {
                        import.created += 1;
                    } else {
                        import.existing += 1;
                    }
                }
                Err(reason) => {
                    debug!(code = %code, reason = %reason, "Skipping language");
                    import.skipped.push(SkippedLanguage { code, reason });
                }
            }
        }

        if import.skipped.is_empty() {
            info!(
                created = import.created,
                existing = import.existing,
                "Default languages imported"
            );
        } else {
            warn!(
                created = import.created,
                existing = import.existing,
                skipped = import.skipped.len(),
                "Default languages imported with skipped entries"
            );
        }
        report.language_import = import;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, LanguageMetadata};
    use crate::repository::MockBootstrapRepository;
    use common::AppError;
    use domain::{
        Announcement, ContentType, PermissionSet, Project, Revision, User, ROOT_PATH,
    };
    use uuid::Uuid;

    struct FixedCatalog(Vec<(&'static str, Option<LanguageMetadata>)>);

    impl LanguageCatalog for FixedCatalog {
        fn codes(&self) -> Vec<String> {
            self.0.iter().map(|(code, _)| code.to_string()).collect()
        }

        fn lookup(&self, code: &str) -> Result<LanguageMetadata, CatalogError> {
            self.0
                .iter()
                .find(|(c, _)| *c == code)
                .and_then(|(_, metadata)| metadata.clone())
                .ok_or_else(|| CatalogError::UnknownLanguage(code.to_string()))
        }
    }

    fn empty_catalog() -> Arc<dyn LanguageCatalog> {
        Arc::new(FixedCatalog(Vec::new()))
    }

    fn german() -> LanguageMetadata {
        LanguageMetadata {
            fullname: Some("German".to_string()),
            nplurals: Some(2),
            pluralequation: Some("(n != 1)".to_string()),
            specialchars: None,
        }
    }

    fn user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            full_name: username.to_string(),
            is_active: true,
            password_hash: "!unusable".to_string(),
            date_joined: chrono::Utc::now(),
        }
    }

    fn directory(new: NewDirectory) -> Directory {
        Directory {
            id: Uuid::new_v4(),
            parent_id: new.parent_id,
            name: new.name,
            pootle_path: new.pootle_path,
        }
    }

    fn language(new: NewLanguage, directory: NewDirectory) -> (Ensured<Directory>, Ensured<Language>) {
        let directory = self::directory(directory);
        let language = Language {
            id: Uuid::new_v4(),
            code: new.code,
            fullname: new.fullname,
            nplurals: new.nplurals,
            pluralequation: new.pluralequation,
            specialchars: new.specialchars,
            directory_id: directory.id,
        };
        (Ensured::created(directory), Ensured::created(language))
    }

    /// Mock that creates everything up to the permission sets.
    fn mock_through_permissions() -> MockBootstrapRepository {
        let mut repo = MockBootstrapRepository::new();
        repo.expect_initialize_revision()
            .times(1)
            .returning(|| Ok(Ensured::created(Revision { value: 0 })));
        repo.expect_ensure_user()
            .times(3)
            .returning(|new| Ok(Ensured::created(user(&new.username))));
        repo.expect_ensure_directory()
            .returning(|new| Ok(Ensured::created(directory(new))));
        repo.expect_ensure_language()
            .returning(|new, directory| Ok(language(new, directory)));
        repo.expect_ensure_content_type().times(1).returning(|new| {
            Ok(Ensured::created(ContentType {
                id: Uuid::new_v4(),
                app_label: new.app_label,
                model: new.model,
                name: new.name,
            }))
        });
        repo.expect_ensure_permission().times(6).returning(|new| {
            Ok(Ensured::created(Permission {
                id: Uuid::new_v4(),
                content_type_id: new.content_type_id,
                codename: new.codename,
                name: new.name,
            }))
        });
        repo
    }

    fn expect_permission_sets(repo: &mut MockBootstrapRepository) {
        repo.expect_find_user_by_username()
            .returning(|username| Ok(Some(user(username))));
        repo.expect_find_directory_by_path()
            .withf(|path| path.to_string() == "/templates/")
            .returning(|path| {
                Ok(Some(Directory {
                    id: Uuid::new_v4(),
                    parent_id: Some(Uuid::new_v4()),
                    name: LANGUAGE_TEMPLATES.to_string(),
                    pootle_path: path.to_string(),
                }))
            });
        repo.expect_ensure_permission_set()
            .times(4)
            .returning(|new| {
                Ok(Ensured::created(PermissionSet {
                    id: Uuid::new_v4(),
                    user_id: new.user_id,
                    directory_id: new.directory_id,
                    positive_permissions: Vec::new(),
                }))
            });
    }

    #[tokio::test]
    async fn test_seed_without_projects() {
        let mut repo = mock_through_permissions();
        expect_permission_sets(&mut repo);
        repo.expect_ensure_project().never();
        repo.expect_ensure_announcement().never();

        let seeder = Seeder::new(Arc::new(repo), empty_catalog());
        let report = seeder
            .seed(SeedOptions {
                create_projects: false,
            })
            .await
            .unwrap();

        assert!(report.revision_initialized);
        assert_eq!(report.users.created, 3);
        // root, projects, templates, en
        assert_eq!(report.directories.created, 4);
        assert_eq!(report.languages.created, 2);
        assert_eq!(report.permissions.created, 6);
        assert_eq!(report.permission_sets.created, 4);
        assert_eq!(report.projects.total(), 0);
        assert_eq!(report.announcements.total(), 0);
    }

    #[tokio::test]
    async fn test_seed_with_projects() {
        let mut repo = mock_through_permissions();
        expect_permission_sets(&mut repo);
        repo.expect_ensure_project()
            .times(2)
            .returning(|new, directory_id| {
                Ok(Ensured::created(Project {
                    id: Uuid::new_v4(),
                    code: new.code,
                    fullname: new.fullname,
                    source_language_id: new.source_language_id,
                    checkstyle: new.checkstyle,
                    localfiletype: new.localfiletype,
                    treestyle: new.treestyle,
                    directory_id,
                }))
            });
        repo.expect_ensure_announcement()
            .withf(|new| new.virtual_path == "announcements/projects/tutorial")
            .times(1)
            .returning(|new| {
                Ok(Ensured::created(Announcement {
                    id: Uuid::new_v4(),
                    virtual_path: new.virtual_path,
                    title: new.title,
                    body: new.body,
                    active: new.active,
                }))
            });

        let seeder = Seeder::new(Arc::new(repo), empty_catalog());
        let report = seeder.seed(SeedOptions::default()).await.unwrap();

        assert_eq!(report.projects.created, 2);
        assert_eq!(report.announcements.created, 1);
        // root, projects, templates, en, terminology, tutorial
        assert_eq!(report.directories.created, 6);
    }

    #[tokio::test]
    async fn test_missing_templates_directory_aborts() {
        let mut repo = mock_through_permissions();
        repo.expect_find_user_by_username()
            .returning(|username| Ok(Some(user(username))));
        repo.expect_find_directory_by_path().returning(|_| Ok(None));
        repo.expect_ensure_permission_set().never();
        repo.expect_ensure_project().never();
        repo.expect_ensure_announcement().never();

        let catalog: Arc<dyn LanguageCatalog> = Arc::new(FixedCatalog(vec![("de", Some(german()))]));
        let seeder = Seeder::new(Arc::new(repo), catalog);
        let result = seeder
            .seed(SeedOptions {
                create_projects: false,
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_user_failure_aborts_before_directories() {
        let mut repo = MockBootstrapRepository::new();
        repo.expect_initialize_revision()
            .returning(|| Ok(Ensured::existing(Revision { value: 7 })));
        repo.expect_ensure_user()
            .times(1)
            .returning(|_| Err(AppError::internal("users table is locked")));
        repo.expect_ensure_directory().never();

        let seeder = Seeder::new(Arc::new(repo), empty_catalog());
        let result = seeder.seed(SeedOptions::default()).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_import_skips_failing_entries() {
        let mut repo = MockBootstrapRepository::new();
        // Language directories are written by ensure_language only.
        repo.expect_ensure_directory().never();
        repo.expect_ensure_language()
            .returning(|new, directory| {
                if new.code == "fr" {
                    Err(AppError::conflict("language 'fr' is locked"))
                } else {
                    Ok(language(new, directory))
                }
            });

        let mut broken = german();
        broken.pluralequation = Some("(n != ".to_string());
        let mut french = german();
        french.fullname = Some("French".to_string());
        let catalog = FixedCatalog(vec![
            ("de", Some(german())),
            ("xx", Some(broken)),
            ("yy", None),
            ("fr", Some(french)),
        ]);

        let seeder = Seeder::new(Arc::new(repo), Arc::new(catalog));
        let root = directory(NewDirectory::root());
        assert_eq!(root.pootle_path, ROOT_PATH);

        let mut report = SeedReport::default();
        seeder.import_languages(&root, &mut report).await;

        let import = &report.language_import;
        assert_eq!(import.created, 1);
        assert_eq!(import.existing, 0);
        let skipped: Vec<_> = import.skipped.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(skipped, vec!["xx", "yy", "fr"]);

        // Only /de/ was stored; the failed fr entry counts no directory.
        assert_eq!(report.directories, Tally { created: 1, existing: 0 });
        assert_eq!(report.created(), 2);
    }

    #[tokio::test]
    async fn test_import_counts_existing_directories() {
        let mut repo = MockBootstrapRepository::new();
        repo.expect_ensure_language().times(1).returning(|new, directory| {
            let (directory, language) = language(new, directory);
            Ok((
                Ensured::existing(directory.into_record()),
                Ensured::existing(language.into_record()),
            ))
        });

        let catalog = FixedCatalog(vec![("de", Some(german()))]);
        let seeder = Seeder::new(Arc::new(repo), Arc::new(catalog));
        let mut report = SeedReport::default();
        seeder
            .import_languages(&directory(NewDirectory::root()), &mut report)
            .await;

        assert_eq!(report.language_import.existing, 1);
        assert_eq!(report.directories, Tally { created: 0, existing: 1 });
        assert_eq!(report.created(), 0);
    }
}
