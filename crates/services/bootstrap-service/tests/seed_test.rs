//! Seeder integration tests.
//!
//! Every test runs the seeder against a fresh in-memory SQLite database with
//! all migrations applied.

use std::sync::Arc;

use sea_orm::{ColumnTrait, Condition, DatabaseConnection};

use bootstrap_service_lib::catalog::{BuiltinCatalog, JsonCatalog, LanguageCatalog};
use bootstrap_service_lib::infra::Database;
use bootstrap_service_lib::repository::entities::{
    directory, language, permission, permission_set, project, revision, static_page, user,
};
use bootstrap_service_lib::repository::{count_where, BootstrapRepository, BootstrapStore};
use bootstrap_service_lib::service::{SeedOptions, Seeder};
use domain::{NewDirectory, NewLanguage, Password, PermissionSet};

// =============================================================================
// Helpers
// =============================================================================

const CATALOG: &str = r#"{
    "big": {"name": "Too many forms to store", "nplurals": 3000000000, "plural": "0"},
    "de": {"name": "German", "nplurals": 2, "plural": "(n != 1)", "specialchars": "äöüß"},
    "en": {"name": "English", "nplurals": 2, "plural": "(n != 1)"},
    "fr": {"name": "French", "nplurals": 2, "plural": "(n > 1)"},
    "xx": {"name": "Broken", "nplurals": 2, "plural": "(n != "},
    "yy": {"name": "Too few forms", "nplurals": 1, "plural": "(n != 1)"},
    "zz": {"nplurals": 1, "plural": "0"}
}"#;

struct Harness {
    conn: DatabaseConnection,
    repo: Arc<dyn BootstrapRepository>,
}

impl Harness {
    async fn new() -> Self {
        let db = Database::connect_url("sqlite::memory:").await.unwrap();
        let conn = db.get_connection();
        let repo: Arc<dyn BootstrapRepository> = Arc::new(BootstrapStore::new(conn.clone()));
        Self { conn, repo }
    }

    fn seeder(&self, catalog: Arc<dyn LanguageCatalog>) -> Seeder {
        Seeder::new(self.repo.clone(), catalog)
    }

    fn json_seeder(&self) -> Seeder {
        self.seeder(Arc::new(JsonCatalog::from_json(CATALOG).unwrap()))
    }

    async fn count<E>(&self) -> u64
    where
        E: sea_orm::EntityTrait,
        E::Model: Sync,
    {
        count_where::<_, E>(&self.conn, Condition::all()).await.unwrap()
    }

    async fn permission_set(&self, username: &str, path: &str) -> PermissionSet {
        let user = self.repo.find_user_by_username(username).await.unwrap().unwrap();
        let directory = self.repo.find_directory_by_path(path).await.unwrap().unwrap();
        self.repo
            .find_permission_set(user.id, directory.id)
            .await
            .unwrap()
            .unwrap()
    }
}

// =============================================================================
// Full run
// =============================================================================

#[tokio::test]
async fn test_seed_creates_required_records() {
    let h = Harness::new().await;
    let report = h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    assert!(report.revision_initialized);
    assert_eq!(report.users.created, 3);
    assert_eq!(report.permissions.created, 6);
    assert_eq!(report.permission_sets.created, 4);
    assert_eq!(report.projects.created, 2);
    assert_eq!(report.announcements.created, 1);

    assert_eq!(h.count::<user::Entity>().await, 3);
    assert_eq!(h.count::<permission::Entity>().await, 6);
    assert_eq!(h.count::<permission_set::Entity>().await, 4);
    assert_eq!(h.count::<project::Entity>().await, 2);
    assert_eq!(h.count::<static_page::Entity>().await, 1);
    assert_eq!(h.count::<revision::Entity>().await, 1);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let h = Harness::new().await;
    let seeder = h.json_seeder();
    let first = seeder.seed(SeedOptions::default()).await.unwrap();
    let directories = h.count::<directory::Entity>().await;
    let languages = h.count::<language::Entity>().await;

    let second = seeder.seed(SeedOptions::default()).await.unwrap();

    assert!(first.created() > 0);
    assert_eq!(second.created(), 0);
    assert!(!second.revision_initialized);
    assert_eq!(second.users.existing, 3);
    assert_eq!(second.permission_sets.existing, 4);
    assert_eq!(second.language_import.existing, first.language_import.created + 1);
    assert_eq!(second.language_import.skipped, first.language_import.skipped);

    assert_eq!(h.count::<user::Entity>().await, 3);
    assert_eq!(h.count::<permission::Entity>().await, 6);
    assert_eq!(h.count::<permission_set::Entity>().await, 4);
    assert_eq!(h.count::<directory::Entity>().await, directories);
    assert_eq!(h.count::<language::Entity>().await, languages);
}

#[tokio::test]
async fn test_seed_without_projects() {
    let h = Harness::new().await;
    let report = h
        .json_seeder()
        .seed(SeedOptions {
            create_projects: false,
        })
        .await
        .unwrap();

    assert_eq!(report.projects.total(), 0);
    assert_eq!(h.count::<project::Entity>().await, 0);
    assert_eq!(h.count::<static_page::Entity>().await, 0);
    assert_eq!(h.count::<permission_set::Entity>().await, 4);
    assert!(h.repo.find_language_by_code("de").await.unwrap().is_some());
}

// =============================================================================
// Users and permissions
// =============================================================================

#[tokio::test]
async fn test_service_users_cannot_log_in() {
    let h = Harness::new().await;
    h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    for username in ["nobody", "default", "system"] {
        let user = h.repo.find_user_by_username(username).await.unwrap().unwrap();
        assert!(user.is_active);
        assert!(!user.has_usable_password(), "{} has a usable password", username);
    }

    let nobody = h.repo.find_user_by_username("nobody").await.unwrap().unwrap();
    let default = h.repo.find_user_by_username("default").await.unwrap().unwrap();
    assert_ne!(nobody.password_hash, default.password_hash);
}

#[tokio::test]
async fn test_default_permission_sets() {
    let h = Harness::new().await;
    h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    let nobody = h.permission_set("nobody", "/").await;
    assert_eq!(nobody.positive_permissions, vec!["suggest", "view"]);
    assert!(!nobody.grants("translate"));

    let default = h.permission_set("default", "/").await;
    assert_eq!(
        default.positive_permissions,
        vec!["suggest", "translate", "view"]
    );
    assert!(default.grants("translate"));
    assert!(!default.grants("administrate"));

    for username in ["nobody", "default"] {
        let templates = h.permission_set(username, "/templates/").await;
        assert!(!templates.grants("view"), "{} can view templates", username);
        assert!(templates.positive_permissions.is_empty());
    }
}

#[tokio::test]
async fn test_permissions_share_directory_content_type() {
    let h = Harness::new().await;
    h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    let view = count_where::<_, permission::Entity>(
        &h.conn,
        Condition::all().add(permission::Column::Codename.eq("view")),
    )
    .await
    .unwrap();
    assert_eq!(view, 1);

    let content_type = h
        .repo
        .ensure_content_type(domain::NewContentType::directory())
        .await
        .unwrap();
    assert!(!content_type.created);
    for codename in ["view", "hide", "suggest", "translate", "review", "administrate"] {
        let found = h
            .repo
            .find_permission(content_type.record.id, codename)
            .await
            .unwrap();
        assert!(found.is_some(), "missing permission {}", codename);
    }
}

// =============================================================================
// Tree, languages and projects
// =============================================================================

#[tokio::test]
async fn test_directory_tree() {
    let h = Harness::new().await;
    h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    let root = h.repo.find_directory_by_path("/").await.unwrap().unwrap();
    assert!(root.is_root());
    assert_eq!(root.name, "");

    let projects = h.repo.find_directory_by_path("/projects/").await.unwrap().unwrap();
    assert_eq!(projects.parent_id, Some(root.id));

    let templates = h.repo.find_directory_by_path("/templates/").await.unwrap().unwrap();
    assert_eq!(templates.parent_id, Some(root.id));

    let tutorial = h
        .repo
        .find_directory_by_path("/projects/tutorial/")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tutorial.parent_id, Some(projects.id));
}

#[tokio::test]
async fn test_template_languages() {
    let h = Harness::new().await;
    h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    let templates = h.repo.find_language_by_code("templates").await.unwrap().unwrap();
    assert!(templates.is_templates());
    assert_eq!(templates.nplurals, 0);

    let en = h.repo.find_language_by_code("en").await.unwrap().unwrap();
    assert_eq!(en.fullname, "English");
    assert_eq!(en.nplurals, 2);
    assert_eq!(en.pluralequation, "(n != 1)");
}

#[tokio::test]
async fn test_default_projects_and_announcement() {
    let h = Harness::new().await;
    h.json_seeder().seed(SeedOptions::default()).await.unwrap();
    let en = h.repo.find_language_by_code("en").await.unwrap().unwrap();

    let terminology = count_where::<_, project::Entity>(
        &h.conn,
        Condition::all()
            .add(project::Column::Code.eq("terminology"))
            .add(project::Column::Checkstyle.eq("terminology"))
            .add(project::Column::SourceLanguageId.eq(en.id)),
    )
    .await
    .unwrap();
    assert_eq!(terminology, 1);

    let tutorial = count_where::<_, project::Entity>(
        &h.conn,
        Condition::all()
            .add(project::Column::Code.eq("tutorial"))
            .add(project::Column::Checkstyle.eq("standard"))
            .add(project::Column::Localfiletype.eq("po"))
            .add(project::Column::Treestyle.eq("auto")),
    )
    .await
    .unwrap();
    assert_eq!(tutorial, 1);

    let page = h
        .repo
        .ensure_announcement(domain::NewAnnouncement::tutorial_instructions("tutorial"))
        .await
        .unwrap();
    assert!(!page.created);
    assert_eq!(page.record.virtual_path, "announcements/projects/tutorial");
    assert_eq!(page.record.title, "Project instructions");
    assert!(page.record.active);
}

#[tokio::test]
async fn test_existing_language_is_not_overwritten() {
    let h = Harness::new().await;
    let root = h.repo.ensure_directory(NewDirectory::root()).await.unwrap().record;
    let custom = NewLanguage::new("en", "English (house style)", 2, "(n != 1)", None).unwrap();
    h.repo
        .ensure_language(custom, NewDirectory::child_of(&root, "en").unwrap())
        .await
        .unwrap();

    let report = h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    assert_eq!(report.languages.created, 1);
    assert_eq!(report.languages.existing, 1);
    let en = h.repo.find_language_by_code("en").await.unwrap().unwrap();
    assert_eq!(en.fullname, "English (house style)");
}

#[tokio::test]
async fn test_revision_counter_is_kept() {
    let h = Harness::new().await;
    h.repo.initialize_revision().await.unwrap();

    let report = h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    assert!(!report.revision_initialized);
    assert_eq!(h.count::<revision::Entity>().await, 1);
}

// =============================================================================
// Bulk language import
// =============================================================================

#[tokio::test]
async fn test_import_skips_bad_entries() {
    let h = Harness::new().await;
    let report = h.json_seeder().seed(SeedOptions::default()).await.unwrap();
    let import = &report.language_import;

    // en already exists from the template languages
    assert_eq!(import.created, 2);
    assert_eq!(import.existing, 1);
    let skipped: Vec<_> = import.skipped.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(skipped, vec!["big", "xx", "yy", "zz"]);

    let de = h.repo.find_language_by_code("de").await.unwrap().unwrap();
    assert_eq!(de.specialchars.as_deref(), Some("äöüß"));
    let de_dir = h.repo.find_directory_by_path("/de/").await.unwrap().unwrap();
    assert_eq!(de.directory_id, de_dir.id);

    // big resolves but cannot be stored; its directory is rolled back too
    for code in ["big", "xx", "yy", "zz"] {
        assert!(h.repo.find_language_by_code(code).await.unwrap().is_none());
        let path = format!("/{}/", code);
        assert!(h.repo.find_directory_by_path(&path).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_import_counts_language_directories() {
    let h = Harness::new().await;
    let report = h
        .json_seeder()
        .seed(SeedOptions {
            create_projects: false,
        })
        .await
        .unwrap();

    // root, projects, templates, en, then de and fr from the import
    assert_eq!(report.directories.created, 6);
    // en is met again by the import
    assert_eq!(report.directories.existing, 1);
    assert_eq!(
        h.count::<directory::Entity>().await,
        u64::from(report.directories.created)
    );
}

#[tokio::test]
async fn test_failed_language_leaves_no_directory() {
    let h = Harness::new().await;
    let root = h.repo.ensure_directory(NewDirectory::root()).await.unwrap().record;
    let huge = NewLanguage::new("big", "Too many forms to store", 3_000_000_000, "0", None).unwrap();

    let result = h
        .repo
        .ensure_language(huge, NewDirectory::child_of(&root, "big").unwrap())
        .await;

    assert!(result.is_err());
    assert!(h.repo.find_directory_by_path("/big/").await.unwrap().is_none());
    assert_eq!(h.count::<directory::Entity>().await, 1);
}

#[tokio::test]
async fn test_import_builtin_catalog() {
    let h = Harness::new().await;
    let catalog = BuiltinCatalog::new();
    let report = h
        .seeder(Arc::new(catalog))
        .seed(SeedOptions {
            create_projects: false,
        })
        .await
        .unwrap();

    assert!(report.language_import.skipped.is_empty());
    // templates is the only language outside the catalog
    assert_eq!(
        h.count::<language::Entity>().await,
        catalog.len() as u64 + 1
    );
}

#[tokio::test]
async fn test_seeded_users_hold_unusable_marker() {
    let h = Harness::new().await;
    h.json_seeder().seed(SeedOptions::default()).await.unwrap();

    let system = h.repo.find_user_by_username("system").await.unwrap().unwrap();
    assert!(!Password::from_hash(system.password_hash).is_usable());
}
