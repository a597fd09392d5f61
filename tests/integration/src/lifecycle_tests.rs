//! Package lifecycle scenarios
//!
//! Each test drives several operations in a row against one install root,
//! the way a package manager would over the life of a deployment.

use modsync_core::{
    DirectoryFetcher, Error, InstallContext, Package, Settings, SyncEngine, Warning,
};
use modsync_fs::NormalizedPath;
use modsync_test_utils::{PackageSource, TestRoot};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn context(root: &TestRoot) -> InstallContext {
    let root_path = NormalizedPath::new(root.path());
    let settings = Settings::load(&root_path).unwrap();
    InstallContext::new(root_path, settings)
}

fn engine(root: &TestRoot) -> SyncEngine<'static> {
    SyncEngine::new(context(root))
}

fn fetch(source: &PackageSource) -> DirectoryFetcher {
    DirectoryFetcher::new(source.path())
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn install_edit_update_remove() {
    let root = TestRoot::new();
    let blog = Package::new("blog").with_version("1.0.0");
    let source = PackageSource::with_files(&[
        ("lib/Blog.php", "<?php class Blog {}"),
        ("lib/Legacy/Old.php", "<?php class Old {}"),
        ("conf/app.ini", "debug=0"),
        ("public/style.css", "body {}"),
    ]);
    engine(&root).install(&blog, &fetch(&source)).unwrap();

    root.write("conf/app.ini", "debug=1");
    root.write("public/style.css", "body { color: red }");

    // 2.0.0: Blog changes, Old goes away, New arrives, app.ini changes
    let blog2 = Package::new("blog").with_version("2.0.0");
    source.file("lib/Blog.php", "<?php class Blog { /* 2 */ }");
    source.drop_file("lib/Legacy/Old.php");
    source.file("lib/New.php", "<?php class New {}");
    source.file("conf/app.ini", "debug=0\ncache=1");

    let report = engine(&root).update(&blog, &blog2, &fetch(&source)).unwrap();

    assert_eq!(report.written, vec!["lib/Blog.php", "lib/New.php"]);
    assert_eq!(report.unchanged, vec!["public/style.css"]);
    assert_eq!(report.kept_as_new, vec!["conf/app.ini"]);
    assert_eq!(report.deleted, vec!["lib/Legacy/Old.php"]);
    root.assert_not_exists("lib/Legacy");
    root.assert_file_contains("public/style.css", "color: red");
    root.assert_file_contains("conf/app.ini", "debug=1");
    root.assert_file_contains("conf/app.ini.new", "cache=1");

    let report = engine(&root).remove(&blog2).unwrap();

    assert_eq!(report.deleted, vec!["lib/Blog.php", "lib/New.php"]);
    assert_eq!(report.skipped, vec!["public/style.css"]);
    root.assert_not_exists("lib");
    // Never tracked, never ours to delete
    root.assert_file_exists("conf/app.ini");
    root.assert_file_exists("conf/app.ini.new");
    root.assert_file_exists("public/style.css");
    root.assert_not_exists("var/lib/modsync/blog.json");
}

#[test]
fn packages_sharing_a_directory() {
    let root = TestRoot::new();
    let blog = PackageSource::with_files(&[("lib/Shared/blog.php", "<?php // blog")]);
    let shop = PackageSource::with_files(&[("lib/Shared/shop.php", "<?php // shop")]);
    engine(&root).install(&Package::new("blog"), &fetch(&blog)).unwrap();
    engine(&root).install(&Package::new("shop"), &fetch(&shop)).unwrap();

    let report = engine(&root).remove(&Package::new("blog")).unwrap();

    assert!(report.pruned_dirs.iter().all(|d| !d.starts_with("lib")));
    root.assert_file_exists("lib/Shared/shop.php");

    let report = engine(&root).remove(&Package::new("shop")).unwrap();

    assert!(report.pruned_dirs.contains(&"lib/Shared".to_string()));
    assert!(report.pruned_dirs.contains(&"lib".to_string()));
    root.assert_not_exists("lib");
}

#[test]
fn settings_file_moves_storage() {
    let root = TestRoot::new();
    root.write_settings(
        "db-dir = \"state/db\"\nstaging-dir = \"state/tmp\"\nsource-subdir = \"files\"\n",
    );
    let checkout = TestRoot::new();
    checkout.write("files/bin/run.sh", "#!/bin/sh");
    checkout.write("README", "not installed");

    engine(&root)
        .install(&Package::new("blog"), &DirectoryFetcher::new(checkout.path()))
        .unwrap();

    root.assert_file_exists("bin/run.sh");
    root.assert_not_exists("README");
    root.assert_file_exists("state/db/blog.json");
    root.assert_not_exists("state/tmp/blog");
    root.assert_not_exists("var");
}

#[test]
fn tampered_baseline_is_refused() {
    let root = TestRoot::new();
    let source = PackageSource::with_files(&[("lib/Blog.php", "<?php")]);
    engine(&root).install(&Package::new("blog"), &fetch(&source)).unwrap();

    let record = r#"{ "../outside.txt": { "size": 1, "md5sum": "00" } }"#;
    root.write("var/lib/modsync/blog.json", record);

    let result = engine(&root).remove(&Package::new("blog"));

    assert!(matches!(result, Err(Error::InvalidBaseline { .. })));
    root.assert_file_exists("lib/Blog.php");
    root.assert_file_exists("var/lib/modsync/blog.json");
}

#[test]
fn update_after_lost_baseline_leaves_residue() {
    let root = TestRoot::new();
    root.write("lib/Residual.php", "<?php // from a lost install");
    let source = PackageSource::with_files(&[("lib/Blog.php", "<?php")]);

    let report = engine(&root)
        .update(&Package::new("blog"), &Package::new("blog"), &fetch(&source))
        .unwrap();

    assert!(matches!(report.warnings[..], [Warning::BaselineMissing { .. }]));
    root.assert_file_exists("lib/Residual.php");
    root.assert_file_exists("lib/Blog.php");

    // The fresh baseline covers only what this update installed
    let baseline = engine(&root).store().load("blog").unwrap();
    assert_eq!(baseline.paths().collect::<Vec<_>>(), vec!["lib/Blog.php"]);
}

#[test]
fn update_under_new_name_moves_the_record() {
    let root = TestRoot::new();
    let source = PackageSource::with_files(&[("lib/Blog.php", "<?php"), ("lib/Old.php", "<?php")]);
    let old = Package::new("acme/blog");
    engine(&root).install(&old, &fetch(&source)).unwrap();

    source.drop_file("lib/Old.php");
    let new = Package::new("acme/weblog");
    let report = engine(&root).update(&old, &new, &fetch(&source)).unwrap();

    assert_eq!(report.deleted, vec!["lib/Old.php"]);
    root.assert_file_exists("var/lib/modsync/acme/weblog.json");
    root.assert_not_exists("var/lib/modsync/acme/blog.json");
    root.assert_file_exists("lib/Blog.php");
}
