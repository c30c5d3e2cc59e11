use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use ntm_resolver::{PackageRootResolver, RootResolve};
use ntm_util::errors::NtmError;
use tempfile::TempDir;

/// A project directory with a canonical path, so results compare equal
/// regardless of symlinked temp roots.
fn project() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    write(&root.join("package.json"), r#"{"name":"app"}"#);
    (tmp, root)
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn install(project: &Path, name: &str, manifest: &str, files: &[&str]) -> PathBuf {
    let dir = project.join("node_modules").join(name);
    write(&dir.join("package.json"), manifest);
    for file in files {
        write(&dir.join(file), "module.exports = {};");
    }
    dir
}

#[test]
fn test_resolves_package_via_main() {
    let (_tmp, root) = project();
    let pkg = install(&root, "shared", r#"{"main":"dist/index.js"}"#, &["dist/index.js"]);

    let resolved = PackageRootResolver::new(&root).resolve("shared").unwrap();
    assert_eq!(resolved, pkg);
    assert!(resolved.join("package.json").is_file());
}

#[test]
fn test_resolves_scoped_package_and_subpath() {
    let (_tmp, root) = project();
    let pkg = install(
        &root,
        "@acme/ui",
        r#"{"name":"@acme/ui"}"#,
        &["index.js", "button/index.tsx"],
    );

    let resolver = PackageRootResolver::new(&root);
    assert_eq!(resolver.resolve("@acme/ui").unwrap(), pkg);
    assert_eq!(resolver.resolve("@acme/ui/button").unwrap(), pkg);
}

#[test]
fn test_main_fields_fall_through_in_order() {
    let (_tmp, root) = project();
    let pkg = install(
        &root,
        "esm-only",
        r#"{"main":"missing.js","module":"esm/entry","source":"src/index.ts"}"#,
        &["esm/entry.mjs"],
    );

    assert_eq!(PackageRootResolver::new(&root).resolve("esm-only").unwrap(), pkg);
}

#[test]
fn test_source_field_and_style_extensions() {
    let (_tmp, root) = project();
    let pkg = root.join("node_modules").join("theme");
    write(&pkg.join("package.json"), r#"{"source":"styles/main"}"#);
    write(&pkg.join("styles/main.scss"), "$c: red;");

    assert_eq!(PackageRootResolver::new(&root).resolve("theme").unwrap(), pkg);
}

#[test]
fn test_exports_require_condition() {
    let (_tmp, root) = project();
    let pkg = install(
        &root,
        "dual",
        r#"{"exports":{".":{"import":"./esm/index.mjs","require":"./cjs/index.js"},"./utils":"./cjs/utils.js"}}"#,
        &["cjs/index.js", "cjs/utils.js"],
    );

    let resolver = PackageRootResolver::new(&root);
    assert_eq!(resolver.resolve("dual").unwrap(), pkg);
    assert_eq!(resolver.resolve("dual/utils").unwrap(), pkg);
}

#[test]
fn test_unexported_subpath_is_a_resolution_error() {
    let (_tmp, root) = project();
    install(
        &root,
        "sealed",
        r#"{"exports":{".":"./index.js"}}"#,
        &["index.js", "internal.js"],
    );

    let err = PackageRootResolver::new(&root)
        .resolve("sealed/internal")
        .unwrap_err();
    assert!(matches!(err, NtmError::Resolution { .. }), "got: {err:?}");
}

#[test]
fn test_exports_targets_are_fully_specified() {
    let (_tmp, root) = project();
    install(
        &root,
        "bare-target",
        r#"{"exports":{".":"./cjs/index"}}"#,
        &["cjs/index.js"],
    );

    let err = PackageRootResolver::new(&root)
        .resolve("bare-target")
        .unwrap_err();
    assert!(matches!(err, NtmError::Resolution { .. }), "got: {err:?}");
    assert_eq!(err.specifier(), Some("bare-target"));
}

#[test]
fn test_missing_package_is_a_resolution_error() {
    let (_tmp, root) = project();

    let err = PackageRootResolver::new(&root)
        .resolve("does-not-exist")
        .unwrap_err();
    assert!(matches!(err, NtmError::Resolution { source: None, .. }));
    assert!(err.to_string().contains("\"does-not-exist\""));
}

#[test]
fn test_file_without_manifest_ancestor() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    write(&root.join("scripts/orphan.js"), "");

    let err = PackageRootResolver::new(&root)
        .resolve("./scripts/orphan")
        .unwrap_err();
    assert!(matches!(err, NtmError::ManifestNotFound { .. }), "got: {err:?}");
    assert_eq!(err.specifier(), Some("./scripts/orphan"));
}

#[test]
fn test_malformed_manifest_is_wrapped() {
    let (_tmp, root) = project();
    let dir = root.join("node_modules").join("broken");
    write(&dir.join("package.json"), "{ nope");
    write(&dir.join("index.js"), "");

    let err = PackageRootResolver::new(&root).resolve("broken").unwrap_err();
    match &err {
        NtmError::Resolution { specifier, source } => {
            assert_eq!(specifier, "broken");
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.source().is_some());
}

#[test]
fn test_walks_up_to_parent_node_modules() {
    let (_tmp, root) = project();
    let pkg = install(&root, "hoisted", "{}", &["index.js"]);
    let app = root.join("apps").join("web");
    fs::create_dir_all(&app).unwrap();

    assert_eq!(PackageRootResolver::new(&app).resolve("hoisted").unwrap(), pkg);
}

#[test]
fn test_nearest_manifest_wins() {
    let (_tmp, root) = project();
    let pkg = install(&root, "nested-type", r#"{"main":"lib/index.js"}"#, &["lib/index.js"]);
    write(&pkg.join("lib/package.json"), r#"{"type":"commonjs"}"#);

    assert_eq!(
        PackageRootResolver::new(&root).resolve("nested-type").unwrap(),
        pkg.join("lib")
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let (_tmp, root) = project();
    install(&root, "stable", "{}", &["index.js"]);

    let resolver = PackageRootResolver::new(&root);
    let first = resolver.resolve("stable").unwrap();
    let second = resolver.resolve("stable").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_closures_implement_root_resolve() {
    let fixed = |specifier: &str| -> Result<PathBuf, NtmError> {
        Ok(PathBuf::from("/fixed").join(specifier))
    };
    assert_eq!(fixed.resolve_root("x").unwrap(), PathBuf::from("/fixed/x"));
}

#[cfg(unix)]
#[test]
fn test_relative_base_dir_yields_absolute_root() {
    let (_tmp, root) = project();
    let pkg = install(&root, "shared", "{}", &["index.js"]);

    // the same directory, spelled relative to the process working directory
    let cwd = std::env::current_dir().unwrap();
    let up: PathBuf = cwd.components().skip(1).map(|_| "..").collect();
    let relative = up.join(root.strip_prefix("/").unwrap());
    assert!(relative.is_relative());

    let resolved = PackageRootResolver::new(&relative)
        .with_symlinks(false)
        .resolve("shared")
        .unwrap();
    assert!(resolved.is_absolute());
    assert_eq!(resolved, pkg);
}

#[cfg(unix)]
mod symlinks {
    use super::*;
    use std::os::unix::fs::symlink;

    fn linked_project() -> (TempDir, PathBuf, PathBuf) {
        let (tmp, root) = project();
        let real = root.join("packages").join("design");
        write(&real.join("package.json"), r#"{"name":"design","main":"index.js"}"#);
        write(&real.join("index.js"), "");
        fs::create_dir_all(root.join("node_modules")).unwrap();
        symlink(&real, root.join("node_modules").join("design")).unwrap();
        install(&root, "plain", "{}", &["index.js"]);
        (tmp, root, real)
    }

    #[test]
    fn test_following_symlinks_returns_real_location() {
        let (_tmp, root, real) = linked_project();
        let resolver = PackageRootResolver::new(&root).with_symlinks(true);
        assert!(resolver.resolves_symlinks());
        assert_eq!(resolver.resolve("design").unwrap(), real);
    }

    #[test]
    fn test_preserving_symlinks_returns_link_location() {
        let (_tmp, root, _real) = linked_project();
        let resolver = PackageRootResolver::new(&root).with_symlinks(false);
        assert!(!resolver.resolves_symlinks());
        assert_eq!(
            resolver.resolve("design").unwrap(),
            root.join("node_modules").join("design")
        );
    }

    #[test]
    fn test_policy_does_not_affect_plain_packages() {
        let (_tmp, root, _real) = linked_project();
        let follow = PackageRootResolver::new(&root).with_symlinks(true);
        let preserve = PackageRootResolver::new(&root).with_symlinks(false);
        assert_eq!(
            follow.resolve("plain").unwrap(),
            preserve.resolve("plain").unwrap()
        );
    }
}
