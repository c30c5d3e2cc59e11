//! Operation: wire a set of packages into the framework's bundler
//! configuration so they go through the same loader as application code.

use std::path::PathBuf;
use std::sync::Arc;

use ntm_core::bundler::{
    BuildContext, BundlerConfig, Condition, Issuer, NextConfig, Rule, WebpackHook,
};
use ntm_core::config::TranspileOptions;
use ntm_core::matcher::{build_matcher, PathPredicate};
use ntm_core::pattern::{regex_equal, Pattern};
use ntm_resolver::{PackageRootResolver, RootResolve};
use ntm_util::errors::NtmError;
use ntm_util::logger::{self, Logger};

/// Source files handed to the framework's default loader.
const SCRIPT_TEST: &str = r"\.+(js|jsx|mjs|ts|tsx)$";
/// Test of the framework's CSS-module rule.
const CSS_MODULE_TEST: &str = r"\.module\.css$";
/// Test of the framework's Sass-module rule.
const SASS_MODULE_TEST: &str = r"\.module\.(scss|sass)$";

/// The framework's blanket watch exclusion, replaced by [`watch_glob`].
pub const NODE_MODULES_WATCH: &str = "**/node_modules/**";

/// Module type forcing the bundler to parse transpiled output as plain JavaScript.
const JAVASCRIPT_AUTO: &str = "javascript/auto";

/// Watch exclusion for everything under `node_modules` except `modules`.
///
/// ```
/// assert_eq!(
///     ntm_ops::watch_glob(&["ui", "@acme/core"]),
///     "**node_modules/{!(ui),!(@acme/core)}/**/*"
/// );
/// ```
pub fn watch_glob<S: AsRef<str>>(modules: &[S]) -> String {
    let excluded: Vec<String> = modules
        .iter()
        .map(|m| format!("!({})", m.as_ref()))
        .collect();
    format!("**node_modules/{{{}}}/**/*", excluded.join(","))
}

/// Packages to transpile, and how to find them.
pub struct TranspileModules {
    modules: Vec<String>,
    options: TranspileOptions,
    resolver: Arc<dyn RootResolve + Send + Sync>,
    logger: Arc<dyn Logger>,
}

impl TranspileModules {
    /// Transpile `modules`, resolving them from `base_dir` with the default
    /// resolver. Messages go through a [`logger::DebugLogger`] honouring
    /// `options.debug`.
    pub fn new<S: Into<String>>(
        modules: impl IntoIterator<Item = S>,
        options: TranspileOptions,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        let resolver =
            PackageRootResolver::new(base_dir).with_symlinks(options.resolve_symlinks);
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
            options,
            resolver: Arc::new(resolver),
            logger: logger::create_logger(options.debug),
        }
    }

    /// Replace the module-to-root lookup, e.g. for Plug'n'Play installs.
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: RootResolve + Send + Sync + 'static,
    {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn options(&self) -> TranspileOptions {
        self.options
    }

    /// Resolve every module and build the patch applied to the bundler
    /// configuration. Fails on the first module that cannot be resolved.
    pub fn patch(&self, webpack5: bool) -> Result<ConfigPatch, NtmError> {
        let roots = self
            .modules
            .iter()
            .map(|m| self.resolver.resolve_root(m))
            .collect::<Result<Vec<_>, _>>()?;

        if webpack5 {
            self.logger.warn("experimental Webpack 5 support enabled");
        }
        self.logger.debug(&format!(
            "the following paths will get transpiled:\n{}",
            list_paths(&roots)
        ));

        Ok(ConfigPatch {
            matcher: build_matcher(roots, Arc::clone(&self.logger)),
            modules: self.modules.clone(),
            resolve_symlinks: self.options.resolve_symlinks,
            webpack5,
            script_test: Pattern::new(SCRIPT_TEST, "")?,
            css_module_test: Pattern::new(CSS_MODULE_TEST, "")?,
            sass_module_test: Pattern::new(SASS_MODULE_TEST, "")?,
            logger: Arc::clone(&self.logger),
        })
    }

    /// Wrap the framework configuration.
    ///
    /// With no modules `next` comes back unchanged. Otherwise every module is
    /// resolved now, and the returned configuration's webpack hook applies the
    /// [`ConfigPatch`] before handing over to the hook `next` already had.
    pub fn wrap(&self, next: NextConfig) -> Result<NextConfig, NtmError> {
        if self.modules.is_empty() {
            return Ok(next);
        }

        let patch = self.patch(next.future.webpack5)?;
        let user_hook = next.webpack.clone();
        let hook: WebpackHook = Arc::new(
            move |config: BundlerConfig, ctx: &BuildContext| -> Result<BundlerConfig, NtmError> {
                let config = patch.apply(config, ctx);
                match &user_hook {
                    Some(hook) => hook(config, ctx),
                    None => Ok(config),
                }
            },
        );

        Ok(NextConfig {
            webpack: Some(hook),
            ..next
        })
    }
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The edits made to a bundler configuration for a resolved set of packages.
#[derive(Clone)]
pub struct ConfigPatch {
    matcher: PathPredicate,
    modules: Vec<String>,
    resolve_symlinks: bool,
    webpack5: bool,
    script_test: Pattern,
    css_module_test: Pattern,
    sass_module_test: Pattern,
    logger: Arc<dyn Logger>,
}

impl ConfigPatch {
    /// Apply the patch:
    ///
    /// 1. set `resolve.symlinks`;
    /// 2. append a rule sending matching scripts through the default loader;
    /// 3. let the CSS and Sass module rules accept imports from the packages;
    /// 4. stop ignoring the packages in watch mode.
    pub fn apply(&self, mut config: BundlerConfig, ctx: &BuildContext) -> BundlerConfig {
        config.resolve.symlinks = Some(self.resolve_symlinks);

        let mut rule = Rule {
            test: Some(self.script_test.clone().into()),
            loader: Some(ctx.default_loaders.babel.clone()),
            include: Some(self.condition()),
            ..Rule::default()
        };
        if self.webpack5 {
            rule.module_type = Some(JAVASCRIPT_AUTO.to_string());
            if !self.resolve_symlinks {
                // managed paths would hide edits to symlinked packages
                let snapshot = config.snapshot.get_or_insert_with(Default::default);
                snapshot.managed_paths.clear();
            }
        }
        config.module.rules.push(rule);

        if let Some(one_of) = config.module.rules.iter_mut().find_map(|r| r.one_of.as_mut()) {
            self.patch_style_rule(one_of, &self.css_module_test, "CSS");
            self.patch_style_rule(one_of, &self.sass_module_test, "SASS");
        }

        let ignored = &mut config.watch_options.ignored;
        ignored.retain(|p| p != NODE_MODULES_WATCH);
        ignored.push(watch_glob(&self.modules));

        config
    }

    fn condition(&self) -> Condition {
        Condition::predicate(Arc::clone(&self.matcher))
    }

    fn patch_style_rule(&self, rules: &mut [Rule], test: &Pattern, kind: &str) {
        let expected = Condition::Pattern(test.clone());
        let found = rules.iter_mut().find(|r| {
            r.side_effects == Some(false)
                && r.test.as_ref().is_some_and(|t| regex_equal(t, &expected))
        });

        let Some(rule) = found else {
            self.logger.warn(&format!(
                "could not find default {kind} rule, {kind} imports may not work"
            ));
            return;
        };

        let issuer = rule.issuer.get_or_insert_with(Issuer::default);
        let mut or = issuer.and.take().unwrap_or_default();
        or.push(self.condition());
        issuer.or = Some(or);
        issuer.not = None;
        tracing::debug!("patched issuer of the {kind} module rule");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_glob_single_module() {
        assert_eq!(watch_glob(&["ui"]), "**node_modules/{!(ui)}/**/*");
    }

    #[test]
    fn new_uses_symlink_option_for_resolver() {
        let options = TranspileOptions {
            resolve_symlinks: false,
            debug: true,
        };
        let tm = TranspileModules::new(["a", "b"], options, "/repo");
        assert_eq!(tm.modules(), ["a", "b"]);
        assert_eq!(tm.options(), options);
    }
}
