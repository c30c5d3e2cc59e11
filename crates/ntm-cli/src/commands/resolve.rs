use miette::Result;

use ntm_ops::ops_inspect::resolve_modules;
use ntm_util::progress;

use super::Project;

pub fn exec(project: &Project, modules: Vec<String>, no_symlinks: bool) -> Result<()> {
    let modules = project.modules(modules)?;
    let options = project.options(no_symlinks);

    let resolved = resolve_modules(project.dir(), &modules, options.resolve_symlinks)?;
    for module in &resolved {
        println!("{} -> {}", module.name, module.root.display());
    }

    progress::status("Resolved", &format!("{} module(s)", resolved.len()));
    Ok(())
}
