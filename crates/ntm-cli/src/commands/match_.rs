use std::path::PathBuf;

use miette::Result;

use ntm_ops::ops_inspect::match_paths;
use ntm_util::progress;

use super::Project;

pub fn exec(
    project: &Project,
    paths: &[PathBuf],
    modules: Vec<String>,
    no_symlinks: bool,
) -> Result<()> {
    let modules = project.modules(modules)?;
    let options = project.options(no_symlinks);

    let report = match_paths(project.dir(), &modules, options, paths)?;
    for entry in &report {
        let verdict = if entry.transpiled { "transpile" } else { "skip" };
        println!("{verdict:<9} {}", entry.path.display());
    }

    let transpiled = report.iter().filter(|m| m.transpiled).count();
    progress::status_info("Matched", &format!("{transpiled} of {} file(s)", report.len()));
    Ok(())
}
