use miette::Result;

use ntm_ops::watch_glob;

use super::Project;

pub fn exec(project: &Project, modules: Vec<String>) -> Result<()> {
    let modules = project.modules(modules)?;
    println!("{}", watch_glob(&modules));
    Ok(())
}
