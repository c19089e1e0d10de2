use std::env;
use std::fs;
use std::path::Path;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};
use vergen_gitcl::{Emitter as GitEmitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_timestamp(true).build()?;

    let cargo = CargoBuilder::default()
        .opt_level(true)
        .target_triple(true)
        .build()?;

    let rustc = RustcBuilder::default().semver(true).channel(true).build()?;

    // Git metadata is optional; build_info reads it with option_env!
    let gitcl = GitclBuilder::default()
        .sha(true)
        .branch(true)
        .dirty(true)
        .build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    GitEmitter::default().add_instructions(&gitcl)?.emit()?;

    copy_configs()?;

    Ok(())
}

/// Copies every profile in config/ to target/<profile>/config so binaries
/// find their configuration next to the executable
fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;

    // OUT_DIR is like: target/debug/build/jx3d-xxx/out
    let target_dir = Path::new(&out_dir)
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .ok_or("Could not determine target directory")?;

    let source_dir = Path::new("config");
    println!("cargo:rerun-if-changed=config");
    if !source_dir.exists() {
        return Ok(());
    }

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    for entry in fs::read_dir(source_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "toml")
            && let Some(name) = path.file_name()
        {
            fs::copy(&path, config_out_dir.join(name))?;
        }
    }

    Ok(())
}
