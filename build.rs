use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

/// Files the default configuration loads from `assets/`.
const STOCK_ASSETS: [&str; 3] = ["roomModel.glb", "baked.jpg", "lightMap.jpg"];

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets/*");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    if !assets_src.exists() {
        return Ok(());
    }
    for name in STOCK_ASSETS {
        if !assets_src.join(name).exists() {
            println!("cargo:warning=assets/{name} is missing; the default room will not load");
        }
    }

    // bundled next to the build output for web hosts serving OUT_DIR
    let out_dir = env::var("OUT_DIR")?;
    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    copy_items(&["assets/"], out_dir, &copy_options)?;

    Ok(())
}
