use std::env;
use std::path::PathBuf;

#[path = "src/build_env.rs"]
mod build_env;

use build_env::{FORWARDED, rerun_trigger, should_forward};

fn main() {
    for key in FORWARDED {
        println!("cargo:rerun-if-env-changed={key}");
    }

    // Workspace root, two levels above this crate.
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let dotenv = manifest_dir.join("../../.env");
    let dotenv_display = dotenv.display().to_string();
    println!(
        "cargo:rerun-if-changed={}",
        rerun_trigger(&dotenv_display, dotenv.exists())
    );

    let Ok(entries) = dotenvy::from_path_iter(&dotenv) else {
        return;
    };

    for entry in entries {
        let (key, value) = match entry {
            Ok(pair) => pair,
            Err(e) => panic!("failed to parse {}: {e}", dotenv.display()),
        };
        if should_forward(&key, env::var_os(&key).is_some()) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
