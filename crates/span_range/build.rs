use std::{env, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    println!("cargo:rerun-if-changed=../../proto/range_config.proto");
    tonic_build::configure()
        .build_client(false)
        .build_server(false)
        .file_descriptor_set_path(out_dir.join("range_config_descriptor.bin"))
        .compile_protos(&["../../proto/range_config.proto"], &["../../proto"])?;
    Ok(())
}
