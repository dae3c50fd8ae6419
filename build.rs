fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("src/generated")?;

    tonic_build::configure()
        .out_dir("src/generated")
        .build_server(false)
        .compile_protos(
            &[
                "proto/google/rpc/status.proto",
                "proto/google/firestore/v1/document.proto",
                "proto/google/firestore/v1/firestore.proto",
            ],
            &["proto"],
        )
        .unwrap_or_else(|e| panic!("protobuf compile error: {e}"));

    println!("cargo:rerun-if-changed=proto");
    Ok(())
}
