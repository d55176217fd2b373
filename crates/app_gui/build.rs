use std::env;

fn main() {
    let version = env::var("PLANT_CLASSIFIER_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rerun-if-env-changed=PLANT_CLASSIFIER_VERSION");
    println!("cargo:rustc-env=PLANT_CLASSIFIER_VERSION={version}");
}
