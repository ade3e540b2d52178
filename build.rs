// Copyright 2023 Remi Bernotavicius

fn main() {
    // The migrations are embedded into the binary with `embed_migrations!`, so editing them must
    // trigger a rebuild.
    println!("cargo:rerun-if-changed=migrations/");
}
