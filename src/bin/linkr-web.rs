#[cfg(target_arch = "wasm32")]
pub fn main() {
    linkr::web::mount();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
