#[cfg(target_arch = "wasm32")]
fn main() {
    login_form::web::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {}
