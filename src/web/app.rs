use crate::web::{login_page::LoginPage, state::AuthProvider};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <LoginPage />
        </AuthProvider>
    }
}
