// handlers/public/auth/mod.rs - Public authentication handlers
//
// Credential check for the parc-info web client. No authentication is
// required to reach these routes.

pub mod login; // POST /login, POST /api/login

pub use login::login;
